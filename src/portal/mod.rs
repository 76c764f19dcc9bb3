//! Captive portal: DNS answers and HTTP routes.
//!
//! Both halves are pure codecs; the sockets and the HTTP server live in
//! [`adapters`](crate::adapters).

pub mod dns;
pub mod routes;

/// Dashboard page served at `/`. Polls `/readings` once per second.
pub const DASHBOARD_HTML: &str = include_str!("dashboard.html");
