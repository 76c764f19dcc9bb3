//! HTTP routing, independent of the server implementation.
//!
//! `route` and `respond` are pure: the ESP-IDF handlers in
//! [`adapters::http_server`](crate::adapters) only copy the resulting
//! [`Response`] onto the connection.

use crate::config::{RedirectTarget, SystemConfig};
use crate::telemetry::{StatusWording, TelemetrySnapshot};

use super::DASHBOARD_HTML;

pub const CONTENT_TYPE_HTML: &str = "text/html; charset=utf-8";
pub const CONTENT_TYPE_JSON: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Head,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Readings,
    /// Anything else: send the client to the dashboard.
    Redirect,
}

/// Match a request line. The query string is ignored.
pub fn route(method: HttpMethod, uri: &str) -> Route {
    let path = uri.split_once('?').map_or(uri, |(p, _)| p);
    match (method, path) {
        (HttpMethod::Get | HttpMethod::Head, "/") => Route::Dashboard,
        (HttpMethod::Get | HttpMethod::Head, "/readings") => Route::Readings,
        _ => Route::Redirect,
    }
}

/// Per-server rendering options, copied out of [`SystemConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct PortalConfig {
    pub wording: StatusWording,
    pub redirect: RedirectTarget,
}

impl From<&SystemConfig> for PortalConfig {
    fn from(config: &SystemConfig) -> Self {
        Self {
            wording: config.status_wording,
            redirect: config.redirect.clone(),
        }
    }
}

/// Fully rendered response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub reason: &'static str,
    pub content_type: &'static str,
    pub location: Option<String>,
    pub body: Vec<u8>,
}

impl Response {
    /// Header list in the shape `into_response` takes.
    pub fn headers(&self) -> Vec<(&str, &str)> {
        let mut headers = vec![("Content-Type", self.content_type)];
        if let Some(location) = &self.location {
            headers.push(("Location", location.as_str()));
        }
        headers.push(("Cache-Control", "no-store"));
        headers
    }
}

/// Render `route` against the current snapshot.
pub fn respond(
    route: Route,
    snapshot: &TelemetrySnapshot,
    config: &PortalConfig,
) -> Result<Response, serde_json::Error> {
    let response = match route {
        Route::Dashboard => Response {
            status: 200,
            reason: "OK",
            content_type: CONTENT_TYPE_HTML,
            location: None,
            body: DASHBOARD_HTML.as_bytes().to_vec(),
        },
        Route::Readings => Response {
            status: 200,
            reason: "OK",
            content_type: CONTENT_TYPE_JSON,
            location: None,
            body: serde_json::to_vec(&snapshot.to_payload(config.wording))?,
        },
        Route::Redirect => Response {
            status: 302,
            reason: "Found",
            content_type: CONTENT_TYPE_HTML,
            location: Some(config.redirect.location().to_owned()),
            body: Vec::new(),
        },
    };
    Ok(response)
}
