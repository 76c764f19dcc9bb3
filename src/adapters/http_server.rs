//! Dashboard HTTP server (ESP-IDF only).
//!
//! Thin shell over [`EspHttpServer`]: every handler looks up the latest
//! snapshot, renders it with [`routes::respond`], and copies the result onto
//! the connection. Handlers run on the `httpd` task, concurrently with the
//! main loop.

use anyhow::anyhow;
use log::{error, info};

use esp_idf_svc::http::server::{Configuration, EspHttpConnection, EspHttpServer, Request};
use esp_idf_svc::http::Method;
use esp_idf_svc::io::Write;

use crate::error::CommsError;
use crate::portal::routes::{self, HttpMethod, PortalConfig, Route};
use crate::telemetry::TelemetryStore;

/// Running server. Dropping it unregisters the handlers and stops `httpd`.
pub struct PortalHttpServer {
    _server: EspHttpServer<'static>,
}

impl PortalHttpServer {
    pub fn start(
        port: u16,
        store: TelemetryStore,
        portal: PortalConfig,
    ) -> Result<Self, CommsError> {
        let conf = Configuration {
            http_port: port,
            uri_match_wildcard: true,
            stack_size: 8 * 1024,
            ..Default::default()
        };
        let mut server = EspHttpServer::new(&conf).map_err(|e| {
            error!("HTTP: server start failed: {:?}", e);
            CommsError::HttpServerStartFailed
        })?;

        // Registration order matters: the wildcard must come last.
        for (uri, fixed) in [
            ("/", Some(Route::Dashboard)),
            ("/readings", Some(Route::Readings)),
            ("/*", None),
        ] {
            let store = store.clone();
            let portal = portal.clone();
            server
                .fn_handler::<anyhow::Error, _>(uri, Method::Get, move |req| {
                    let route = fixed.unwrap_or_else(|| routes::route(HttpMethod::Get, req.uri()));
                    serve(req, route, &store, &portal)
                })
                .map_err(|e| {
                    error!("HTTP: register {} failed: {:?}", uri, e);
                    CommsError::HttpServerStartFailed
                })?;
        }

        info!("HTTP: listening on port {}", port);
        Ok(Self { _server: server })
    }
}

fn serve(
    req: Request<&mut EspHttpConnection<'_>>,
    route: Route,
    store: &TelemetryStore,
    portal: &PortalConfig,
) -> anyhow::Result<()> {
    let response = routes::respond(route, &store.latest(), portal)
        .map_err(|e| anyhow!("render {:?}: {}", route, e))?;
    let headers = response.headers();
    req.into_response(response.status, Some(response.reason), &headers)?
        .write_all(&response.body)?;
    Ok(())
}
