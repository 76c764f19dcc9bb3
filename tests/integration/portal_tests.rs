//! HTTP contract tests: routing plus rendering against a live store.
//!
//! Mirrors what the ESP-IDF handlers do (route → latest snapshot →
//! respond) without the httpd task.

use super::mock_hw::{MockAccessPoint, MockHardware, RecordingSink};

use thermolight::app::service::MonitorService;
use thermolight::config::{RedirectTarget, SystemConfig};
use thermolight::portal::routes::{respond, route, HttpMethod, PortalConfig, Response, Route};
use thermolight::telemetry::{ReadingsPayload, TelemetryStore};

fn get(uri: &str, store: &TelemetryStore, portal: &PortalConfig) -> Response {
    respond(route(HttpMethod::Get, uri), &store.latest(), portal).unwrap()
}

#[test]
fn readings_reflect_latest_tick() {
    let config = SystemConfig::default();
    let portal = PortalConfig::from(&config);
    let store = TelemetryStore::new();
    let mut svc = MonitorService::new(&config, store.clone());
    let mut sink = RecordingSink::new();
    let ap = MockAccessPoint { clients: 1 };

    // Before the first tick readers see the default record.
    let r = get("/readings", &store, &portal);
    let before: ReadingsPayload = serde_json::from_slice(&r.body).unwrap();
    assert_eq!(before.temp, None);
    assert_eq!(before.status.as_str(), "System Normal");

    let mut hw = MockHardware::new(&[(2048, 1024), (1500, 3000)]);
    svc.tick(&mut hw, &ap, &mut sink);
    let first: ReadingsPayload = serde_json::from_slice(&get("/readings", &store, &portal).body).unwrap();
    assert_eq!(first.light, 75);
    assert!((first.temp.unwrap() - 24.99).abs() < 0.01);
    assert_eq!(first.status.as_str(), "System Normal");

    svc.tick(&mut hw, &ap, &mut sink);
    let second: ReadingsPayload = serde_json::from_slice(&get("/readings", &store, &portal).body).unwrap();
    assert_eq!(second.light, 27);
    assert!(second.status.contains("WARNING"));
}

#[test]
fn probe_urls_redirect_to_dashboard() {
    let store = TelemetryStore::new();
    let portal = PortalConfig::from(&SystemConfig::default());
    for uri in ["/generate_204", "/hotspot-detect.html", "/ncsi.txt", "/favicon.ico"] {
        let r = get(uri, &store, &portal);
        assert_eq!(r.status, 302, "{uri}");
        assert_eq!(r.location.as_deref(), Some("/"), "{uri}");
        assert!(r.body.is_empty());
    }
}

#[test]
fn hostname_variant_redirects_absolute() {
    let config = SystemConfig {
        redirect: RedirectTarget::Url(heapless::String::try_from("http://thermolight.portal/").unwrap()),
        ..SystemConfig::default()
    };
    assert!(config.validate().is_ok());
    let portal = PortalConfig::from(&config);
    let r = get("/anything", &TelemetryStore::new(), &portal);
    assert_eq!(r.location.as_deref(), Some("http://thermolight.portal/"));
}

#[test]
fn dashboard_and_readings_routes() {
    assert_eq!(route(HttpMethod::Get, "/"), Route::Dashboard);
    assert_eq!(route(HttpMethod::Get, "/readings"), Route::Readings);
    let r = get("/", &TelemetryStore::new(), &PortalConfig::from(&SystemConfig::default()));
    let html = String::from_utf8(r.body).unwrap();
    assert!(html.contains("WARNING"));
    assert!(html.contains("setInterval(poll, 1000)"));
}
