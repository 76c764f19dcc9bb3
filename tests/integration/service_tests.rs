//! Integration tests for the MonitorService sampling pipeline.
//!
//! Raw codes go in through the mock SensorPort; assertions are made on the
//! published snapshot, the buzzer history, and the emitted events.

use super::mock_hw::{MockAccessPoint, MockHardware, RecordingSink};

use thermolight::app::events::AppEvent;
use thermolight::app::service::MonitorService;
use thermolight::config::SystemConfig;
use thermolight::telemetry::{StatusWording, SystemStatus, TelemetryStore};

fn make_service(config: &SystemConfig) -> (MonitorService, TelemetryStore, RecordingSink) {
    let store = TelemetryStore::new();
    let mut svc = MonitorService::new(config, store.clone());
    let mut sink = RecordingSink::new();
    svc.start(&mut sink);
    (svc, store, sink)
}

const AP: MockAccessPoint = MockAccessPoint { clients: 2 };

// ── End-to-end reference point ───────────────────────────────

#[test]
fn reference_reading_warns_at_default_threshold() {
    let config = SystemConfig::default();
    let (mut svc, store, mut sink) = make_service(&config);
    let mut hw = MockHardware::constant(1800, 500);

    let snap = svc.tick(&mut hw, &AP, &mut sink);

    let t = snap.temperature_c.unwrap();
    assert!((t - 30.57).abs() < 0.01, "got {t}");
    assert_eq!(snap.light_percent, 88);
    assert_eq!(snap.status, SystemStatus::HighTempWarning);
    assert_eq!(store.latest(), snap);

    let body = serde_json::to_value(snap.to_payload(config.status_wording)).unwrap();
    assert!(body["status"].as_str().unwrap().contains("WARNING"));
    assert_eq!(body["light"], 88);
}

#[test]
fn reference_reading_is_normal_with_higher_threshold() {
    let config = SystemConfig {
        temp_threshold_c: 32.5,
        status_wording: StatusWording::Terse,
        ..SystemConfig::default()
    };
    let (mut svc, store, mut sink) = make_service(&config);
    let mut hw = MockHardware::constant(1800, 500);

    svc.tick(&mut hw, &AP, &mut sink);

    let payload = store.latest().to_payload(config.status_wording);
    assert_eq!(payload.status.as_str(), "OK");
}

// ── Events ────────────────────────────────────────────────────

#[test]
fn start_then_one_reading_per_tick() {
    let (mut svc, _store, mut sink) = make_service(&SystemConfig::default());
    let mut hw = MockHardware::constant(2048, 2048);

    for _ in 0..5 {
        svc.tick(&mut hw, &AP, &mut sink);
    }

    assert!(matches!(sink.events[0], AppEvent::Started { threshold_c } if threshold_c == 30.0));
    assert_eq!(sink.readings(), 5);
    assert_eq!(sink.status_changes(), 0);
    assert_eq!(svc.tick_count(), 5);
    match sink.events.last() {
        Some(AppEvent::Reading { clients, .. }) => assert_eq!(*clients, 2),
        other => panic!("expected a Reading, got {:?}", other),
    }
}

#[test]
fn status_change_emitted_only_on_flip() {
    let (mut svc, _store, mut sink) = make_service(&SystemConfig::default());
    // normal, normal, hot, hot, normal
    let mut hw = MockHardware::new(&[(2048, 0), (2048, 0), (1500, 0), (1500, 0), (2048, 0)]);

    for _ in 0..5 {
        svc.tick(&mut hw, &AP, &mut sink);
    }

    let flips: Vec<_> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::StatusChanged { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        flips,
        vec![
            (SystemStatus::Normal, SystemStatus::HighTempWarning),
            (SystemStatus::HighTempWarning, SystemStatus::Normal),
        ]
    );
}

// ── Buzzer mirror ─────────────────────────────────────────────

#[test]
fn buzzer_follows_status_when_enabled() {
    let config = SystemConfig {
        buzzer_enabled: true,
        buzzer_duty_percent: 70,
        ..SystemConfig::default()
    };
    let (mut svc, _store, mut sink) = make_service(&config);
    let mut hw = MockHardware::new(&[(2048, 0), (1500, 0), (2048, 0)]);

    svc.tick(&mut hw, &AP, &mut sink);
    assert_eq!(hw.buzzer_duty(), 0);
    svc.tick(&mut hw, &AP, &mut sink);
    assert_eq!(hw.buzzer_duty(), 70);
    svc.tick(&mut hw, &AP, &mut sink);
    assert_eq!(hw.buzzer_duty(), 0);
}

#[test]
fn buzzer_stays_silent_when_disabled() {
    let (mut svc, _store, mut sink) = make_service(&SystemConfig::default());
    let mut hw = MockHardware::constant(1500, 0);
    svc.tick(&mut hw, &AP, &mut sink);
    assert!(hw.buzzer_calls.iter().all(|&d| d == 0));
}

// ── Classification edges ──────────────────────────────────────

#[test]
fn shorted_thermistor_publishes_null_and_warns() {
    let (mut svc, store, mut sink) = make_service(&SystemConfig::default());
    let mut hw = MockHardware::constant(4095, 4095);

    let snap = svc.tick(&mut hw, &AP, &mut sink);

    assert_eq!(snap.temperature_c, None);
    assert_eq!(snap.light_percent, 0);
    assert_eq!(snap.status, SystemStatus::HighTempWarning);
    let json = serde_json::to_string(&store.latest().to_payload(StatusWording::Verbose)).unwrap();
    assert!(json.starts_with(r#"{"temp":null,"light":0,"#), "{json}");
}

#[test]
fn open_thermistor_reads_cold() {
    let (mut svc, _store, mut sink) = make_service(&SystemConfig::default());
    let mut hw = MockHardware::constant(0, 0);
    let snap = svc.tick(&mut hw, &AP, &mut sink);
    let t = snap.temperature_c.unwrap();
    assert!((t + 51.9).abs() < 0.1, "got {t}");
    assert_eq!(snap.light_percent, 100);
    assert_eq!(snap.status, SystemStatus::Normal);
}

#[test]
fn memoryless_by_default() {
    let (mut svc, _store, mut sink) = make_service(&SystemConfig::default());
    // 30.57 °C then 29.42 °C
    let mut hw = MockHardware::new(&[(1800, 0), (1850, 0)]);
    assert!(svc.tick(&mut hw, &AP, &mut sink).status.is_warning());
    assert!(!svc.tick(&mut hw, &AP, &mut sink).status.is_warning());
}

#[test]
fn hysteresis_band_holds_warning() {
    let config = SystemConfig {
        hysteresis_c: 2.0,
        ..SystemConfig::default()
    };
    let (mut svc, _store, mut sink) = make_service(&config);
    // 30.57, 29.42, 28.28, 27.16 °C: clears only below 28.0
    let mut hw = MockHardware::new(&[(1800, 0), (1850, 0), (1900, 0), (1950, 0)]);

    let statuses: Vec<bool> = (0..4)
        .map(|_| svc.tick(&mut hw, &AP, &mut sink).status.is_warning())
        .collect();
    assert_eq!(statuses, vec![true, true, true, false]);
}

#[test]
fn pipeline_is_deterministic() {
    let config = SystemConfig::default();
    let (mut a, _, mut sink_a) = make_service(&config);
    let (mut b, _, mut sink_b) = make_service(&config);
    for raw in [0u16, 1, 500, 1800, 2048, 3000, 4094, 4095] {
        let mut hw_a = MockHardware::constant(raw, raw);
        let mut hw_b = MockHardware::constant(raw, raw);
        let sa = a.tick(&mut hw_a, &AP, &mut sink_a);
        let sb = b.tick(&mut hw_b, &AP, &mut sink_b);
        assert_eq!(
            sa.temperature_c.map(f32::to_bits),
            sb.temperature_c.map(f32::to_bits)
        );
        assert_eq!(sa.light_percent, sb.light_percent);
        assert_eq!(sa.status, sb.status);
    }
}
