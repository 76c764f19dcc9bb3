//! Monitor service — the hexagonal core.
//!
//! [`MonitorService`] owns the status classifier and the write side of the
//! telemetry store. Each [`tick`](MonitorService::tick) runs the whole
//! derivation pipeline once:
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                 │        MonitorService        │
//! ActuatorPort ◀──│ derive · classify · publish  │ ──▶ TelemetryStore
//!                 └──────────────────────────────┘
//! ```
//!
//! The buzzer mirror is recomputed from scratch every tick: warning ⇒
//! configured duty, normal ⇒ 0. No debounce.

use log::{debug, info};

use crate::config::SystemConfig;
use crate::sensors;
use crate::telemetry::{StatusClassifier, SystemStatus, TelemetrySnapshot, TelemetryStore};

use super::events::AppEvent;
use super::ports::{AccessPointPort, ActuatorPort, EventSink, SensorPort};

// ───────────────────────────────────────────────────────────────
// MonitorService
// ───────────────────────────────────────────────────────────────

pub struct MonitorService {
    classifier: StatusClassifier,
    store: TelemetryStore,
    buzzer_enabled: bool,
    buzzer_duty: u8,
    last_status: Option<SystemStatus>,
    tick_count: u64,
}

impl MonitorService {
    /// Construct the service. `store` is the handle the transport layer
    /// reads from; the service is its only writer.
    pub fn new(config: &SystemConfig, store: TelemetryStore) -> Self {
        Self {
            classifier: StatusClassifier::new(config.temp_threshold_c, config.hysteresis_c),
            store,
            buzzer_enabled: config.buzzer_enabled,
            buzzer_duty: config.buzzer_duty_percent.min(100),
            last_status: None,
            tick_count: 0,
        }
    }

    pub fn start(&mut self, sink: &mut impl EventSink) {
        let threshold_c = self.classifier.threshold_c();
        sink.emit(&AppEvent::Started { threshold_c });
        info!("MonitorService started (threshold {:.1}\u{00b0}C)", threshold_c);
    }

    // ── Per-period orchestration ──────────────────────────────

    /// Run one sampling period: sample → derive → classify → buzzer →
    /// publish → emit.
    ///
    /// `hw` satisfies **both** [`SensorPort`] and [`ActuatorPort`].
    pub fn tick(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        ap: &impl AccessPointPort,
        sink: &mut impl EventSink,
    ) -> TelemetrySnapshot {
        self.tick_count += 1;

        let raw = hw.sample();
        let readings = sensors::derive(raw);
        debug!(
            "raw therm={} ldr={} -> {:.0} ohm",
            raw.thermistor, raw.photoresistor, readings.thermistor_ohms
        );

        let status = self.classifier.update(readings.temperature_c);
        let snapshot = TelemetrySnapshot {
            temperature_c: readings.temperature_c,
            light_percent: readings.light_percent,
            status,
        };

        hw.set_buzzer(self.buzzer_duty_for(status));
        self.store.publish(snapshot);

        if let Some(prev) = self.last_status {
            if prev != status {
                sink.emit(&AppEvent::StatusChanged {
                    from: prev,
                    to: status,
                });
            }
        }
        self.last_status = Some(status);

        sink.emit(&AppEvent::Reading {
            snapshot,
            clients: ap.client_count(),
        });

        snapshot
    }

    // ── Queries ───────────────────────────────────────────────

    /// Buzzer duty mirroring `status`.
    pub fn buzzer_duty_for(&self, status: SystemStatus) -> u8 {
        if self.buzzer_enabled && status.is_warning() {
            self.buzzer_duty
        } else {
            0
        }
    }

    /// Sampling periods completed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

// ───────────────────────────────────────────────────────────────
// SampleGate
// ───────────────────────────────────────────────────────────────

/// Elapsed-time gate for the sampling branch of the main loop.
///
/// Due on the first check, then whenever at least `interval_ms` has passed
/// since the last due check. Uses wrapping arithmetic on the uptime.
#[derive(Debug, Clone)]
pub struct SampleGate {
    interval_ms: u64,
    last_ms: Option<u64>,
}

impl SampleGate {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: u64::from(interval_ms),
            last_ms: None,
        }
    }

    pub fn due(&mut self, now_ms: u64) -> bool {
        let due = match self.last_ms {
            None => true,
            Some(last) => now_ms.wrapping_sub(last) >= self.interval_ms,
        };
        if due {
            self.last_ms = Some(now_ms);
        }
        due
    }
}
