//! Mock adapters for integration tests.
//!
//! Scripts raw ADC codes and records every actuator call so tests can
//! assert on the full history without touching real ADC/PWM registers.

use std::collections::VecDeque;

use thermolight::app::events::AppEvent;
use thermolight::app::ports::{AccessPointPort, ActuatorPort, EventSink, SensorPort};
use thermolight::sensors::RawSample;

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    /// Samples returned in order; the last one repeats once drained.
    script: VecDeque<RawSample>,
    last: RawSample,
    pub buzzer_calls: Vec<u8>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new(samples: &[(u16, u16)]) -> Self {
        let script: VecDeque<RawSample> = samples
            .iter()
            .map(|&(thermistor, photoresistor)| RawSample {
                thermistor,
                photoresistor,
            })
            .collect();
        Self {
            last: script.front().copied().unwrap_or_default(),
            script,
            buzzer_calls: Vec::new(),
        }
    }

    pub fn constant(thermistor: u16, photoresistor: u16) -> Self {
        Self::new(&[(thermistor, photoresistor)])
    }

    pub fn push(&mut self, thermistor: u16, photoresistor: u16) {
        self.script.push_back(RawSample {
            thermistor,
            photoresistor,
        });
    }

    pub fn buzzer_duty(&self) -> u8 {
        self.buzzer_calls.last().copied().unwrap_or(0)
    }
}

impl SensorPort for MockHardware {
    fn sample(&mut self) -> RawSample {
        if let Some(next) = self.script.pop_front() {
            self.last = next;
        }
        self.last
    }
}

impl ActuatorPort for MockHardware {
    fn set_buzzer(&mut self, duty: u8) {
        self.buzzer_calls.push(duty);
    }
}

// ── MockAccessPoint ───────────────────────────────────────────

pub struct MockAccessPoint {
    pub clients: u8,
}

impl AccessPointPort for MockAccessPoint {
    fn client_count(&self) -> u8 {
        self.clients
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status_changes(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::StatusChanged { .. }))
            .count()
    }

    pub fn readings(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::Reading { .. }))
            .count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
