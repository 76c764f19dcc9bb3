//! Status classification and the process-wide telemetry record.
//!
//! [`TelemetrySnapshot`] is the latest `(temperature, light, status)` triple.
//! It has exactly one writer (the sampling branch of the main loop) and any
//! number of readers (HTTP handlers running on the `httpd` task), so it lives
//! behind a mutex in [`TelemetryStore`]. There is no history: every publish
//! overwrites the previous value.
//!
//! The status enum never reaches the wire directly. [`SystemStatus::wire_str`]
//! translates it to the fixed strings the dashboard matches on: a normal
//! status is exactly `"OK"` or `"System Normal"`, a warning always contains
//! `"WARNING"`.

use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

/// Wire string for a warning. Clients match on the `WARNING` substring.
pub const WARNING_WIRE: &str = "HIGH TEMP WARNING!";

// ───────────────────────────────────────────────────────────────
// Status
// ───────────────────────────────────────────────────────────────

/// Two-valued system status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SystemStatus {
    #[default]
    Normal,
    HighTempWarning,
}

/// How a normal status is spelled on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusWording {
    /// `"OK"`
    Terse,
    /// `"System Normal"`
    #[default]
    Verbose,
}

impl SystemStatus {
    pub fn is_warning(self) -> bool {
        self == Self::HighTempWarning
    }

    /// Fixed wire string for this status.
    pub fn wire_str(self, wording: StatusWording) -> &'static str {
        match (self, wording) {
            (Self::Normal, StatusWording::Terse) => "OK",
            (Self::Normal, StatusWording::Verbose) => "System Normal",
            (Self::HighTempWarning, _) => WARNING_WIRE,
        }
    }
}

/// Memoryless threshold rule: strictly above `threshold_c` is a warning.
///
/// A missing temperature (shorted thermistor, see
/// [`thermistor::temperature_c`](crate::sensors::thermistor::temperature_c))
/// classifies as a warning.
pub fn classify(temp_c: Option<f32>, threshold_c: f32) -> SystemStatus {
    match temp_c {
        Some(t) if t > threshold_c => SystemStatus::HighTempWarning,
        Some(_) => SystemStatus::Normal,
        None => SystemStatus::HighTempWarning,
    }
}

/// Threshold classifier with an optional hysteresis band.
///
/// With `hysteresis_c == 0.0` every call is exactly [`classify`]; the
/// previous status has no influence and a reading oscillating around the
/// threshold flaps on every sample. With a positive band, a warning only
/// clears once the temperature is at or below `threshold_c - hysteresis_c`.
#[derive(Debug, Clone)]
pub struct StatusClassifier {
    threshold_c: f32,
    hysteresis_c: f32,
    current: SystemStatus,
}

impl StatusClassifier {
    pub fn new(threshold_c: f32, hysteresis_c: f32) -> Self {
        Self {
            threshold_c,
            hysteresis_c: hysteresis_c.max(0.0),
            current: SystemStatus::Normal,
        }
    }

    pub fn threshold_c(&self) -> f32 {
        self.threshold_c
    }

    /// Classify a new reading and remember the result.
    pub fn update(&mut self, temp_c: Option<f32>) -> SystemStatus {
        let raw = classify(temp_c, self.threshold_c);
        self.current = match (self.current, raw, temp_c) {
            (SystemStatus::HighTempWarning, SystemStatus::Normal, Some(t))
                if self.hysteresis_c > 0.0 && t > self.threshold_c - self.hysteresis_c =>
            {
                SystemStatus::HighTempWarning
            }
            _ => raw,
        };
        self.current
    }

    pub fn current(&self) -> SystemStatus {
        self.current
    }
}

// ───────────────────────────────────────────────────────────────
// Snapshot
// ───────────────────────────────────────────────────────────────

/// Latest derived readings.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TelemetrySnapshot {
    /// Degrees Celsius; `None` when the thermistor reads as a short circuit.
    pub temperature_c: Option<f32>,
    /// 0-100.
    pub light_percent: u8,
    pub status: SystemStatus,
}

/// JSON body of `GET /readings`: `{"temp": …, "light": …, "status": "…"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingsPayload {
    pub temp: Option<f32>,
    pub light: u8,
    pub status: heapless::String<32>,
}

impl TelemetrySnapshot {
    pub fn to_payload(&self, wording: StatusWording) -> ReadingsPayload {
        let mut status = heapless::String::new();
        // Every wire string is shorter than the capacity.
        let _ = status.push_str(self.status.wire_str(wording));
        ReadingsPayload {
            temp: self.temperature_c,
            light: self.light_percent,
            status,
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Store
// ───────────────────────────────────────────────────────────────

/// Shared handle to the latest snapshot. Cheap to clone; every clone sees
/// the same record.
#[derive(Debug, Clone, Default)]
pub struct TelemetryStore {
    inner: Arc<Mutex<TelemetrySnapshot>>,
}

impl TelemetryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the snapshot. Called once per sampling period.
    pub fn publish(&self, snapshot: TelemetrySnapshot) {
        // A panicking reader cannot leave a half-written Copy value behind.
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = snapshot;
    }

    /// Copy of the most recently published snapshot.
    pub fn latest(&self) -> TelemetrySnapshot {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
