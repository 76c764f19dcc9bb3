//! Outbound application events.
//!
//! The [`MonitorService`](super::service::MonitorService) emits these
//! through the [`EventSink`](super::ports::EventSink) port. Adapters on the
//! other side decide what to do with them; on the device they become serial
//! log lines.

use crate::telemetry::{SystemStatus, TelemetrySnapshot};

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The service has started (carries the active threshold).
    Started { threshold_c: f32 },

    /// One sampling period completed. Emitted every period.
    Reading {
        snapshot: TelemetrySnapshot,
        clients: u8,
    },

    /// The status differs from the previous period's.
    StatusChanged {
        from: SystemStatus,
        to: SystemStatus,
    },
}
