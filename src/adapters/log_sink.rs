//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (UART in production). Status strings use the same
//! wording as the HTTP payload so the serial log and the dashboard agree.

use log::{log, Level};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::telemetry::StatusWording;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink {
    wording: StatusWording,
}

impl LogEventSink {
    pub fn new(wording: StatusWording) -> Self {
        Self { wording }
    }

    /// Level and text of the line logged for `event`.
    fn render(&self, event: &AppEvent) -> (Level, String) {
        match event {
            AppEvent::Reading { snapshot, clients } => {
                let temp = match snapshot.temperature_c {
                    Some(t) => format!("{:.2}\u{00b0}C", t),
                    None => "n/a".to_owned(),
                };
                (
                    Level::Info,
                    format!(
                        "READ | clients={} | T={} | light={}% | status={}",
                        clients,
                        temp,
                        snapshot.light_percent,
                        snapshot.status.wire_str(self.wording),
                    ),
                )
            }
            AppEvent::StatusChanged { from, to } => (
                if to.is_warning() { Level::Warn } else { Level::Info },
                format!(
                    "STATUS | {} -> {}",
                    from.wire_str(self.wording),
                    to.wire_str(self.wording)
                ),
            ),
            AppEvent::Started { threshold_c } => (
                Level::Info,
                format!("START | threshold={:.1}\u{00b0}C", threshold_c),
            ),
        }
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        let (level, line) = self.render(event);
        log!(level, "{}", line);
    }
}
