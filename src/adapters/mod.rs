//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements          | Connects to                 |
//! |----------------|---------------------|-----------------------------|
//! | `hardware`     | SensorPort          | ESP32 ADC1                  |
//! |                | ActuatorPort        | LEDC PWM (buzzer)           |
//! | `log_sink`     | EventSink           | Serial log output           |
//! | `softap`       | AccessPointPort     | ESP-IDF WiFi AP             |
//! | `dns_server`   | —                   | UDP :53 (captive DNS)       |
//! | `http_server`  | —                   | ESP-IDF httpd (espidf only) |
//! | `time`         | —                   | ESP32 system timer          |

pub mod dns_server;
pub mod hardware;
#[cfg(target_os = "espidf")]
pub mod http_server;
pub mod log_sink;
pub mod softap;
pub mod time;
