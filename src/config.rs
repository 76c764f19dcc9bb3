//! System configuration parameters
//!
//! All tunable parameters for the ThermoLight system. Values are fixed per
//! deployment: compiled-in defaults, optionally overridden at build time
//! through environment variables (see [`SystemConfig::from_build_env`]).

use core::net::Ipv4Addr;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;
use crate::telemetry::StatusWording;

/// Where unknown HTTP paths are redirected to (captive-portal behaviour).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectTarget {
    /// Relative redirect to `/`.
    Root,
    /// Absolute redirect to a fixed URL, e.g. `http://thermolight.portal/`.
    Url(heapless::String<64>),
}

impl RedirectTarget {
    /// Value for the `Location` header.
    pub fn location(&self) -> &str {
        match self {
            Self::Root => "/",
            Self::Url(url) => url.as_str(),
        }
    }
}

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Access point ---
    /// Network name broadcast by the device.
    pub ap_ssid: heapless::String<32>,
    /// WPA2 passphrase; empty for an open network.
    pub ap_password: heapless::String<64>,
    /// 2.4 GHz channel (1-13).
    pub ap_channel: u8,
    /// Maximum simultaneous stations.
    pub ap_max_clients: u8,
    /// Address the device answers on, and the answer to every DNS query.
    pub gateway: [u8; 4],

    // --- Transport ---
    pub http_port: u16,
    pub dns_port: u16,
    /// TTL on captive DNS answers (seconds).
    pub dns_ttl_secs: u32,
    /// Wording of the normal status on the wire.
    pub status_wording: StatusWording,
    /// Target of the catch-all redirect.
    pub redirect: RedirectTarget,

    // --- Sampling / classification ---
    /// Sampling period (milliseconds).
    pub sample_interval_ms: u32,
    /// Temperature above which the status becomes a warning (Celsius).
    pub temp_threshold_c: f32,
    /// Width of the band below the threshold the reading must fall through
    /// before a warning clears. 0.0 = memoryless classification.
    pub hysteresis_c: f32,

    // --- Buzzer ---
    pub buzzer_enabled: bool,
    /// PWM duty while the warning is active (0-100%).
    pub buzzer_duty_percent: u8,
    /// Tone frequency (Hz).
    pub buzzer_freq_hz: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Access point
            ap_ssid: bounded("ThermoLight-AP"),
            ap_password: heapless::String::new(), // open network
            ap_channel: 1,
            ap_max_clients: 4,
            gateway: [192, 168, 4, 1],

            // Transport
            http_port: 80,
            dns_port: 53,
            dns_ttl_secs: 60,
            status_wording: StatusWording::Verbose,
            redirect: RedirectTarget::Root,

            // Sampling
            sample_interval_ms: 1000, // 1 Hz
            temp_threshold_c: 30.0,
            hysteresis_c: 0.0,

            // Buzzer
            buzzer_enabled: false,
            buzzer_duty_percent: 50,
            buzzer_freq_hz: 2000,
        }
    }
}

impl SystemConfig {
    /// Defaults with build-time overrides applied.
    ///
    /// Recognised variables: `AP_SSID`, `AP_PASSWORD`, `TEMP_THRESHOLD_C`,
    /// `BUZZER_ENABLED`. An override set that fails validation is discarded
    /// in favour of the defaults.
    pub fn from_build_env() -> Self {
        let mut config = Self::default();
        if let Some(ssid) = option_env!("AP_SSID") {
            config.ap_ssid = bounded(ssid);
        }
        if let Some(password) = option_env!("AP_PASSWORD") {
            config.ap_password = bounded(password);
        }
        if let Some(threshold) = option_env!("TEMP_THRESHOLD_C").and_then(|v| v.parse().ok()) {
            config.temp_threshold_c = threshold;
        }
        if let Some(flag) = option_env!("BUZZER_ENABLED") {
            config.buzzer_enabled = matches!(flag, "1" | "true" | "yes");
        }

        match config.validate() {
            Ok(()) => config,
            Err(e) => {
                warn!("Build-time config rejected ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Range-check every field. Invalid values are rejected, not clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ap_ssid.is_empty() || !is_printable_ascii(&self.ap_ssid) {
            return Err(ConfigError::ValidationFailed(
                "ap_ssid must be 1-32 printable ASCII bytes",
            ));
        }
        if !self.ap_password.is_empty() && self.ap_password.len() < 8 {
            return Err(ConfigError::ValidationFailed(
                "ap_password must be empty (open) or 8-64 bytes",
            ));
        }
        if !(1..=13).contains(&self.ap_channel) {
            return Err(ConfigError::ValidationFailed("ap_channel must be 1-13"));
        }
        if !(1..=10).contains(&self.ap_max_clients) {
            return Err(ConfigError::ValidationFailed("ap_max_clients must be 1-10"));
        }
        if self.http_port == 0 || self.dns_port == 0 {
            return Err(ConfigError::ValidationFailed("ports must be non-zero"));
        }
        if self.sample_interval_ms < 100 {
            return Err(ConfigError::ValidationFailed(
                "sample_interval_ms must be at least 100",
            ));
        }
        if !self.temp_threshold_c.is_finite() {
            return Err(ConfigError::ValidationFailed("temp_threshold_c must be finite"));
        }
        if !self.hysteresis_c.is_finite() || self.hysteresis_c < 0.0 {
            return Err(ConfigError::ValidationFailed(
                "hysteresis_c must be finite and non-negative",
            ));
        }
        if self.buzzer_duty_percent > 100 {
            return Err(ConfigError::ValidationFailed("buzzer_duty_percent must be 0-100"));
        }
        if !(100..=20_000).contains(&self.buzzer_freq_hz) {
            return Err(ConfigError::ValidationFailed(
                "buzzer_freq_hz must be 100-20000",
            ));
        }
        if let RedirectTarget::Url(url) = &self.redirect {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::ValidationFailed(
                    "redirect URL must be absolute http(s)",
                ));
            }
        }
        Ok(())
    }

    /// Gateway as an address type.
    pub fn gateway_addr(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.gateway)
    }
}

/// Copy `s` into a fixed-capacity string, truncating at a char boundary.
fn bounded<const N: usize>(s: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// Returns `true` if every byte of `s` is in the printable ASCII range
/// `0x20..=0x7E`.
fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}
