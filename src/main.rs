//! ThermoLight Firmware — Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter   LogEventSink   SoftApAdapter  MonotonicClock│
//! │  (Sensor+Actuator) (EventSink)    (AccessPoint)                │
//! │  CaptiveDnsServer  PortalHttpServer ◀── TelemetryStore (read)  │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │        MonitorService (pure logic)                     │    │
//! │  │  derive · classify · buzzer mirror · publish           │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Main loop: DNS poll every pass · sampling every interval      │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use core::net::{Ipv4Addr, SocketAddr};

use anyhow::{Context, Result};
use log::{error, info, warn};

use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::ledc::config::TimerConfig;
use esp_idf_hal::ledc::{LedcDriver, LedcTimerDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::Hertz;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;

use thermolight::adapters::dns_server::CaptiveDnsServer;
use thermolight::adapters::hardware::HardwareAdapter;
use thermolight::adapters::http_server::PortalHttpServer;
use thermolight::adapters::log_sink::LogEventSink;
use thermolight::adapters::softap::SoftApAdapter;
use thermolight::adapters::time::MonotonicClock;
use thermolight::app::service::{MonitorService, SampleGate};
use thermolight::config::SystemConfig;
use thermolight::drivers::buzzer::BuzzerDriver;
use thermolight::error::Error;
use thermolight::pins;
use thermolight::portal::routes::PortalConfig;
use thermolight::sensors::photoresistor::PhotoresistorSensor;
use thermolight::sensors::thermistor::ThermistorSensor;
use thermolight::sensors::SensorHub;
use thermolight::telemetry::TelemetryStore;
use thermolight::drivers;

// The buzzer channel below takes `gpio25` as a typed pin.
const _: () = assert!(pins::BUZZER_GPIO == 25);

/// Idle time between loop passes. Bounds DNS latency and CPU use.
const LOOP_IDLE_MS: u32 = 10;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  ThermoLight v{}                     ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = SystemConfig::from_build_env();
    config
        .validate()
        .map_err(Error::from)
        .context("configuration")?;
    info!(
        "Config: ssid='{}' threshold={:.1}\u{00b0}C interval={}ms buzzer={}",
        config.ap_ssid, config.temp_threshold_c, config.sample_interval_ms, config.buzzer_enabled
    );

    // ── 3. Peripherals ────────────────────────────────────────
    if let Err(e) = drivers::hw_init::init_peripherals() {
        error!("HAL init failed: {}", e);
        return Err(Error::from(e).into());
    }
    let peripherals = Peripherals::take()?;
    let sys_loop = EspSystemEventLoop::take()?;
    let nvs = match EspDefaultNvsPartition::take() {
        Ok(p) => Some(p),
        Err(e) => {
            warn!("NVS partition unavailable ({}), WiFi calibration will not persist", e);
            None
        }
    };

    let buzzer = if config.buzzer_enabled {
        let timer = LedcTimerDriver::new(
            peripherals.ledc.timer0,
            &TimerConfig::default().frequency(Hertz(config.buzzer_freq_hz)),
        )?;
        let channel = LedcDriver::new(peripherals.ledc.channel0, timer, peripherals.pins.gpio25)?;
        info!("Buzzer on GPIO{} at {} Hz", pins::BUZZER_GPIO, config.buzzer_freq_hz);
        Some(BuzzerDriver::new(channel))
    } else {
        None
    };

    let sensor_hub = SensorHub::new(
        ThermistorSensor::new(pins::THERMISTOR_ADC1_CHANNEL),
        PhotoresistorSensor::new(pins::PHOTORESISTOR_ADC1_CHANNEL),
    );
    let mut hw = HardwareAdapter::new(sensor_hub, buzzer);

    // ── 4. Network ────────────────────────────────────────────
    let ap = SoftApAdapter::start(peripherals.modem, sys_loop, nvs, &config)
        .map_err(Error::from)
        .context("access point bring-up")?;

    let store = TelemetryStore::new();
    let _http = PortalHttpServer::start(config.http_port, store.clone(), PortalConfig::from(&config))
        .map_err(Error::from)
        .context("HTTP server bring-up")?;

    let dns_addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.dns_port));
    let mut dns = match CaptiveDnsServer::bind(dns_addr, config.gateway_addr(), config.dns_ttl_secs) {
        Ok(d) => Some(d),
        Err(e) => {
            warn!("Captive DNS disabled: {}", e);
            None
        }
    };

    // ── 5. Core ───────────────────────────────────────────────
    let mut sink = LogEventSink::new(config.status_wording);
    let mut service = MonitorService::new(&config, store);
    service.start(&mut sink);

    let clock = MonotonicClock::new();
    let mut gate = SampleGate::new(config.sample_interval_ms);

    info!("Entering main loop");

    // ── 6. Main loop ──────────────────────────────────────────
    loop {
        if let Some(dns) = dns.as_mut() {
            dns.poll();
        }
        if gate.due(clock.uptime_ms()) {
            service.tick(&mut hw, &ap, &mut sink);
        }
        FreeRtos::delay_ms(LOOP_IDLE_MS);
    }
}
