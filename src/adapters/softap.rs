//! Wi-Fi access-point adapter.
//!
//! Implements [`AccessPointPort`]. The device runs its own network; clients
//! join it and reach the dashboard on the gateway address, which is also
//! handed out as their DNS server.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: `EspWifi` in `Configuration::AccessPoint`
//!   with a router netif carrying the configured gateway.
//! - **all other targets**: simulation with an injectable client count.

use log::info;

use crate::app::ports::AccessPointPort;
use crate::config::SystemConfig;

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU8, Ordering};

#[cfg(not(target_os = "espidf"))]
static SIM_CLIENTS: AtomicU8 = AtomicU8::new(0);

/// Set the simulated station count (host only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_clients(n: u8) {
    SIM_CLIENTS.store(n, Ordering::Relaxed);
}

/// Open network when no passphrase is configured.
pub fn is_open(config: &SystemConfig) -> bool {
    config.ap_password.is_empty()
}

// ───────────────────────────────────────────────────────────────
// ESP-IDF implementation
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
mod platform {
    use log::error;

    use esp_idf_svc::eventloop::EspSystemEventLoop;
    use esp_idf_svc::hal::modem::Modem;
    use esp_idf_svc::ipv4::{
        Configuration as IpConfiguration, Mask, RouterConfiguration, Subnet,
    };
    use esp_idf_svc::netif::{EspNetif, NetifConfiguration, NetifStack};
    use esp_idf_svc::nvs::EspDefaultNvsPartition;
    use esp_idf_svc::wifi::{
        AccessPointConfiguration, AuthMethod, BlockingWifi, Configuration, EspWifi, WifiDriver,
    };

    use crate::config::SystemConfig;
    use crate::error::CommsError;

    fn fail(stage: &str, e: impl core::fmt::Debug) -> CommsError {
        error!("SoftAP: {} failed: {:?}", stage, e);
        CommsError::AccessPointStartFailed
    }

    pub(super) fn start(
        modem: Modem,
        sys_loop: EspSystemEventLoop,
        nvs: Option<EspDefaultNvsPartition>,
        config: &SystemConfig,
    ) -> Result<BlockingWifi<EspWifi<'static>>, CommsError> {
        let gateway = config.gateway_addr();
        let ap_netif = EspNetif::new_with_conf(&NetifConfiguration {
            ip_configuration: Some(IpConfiguration::Router(RouterConfiguration {
                subnet: Subnet {
                    gateway,
                    mask: Mask(24),
                },
                dhcp_enabled: true,
                dns: Some(gateway),
                secondary_dns: None,
            })),
            ..NetifConfiguration::wifi_default_router()
        })
        .map_err(|e| fail("AP netif", e))?;
        let sta_netif = EspNetif::new(NetifStack::Sta).map_err(|e| fail("STA netif", e))?;

        let driver =
            WifiDriver::new(modem, sys_loop.clone(), nvs).map_err(|e| fail("driver init", e))?;
        let esp_wifi =
            EspWifi::wrap_all(driver, sta_netif, ap_netif).map_err(|e| fail("netif attach", e))?;
        let mut wifi = BlockingWifi::wrap(esp_wifi, sys_loop).map_err(|e| fail("wrap", e))?;

        let auth_method = if super::is_open(config) {
            AuthMethod::None
        } else {
            AuthMethod::WPA2Personal
        };
        wifi.set_configuration(&Configuration::AccessPoint(AccessPointConfiguration {
            ssid: config.ap_ssid.clone(),
            password: config.ap_password.clone(),
            auth_method,
            channel: config.ap_channel,
            max_connections: u16::from(config.ap_max_clients),
            ..Default::default()
        }))
        .map_err(|e| fail("set_configuration", e))?;

        wifi.start().map_err(|e| fail("start", e))?;
        wifi.wait_netif_up().map_err(|e| fail("netif up", e))?;
        Ok(wifi)
    }

    pub(super) fn client_count() -> u8 {
        let mut list: esp_idf_svc::sys::wifi_sta_list_t = unsafe { core::mem::zeroed() };
        let rc = unsafe { esp_idf_svc::sys::esp_wifi_ap_get_sta_list(&mut list) };
        if rc != esp_idf_svc::sys::ESP_OK {
            return 0;
        }
        list.num.clamp(0, i32::from(u8::MAX)) as u8
    }
}

// ───────────────────────────────────────────────────────────────
// Adapter
// ───────────────────────────────────────────────────────────────

/// Running access point. Dropping it stops the radio.
pub struct SoftApAdapter {
    #[cfg(target_os = "espidf")]
    _wifi: esp_idf_svc::wifi::BlockingWifi<esp_idf_svc::wifi::EspWifi<'static>>,
    ssid: heapless::String<32>,
    open: bool,
}

impl SoftApAdapter {
    /// Bring the access point up and block until its netif is ready.
    #[cfg(target_os = "espidf")]
    pub fn start(
        modem: esp_idf_svc::hal::modem::Modem,
        sys_loop: esp_idf_svc::eventloop::EspSystemEventLoop,
        nvs: Option<esp_idf_svc::nvs::EspDefaultNvsPartition>,
        config: &SystemConfig,
    ) -> Result<Self, crate::error::CommsError> {
        let wifi = platform::start(modem, sys_loop, nvs, config)?;
        let adapter = Self {
            _wifi: wifi,
            ssid: config.ap_ssid.clone(),
            open: is_open(config),
        };
        adapter.log_started(config);
        Ok(adapter)
    }

    /// Simulated access point (host only).
    #[cfg(not(target_os = "espidf"))]
    pub fn start(config: &SystemConfig) -> Result<Self, crate::error::CommsError> {
        let adapter = Self {
            ssid: config.ap_ssid.clone(),
            open: is_open(config),
        };
        adapter.log_started(config);
        Ok(adapter)
    }

    fn log_started(&self, config: &SystemConfig) {
        info!(
            "SoftAP: '{}' up on channel {} ({}), gateway {}",
            self.ssid,
            config.ap_channel,
            if self.open { "open" } else { "WPA2" },
            config.gateway_addr()
        );
    }

    pub fn ssid(&self) -> &str {
        &self.ssid
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

impl AccessPointPort for SoftApAdapter {
    #[cfg(target_os = "espidf")]
    fn client_count(&self) -> u8 {
        platform::client_count()
    }

    #[cfg(not(target_os = "espidf"))]
    fn client_count(&self) -> u8 {
        SIM_CLIENTS.load(Ordering::Relaxed)
    }
}
