//! Photoresistor (LDR) light-intensity sensor.
//!
//! Bright light pulls the divider output low, so the raw code is inverted:
//! raw 0 is 100 % and raw ADC_MAX is 0 %. The remap runs in the integer
//! domain and rounds to the nearest percent. Codes above ADC_MAX read as 0 %.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1 via the oneshot API (initialised by hw_init).
//! On host/test: reads from a static AtomicU16 for injection.

use core::sync::atomic::{AtomicU16, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

use super::ADC_MAX;

static SIM_PHOTORESISTOR_ADC: AtomicU16 = AtomicU16::new(2048);

/// Inject the next raw code returned on non-espidf targets.
pub fn sim_set_photoresistor_adc(raw: u16) {
    SIM_PHOTORESISTOR_ADC.store(raw, Ordering::Relaxed);
}

/// Light intensity in percent for a raw ADC code, rounded to nearest.
///
/// `raw * 100 / ADC_MAX` never lands on an exact half (ADC_MAX is odd), so
/// rounding the dark share and subtracting from 100 is exact.
pub fn light_percent(raw: u16) -> u8 {
    let max = u32::from(ADC_MAX);
    let raw = u32::from(raw).min(max);
    let dark = (raw * 100 + max / 2) / max;
    (100 - dark) as u8
}

/// Photoresistor channel driver.
pub struct PhotoresistorSensor {
    _adc_channel: u32,
}

impl PhotoresistorSensor {
    pub fn new(adc_channel: u32) -> Self {
        Self {
            _adc_channel: adc_channel,
        }
    }

    #[cfg(target_os = "espidf")]
    pub fn read_raw(&self) -> u16 {
        match hw_init::adc1_read(self._adc_channel) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("photoresistor: {}", e);
                0
            }
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn read_raw(&self) -> u16 {
        SIM_PHOTORESISTOR_ADC.load(Ordering::Relaxed)
    }
}
