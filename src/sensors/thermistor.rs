//! NTC thermistor temperature sensor (10 kOhm @ 25 C, B = 3950).
//!
//! Wired in a voltage divider with a fixed 10 kOhm series resistor and read
//! through ADC1. The simplified Beta (single-coefficient Steinhart-Hart)
//! equation converts resistance to temperature.
//!
//! ## Saturation edges
//!
//! - raw == 0: the divider reads as open circuit; resistance is pinned to a
//!   1 MOhm sentinel instead of dividing by zero.
//! - raw >= ADC_MAX: the divider reads as a short; resistance is 0 and the
//!   logarithm is undefined, so [`temperature_c`] returns `None`.
//!
//! No plausibility bounds are applied: the open-circuit sentinel yields a
//! very cold value and it is passed through as-is.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1 via the oneshot API (initialised by hw_init).
//! On host/test: reads from a static AtomicU16 for injection.

use core::sync::atomic::{AtomicU16, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

use super::ADC_MAX;

static SIM_THERMISTOR_ADC: AtomicU16 = AtomicU16::new(2048);

/// Inject the next raw code returned on non-espidf targets.
pub fn sim_set_thermistor_adc(raw: u16) {
    SIM_THERMISTOR_ADC.store(raw, Ordering::Relaxed);
}

/// Series resistor in the divider.
pub const R_SERIES: f32 = 10_000.0;
/// Thermistor resistance at the nominal temperature.
pub const R_NOMINAL: f32 = 10_000.0;
pub const BETA: f32 = 3950.0;
/// 25 C in Kelvin.
pub const T_NOMINAL_K: f32 = 298.15;
/// Resistance reported for raw == 0.
pub const OPEN_CIRCUIT_OHMS: f32 = 1_000_000.0;

const KELVIN_OFFSET: f32 = 273.15;

/// Divider resistance estimate for a raw ADC code.
pub fn resistance_ohms(raw: u16) -> f32 {
    if raw == 0 {
        return OPEN_CIRCUIT_OHMS;
    }
    if raw >= ADC_MAX {
        return 0.0;
    }
    R_SERIES / (f32::from(ADC_MAX) / f32::from(raw) - 1.0)
}

/// Beta-equation temperature for a thermistor resistance.
///
/// `None` for a non-positive resistance or a non-finite result.
pub fn celsius_from_resistance(ohms: f32) -> Option<f32> {
    if ohms <= 0.0 || !ohms.is_finite() {
        return None;
    }
    let inv_t = (ohms / R_NOMINAL).ln() / BETA + 1.0 / T_NOMINAL_K;
    let celsius = 1.0 / inv_t - KELVIN_OFFSET;
    celsius.is_finite().then_some(celsius)
}

/// Raw ADC code straight to degrees Celsius.
pub fn temperature_c(raw: u16) -> Option<f32> {
    celsius_from_resistance(resistance_ohms(raw))
}

/// Thermistor channel driver.
pub struct ThermistorSensor {
    _adc_channel: u32,
}

impl ThermistorSensor {
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
                log::warn!("thermistor: {}", e);
                0
            }
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn read_raw(&self) -> u16 {
        SIM_THERMISTOR_ADC.load(Ordering::Relaxed)
    }
}
