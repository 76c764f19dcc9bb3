//! GPIO / peripheral pin assignments for the ThermoLight sensor board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers. Assignments target the classic ESP32 devkit.

// ---------------------------------------------------------------------------
// Sensors — Analog (ADC1)
// ---------------------------------------------------------------------------

/// NTC thermistor — 10 kΩ @ 25 °C, voltage divider with a 10 kΩ series
/// resistor. ADC1 channel 6 (GPIO 34, input-only).
pub const THERMISTOR_ADC1_CHANNEL: u32 = 6;

/// Photoresistor (LDR) divider. ADC1 channel 7 (GPIO 35, input-only).
pub const PHOTORESISTOR_ADC1_CHANNEL: u32 = 7;

/// ADC sample width. Fixed for the lifetime of the process.
pub const ADC_BITWIDTH_BITS: u32 = 12;

// ---------------------------------------------------------------------------
// Buzzer (passive piezo, LEDC PWM)
// ---------------------------------------------------------------------------

/// Piezo buzzer driven by LEDC channel 0 / timer 0. `main` checks this
/// against the typed `gpio25` it hands to the LEDC driver.
pub const BUZZER_GPIO: i32 = 25;
