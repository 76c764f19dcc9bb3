//! Fuzz target: raw ADC codes through the derivation pipeline
//!
//! Any pair of 16-bit codes must produce a light percentage in 0..=100 and
//! a temperature that is either finite or absent.
//!
//! cargo fuzz run fuzz_light_percent

#![no_main]

use libfuzzer_sys::fuzz_target;
use thermolight::sensors::{derive, RawSample};

fuzz_target!(|data: [u8; 4]| {
    let raw = RawSample {
        thermistor: u16::from_le_bytes([data[0], data[1]]),
        photoresistor: u16::from_le_bytes([data[2], data[3]]),
    };
    let r = derive(raw);
    assert!(r.light_percent <= 100);
    if let Some(t) = r.temperature_c {
        assert!(t.is_finite());
    }
    assert!(r.thermistor_ohms >= 0.0);
});
