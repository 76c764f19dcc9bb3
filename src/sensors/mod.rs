//! Sensor subsystem — individual drivers and the aggregating [`SensorHub`].
//!
//! The hub samples both ADC channels once per sampling tick and hands back a
//! [`RawSample`]. [`derive`] is the pure half of the pipeline: raw codes in,
//! resistance / temperature / light percentage out, no hidden state.

pub mod photoresistor;
pub mod thermistor;

use photoresistor::PhotoresistorSensor;
use thermistor::ThermistorSensor;

/// Full-scale code at 12-bit resolution.
pub const ADC_MAX: u16 = 4095;

/// One raw code per channel, taken in the same sampling tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawSample {
    pub thermistor: u16,
    pub photoresistor: u16,
}

/// Physical readings derived from a [`RawSample`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Readings {
    pub thermistor_ohms: f32,
    /// `None` when the thermistor divider reads as a short circuit.
    pub temperature_c: Option<f32>,
    pub light_percent: u8,
}

/// Raw codes to physical readings.
pub fn derive(raw: RawSample) -> Readings {
    let thermistor_ohms = thermistor::resistance_ohms(raw.thermistor);
    Readings {
        thermistor_ohms,
        temperature_c: thermistor::celsius_from_resistance(thermistor_ohms),
        light_percent: photoresistor::light_percent(raw.photoresistor),
    }
}

/// Owns both analog sensor drivers.
pub struct SensorHub {
    pub thermistor: ThermistorSensor,
    pub photoresistor: PhotoresistorSensor,
}

impl SensorHub {
    /// Pass in pre-built drivers (built in main where the channel
    /// assignments are established).
    pub fn new(thermistor: ThermistorSensor, photoresistor: PhotoresistorSensor) -> Self {
        Self {
            thermistor,
            photoresistor,
        }
    }

    /// Read both channels back to back.
    pub fn sample(&mut self) -> RawSample {
        RawSample {
            thermistor: self.thermistor.read_raw(),
            photoresistor: self.photoresistor.read_raw(),
        }
    }
}
