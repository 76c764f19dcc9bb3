//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`] and the optional buzzer, exposing them through
//! [`SensorPort`] and [`ActuatorPort`]. On non-espidf targets the sensors
//! read their simulation statics and the buzzer is whatever PWM channel the
//! caller hands in.

use embedded_hal::pwm::SetDutyCycle;

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::drivers::buzzer::{BuzzerDriver, BuzzerState};
use crate::sensors::{RawSample, SensorHub};

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<P: SetDutyCycle> {
    sensor_hub: SensorHub,
    buzzer: Option<BuzzerDriver<P>>,
}

impl<P: SetDutyCycle> HardwareAdapter<P> {
    /// `buzzer` is `None` on boards without one; buzzer requests are then
    /// ignored.
    pub fn new(sensor_hub: SensorHub, buzzer: Option<BuzzerDriver<P>>) -> Self {
        Self { sensor_hub, buzzer }
    }

    pub fn buzzer_state(&self) -> BuzzerState {
        self.buzzer
            .as_ref()
            .map_or(BuzzerState::Silent, BuzzerDriver::state)
    }

    /// Give back the buzzer driver, if any.
    pub fn into_buzzer(self) -> Option<BuzzerDriver<P>> {
        self.buzzer
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<P: SetDutyCycle> SensorPort for HardwareAdapter<P> {
    fn sample(&mut self) -> RawSample {
        self.sensor_hub.sample()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<P: SetDutyCycle> ActuatorPort for HardwareAdapter<P> {
    fn set_buzzer(&mut self, duty: u8) {
        let Some(buzzer) = self.buzzer.as_mut() else {
            return;
        };
        let wanted = match duty.min(100) {
            0 => BuzzerState::Silent,
            duty => BuzzerState::Sounding { duty },
        };
        if buzzer.state() == wanted {
            return;
        }
        // The driver already logged the failure; retried next period.
        let _ = buzzer.sound(duty);
    }
}
