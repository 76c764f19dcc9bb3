//! Piezo buzzer driver.
//!
//! A passive piezo on an LEDC PWM channel: the timer frequency sets the
//! pitch, the duty cycle sets whether (and how loudly) it sounds. The driver
//! is a dumb actuator; when to sound is decided by the monitor service.
//!
//! ## Dual-target design
//!
//! Generic over [`embedded_hal::pwm::SetDutyCycle`]. On ESP-IDF this is an
//! `esp_idf_hal::ledc::LedcDriver`; host tests pass a recording mock.

use embedded_hal::pwm::SetDutyCycle;
use log::warn;

use crate::error::ActuatorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuzzerState {
    Silent,
    Sounding { duty: u8 },
}

pub struct BuzzerDriver<P> {
    pwm: P,
    state: BuzzerState,
}

impl<P: SetDutyCycle> BuzzerDriver<P> {
    pub fn new(pwm: P) -> Self {
        Self {
            pwm,
            state: BuzzerState::Silent,
        }
    }

    /// Drive the tone at `duty` percent (clamped to 100). 0 silences.
    pub fn sound(&mut self, duty: u8) -> Result<(), ActuatorError> {
        let duty = duty.min(100);
        if duty == 0 {
            return self.silence();
        }
        self.pwm.set_duty_cycle_percent(duty).map_err(|e| {
            warn!("Buzzer: PWM write failed ({:?})", e);
            ActuatorError::PwmWriteFailed
        })?;
        self.state = BuzzerState::Sounding { duty };
        Ok(())
    }

    pub fn silence(&mut self) -> Result<(), ActuatorError> {
        self.pwm.set_duty_cycle_fully_off().map_err(|e| {
            warn!("Buzzer: PWM write failed ({:?})", e);
            ActuatorError::PwmWriteFailed
        })?;
        self.state = BuzzerState::Silent;
        Ok(())
    }

    pub fn state(&self) -> BuzzerState {
        self.state
    }

    /// Hand back the PWM channel (tests inspect the mock through this).
    pub fn release(self) -> P {
        self.pwm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::pwm::ErrorType;

    struct RecordingPwm {
        writes: Vec<u16>,
    }

    impl ErrorType for RecordingPwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for RecordingPwm {
        fn max_duty_cycle(&self) -> u16 {
            255
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            self.writes.push(duty);
            Ok(())
        }
    }

    #[test]
    fn sound_scales_percent_to_max_duty() {
        let mut b = BuzzerDriver::new(RecordingPwm { writes: Vec::new() });
        b.sound(50).unwrap();
        assert_eq!(b.state(), BuzzerState::Sounding { duty: 50 });
        assert_eq!(b.release().writes, vec![127]);
    }

    #[test]
    fn zero_duty_silences() {
        let mut b = BuzzerDriver::new(RecordingPwm { writes: Vec::new() });
        b.sound(80).unwrap();
        b.sound(0).unwrap();
        assert_eq!(b.state(), BuzzerState::Silent);
        assert_eq!(b.release().writes, vec![204, 0]);
    }

    #[test]
    fn duty_is_clamped() {
        let mut b = BuzzerDriver::new(RecordingPwm { writes: Vec::new() });
        b.sound(250).unwrap();
        assert_eq!(b.state(), BuzzerState::Sounding { duty: 100 });
        assert_eq!(b.release().writes, vec![255]);
    }
}
