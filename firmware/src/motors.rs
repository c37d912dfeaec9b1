//! PWM motor driver.

use defmt::warn;
use embassy_rp::pwm::{Config, Pwm};
use fixed_macro::fixed;
use flight_core::{Actuators, MotorOutput, OutputError, MAX_DUTY};

/// Counter wrap value. With a 1 MHz counter this gives a 400 Hz update rate.
pub const PWM_TOP: u16 = 2500;

/// Four motors on two PWM slices, one count per microsecond of pulse.
pub struct PwmMotors<'d> {
    front: Pwm<'d>,
    rear: Pwm<'d>,
    config: Config,
}

impl<'d> PwmMotors<'d> {
    /// Take two slices already bound to their A/B pins. Motors start stopped.
    pub fn new(mut front: Pwm<'d>, mut rear: Pwm<'d>) -> Self {
        let mut config = Config::default();
        config.top = PWM_TOP;
        // 125 MHz system clock down to 1 MHz.
        config.divider = fixed!(125: U12F4);
        config.compare_a = 0;
        config.compare_b = 0;
        front.set_config(&config);
        rear.set_config(&config);
        Self {
            front,
            rear,
            config,
        }
    }
}

impl MotorOutput for PwmMotors<'_> {
    fn set_motors(&mut self, duty: &Actuators) -> Result<(), OutputError> {
        if duty.iter().any(|&d| d > MAX_DUTY) {
            warn!("duty above range: {}", duty);
            return Err(OutputError::Io);
        }

        self.config.compare_a = duty[0];
        self.config.compare_b = duty[1];
        self.front.set_config(&self.config);

        self.config.compare_a = duty[2];
        self.config.compare_b = duty[3];
        self.rear.set_config(&self.config);
        Ok(())
    }
}
