//! Status LEDs.

use embassy_rp::gpio::{Level, Output};
use flight_core::{Indicator, IndicatorOutput, OutputError};

/// Red, yellow and green mode lines plus the heartbeat LED. Active high.
pub struct GpioIndicators<'d> {
    red: Output<'d>,
    yellow: Output<'d>,
    green: Output<'d>,
    heartbeat: Output<'d>,
}

impl<'d> GpioIndicators<'d> {
    pub fn new(red: Output<'d>, yellow: Output<'d>, green: Output<'d>, heartbeat: Output<'d>) -> Self {
        Self {
            red,
            yellow,
            green,
            heartbeat,
        }
    }
}

impl IndicatorOutput for GpioIndicators<'_> {
    fn show(&mut self, indicator: Indicator) -> Result<(), OutputError> {
        self.red.set_level(Level::from(indicator.red));
        self.yellow.set_level(Level::from(indicator.yellow));
        self.green.set_level(Level::from(indicator.green));
        Ok(())
    }

    fn toggle_heartbeat(&mut self) -> Result<(), OutputError> {
        self.heartbeat.toggle();
        Ok(())
    }
}
