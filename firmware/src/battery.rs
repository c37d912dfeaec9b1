//! Battery voltage through the on-chip ADC.

use defmt::warn;
use embassy_rp::adc::{Adc, Blocking, Channel};
use flight_core::BatterySensor;

/// ADC reference in 10 mV units.
const VREF: u32 = 330;

/// Ratio of the resistor divider in front of the ADC pin.
const DIVIDER: u32 = 4;

/// Full scale of the 12-bit converter.
const FULL_SCALE: u32 = 4096;

/// Convert a raw 12-bit sample to battery voltage in 10 mV units.
#[must_use]
pub const fn raw_to_centivolts(raw: u16) -> u16 {
    let v = (raw as u32) * VREF * DIVIDER / FULL_SCALE;
    if v > u16::MAX as u32 {
        u16::MAX
    } else {
        v as u16
    }
}

/// Battery monitor on one ADC channel.
///
/// A failed conversion repeats the previous reading.
pub struct AdcBattery<'d> {
    adc: Adc<'d, Blocking>,
    channel: Channel<'d>,
    last: u16,
}

impl<'d> AdcBattery<'d> {
    pub fn new(adc: Adc<'d, Blocking>, channel: Channel<'d>) -> Self {
        Self {
            adc,
            channel,
            last: 0,
        }
    }
}

impl BatterySensor for AdcBattery<'_> {
    fn read_voltage(&mut self) -> u16 {
        match self.adc.blocking_read(&mut self.channel) {
            Ok(raw) => self.last = raw_to_centivolts(raw),
            Err(e) => warn!("ADC read failed: {:?}", e),
        }
        self.last
    }
}
