//! Quadrotor flight controller firmware for RP2040.
//!
//! This crate provides the embedded drivers behind the `flight-core`
//! collaborator traits and the signal the attitude estimator feeds.
//!
//! | Function        | Peripheral                 |
//! |-----------------|----------------------------|
//! | Operator link   | UART0, GP0 (TX) / GP1 (RX) |
//! | Motors 0 and 1  | PWM slice 1, GP2 / GP3     |
//! | Motors 2 and 3  | PWM slice 2, GP4 / GP5     |
//! | Red/yellow/green| GP16 / GP17 / GP18         |
//! | Heartbeat       | GP25 (on-board LED)        |
//! | Battery         | ADC0 on GP26, 1:4 divider  |
//! | Flight log      | last 64 KiB of flash       |

#![no_std]

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

// Re-export core types for convenience
pub use flight_core::{
    BatterySensor, FlightConfig, FlightController, FlightLog, Indicator, IndicatorOutput,
    LogError, MotorOutput, OutputError, SensorSample, Step, TickInput, DEFAULT_FLIGHT_CONFIG,
};

pub mod battery;
pub mod flash_log;
pub mod indicators;
pub mod motors;

pub use battery::AdcBattery;
pub use flash_log::{FlashLog, FLASH_SIZE, LOG_OFFSET, LOG_SIZE};
pub use indicators::GpioIndicators;
pub use motors::PwmMotors;

/// Latest attitude estimate from the sensor fusion provider.
///
/// Latest value wins; the control loop takes at most one sample per tick.
pub static SENSOR_SIGNAL: Signal<CriticalSectionRawMutex, SensorSample> = Signal::new();
