#![no_std]
#![no_main]

use defmt::{info, warn};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::bind_interrupts;
use embassy_rp::flash::{Blocking, Flash};
use embassy_rp::gpio::{Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{Async, Config as UartConfig, Uart, UartRx};
use embassy_time::{Duration, Instant, Ticker};
use flight_firmware::{
    AdcBattery, FlashLog, FlightController, GpioIndicators, PwmMotors, Step, TickInput,
    DEFAULT_FLIGHT_CONFIG, FLASH_SIZE, SENSOR_SIGNAL,
};
use heapless::spsc::{Consumer, Producer, Queue};
use portable_atomic::{AtomicBool, Ordering};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    UART0_IRQ => embassy_rp::uart::InterruptHandler<UART0>;
});

/// Inbound byte queue depth. Holds several frames of slack.
const RX_QUEUE_LEN: usize = 64;

/// Control loop period.
const CONTROL_PERIOD: Duration = Duration::from_millis(1);

/// Telemetry and heartbeat timer period.
const TIMER_PERIOD: Duration = Duration::from_millis(50);

type Controller = FlightController<
    PwmMotors<'static>,
    GpioIndicators<'static>,
    AdcBattery<'static>,
    FlashLog<'static>,
>;

/// Bytes from the UART receive task to the control loop.
static RX_QUEUE: StaticCell<Queue<u8, RX_QUEUE_LEN>> = StaticCell::new();

/// Set by the timer task, cleared by the control loop when consumed.
static TIMER_FLAG: AtomicBool = AtomicBool::new(false);

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("flight controller starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- UART Setup ---
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = 115_200;

    let uart = Uart::new(
        p.UART0,
        p.PIN_0, // TX
        p.PIN_1, // RX
        Irqs,
        p.DMA_CH0,
        p.DMA_CH1,
        uart_config,
    );
    let (tx, rx) = uart.split();

    let queue = RX_QUEUE.init(Queue::new());
    let (producer, consumer) = queue.split();

    // --- Motors ---
    let front = Pwm::new_output_ab(p.PWM_SLICE1, p.PIN_2, p.PIN_3, PwmConfig::default());
    let rear = Pwm::new_output_ab(p.PWM_SLICE2, p.PIN_4, p.PIN_5, PwmConfig::default());
    let motors = PwmMotors::new(front, rear);

    // --- Indicators ---
    let indicators = GpioIndicators::new(
        Output::new(p.PIN_16, Level::Low),
        Output::new(p.PIN_17, Level::Low),
        Output::new(p.PIN_18, Level::Low),
        Output::new(p.PIN_25, Level::Low),
    );

    // --- Battery ---
    let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
    let battery = AdcBattery::new(adc, Channel::new_pin(p.PIN_26, Pull::None));

    // --- Flight log ---
    let flash = Flash::<_, Blocking, FLASH_SIZE>::new_blocking(p.FLASH);
    let log = FlashLog::new(flash, tx);

    let config = DEFAULT_FLIGHT_CONFIG.with_battery_check(!cfg!(feature = "bench"));
    if !config.battery_check {
        warn!("battery watchdog disabled");
    }

    let controller = FlightController::new(motors, indicators, battery, log, config);
    // Spawn tasks (spawn the SpawnToken, unwrap the result)
    // Spawn tasks (unwrap the SpawnToken, then spawn)
    spawner.spawn(uart_rx_task(rx, producer)).unwrap();
    spawner.spawn(timer_task()).unwrap();
    spawner.spawn(control_task(controller, consumer)).unwrap();

    info!("flight controller initialized, waiting for commands...");
}

/// Receive task - moves bytes from the UART into the control loop's queue.
#[embassy_executor::task]
async fn uart_rx_task(
    mut rx: UartRx<'static, Async>,
    mut producer: Producer<'static, u8, RX_QUEUE_LEN>,
) {
    let mut byte = [0u8; 1];
    loop {
        match rx.read(&mut byte).await {
            Ok(()) => {
                if producer.enqueue(byte[0]).is_err() {
                    warn!("rx queue full, byte dropped");
                }
            }
            Err(e) => warn!("UART read error: {:?}", e),
        }
    }
}

/// Timer task - raises the periodic flag the control loop consumes.
#[embassy_executor::task]
async fn timer_task() {
    let mut ticker = Ticker::every(TIMER_PERIOD);
    loop {
        ticker.next().await;
        TIMER_FLAG.store(true, Ordering::Release);
    }
}

/// Control task - runs one controller tick per period.
#[embassy_executor::task]
async fn control_task(
    mut controller: Controller,
    mut consumer: Consumer<'static, u8, RX_QUEUE_LEN>,
) {
    let mut ticker = Ticker::every(CONTROL_PERIOD);
    loop {
        ticker.next().await;

        let mut input = TickInput::new(Instant::now().as_micros());
        if let Some(sample) = SENSOR_SIGNAL.try_take() {
            input = input.with_sample(sample);
        }
        if TIMER_FLAG.swap(false, Ordering::AcqRel) {
            input = input.with_timer();
        }

        if let Step::Restart = controller.tick(&mut consumer, input) {
            info!("shutdown requested, resetting");
            cortex_m::peripheral::SCB::sys_reset();
        }
    }
}
