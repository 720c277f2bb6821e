//! irdrive Firmware: Main Entry Point
//!
//! Single cooperative loop around the hexagonal core.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  IrReceiverAdapter   HardwareAdapter   LogEventSink  Esp32Time │
//! │  (RemotePort)        (ActuatorPort)    (EventSink)   (Clock)   │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              Controller (pure logic)                   │    │
//! │  │  CommandDispatcher · HoldTimeoutMonitor                │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  IR edge ISR ──▶ lock-free edge queue ──▶ NEC decoder          │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::PinDriver;
use esp_idf_hal::ledc::config::TimerConfig;
use esp_idf_hal::ledc::{LedcDriver, LedcTimerDriver, Resolution};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::Hertz;
use log::{error, info, warn};

use irdrive::adapters::hardware::HardwareAdapter;
use irdrive::adapters::ir_receiver::IrReceiverAdapter;
use irdrive::adapters::log_sink::LogEventSink;
use irdrive::adapters::time::Esp32TimeAdapter;
use irdrive::app::service::Controller;
use irdrive::config::ControllerConfig;
use irdrive::error::Error;
use irdrive::drivers::buzzer::Buzzer;
use irdrive::drivers::hw_init;
use irdrive::drivers::propulsion::{DualSelect, PropulsionDriver};
use irdrive::drivers::steering::SteeringActuator;
use irdrive::drivers::watchdog::Watchdog;
use irdrive::ir::edges::IR_EDGES;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  irdrive v{}                         ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = ControllerConfig::default();
    config.validate()?;
    info!("Config: {}", serde_json::to_string(&config)?);

    // ── 3. Peripherals ────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let pins = peripherals.pins;

    let propulsion_timer = LedcTimerDriver::new(
        peripherals.ledc.timer0,
        &TimerConfig::new()
            .frequency(Hertz(config.propulsion_pwm_freq_hz))
            .resolution(Resolution::Bits8),
    )?;
    let buzzer_timer = LedcTimerDriver::new(
        peripherals.ledc.timer1,
        &TimerConfig::new()
            .frequency(Hertz(config.buzzer_pwm_freq_hz))
            .resolution(Resolution::Bits8),
    )?;

    // Output wiring is tabled in irdrive::pins.
    let propulsion = PropulsionDriver::new(
        DualSelect::new(PinDriver::output(pins.gpio4)?, PinDriver::output(pins.gpio6)?),
        LedcDriver::new(peripherals.ledc.channel0, &propulsion_timer, pins.gpio5)?,
    );
    let steering = SteeringActuator::new(
        PinDriver::output(pins.gpio7)?,
        PinDriver::output(pins.gpio11)?,
    );
    let buzzer = Buzzer::new(LedcDriver::new(
        peripherals.ledc.channel1,
        &buzzer_timer,
        pins.gpio2,
    )?);

    let mut hw = HardwareAdapter::new(propulsion, steering, buzzer, FreeRtos);

    if let Err(e) = hw_init::init_ir_input() {
        // Outputs are still at reset level here.
        error!("IR init failed: {}, halting", e);
        return Err(Error::from(e).into());
    }

    // ── 4. Core ───────────────────────────────────────────────
    let mut remote = IrReceiverAdapter::from_isr_queue();
    let clock = Esp32TimeAdapter::new();
    let mut sink = LogEventSink::new();
    let mut controller = Controller::new(&config);

    controller.start(&mut hw, &mut sink);
    let watchdog = Watchdog::new(config.watchdog_timeout_ms);
    info!("Watchdog armed: {} ms", watchdog.timeout_ms());

    info!("System ready. Entering control loop.");

    // (driver faults, rejected IR frames, dropped IR edges)
    let mut reported = (0u32, 0u32, 0u32);

    // ── 5. Control loop ───────────────────────────────────────
    loop {
        let received = controller.poll_once(&mut remote, &mut hw, &clock, &mut sink);

        // Feed watchdog on every iteration.
        watchdog.feed();

        let counters = (hw.faults(), remote.rejected_frames(), IR_EDGES.dropped());
        if counters != reported {
            warn!(
                "Diagnostics: {} driver faults, {} rejected IR frames, {} dropped IR edges",
                counters.0, counters.1, counters.2
            );
            reported = counters;
        }

        if !received {
            FreeRtos::delay_ms(config.loop_idle_ms);
        }
    }
}
