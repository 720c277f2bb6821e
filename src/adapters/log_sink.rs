//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events to the ESP-IDF
//! logger (UART / USB-CDC in production).

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => info!("START | power=off steering=neutral"),
            AppEvent::PowerChanged { on } => {
                info!("POWER | {}", if *on { "on" } else { "off" });
            }
            AppEvent::SpeedChanged { from, to } => info!("SPEED | {}% -> {}%", from, to),
            AppEvent::DirectionChanged { to } => info!("DIR   | -> {:?}", to),
            AppEvent::SteeringChanged { from, to } => info!("STEER | {:?} -> {:?}", from, to),
            AppEvent::SteeringReleased => info!("STEER | released (hold timeout)"),
            AppEvent::Rejected(cmd) => info!("REJECT| {:?}", cmd),
        }
    }
}
