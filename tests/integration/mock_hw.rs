//! Mock adapters for integration tests.
//!
//! Records every actuator call so tests can assert on the full command
//! history without touching real GPIO/PWM registers. Blocking calls
//! (tones, safety pauses) advance a shared simulated clock by their real
//! duration, the way they would stall the firmware loop.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use irdrive::app::commands::{RemoteCommand, RemoteEvent};
use irdrive::app::effects::Tone;
use irdrive::app::events::AppEvent;
use irdrive::app::ports::{ActuatorPort, ClockPort, EventSink, RemotePort};
use irdrive::app::state::{Direction, SteerDirection};
use irdrive::drivers::buzzer::duration_ms;

// ── Simulated clock ───────────────────────────────────────────

#[derive(Clone, Default)]
pub struct SimClock(Rc<Cell<u32>>);

#[allow(dead_code)]
impl SimClock {
    pub fn at(ms: u32) -> Self {
        Self(Rc::new(Cell::new(ms)))
    }

    pub fn advance(&self, ms: u32) {
        self.0.set(self.0.get().wrapping_add(ms));
    }

    pub fn set(&self, ms: u32) {
        self.0.set(ms);
    }
}

impl ClockPort for SimClock {
    fn now_ms(&self) -> u32 {
        self.0.get()
    }
}

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    Drive { percent: u8, direction: Direction },
    Steer(SteerDirection),
    StopSteering,
    Tone(Tone),
    Hold(u32),
    AllOff,
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub calls: Vec<ActuatorCall>,
    clock: SimClock,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new(clock: SimClock) -> Self {
        Self {
            calls: Vec::new(),
            clock,
        }
    }

    pub fn tones(&self) -> Vec<Tone> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ActuatorCall::Tone(t) => Some(*t),
                _ => None,
            })
            .collect()
    }

    /// Last propulsion command, `None` if never driven.
    pub fn last_drive(&self) -> Option<(u8, Direction)> {
        self.calls.iter().rev().find_map(|c| match c {
            ActuatorCall::Drive { percent, direction } => Some((*percent, *direction)),
            _ => None,
        })
    }

    /// Whether the steering motor is currently energised.
    pub fn steering_active(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::Steer(_) => Some(true),
                ActuatorCall::StopSteering | ActuatorCall::AllOff => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl ActuatorPort for MockHardware {
    fn drive_propulsion(&mut self, percent: u8, direction: Direction) {
        self.calls.push(ActuatorCall::Drive { percent, direction });
    }

    fn set_steering(&mut self, side: SteerDirection) {
        self.calls.push(ActuatorCall::Steer(side));
    }

    fn stop_steering(&mut self) {
        self.calls.push(ActuatorCall::StopSteering);
    }

    fn play_tone(&mut self, tone: Tone) {
        self.calls.push(ActuatorCall::Tone(tone));
        self.clock.advance(duration_ms(tone));
    }

    fn hold(&mut self, ms: u32) {
        self.calls.push(ActuatorCall::Hold(ms));
        self.clock.advance(ms);
    }

    fn all_off(&mut self) {
        self.calls.push(ActuatorCall::AllOff);
    }
}

// ── Scripted remote ───────────────────────────────────────────

#[derive(Default)]
pub struct ScriptedRemote {
    queue: VecDeque<RemoteEvent>,
}

#[allow(dead_code)]
impl ScriptedRemote {
    pub fn press(&mut self, cmd: RemoteCommand) {
        self.queue.push_back(RemoteEvent::press(cmd.code()));
    }

    pub fn push(&mut self, event: RemoteEvent) {
        self.queue.push_back(event);
    }
}

impl RemotePort for ScriptedRemote {
    fn poll(&mut self) -> Option<RemoteEvent> {
        self.queue.pop_front()
    }
}

// ── Event sink ────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}
