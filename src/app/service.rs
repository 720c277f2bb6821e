//! Application service, the hexagonal core.
//!
//! [`Controller`] owns the device state, the command dispatcher and the
//! steering hold-timeout monitor. It exposes one call per control-loop
//! step. All I/O flows through port traits injected at call sites, making
//! the entire service testable with mock adapters.
//!
//! ```text
//!   RemotePort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!    ClockPort ──▶ │        Controller         │
//! ActuatorPort ◀── │ Dispatcher · HoldTimeout  │
//!                  └──────────────────────────┘
//! ```
//!
//! The loop is single-threaded and cooperative: tones and the reversal
//! safety pause block inside the actuator port, and nothing else runs
//! meanwhile. Timestamps the dispatcher wrote are therefore refreshed once
//! blocking effects have completed, so the steering release timeout and
//! the reversal cooldown both count from the end of the tone or pause.

use log::info;

use crate::config::ControllerConfig;
use crate::safety::HoldTimeoutMonitor;

use super::actuation::apply_effects;
use super::commands::RemoteEvent;
use super::dispatcher::CommandDispatcher;
use super::effects::{Effect, Tone};
use super::events::AppEvent;
use super::ports::{ActuatorPort, ClockPort, EventSink, RemotePort};
use super::state::DeviceState;

// ───────────────────────────────────────────────────────────────
// Controller
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct Controller {
    state: DeviceState,
    dispatcher: CommandDispatcher,
    monitor: HoldTimeoutMonitor,
    /// Most recent button code, used to resolve bare repeat sentinels.
    last_code: Option<u32>,
    frames_handled: u64,
}

impl Controller {
    /// Construct the service from configuration.
    ///
    /// Does **not** touch outputs; call [`start`](Self::start) next.
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            state: DeviceState::new(),
            dispatcher: CommandDispatcher::new(config),
            monitor: HoldTimeoutMonitor::new(config),
            last_code: None,
            frames_handled: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Force every output to its safe level and announce readiness.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        hw.all_off();
        apply_effects(&[Effect::PlayTone(Tone::ShortBeep)], hw);
        sink.emit(&AppEvent::Started);
        info!("Controller started (power off, steering neutral)");
    }

    // ── Per-iteration orchestration ───────────────────────────

    /// Run one loop iteration: poll the remote, dispatch whatever arrived,
    /// then run the hold-timeout monitor unconditionally.
    ///
    /// Returns `true` if a frame was received.
    pub fn poll_once(
        &mut self,
        remote: &mut impl RemotePort,
        hw: &mut impl ActuatorPort,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) -> bool {
        let received = remote.poll();
        if let Some(event) = received {
            self.handle_event(event, hw, clock, sink);
        }
        self.tick(hw, clock, sink);
        received.is_some()
    }

    /// Process one remote frame.
    pub fn handle_event(
        &mut self,
        event: RemoteEvent,
        hw: &mut impl ActuatorPort,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) {
        let Some(event) = self.resolve_sentinel(event) else {
            return;
        };
        self.frames_handled += 1;

        let before = self.state;
        let effects = self.dispatcher.dispatch(event, clock.now_ms(), &mut self.state);
        if effects.is_empty() {
            return;
        }

        if apply_effects(&effects, hw) {
            self.restamp_after_blocking(&effects, clock.now_ms());
        }
        self.report(before, event, &effects, sink);
    }

    /// Run the steering hold-timeout monitor.
    pub fn tick(
        &mut self,
        hw: &mut impl ActuatorPort,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) {
        let effects = self.monitor.tick(clock.now_ms(), &mut self.state);
        if effects.is_empty() {
            return;
        }
        apply_effects(&effects, hw);
        sink.emit(&AppEvent::SteeringReleased);
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current device state.
    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    /// Frames handed to the dispatcher since startup.
    pub fn frames_handled(&self) -> u64 {
        self.frames_handled
    }

    // ── Internal ──────────────────────────────────────────────

    /// Give a bare repeat sentinel the identity of the last button seen.
    fn resolve_sentinel(&mut self, event: RemoteEvent) -> Option<RemoteEvent> {
        if event.is_sentinel() {
            return self.last_code.map(RemoteEvent::repeat);
        }
        self.last_code = Some(event.code);
        Some(event)
    }

    fn restamp_after_blocking(&mut self, effects: &[Effect], now_ms: u32) {
        for effect in effects {
            match effect {
                Effect::SetSteering(_) => self.state.last_steering_signal_ms = now_ms,
                Effect::SafetyPause { .. } => self.state.last_direction_change_ms = Some(now_ms),
                _ => {}
            }
        }
    }

    fn report(
        &self,
        before: DeviceState,
        event: RemoteEvent,
        effects: &[Effect],
        sink: &mut impl EventSink,
    ) {
        let after = self.state;

        if effects.contains(&Effect::PlayTone(Tone::Rejected)) {
            if let Some(command) = event.command() {
                sink.emit(&AppEvent::Rejected(command));
            }
        }
        if after.power != before.power {
            sink.emit(&AppEvent::PowerChanged { on: after.power });
        }
        if after.speed_percent != before.speed_percent {
            sink.emit(&AppEvent::SpeedChanged {
                from: before.speed_percent,
                to: after.speed_percent,
            });
        }
        if after.direction != before.direction {
            sink.emit(&AppEvent::DirectionChanged { to: after.direction });
        }
        if after.steering != before.steering {
            sink.emit(&AppEvent::SteeringChanged {
                from: before.steering,
                to: after.steering,
            });
        }
    }
}
