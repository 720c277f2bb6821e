//! Remote command interpretation.
//!
//! [`CommandDispatcher::dispatch`] is the whole remote-control policy: it
//! takes one decoded frame, updates [`DeviceState`] and returns the effects
//! to perform. It never blocks and never touches hardware, so every rule
//! below is exercised directly by unit tests.
//!
//! | Button          | Repeat | Needs power | Accepted                        | Refused          |
//! |-----------------|--------|-------------|---------------------------------|------------------|
//! | Power           | ignore | no          | toggle, power-on/off tone       | never            |
//! | Preset speed    | ignore | yes         | speed := 30, confirm            | already 30       |
//! | Speed up/down   | ignore | yes         | ±10 clamped, confirm            | at bound         |
//! | Forward/Reverse | ignore | yes         | safety stop, speed := 15        | cooldown running |
//! | Steer left/right| act    | yes         | motor on, confirm on edge only  | never            |
//!
//! Refusals play the rejected tone and leave the state untouched. Unknown
//! codes, repeats of non-steering buttons and anything but Power while
//! switched off produce no effect at all.

use super::commands::{RemoteCommand, RemoteEvent};
use super::effects::{Effect, Effects, Tone, effects};
use super::state::{DeviceState, Direction, SteerDirection, Steering};
use crate::config::ControllerConfig;
use crate::safety::ReversalGuard;

pub struct CommandDispatcher {
    power_on_speed: u8,
    reversal_speed: u8,
    preset_speed: u8,
    speed_step: u8,
    safety_pause_ms: u32,
    reversal: ReversalGuard,
}

impl CommandDispatcher {
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            power_on_speed: config.power_on_speed_percent,
            reversal_speed: config.reversal_speed_percent,
            preset_speed: config.preset_speed_percent,
            speed_step: config.speed_step_percent,
            safety_pause_ms: config.safety_pause_ms,
            reversal: ReversalGuard::new(config),
        }
    }

    /// Apply one remote frame received at `now_ms`.
    pub fn dispatch(&self, event: RemoteEvent, now_ms: u32, state: &mut DeviceState) -> Effects {
        let Some(command) = event.command() else {
            return Effects::new();
        };
        if event.repeat && !command.acts_on_repeat() {
            return Effects::new();
        }
        if command != RemoteCommand::Power && !state.power {
            return Effects::new();
        }

        match command {
            RemoteCommand::Power => self.toggle_power(state),
            RemoteCommand::PresetSpeed => self.preset_speed(state),
            RemoteCommand::SpeedUp => self.step_speed(state, true),
            RemoteCommand::SpeedDown => self.step_speed(state, false),
            RemoteCommand::GoForward => self.reverse_into(Direction::Forward, now_ms, state),
            RemoteCommand::GoReverse => self.reverse_into(Direction::Reverse, now_ms, state),
            RemoteCommand::SteerLeft => Self::steer(SteerDirection::Left, now_ms, state),
            RemoteCommand::SteerRight => Self::steer(SteerDirection::Right, now_ms, state),
        }
    }

    fn toggle_power(&self, state: &mut DeviceState) -> Effects {
        if state.power {
            state.power = false;
            state.speed_percent = 0;
            state.steering = Steering::Neutral;
            effects([
                Effect::DriveMotor {
                    percent: 0,
                    direction: state.direction,
                },
                Effect::StopSteering,
                Effect::PlayTone(Tone::PowerOff),
            ])
        } else {
            state.power = true;
            state.speed_percent = self.power_on_speed;
            state.direction = Direction::Forward;
            effects([drive(state), Effect::PlayTone(Tone::PowerOn)])
        }
    }

    fn preset_speed(&self, state: &mut DeviceState) -> Effects {
        if state.speed_percent == self.preset_speed {
            return effects([Effect::PlayTone(Tone::Rejected)]);
        }
        state.speed_percent = self.preset_speed;
        effects([drive(state), Effect::PlayTone(Tone::Confirm)])
    }

    fn step_speed(&self, state: &mut DeviceState, up: bool) -> Effects {
        let current = state.speed_percent;
        let next = if up {
            current.saturating_add(self.speed_step).min(100)
        } else {
            current.saturating_sub(self.speed_step)
        };
        if next == current {
            return effects([Effect::PlayTone(Tone::Rejected)]);
        }
        state.speed_percent = next;
        effects([drive(state), Effect::PlayTone(Tone::Confirm)])
    }

    fn reverse_into(&self, target: Direction, now_ms: u32, state: &mut DeviceState) -> Effects {
        if state.direction == target {
            return Effects::new();
        }
        if !self.reversal.permits(now_ms, state.last_direction_change_ms) {
            return effects([Effect::PlayTone(Tone::Rejected)]);
        }

        let coast = Effect::DriveMotor {
            percent: 0,
            direction: state.direction,
        };
        state.last_direction_change_ms = Some(now_ms);
        state.direction = target;
        state.speed_percent = self.reversal_speed;
        effects([
            Effect::PlayTone(Tone::Confirm),
            coast,
            Effect::SafetyPause {
                ms: self.safety_pause_ms,
            },
            drive(state),
        ])
    }

    fn steer(side: SteerDirection, now_ms: u32, state: &mut DeviceState) -> Effects {
        let target = Steering::from(side);
        let edge = state.steering != target;

        state.steering = target;
        state.last_steering_signal_ms = now_ms;

        if edge {
            effects([Effect::SetSteering(side), Effect::PlayTone(Tone::Confirm)])
        } else {
            effects([Effect::SetSteering(side)])
        }
    }
}

fn drive(state: &DeviceState) -> Effect {
    Effect::DriveMotor {
        percent: state.speed_percent,
        direction: state.direction,
    }
}
