//! Integration tests for the Controller → dispatcher → actuators pipeline.
//!
//! These run on the host and drive the full loop (remote poll, dispatch,
//! effect application, hold-timeout tick) against mock adapters. The mock
//! hardware advances the simulated clock for every tone and pause, so
//! timing behaves as it would on the board.

use crate::mock_hw::{ActuatorCall, MockHardware, RecordingSink, ScriptedRemote, SimClock};

use irdrive::app::commands::{REPEAT_SENTINEL, RemoteCommand, RemoteEvent};
use irdrive::app::effects::Tone;
use irdrive::app::events::AppEvent;
use irdrive::app::ports::ClockPort;
use irdrive::app::service::Controller;
use irdrive::app::state::{Direction, SteerDirection, Steering};
use irdrive::config::ControllerConfig;

struct Rig {
    ctl: Controller,
    hw: MockHardware,
    clock: SimClock,
    remote: ScriptedRemote,
    sink: RecordingSink,
}

impl Rig {
    fn new() -> Self {
        Self::at(0)
    }

    fn at(ms: u32) -> Self {
        let clock = SimClock::at(ms);
        Self {
            ctl: Controller::new(&ControllerConfig::default()),
            hw: MockHardware::new(clock.clone()),
            clock,
            remote: ScriptedRemote::default(),
            sink: RecordingSink::default(),
        }
    }

    fn press(&mut self, cmd: RemoteCommand) {
        self.remote.press(cmd);
        assert!(self.step(), "scripted press must be received");
    }

    fn repeat_sentinel(&mut self) {
        self.remote.push(RemoteEvent::from_decoder(REPEAT_SENTINEL, false));
        self.step();
    }

    fn step(&mut self) -> bool {
        self.ctl
            .poll_once(&mut self.remote, &mut self.hw, &self.clock, &mut self.sink)
    }

    fn powered_on() -> Self {
        let mut rig = Self::new();
        rig.press(RemoteCommand::Power);
        rig.hw.clear();
        rig.sink.events.clear();
        rig
    }

    fn snapshot(&self) -> (bool, u8, Direction, Steering) {
        let s = self.ctl.state();
        (s.power, s.speed_percent, s.direction, s.steering)
    }
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_forces_safe_outputs_and_beeps() {
    let mut rig = Rig::new();
    rig.ctl.start(&mut rig.hw, &mut rig.sink);

    assert_eq!(rig.hw.calls, [ActuatorCall::AllOff, ActuatorCall::Tone(Tone::ShortBeep)]);
    assert_eq!(rig.sink.events, [AppEvent::Started]);
    assert_eq!(rig.snapshot(), (false, 0, Direction::Forward, Steering::Neutral));
}

// ── End-to-end scenario ───────────────────────────────────────

#[test]
fn power_speed_up_then_first_reversal() {
    let mut rig = Rig::new();

    rig.press(RemoteCommand::Power);
    assert_eq!(rig.snapshot(), (true, 15, Direction::Forward, Steering::Neutral));
    assert_eq!(rig.hw.tones(), [Tone::PowerOn]);

    rig.hw.clear();
    for _ in 0..3 {
        rig.press(RemoteCommand::SpeedUp);
    }
    assert_eq!(rig.ctl.state().speed_percent, 45);
    assert_eq!(rig.hw.tones(), [Tone::Confirm; 3]);
    assert_eq!(rig.hw.last_drive(), Some((45, Direction::Forward)));

    rig.hw.clear();
    rig.press(RemoteCommand::GoReverse);
    assert_eq!(rig.snapshot(), (true, 15, Direction::Reverse, Steering::Neutral));
    assert_eq!(
        rig.hw.calls,
        [
            ActuatorCall::Tone(Tone::Confirm),
            ActuatorCall::Drive { percent: 0, direction: Direction::Forward },
            ActuatorCall::Hold(2000),
            ActuatorCall::Drive { percent: 15, direction: Direction::Reverse },
        ]
    );
    assert!(rig.sink.events.contains(&AppEvent::DirectionChanged { to: Direction::Reverse }));
}

#[test]
fn reversal_is_stamped_after_the_safety_pause() {
    let mut rig = Rig::powered_on();
    let before = rig.clock.now_ms();

    rig.press(RemoteCommand::GoReverse);

    // Confirm (500 ms) + safety pause (2000 ms) have elapsed.
    assert_eq!(rig.clock.now_ms(), before + 2500);
    assert_eq!(rig.ctl.state().last_direction_change_ms, Some(before + 2500));
}

#[test]
fn reversal_inside_cooldown_is_rejected() {
    let mut rig = Rig::powered_on();
    rig.press(RemoteCommand::GoReverse);
    rig.hw.clear();

    rig.clock.advance(499);
    rig.press(RemoteCommand::GoForward);

    assert_eq!(rig.ctl.state().direction, Direction::Reverse);
    assert_eq!(rig.hw.calls, [ActuatorCall::Tone(Tone::Rejected)]);
    assert_eq!(rig.sink.events.last(), Some(&AppEvent::Rejected(RemoteCommand::GoForward)));
}

#[test]
fn reversal_after_cooldown_is_committed() {
    let mut rig = Rig::powered_on();
    rig.press(RemoteCommand::GoReverse);

    rig.clock.advance(500);
    rig.press(RemoteCommand::GoForward);

    assert_eq!(rig.snapshot(), (true, 15, Direction::Forward, Steering::Neutral));
}

#[test]
fn same_direction_request_is_silent() {
    let mut rig = Rig::powered_on();
    rig.press(RemoteCommand::GoForward);

    assert!(rig.hw.calls.is_empty());
    assert!(rig.sink.events.is_empty());
}

// ── Speed ─────────────────────────────────────────────────────

#[test]
fn preset_speed_twice_rejects_second() {
    let mut rig = Rig::powered_on();
    rig.press(RemoteCommand::PresetSpeed);
    rig.press(RemoteCommand::PresetSpeed);

    assert_eq!(rig.ctl.state().speed_percent, 30);
    assert_eq!(rig.hw.tones(), [Tone::Confirm, Tone::Rejected]);
}

#[test]
fn speed_down_stops_at_zero() {
    let mut rig = Rig::powered_on();
    rig.press(RemoteCommand::SpeedDown);
    rig.press(RemoteCommand::SpeedDown);
    assert_eq!(rig.ctl.state().speed_percent, 0);
    assert_eq!(rig.hw.last_drive(), Some((0, Direction::Forward)));

    rig.press(RemoteCommand::SpeedDown);
    assert_eq!(rig.ctl.state().speed_percent, 0);
    assert_eq!(rig.hw.tones().last(), Some(&Tone::Rejected));
}

#[test]
fn speed_up_saturates_at_full_throttle() {
    let mut rig = Rig::powered_on();
    for _ in 0..9 {
        rig.press(RemoteCommand::SpeedUp);
    }
    assert_eq!(rig.ctl.state().speed_percent, 100);

    rig.hw.clear();
    rig.press(RemoteCommand::SpeedUp);
    assert_eq!(rig.ctl.state().speed_percent, 100);
    assert_eq!(rig.hw.calls, [ActuatorCall::Tone(Tone::Rejected)]);
}

// ── Power ─────────────────────────────────────────────────────

#[test]
fn commands_while_off_are_ignored() {
    let mut rig = Rig::new();
    for cmd in RemoteCommand::ALL {
        if cmd == RemoteCommand::Power {
            continue;
        }
        rig.press(cmd);
    }
    assert!(rig.hw.calls.is_empty());
    assert!(rig.sink.events.is_empty());
    assert_eq!(rig.snapshot(), (false, 0, Direction::Forward, Steering::Neutral));
}

#[test]
fn power_off_stops_motor_and_steering_before_tone() {
    let mut rig = Rig::powered_on();
    rig.press(RemoteCommand::SteerRight);
    rig.hw.clear();

    rig.press(RemoteCommand::Power);

    assert_eq!(
        rig.hw.calls,
        [
            ActuatorCall::Drive { percent: 0, direction: Direction::Forward },
            ActuatorCall::StopSteering,
            ActuatorCall::Tone(Tone::PowerOff),
        ]
    );
    assert_eq!(rig.snapshot(), (false, 0, Direction::Forward, Steering::Neutral));
    assert!(!rig.hw.steering_active());
}

#[test]
fn power_on_after_reverse_starts_forward() {
    let mut rig = Rig::powered_on();
    rig.press(RemoteCommand::GoReverse);
    rig.press(RemoteCommand::Power);
    rig.press(RemoteCommand::Power);

    assert_eq!(rig.snapshot(), (true, 15, Direction::Forward, Steering::Neutral));
}

#[test]
fn held_power_button_does_not_toggle() {
    let mut rig = Rig::powered_on();
    rig.remote.push(RemoteEvent::repeat(RemoteCommand::Power.code()));
    rig.step();
    rig.repeat_sentinel();

    assert!(rig.ctl.state().power);
    assert!(rig.hw.calls.is_empty());
}

#[test]
fn unknown_code_is_dropped_silently() {
    let mut rig = Rig::powered_on();
    rig.remote.push(RemoteEvent::press(0x1234_5678));
    assert!(rig.step());

    assert!(rig.hw.calls.is_empty());
    assert!(rig.sink.events.is_empty());
}

// ── Steering ──────────────────────────────────────────────────

#[test]
fn steering_press_confirms_once_and_releases_after_timeout() {
    let mut rig = Rig::powered_on();
    rig.press(RemoteCommand::SteerLeft);

    assert_eq!(
        rig.hw.calls,
        [ActuatorCall::Steer(SteerDirection::Left), ActuatorCall::Tone(Tone::Confirm)]
    );
    // Timestamp taken after the confirm tone.
    assert_eq!(rig.ctl.state().last_steering_signal_ms, rig.clock.now_ms());

    rig.clock.advance(150);
    rig.step();
    assert_eq!(rig.ctl.state().steering, Steering::Left);

    rig.clock.advance(1);
    rig.step();
    assert_eq!(rig.ctl.state().steering, Steering::Neutral);
    assert!(!rig.hw.steering_active());
    assert_eq!(rig.sink.events.last(), Some(&AppEvent::SteeringReleased));
}

#[test]
fn held_steering_stays_engaged_through_repeats() {
    let mut rig = Rig::powered_on();
    rig.press(RemoteCommand::SteerRight);

    for _ in 0..10 {
        rig.clock.advance(108);
        rig.repeat_sentinel();
        assert_eq!(rig.ctl.state().steering, Steering::Right);
    }
    assert_eq!(rig.hw.tones(), [Tone::Confirm]);
    assert!(rig.hw.steering_active());

    rig.clock.advance(151);
    rig.step();
    assert_eq!(rig.ctl.state().steering, Steering::Neutral);
}

#[test]
fn switching_sides_confirms_again() {
    let mut rig = Rig::powered_on();
    rig.press(RemoteCommand::SteerLeft);
    rig.press(RemoteCommand::SteerRight);

    assert_eq!(rig.hw.tones(), [Tone::Confirm, Tone::Confirm]);
    assert!(rig.sink.events.contains(&AppEvent::SteeringChanged {
        from: Steering::Left,
        to: Steering::Right,
    }));
}

#[test]
fn steering_is_released_after_a_blocking_reversal() {
    let mut rig = Rig::powered_on();
    rig.press(RemoteCommand::SteerLeft);
    rig.press(RemoteCommand::GoReverse);

    // The reversal blocked for 2.5 s with no steering signal.
    assert_eq!(rig.ctl.state().steering, Steering::Neutral);
    assert!(rig.sink.events.contains(&AppEvent::SteeringReleased));
}

#[test]
fn release_timeout_survives_clock_wrap() {
    let mut rig = Rig::at(u32::MAX - 5_850);
    rig.press(RemoteCommand::Power);
    rig.press(RemoteCommand::SteerLeft);
    // PowerOn (5300) + Confirm (500) leaves the clock 50 ms before the wrap.
    assert_eq!(rig.clock.now_ms(), u32::MAX - 50);

    rig.clock.advance(140);
    assert!(rig.clock.now_ms() < 1_000);
    rig.step();
    assert_eq!(rig.ctl.state().steering, Steering::Left);

    rig.clock.advance(20);
    rig.step();
    assert_eq!(rig.ctl.state().steering, Steering::Neutral);
}

#[test]
fn poll_once_reports_whether_a_frame_arrived() {
    let mut rig = Rig::new();
    assert!(!rig.step());
    rig.remote.press(RemoteCommand::Power);
    assert!(rig.step());
}
