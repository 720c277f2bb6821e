//! Effect execution.
//!
//! Translates domain [`Effect`]s into [`ActuatorPort`] calls, in order.
//! The physical conventions (which pin goes HIGH, how percent maps to duty)
//! live behind the port in the drivers; this layer only guarantees the
//! port never sees a throttle above 100%.

use super::effects::Effect;
use super::ports::ActuatorPort;

/// Perform a single effect. Blocks for tones and safety pauses.
pub fn apply_effect(effect: &Effect, hw: &mut impl ActuatorPort) {
    match *effect {
        Effect::DriveMotor { percent, direction } => {
            hw.drive_propulsion(percent.min(100), direction);
        }
        Effect::SetSteering(side) => hw.set_steering(side),
        Effect::StopSteering => hw.stop_steering(),
        Effect::PlayTone(tone) => hw.play_tone(tone),
        Effect::SafetyPause { ms } => hw.hold(ms),
    }
}

/// Perform every effect in sequence. Returns `true` if any of them blocked.
pub fn apply_effects(effects: &[Effect], hw: &mut impl ActuatorPort) -> bool {
    let mut blocked = false;
    for effect in effects {
        apply_effect(effect, hw);
        blocked |= effect.blocks();
    }
    blocked
}
