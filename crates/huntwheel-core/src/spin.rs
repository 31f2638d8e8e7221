use std::f64::consts::PI;

use serde::Serialize;

use crate::catalog::Weapon;
use crate::errors::WheelError;
use crate::rng::DrawRng;

/// A spin needs at least two active weapons to be meaningful.
pub const MIN_SPIN_WEAPONS: usize = 2;

/// Probability that a spin result comes with a challenge attached.
pub const SPIN_CHALLENGE_PROBABILITY: f64 = 0.75;

/// Per-frame speed multiplier while the wheel coasts to rest.
const DECAY: f64 = 0.98;
/// Speed below which the wheel is considered stopped.
const MIN_SPEED: f64 = 0.001;
/// The result pointer sits at the top of the wheel.
const POINTER_ANGLE: f64 = 1.5 * PI;

const LAUNCH_SPEED_MIN: f64 = 0.3;
const LAUNCH_SPEED_SPAN: f64 = 0.2;

/// Kinematic state of the single-player wheel. The renderer owns the
/// frame loop; this type owns the math.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinState {
    /// Accumulated rotation in radians.
    pub rotation: f64,
    /// Radians advanced per frame.
    pub speed: f64,
}

impl SpinState {
    /// Launch from the current rest angle with a random initial speed.
    pub fn launch<R: DrawRng>(rest_rotation: f64, rng: &mut R) -> Self {
        Self {
            rotation: rest_rotation % (2.0 * PI),
            speed: LAUNCH_SPEED_MIN + rng.fraction() * LAUNCH_SPEED_SPAN,
        }
    }

    /// Advance one frame. Returns false once the wheel has stopped.
    pub fn step(&mut self) -> bool {
        if self.is_stopped() {
            return false;
        }
        self.rotation += self.speed;
        self.speed *= DECAY;
        true
    }

    pub fn is_stopped(&self) -> bool {
        self.speed <= MIN_SPEED
    }
}

/// Index of the wheel segment under the pointer for a wheel of
/// `segments` equal slices.
pub fn segment_under_pointer(rotation: f64, segments: usize) -> usize {
    debug_assert!(segments > 0);
    let final_angle = rotation.rem_euclid(2.0 * PI);
    let corrected = (POINTER_ANGLE - final_angle + 2.0 * PI).rem_euclid(2.0 * PI);
    let step = 2.0 * PI / segments as f64;
    // Float edge at exactly 2π maps back onto the last segment.
    ((corrected / step) as usize).min(segments - 1)
}

/// Outcome of a finished spin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpinOutcome {
    pub weapon: Weapon,
    /// Attached with probability [`SPIN_CHALLENGE_PROBABILITY`].
    pub challenge: Option<String>,
    /// Rest rotation, for renderers that want to draw the final frame.
    pub rotation: f64,
}

/// Run a whole spin to rest and resolve its outcome. Used by headless
/// callers that skip the frame-by-frame animation.
pub fn spin_to_rest<R: DrawRng>(
    active: &[Weapon],
    challenges: &[String],
    rest_rotation: f64,
    rng: &mut R,
) -> Result<SpinOutcome, WheelError> {
    if active.len() < MIN_SPIN_WEAPONS {
        return Err(WheelError::PoolInsufficient {
            required: MIN_SPIN_WEAPONS,
        });
    }
    let mut state = SpinState::launch(rest_rotation, rng);
    while state.step() {}
    Ok(resolve(active, challenges, state.rotation, rng))
}

/// Resolve a stopped wheel into its outcome.
pub fn resolve<R: DrawRng>(
    active: &[Weapon],
    challenges: &[String],
    rotation: f64,
    rng: &mut R,
) -> SpinOutcome {
    let weapon = active[segment_under_pointer(rotation, active.len())].clone();
    let challenge = if rng.chance(SPIN_CHALLENGE_PROBABILITY) {
        Some(challenges[rng.pick_index(challenges.len())].clone())
    } else {
        None
    };
    SpinOutcome {
        weapon,
        challenge,
        rotation,
    }
}
