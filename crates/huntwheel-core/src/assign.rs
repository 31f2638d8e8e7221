use crate::catalog::Weapon;
use crate::errors::WheelError;
use crate::player::{Player, PlayerId};
use crate::rng::DrawRng;

/// Whether multiple players may hold the same weapon simultaneously.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Independent draws with replacement.
    Allow,
    /// Draws without replacement; every player gets a distinct weapon.
    Distinct,
}

impl DuplicatePolicy {
    pub fn from_flag(allow_duplicate: bool) -> Self {
        if allow_duplicate {
            Self::Allow
        } else {
            Self::Distinct
        }
    }
}

/// One player's drawn result. Produced as a full batch by
/// [`draw_assignments`]; the reveal scheduler applies it incrementally.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub player_id: PlayerId,
    pub weapon: Weapon,
    pub challenge: String,
}

/// Minimum active pool size for a roster under a policy.
pub fn required_pool_size(roster: usize, policy: DuplicatePolicy) -> usize {
    match policy {
        DuplicatePolicy::Allow => 1,
        DuplicatePolicy::Distinct => roster,
    }
}

/// Map every player to a (weapon, challenge) pair.
///
/// Pure over its inputs: mutates nothing, fails with
/// [`WheelError::PoolInsufficient`] (naming the minimum pool size) before
/// any draw when the pool cannot satisfy the roster. Challenge draws are
/// always with replacement, even in distinct mode.
pub fn draw_assignments<R: DrawRng>(
    players: &[Player],
    pool: &[Weapon],
    challenges: &[String],
    policy: DuplicatePolicy,
    rng: &mut R,
) -> Result<Vec<Assignment>, WheelError> {
    debug_assert!(!players.is_empty(), "roster must be non-empty");
    debug_assert!(!challenges.is_empty(), "challenge catalog must be non-empty");

    let required = required_pool_size(players.len(), policy);
    if pool.len() < required {
        return Err(WheelError::PoolInsufficient { required });
    }

    let mut results = Vec::with_capacity(players.len());
    match policy {
        DuplicatePolicy::Allow => {
            for player in players {
                results.push(Assignment {
                    player_id: player.id,
                    weapon: pool[rng.pick_index(pool.len())].clone(),
                    challenge: challenges[rng.pick_index(challenges.len())].clone(),
                });
            }
        },
        DuplicatePolicy::Distinct => {
            let mut remaining: Vec<Weapon> = pool.to_vec();
            for player in players {
                let weapon = remaining.remove(rng.pick_index(remaining.len()));
                results.push(Assignment {
                    player_id: player.id,
                    weapon,
                    challenge: challenges[rng.pick_index(challenges.len())].clone(),
                });
            }
        },
    }
    Ok(results)
}
