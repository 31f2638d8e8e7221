use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::assign::{DuplicatePolicy, draw_assignments};
use crate::errors::WheelError;
use crate::rng::DrawRng;
use crate::session::Session;

/// Session shared between the scheduler task and its observers.
pub type SharedSession = Arc<RwLock<Session>>;

/// Probability of rolling a bonus team challenge after the last reveal.
pub const TEAM_CHALLENGE_PROBABILITY: f64 = 0.25;

/// Pacing of the sequential reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealPacing {
    /// Delay before each player's reveal.
    pub delay: Duration,
}

impl Default for RevealPacing {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(500),
        }
    }
}

impl RevealPacing {
    pub fn from_millis(ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(ms),
        }
    }

    /// Zero-delay pacing for tests.
    pub fn immediate() -> Self {
        Self::from_millis(0)
    }
}

/// Run one full assignment: draw for every player up front, then disclose
/// results one player at a time in roster order, pausing `pacing.delay`
/// before each reveal.
///
/// Re-entrancy: a second run while one is active fails with
/// [`WheelError::AssignmentBusy`] and touches nothing. A pool that cannot
/// satisfy the roster fails with [`WheelError::PoolInsufficient`], also
/// before any mutation.
///
/// Cancellation: `cancel` is honored only at the inter-reveal delay, so a
/// reveal either completes fully or never starts. On cancellation the
/// session leaves the Assigning phase with already-revealed players intact.
pub async fn run_assignment<R: DrawRng>(
    session: SharedSession,
    pacing: RevealPacing,
    mut rng: R,
    cancel: CancellationToken,
) -> Result<(), WheelError> {
    // Validate, draw, and enter the Assigning phase under one write lock so
    // two concurrent runs can never interleave their setup.
    let assignments = {
        let mut s = session.write().await;
        if s.is_assigning() {
            return Err(WheelError::AssignmentBusy);
        }
        let pool = s.active_weapons();
        let policy = DuplicatePolicy::from_flag(s.allow_duplicate());
        let drawn = draw_assignments(s.players(), &pool, s.challenges(), policy, &mut rng)?;
        s.begin_assignment();
        drawn
    };
    tracing::debug!(players = assignments.len(), "assignment run started");

    for assignment in &assignments {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("assignment run cancelled");
                session.write().await.finish_assignment(None);
                return Ok(());
            }
            _ = tokio::time::sleep(pacing.delay) => {}
        }
        session.write().await.apply_reveal(assignment);
    }

    let team_challenge = if rng.chance(TEAM_CHALLENGE_PROBABILITY) {
        let s = session.read().await;
        let challenges = s.challenges();
        Some(challenges[rng.pick_index(challenges.len())].clone())
    } else {
        None
    };

    session.write().await.finish_assignment(team_challenge);
    tracing::debug!("assignment run finished");
    Ok(())
}
