use serde::Serialize;

use crate::player::PlayerId;

/// What changed in the session. Observers that only need the minimal
/// "state changed, re-read" contract can ignore the variant entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionEvent {
    ModeChanged,
    RosterChanged,
    PlayerRenamed { id: PlayerId },
    PolicyChanged,
    PoolChanged,
    AssignmentStarted,
    PlayerRevealed { id: PlayerId },
    PlayerRerolled { id: PlayerId },
    TeamChallengeSet,
    AssignmentFinished,
}

/// A single notification emitted after every state mutation. `revision` is
/// the session's monotonic change counter after the mutation was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StateChange {
    pub revision: u64,
    #[serde(flatten)]
    pub event: SessionEvent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_change_serializes_flat() {
        let change = StateChange {
            revision: 7,
            event: SessionEvent::PlayerRevealed { id: 2 },
        };
        let json = serde_json::to_value(&change).unwrap();
        assert_eq!(json["revision"], 7);
        assert_eq!(json["kind"], "player_revealed");
        assert_eq!(json["id"], 2);
    }
}
