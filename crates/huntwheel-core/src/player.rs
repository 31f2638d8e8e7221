use serde::{Deserialize, Serialize};

use crate::catalog::Weapon;

/// Unique identifier for a player, stable for the session lifetime.
pub type PlayerId = u64;

/// Number of reroll credits each player starts an assignment run with.
pub const STARTING_REROLLS: u8 = 1;

/// A member of the party roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub weapon: Option<Weapon>,
    pub challenge: Option<String>,
    pub rerolls_left: u8,
    /// False only while an assignment run has reset this player and not yet
    /// reached their reveal step. True at rest.
    pub revealed: bool,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            weapon: None,
            challenge: None,
            rerolls_left: STARTING_REROLLS,
            revealed: true,
        }
    }

    /// Reset assignment results ahead of a fresh run.
    pub(crate) fn clear_results(&mut self) {
        self.weapon = None;
        self.challenge = None;
        self.rerolls_left = STARTING_REROLLS;
        self.revealed = false;
    }
}
