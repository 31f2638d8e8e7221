use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::assign::Assignment;
use crate::catalog::{Weapon, default_challenges, default_weapons};
use crate::events::{SessionEvent, StateChange};
use crate::player::{Player, PlayerId};

/// Smallest allowed roster.
pub const MIN_PLAYERS: usize = 2;
/// Largest allowed roster.
pub const MAX_PLAYERS: usize = 4;

/// Default capacity of the change-notification channel.
const CHANGE_CHANNEL_CAPACITY: usize = 256;

/// Which surface of the app is active. A mode switch never resets
/// in-flight assignment state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Single,
    Multiplayer,
}

/// Assignment run state machine. `Assigning` blocks roster size mutation,
/// rerolls, and re-entrant runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Assigning,
}

/// Single source of truth for the roster, policy flags, active weapon pool,
/// and team challenge. Owned by the application root; presentation layers
/// observe it through [`Session::subscribe`] and read-only accessors.
#[derive(Debug)]
pub struct Session {
    mode: Mode,
    weapons: Vec<Weapon>,
    challenges: Vec<String>,
    /// Names of the currently active subset of the weapon catalog.
    active_weapons: Vec<String>,
    allow_duplicate: bool,
    players: Vec<Player>,
    team_challenge: Option<String>,
    phase: Phase,
    next_player_id: PlayerId,
    revision: u64,
    changes: broadcast::Sender<StateChange>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Session with the built-in catalog, all weapons active, and the
    /// minimum two-player roster.
    pub fn new() -> Self {
        Self::with_catalog(default_weapons(), default_challenges())
    }

    /// Session over a caller-supplied catalog. The challenge catalog must be
    /// non-empty; this is a precondition, not a runtime error.
    pub fn with_catalog(weapons: Vec<Weapon>, challenges: Vec<String>) -> Self {
        debug_assert!(!challenges.is_empty(), "challenge catalog must be non-empty");
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        let active_weapons = weapons.iter().map(|w| w.name.clone()).collect();
        let players = vec![Player::new(1, "玩家1"), Player::new(2, "玩家2")];
        Self {
            mode: Mode::default(),
            weapons,
            challenges,
            active_weapons,
            allow_duplicate: true,
            players,
            team_challenge: None,
            phase: Phase::Idle,
            next_player_id: 3,
            revision: 0,
            changes,
        }
    }

    // ---- observers ----------------------------------------------------

    /// Subscribe to change notifications. One notification is sent after
    /// every state mutation, in mutation order.
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.changes.subscribe()
    }

    fn notify(&mut self, event: SessionEvent) {
        self.revision += 1;
        // Nobody listening is fine; notifications are fire-and-forget.
        let _ = self.changes.send(StateChange {
            revision: self.revision,
            event,
        });
    }

    // ---- read access --------------------------------------------------

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_assigning(&self) -> bool {
        self.phase == Phase::Assigning
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn allow_duplicate(&self) -> bool {
        self.allow_duplicate
    }

    pub fn team_challenge(&self) -> Option<&str> {
        self.team_challenge.as_deref()
    }

    pub fn weapons(&self) -> &[Weapon] {
        &self.weapons
    }

    pub fn challenges(&self) -> &[String] {
        &self.challenges
    }

    pub fn active_weapon_names(&self) -> &[String] {
        &self.active_weapons
    }

    /// The active weapon pool, resolved against the catalog in catalog order.
    pub fn active_weapons(&self) -> Vec<Weapon> {
        self.weapons
            .iter()
            .filter(|w| self.active_weapons.iter().any(|n| n == &w.name))
            .cloned()
            .collect()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Serializable read-only view of the whole session.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            mode: self.mode,
            phase: self.phase,
            allow_duplicate: self.allow_duplicate,
            active_weapons: self.active_weapons.clone(),
            players: self.players.clone(),
            team_challenge: self.team_challenge.clone(),
            revision: self.revision,
        }
    }

    // ---- controlled mutators ------------------------------------------

    /// Switch surfaces. No-op (without notification) if unchanged.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            self.mode = mode;
            self.notify(SessionEvent::ModeChanged);
        }
    }

    /// Add a player at the end of the roster. Silent no-op when the roster
    /// is full or an assignment run is in flight.
    pub fn add_player(&mut self, name: impl Into<String>) -> Option<PlayerId> {
        if self.players.len() >= MAX_PLAYERS || self.is_assigning() {
            return None;
        }
        let id = self.next_player_id;
        self.next_player_id += 1;
        self.players.push(Player::new(id, name));
        self.notify(SessionEvent::RosterChanged);
        Some(id)
    }

    /// Remove a player. Silent no-op when the roster would drop below the
    /// minimum, the id is unknown, or an assignment run is in flight.
    pub fn remove_player(&mut self, id: PlayerId) -> bool {
        if self.players.len() <= MIN_PLAYERS || self.is_assigning() {
            return false;
        }
        let before = self.players.len();
        self.players.retain(|p| p.id != id);
        if self.players.len() == before {
            return false;
        }
        self.notify(SessionEvent::RosterChanged);
        true
    }

    /// Rename a player. Allowed at any time, including mid-run.
    pub fn rename_player(&mut self, id: PlayerId, name: impl Into<String>) -> bool {
        let Some(player) = self.players.iter_mut().find(|p| p.id == id) else {
            return false;
        };
        player.name = name.into();
        self.notify(SessionEvent::PlayerRenamed { id });
        true
    }

    pub fn set_allow_duplicate(&mut self, allow: bool) {
        if self.allow_duplicate != allow {
            self.allow_duplicate = allow;
            self.notify(SessionEvent::PolicyChanged);
        }
    }

    /// Replace the active weapon pool. Unknown names are dropped and the
    /// pool keeps catalog order regardless of input order.
    pub fn set_active_weapons(&mut self, names: &[String]) {
        self.active_weapons = self
            .weapons
            .iter()
            .filter(|w| names.iter().any(|n| n == &w.name))
            .map(|w| w.name.clone())
            .collect();
        self.notify(SessionEvent::PoolChanged);
    }

    // ---- assignment-run hooks (crate-internal) ------------------------

    /// Enter the Assigning phase: clear every player's previous results,
    /// drop the team challenge, and notify. Caller must have verified the
    /// phase is Idle.
    pub(crate) fn begin_assignment(&mut self) {
        debug_assert_eq!(self.phase, Phase::Idle);
        self.phase = Phase::Assigning;
        self.team_challenge = None;
        for player in &mut self.players {
            player.clear_results();
        }
        self.notify(SessionEvent::AssignmentStarted);
    }

    /// Atomically disclose one player's result.
    pub(crate) fn apply_reveal(&mut self, assignment: &Assignment) {
        let id = assignment.player_id;
        if let Some(player) = self.players.iter_mut().find(|p| p.id == id) {
            player.weapon = Some(assignment.weapon.clone());
            player.challenge = Some(assignment.challenge.clone());
            player.revealed = true;
            self.notify(SessionEvent::PlayerRevealed { id });
        } else {
            tracing::warn!(id, "reveal for player no longer in roster");
        }
    }

    /// Leave the Assigning phase, optionally storing a team challenge.
    pub(crate) fn finish_assignment(&mut self, team_challenge: Option<String>) {
        if let Some(challenge) = team_challenge {
            self.team_challenge = Some(challenge);
            self.notify(SessionEvent::TeamChallengeSet);
        }
        self.phase = Phase::Idle;
        self.notify(SessionEvent::AssignmentFinished);
    }

    /// Apply a successful reroll: new weapon, fresh challenge, one credit.
    pub(crate) fn apply_reroll(&mut self, id: PlayerId, weapon: Weapon, challenge: String) {
        if let Some(player) = self.players.iter_mut().find(|p| p.id == id) {
            player.weapon = Some(weapon);
            player.challenge = Some(challenge);
            player.rerolls_left = player.rerolls_left.saturating_sub(1);
            self.notify(SessionEvent::PlayerRerolled { id });
        }
    }
}

/// Serializable snapshot of the session for presentation layers.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub mode: Mode,
    pub phase: Phase,
    pub allow_duplicate: bool,
    pub active_weapons: Vec<String>,
    pub players: Vec<Player>,
    pub team_challenge: Option<String>,
    pub revision: u64,
}
