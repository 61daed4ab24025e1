//! Roster model - opponent pool, history pool and single-level undo

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::player::{PlayerId, ROSTER_SIZE};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Alive count of a fresh game: every opponent plus the tracking player
pub const FRESH_ALIVE: usize = ROSTER_SIZE + 1;

/// Recycle once the history holds more than `alive - RECYCLE_MARGIN` ids
const RECYCLE_MARGIN: usize = 4;

/// No recycling once the lobby has this many players or fewer
const MIN_ALIVE_FOR_RECYCLE: usize = 3;

/// Opponent pool size below which a resting player is pulled back
const MIN_OPPONENTS: usize = 3;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("expected {expected} names, got {found}")]
    InvalidRoster { expected: usize, found: usize },

    #[error("name for player {0} is empty")]
    EmptyName(PlayerId),

    #[error("player {0} is not in the opponent pool")]
    NotInPool(PlayerId),

    #[error("no player with id {0} (ids run 1-7)")]
    UnknownPlayer(u8),
}

// ============================================================================
// CORE TYPES
// ============================================================================

/// Where a player currently sits
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerStatus {
    /// In the opponent pool
    Eligible,
    /// In the history pool
    Resting,
    /// Removed from the lobby
    Deleted,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Snapshot {
    opponents: Vec<PlayerId>,
    history: Vec<PlayerId>,
}

/// Authoritative tracker state (mutate in place)
///
/// `opponents` and `history` are disjoint and together hold every player
/// that has not been deleted. `alive` is always one more than that count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Roster {
    opponents: Vec<PlayerId>,
    history: Vec<PlayerId>,
    names: [String; ROSTER_SIZE],
    alive: usize,
    undo: Option<Snapshot>,
}

impl Roster {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Fresh game with names "1".."7"
    pub fn new() -> Self {
        Self {
            opponents: PlayerId::all().collect(),
            history: Vec::new(),
            names: std::array::from_fn(|i| (i + 1).to_string()),
            alive: FRESH_ALIVE,
            undo: None,
        }
    }

    /// Fresh game with the given names, assigned to ids 1..7 in order
    pub fn initialize<I, S>(names: I) -> Result<Self, RosterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let found = names.len();
        let names: [String; ROSTER_SIZE] = names.try_into().map_err(|_| RosterError::InvalidRoster {
            expected: ROSTER_SIZE,
            found,
        })?;

        if let Some(id) = PlayerId::all().find(|id| names[id.index()].trim().is_empty()) {
            return Err(RosterError::EmptyName(id));
        }

        let roster = Self {
            names,
            ..Self::new()
        };
        info!(names = ?roster.names, "initialized roster");
        Ok(roster)
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// Players eligible to fight, front first
    pub fn opponents(&self) -> &[PlayerId] {
        &self.opponents
    }

    /// Players who already fought this cycle, in fight order
    pub fn history(&self) -> &[PlayerId] {
        &self.history
    }

    pub fn name(&self, id: PlayerId) -> &str {
        &self.names[id.index()]
    }

    /// Every (id, name) pair in id order, deleted players included
    pub fn names(&self) -> impl Iterator<Item = (PlayerId, &str)> + '_ {
        PlayerId::all().map(move |id| (id, self.name(id)))
    }

    /// Players still in the lobby, the tracking player included
    pub fn alive(&self) -> usize {
        self.alive
    }

    pub fn can_undo(&self) -> bool {
        self.undo.is_some()
    }

    pub fn is_eligible(&self, id: PlayerId) -> bool {
        self.opponents.contains(&id)
    }

    pub fn status(&self, id: PlayerId) -> PlayerStatus {
        if self.opponents.contains(&id) {
            PlayerStatus::Eligible
        } else if self.history.contains(&id) {
            PlayerStatus::Resting
        } else {
            PlayerStatus::Deleted
        }
    }

    // ========================================================================
    // MUTATIONS
    // ========================================================================

    pub fn rename(&mut self, id: PlayerId, new_name: impl Into<String>) {
        self.names[id.index()] = new_name.into();
        debug!(player = %id, name = %self.name(id), "renamed player");
    }

    /// Move a player from the opponent pool into the history pool
    ///
    /// Overwrites the undo snapshot, then recycles the longest-resting
    /// player to the front of the opponent pool if the pool got too small.
    pub fn fight(&mut self, id: PlayerId) -> Result<(), RosterError> {
        let pos = self
            .opponents
            .iter()
            .position(|&p| p == id)
            .ok_or(RosterError::NotInPool(id))?;

        self.undo = Some(Snapshot {
            opponents: self.opponents.clone(),
            history: self.history.clone(),
        });

        self.opponents.remove(pos);
        self.history.push(id);

        if self.should_recycle() {
            let rested = self.history.remove(0);
            self.opponents.insert(0, rested);
            debug!(player = %rested, "recycled into opponent pool");
        }

        self.log_pools("fight");
        Ok(())
    }

    /// Restore the pools from before the last fight
    ///
    /// Returns false (and changes nothing) when there is no snapshot.
    pub fn undo(&mut self) -> bool {
        match self.undo.take() {
            Some(snapshot) => {
                self.opponents = snapshot.opponents;
                self.history = snapshot.history;
                self.log_pools("undo");
                true
            }
            None => false,
        }
    }

    /// Remove a player from the lobby
    ///
    /// Always drops the undo snapshot. The alive count only moves when the
    /// player was still present, so repeated deletes are no-ops.
    pub fn delete_player(&mut self, id: PlayerId) -> bool {
        let from_opponents = remove_id(&mut self.opponents, id);
        let from_history = remove_id(&mut self.history, id);
        self.undo = None;

        let removed = from_opponents || from_history;
        if removed {
            self.alive -= 1;
            info!(player = %id, alive = self.alive, "deleted player");
        } else {
            debug!(player = %id, "player already deleted");
        }
        self.log_pools("delete");
        removed
    }

    /// Fold the history pool back onto the end of the opponent pool
    pub fn reset(&mut self) {
        let history = std::mem::take(&mut self.history);
        self.opponents.extend(history);
        self.log_pools("reset");
    }

    /// Replace everything with a fresh game using default names
    pub fn new_game(&mut self) {
        *self = Self::new();
        info!("started new game");
    }

    // ========================================================================
    // HELPERS
    // ========================================================================

    fn should_recycle(&self) -> bool {
        // history.len() > alive - RECYCLE_MARGIN, kept free of underflow
        self.history.len() + RECYCLE_MARGIN > self.alive
            && self.alive > MIN_ALIVE_FOR_RECYCLE
            && self.opponents.len() < MIN_OPPONENTS
    }

    fn log_pools(&self, op: &str) {
        debug!(op = op, opponents = ?self.opponents, history = ?self.history, "pools");
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

fn remove_id(pool: &mut Vec<PlayerId>, id: PlayerId) -> bool {
    match pool.iter().position(|&p| p == id) {
        Some(pos) => {
            pool.remove(pos);
            true
        }
        None => false,
    }
}

/// Split multi-line roster text into exactly seven names
///
/// Blank lines are skipped and names are trimmed. Both `\n` and `\r\n`
/// line endings are accepted.
pub fn parse_names(text: &str) -> Result<Vec<String>, RosterError> {
    let names: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if names.len() != ROSTER_SIZE {
        return Err(RosterError::InvalidRoster {
            expected: ROSTER_SIZE,
            found: names.len(),
        });
    }
    Ok(names)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u8) -> PlayerId {
        PlayerId::new(raw).unwrap()
    }

    fn ids(raw: &[u8]) -> Vec<PlayerId> {
        raw.iter().map(|&r| id(r)).collect()
    }

    fn lettered() -> Roster {
        Roster::initialize(["A", "B", "C", "D", "E", "F", "G"]).unwrap()
    }

    #[test]
    fn test_initialize() {
        let roster = lettered();
        assert_eq!(roster.opponents(), ids(&[1, 2, 3, 4, 5, 6, 7]).as_slice());
        assert!(roster.history().is_empty());
        assert_eq!(roster.alive(), 8);
        assert!(!roster.can_undo());
        assert_eq!(roster.name(id(1)), "A");
        assert_eq!(roster.name(id(7)), "G");
    }

    #[test]
    fn test_initialize_wrong_count() {
        let err = Roster::initialize(["A", "B"]).unwrap_err();
        assert_eq!(err, RosterError::InvalidRoster { expected: 7, found: 2 });

        let err = Roster::initialize(vec!["x"; 8]).unwrap_err();
        assert_eq!(err, RosterError::InvalidRoster { expected: 7, found: 8 });
    }

    #[test]
    fn test_initialize_empty_name() {
        let err = Roster::initialize(["A", "B", "", "D", "E", "F", "G"]).unwrap_err();
        assert_eq!(err, RosterError::EmptyName(id(3)));
    }

    #[test]
    fn test_default_names() {
        let roster = Roster::new();
        let names: Vec<&str> = roster.names().map(|(_, n)| n).collect();
        assert_eq!(names, vec!["1", "2", "3", "4", "5", "6", "7"]);
    }

    #[test]
    fn test_fight_moves_to_history() {
        let mut roster = lettered();
        roster.fight(id(3)).unwrap();
        assert_eq!(roster.opponents(), ids(&[1, 2, 4, 5, 6, 7]).as_slice());
        assert_eq!(roster.history(), ids(&[3]).as_slice());
        assert_eq!(roster.status(id(3)), PlayerStatus::Resting);
        assert!(roster.can_undo());
    }

    #[test]
    fn test_fight_not_in_pool() {
        let mut roster = lettered();
        roster.fight(id(3)).unwrap();
        let before = roster.clone();

        assert_eq!(roster.fight(id(3)), Err(RosterError::NotInPool(id(3))));
        assert_eq!(roster, before);
    }

    #[test]
    fn test_recycle_rule() {
        let mut roster = lettered();
        for raw in 1..=4 {
            roster.fight(id(raw)).unwrap();
        }
        assert_eq!(roster.opponents(), ids(&[5, 6, 7]).as_slice());
        assert_eq!(roster.history(), ids(&[1, 2, 3, 4]).as_slice());

        // Pools would drop to 2/5; player 1 rested longest and comes back first
        roster.fight(id(5)).unwrap();
        assert_eq!(roster.opponents(), ids(&[1, 6, 7]).as_slice());
        assert_eq!(roster.history(), ids(&[2, 3, 4, 5]).as_slice());

        roster.fight(id(6)).unwrap();
        assert_eq!(roster.opponents(), ids(&[2, 1, 7]).as_slice());
        assert_eq!(roster.history(), ids(&[3, 4, 5, 6]).as_slice());
    }

    #[test]
    fn test_no_recycle_in_tiny_lobby() {
        let mut roster = lettered();
        for raw in 3..=7 {
            roster.delete_player(id(raw));
        }
        assert_eq!(roster.alive(), 3);

        roster.fight(id(1)).unwrap();
        roster.fight(id(2)).unwrap();
        assert!(roster.opponents().is_empty());
        assert_eq!(roster.history(), ids(&[1, 2]).as_slice());
    }

    #[test]
    fn test_recycle_with_three_left() {
        let mut roster = lettered();
        for raw in 4..=7 {
            roster.delete_player(id(raw));
        }
        assert_eq!(roster.alive(), 4);

        // 2 opponents, 1 resting: the rule immediately returns the fighter
        roster.fight(id(2)).unwrap();
        assert_eq!(roster.opponents(), ids(&[2, 1, 3]).as_slice());
        assert!(roster.history().is_empty());
    }

    #[test]
    fn test_undo_round_trip() {
        let mut roster = lettered();
        roster.fight(id(2)).unwrap();
        roster.fight(id(5)).unwrap();
        let before = (roster.opponents().to_vec(), roster.history().to_vec());

        roster.fight(id(1)).unwrap();
        assert!(roster.undo());
        assert_eq!(roster.opponents(), before.0.as_slice());
        assert_eq!(roster.history(), before.1.as_slice());

        // Single level: the earlier snapshot was overwritten
        assert!(!roster.undo());
        assert_eq!(roster.opponents(), before.0.as_slice());
    }

    #[test]
    fn test_undo_restores_recycle() {
        let mut roster = lettered();
        for raw in 1..=4 {
            roster.fight(id(raw)).unwrap();
        }
        roster.fight(id(5)).unwrap();
        roster.undo();
        assert_eq!(roster.opponents(), ids(&[5, 6, 7]).as_slice());
        assert_eq!(roster.history(), ids(&[1, 2, 3, 4]).as_slice());
    }

    #[test]
    fn test_undo_without_fight() {
        let mut roster = lettered();
        let before = roster.clone();
        assert!(!roster.undo());
        assert_eq!(roster, before);
    }

    #[test]
    fn test_delete_player() {
        let mut roster = lettered();
        roster.fight(id(2)).unwrap();
        assert!(roster.delete_player(id(2)));
        assert!(roster.delete_player(id(4)));

        assert_eq!(roster.opponents(), ids(&[1, 3, 5, 6, 7]).as_slice());
        assert!(roster.history().is_empty());
        assert_eq!(roster.alive(), 6);
        assert!(!roster.can_undo());
        assert_eq!(roster.status(id(4)), PlayerStatus::Deleted);
        // Names outlive deletion
        assert_eq!(roster.name(id(4)), "D");
    }

    #[test]
    fn test_delete_twice() {
        let mut roster = lettered();
        roster.delete_player(id(3));
        let once = roster.clone();

        assert!(!roster.delete_player(id(3)));
        assert_eq!(roster, once);
        assert_eq!(roster.alive(), 7);
    }

    #[test]
    fn test_delete_clears_undo() {
        let mut roster = lettered();
        roster.fight(id(1)).unwrap();
        roster.delete_player(id(6));
        assert!(!roster.undo());
        assert_eq!(roster.history(), ids(&[1]).as_slice());
    }

    #[test]
    fn test_reset() {
        let mut roster = lettered();
        roster.fight(id(4)).unwrap();
        roster.fight(id(2)).unwrap();
        roster.fight(id(6)).unwrap();
        roster.reset();

        assert_eq!(roster.opponents(), ids(&[1, 3, 5, 7, 4, 2, 6]).as_slice());
        assert!(roster.history().is_empty());
        assert_eq!(roster.alive(), 8);
        assert_eq!(roster.name(id(4)), "D");
    }

    #[test]
    fn test_reset_keeps_undo() {
        let mut roster = lettered();
        roster.fight(id(4)).unwrap();
        roster.reset();
        assert!(roster.undo());
        assert_eq!(roster.history(), ids(&[4]).as_slice());
    }

    #[test]
    fn test_rename() {
        let mut roster = lettered();
        roster.rename(id(2), "Bea");
        assert_eq!(roster.name(id(2)), "Bea");
        roster.rename(id(3), "Bea");
        assert_eq!(roster.name(id(3)), "Bea");
        roster.rename(id(4), "");
        assert_eq!(roster.name(id(4)), "");
    }

    #[test]
    fn test_new_game_replaces_state() {
        let mut roster = lettered();
        roster.fight(id(1)).unwrap();
        roster.delete_player(id(5));
        roster.new_game();
        assert_eq!(roster, Roster::new());
    }

    #[test]
    fn test_parse_names() {
        let names = parse_names("A\r\nB\n\nC\n  \nD\nE\nF\n G \n").unwrap();
        assert_eq!(names, vec!["A", "B", "C", "D", "E", "F", "G"]);

        let err = parse_names("A\nB\n").unwrap_err();
        assert_eq!(err, RosterError::InvalidRoster { expected: 7, found: 2 });
    }
}
