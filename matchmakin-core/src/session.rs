//! Presentation controller - selection modes and intent dispatch
//!
//! Front-ends (terminal, HTTP) forward every button press as an [`Intent`]
//! and re-render from [`Session::view`] afterwards. Which roster operation a
//! player press triggers depends only on the current [`SelectionMode`].

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::player::PlayerId;
use crate::roster::{Roster, RosterError};
use crate::view::RosterView;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error("roster entry cancelled")]
    Cancelled,
}

/// What a player press does
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Fight the pressed player
    #[default]
    Normal,
    /// Ask for a new name for the pressed player
    Rename,
    /// Remove the pressed player from the lobby
    Delete,
}

impl SelectionMode {
    /// Pressing the active mode again returns to Normal
    pub fn toggle(self, mode: SelectionMode) -> SelectionMode {
        if self == mode {
            SelectionMode::Normal
        } else {
            mode
        }
    }
}

/// A user action forwarded by a front-end
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    Player(PlayerId),
    ToggleRename,
    ToggleDelete,
    Undo,
    Reset,
    NewGame,
}

/// What a dispatched intent changed
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Fought(PlayerId),
    Renamed(PlayerId),
    Deleted(PlayerId),
    ModeChanged(SelectionMode),
    Undone,
    Reset,
    NewGame,
    /// Nothing to do (resting player pressed, rename cancelled, empty undo)
    Ignored,
}

/// Name entry supplied by a front-end
pub trait NamePrompt {
    /// Seven names for a new game, or None when the user cancels
    fn roster_names(&mut self) -> Option<Vec<String>>;

    /// A replacement name for one player, or None to keep the current one
    fn replacement_name(&mut self, id: PlayerId, current: &str) -> Option<String>;
}

/// Prompt answered from values known up front (HTTP bodies, scripts)
#[derive(Clone, Debug, Default)]
pub struct PresetNames {
    pub roster: Option<Vec<String>>,
    pub replacement: Option<String>,
}

impl PresetNames {
    pub fn roster(names: Vec<String>) -> Self {
        Self {
            roster: Some(names),
            replacement: None,
        }
    }

    pub fn replacement(name: impl Into<String>) -> Self {
        Self {
            roster: None,
            replacement: Some(name.into()),
        }
    }
}

impl NamePrompt for PresetNames {
    fn roster_names(&mut self) -> Option<Vec<String>> {
        self.roster.take()
    }

    fn replacement_name(&mut self, _id: PlayerId, _current: &str) -> Option<String> {
        self.replacement.take()
    }
}

/// Roster plus the front-end's selection mode
#[derive(Clone, Debug, Default)]
pub struct Session {
    roster: Roster,
    mode: SelectionMode,
}

impl Session {
    /// Session over an existing roster, in Normal mode
    pub fn with_roster(roster: Roster) -> Self {
        Self {
            roster,
            mode: SelectionMode::Normal,
        }
    }

    /// Create the first game, asking the prompt for names
    pub fn start(prompt: &mut dyn NamePrompt) -> Result<Self, SessionError> {
        let mut session = Self::default();
        session.dispatch(Intent::NewGame, prompt)?;
        Ok(session)
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Direct model access for front-ends that bypass selection modes
    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn view(&self) -> RosterView {
        RosterView::new(&self.roster, self.mode)
    }

    /// Apply one intent
    pub fn dispatch(
        &mut self,
        intent: Intent,
        prompt: &mut dyn NamePrompt,
    ) -> Result<Outcome, SessionError> {
        debug!(?intent, mode = ?self.mode, "dispatch");

        let outcome = match intent {
            Intent::Player(id) => self.press_player(id, prompt)?,
            Intent::ToggleRename => Outcome::ModeChanged(self.toggle_mode(SelectionMode::Rename)),
            Intent::ToggleDelete => Outcome::ModeChanged(self.toggle_mode(SelectionMode::Delete)),
            Intent::Undo => {
                if self.roster.undo() {
                    Outcome::Undone
                } else {
                    Outcome::Ignored
                }
            }
            Intent::Reset => {
                self.roster.reset();
                Outcome::Reset
            }
            Intent::NewGame => {
                self.roster.new_game();
                self.mode = SelectionMode::Normal;
                let names = prompt.roster_names().ok_or(SessionError::Cancelled)?;
                self.roster = Roster::initialize(names)?;
                Outcome::NewGame
            }
        };

        Ok(outcome)
    }

    /// Switch selection mode, returning the new one
    pub fn toggle_mode(&mut self, mode: SelectionMode) -> SelectionMode {
        self.mode = self.mode.toggle(mode);
        self.mode
    }

    /// Delete a player, then fold the history back into the pool
    pub fn remove_player(&mut self, id: PlayerId) -> Outcome {
        if !self.roster.delete_player(id) {
            return Outcome::Ignored;
        }
        self.roster.reset();
        Outcome::Deleted(id)
    }

    fn press_player(
        &mut self,
        id: PlayerId,
        prompt: &mut dyn NamePrompt,
    ) -> Result<Outcome, SessionError> {
        let mode = std::mem::take(&mut self.mode);

        let outcome = match mode {
            SelectionMode::Normal => {
                if !self.roster.is_eligible(id) {
                    warn!(player = %id, "player is not an eligible opponent");
                    return Ok(Outcome::Ignored);
                }
                self.roster.fight(id)?;
                Outcome::Fought(id)
            }
            SelectionMode::Rename => {
                match prompt.replacement_name(id, self.roster.name(id)) {
                    Some(name) => {
                        self.roster.rename(id, name);
                        Outcome::Renamed(id)
                    }
                    None => Outcome::Ignored,
                }
            }
            SelectionMode::Delete => self.remove_player(id),
        };

        Ok(outcome)
    }
}
