//! matchmakin core - opponent pool tracking
//!
//! This crate provides the tracker state and its presentation controller:
//! - Player ids (fixed roster of seven)
//! - Roster model: opponent pool, history pool, recycle rule, single undo
//! - Session: selection modes and intent dispatch for front-ends
//! - View: serializable snapshot of what a front-end renders

pub mod player;
pub mod roster;
pub mod session;
pub mod view;

// Re-exports for convenient access
pub use player::{PlayerId, ROSTER_SIZE};
pub use roster::{parse_names, PlayerStatus, Roster, RosterError, FRESH_ALIVE};
pub use session::{Intent, NamePrompt, Outcome, PresetNames, SelectionMode, Session, SessionError};
pub use view::{PlayerView, RosterView};
