//! Read model rendered by front-ends after every mutation

use serde::{Deserialize, Serialize};

use crate::player::PlayerId;
use crate::roster::{PlayerStatus, Roster};
use crate::session::SelectionMode;

/// One player button
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub status: PlayerStatus,
}

/// Snapshot of everything a front-end draws
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterView {
    /// Buttons in id order, deleted players included
    pub players: Vec<PlayerView>,
    pub opponents: Vec<String>,
    pub history: Vec<String>,
    pub opponents_line: String,
    pub history_line: String,
    pub alive: usize,
    pub can_undo: bool,
    pub mode: SelectionMode,
}

impl RosterView {
    pub fn new(roster: &Roster, mode: SelectionMode) -> Self {
        let players = roster
            .names()
            .map(|(id, name)| PlayerView {
                id,
                name: name.to_string(),
                status: roster.status(id),
            })
            .collect();

        let opponents = pool_names(roster, roster.opponents());
        let history = pool_names(roster, roster.history());

        Self {
            opponents_line: status_line("Opponents:", &opponents),
            history_line: status_line("History:", &history),
            players,
            opponents,
            history,
            alive: roster.alive(),
            can_undo: roster.can_undo(),
            mode,
        }
    }
}

fn pool_names(roster: &Roster, pool: &[PlayerId]) -> Vec<String> {
    pool.iter().map(|&id| roster.name(id).to_string()).collect()
}

/// "Label:    name        name        "
fn status_line(label: &str, names: &[String]) -> String {
    let mut text = format!("{label}    ");
    for name in names {
        text.push_str(name);
        text.push_str("        ");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u8) -> PlayerId {
        PlayerId::new(raw).unwrap()
    }

    #[test]
    fn test_view_of_fresh_roster() {
        let roster = Roster::initialize(["A", "B", "C", "D", "E", "F", "G"]).unwrap();
        let view = RosterView::new(&roster, SelectionMode::Normal);

        assert_eq!(view.players.len(), 7);
        assert!(view.players.iter().all(|p| p.status == PlayerStatus::Eligible));
        assert_eq!(view.opponents, vec!["A", "B", "C", "D", "E", "F", "G"]);
        assert!(view.history.is_empty());
        assert_eq!(view.history_line, "History:    ");
        assert_eq!(view.alive, 8);
        assert!(!view.can_undo);
    }

    #[test]
    fn test_status_lines() {
        let mut roster = Roster::initialize(["A", "B", "C", "D", "E", "F", "G"]).unwrap();
        roster.fight(id(2)).unwrap();
        roster.delete_player(id(7));
        let view = RosterView::new(&roster, SelectionMode::Delete);

        assert_eq!(
            view.opponents_line,
            "Opponents:    A        C        D        E        F        "
        );
        assert_eq!(view.history_line, "History:    B        ");
        assert_eq!(view.players[1].status, PlayerStatus::Resting);
        assert_eq!(view.players[6].status, PlayerStatus::Deleted);
        assert_eq!(view.players[6].name, "G");
        assert_eq!(view.mode, SelectionMode::Delete);
    }

    #[test]
    fn test_view_json_shape() {
        let roster = Roster::new();
        let json = serde_json::to_value(RosterView::new(&roster, SelectionMode::Rename)).unwrap();

        assert_eq!(json["mode"], "rename");
        assert_eq!(json["players"][0]["id"], 1);
        assert_eq!(json["players"][0]["name"], "1");
        assert_eq!(json["players"][0]["status"], "eligible");
    }
}
