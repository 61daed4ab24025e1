//! Selection mode endpoints
//!
//! Mirror the button-driven front-ends: toggle a mode, then press a player.

use crate::error::ApiError;
use crate::state::ServerState;
use axum::{extract::State, Json};
use matchmakin_core::{Intent, PlayerId, PresetNames, RosterView, SelectionMode};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct ModeRequest {
    pub mode: SelectionMode,
}

/// Toggle a selection mode (pressing the active mode returns to normal)
pub async fn toggle_mode(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<ModeRequest>,
) -> Json<RosterView> {
    let mut session = state.write();
    session.toggle_mode(req.mode);
    Json(session.view())
}

/// Press request; `name` answers the rename prompt
#[derive(Debug, Deserialize)]
pub struct PressRequest {
    pub id: u8,
    pub name: Option<String>,
}

/// Press a player button in the current mode
pub async fn press(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<PressRequest>,
) -> Result<Json<RosterView>, ApiError> {
    let id = PlayerId::new(req.id)?;
    let mut prompt = PresetNames {
        roster: None,
        replacement: req.name,
    };

    let mut session = state.write();
    let outcome = session.dispatch(Intent::Player(id), &mut prompt)?;
    tracing::debug!(?outcome, "press");
    Ok(Json(session.view()))
}
