//! Roster API endpoints
//!
//! Every mutating endpoint answers with the re-rendered view so the client
//! never has to issue a second request.

use crate::error::ApiError;
use crate::state::ServerState;
use axum::{extract::State, Json};
use matchmakin_core::{parse_names, PlayerId, Roster, RosterView, Session};
use serde::Deserialize;
use std::sync::Arc;

/// Get current roster view
pub async fn get_roster(State(state): State<Arc<ServerState>>) -> Json<RosterView> {
    Json(state.read().view())
}

/// New game request: a name list, multi-line text, or neither for default names
#[derive(Debug, Default, Deserialize)]
pub struct NewGameRequest {
    pub names: Option<Vec<String>>,
    pub text: Option<String>,
}

/// Replace the game with a fresh one
pub async fn new_game(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<NewGameRequest>,
) -> Result<Json<RosterView>, ApiError> {
    // Validate before touching the live session
    let roster = match (req.names, req.text) {
        (Some(names), _) => Roster::initialize(names)?,
        (None, Some(text)) => Roster::initialize(parse_names(&text)?)?,
        (None, None) => Roster::new(),
    };

    let mut session = state.write();
    *session = Session::with_roster(roster);
    tracing::info!("new game via API");
    Ok(Json(session.view()))
}

/// Single player request
#[derive(Debug, Deserialize)]
pub struct PlayerRequest {
    pub id: u8,
}

/// Fight an eligible opponent
pub async fn fight(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<PlayerRequest>,
) -> Result<Json<RosterView>, ApiError> {
    let id = PlayerId::new(req.id)?;
    let mut session = state.write();
    session.roster_mut().fight(id)?;
    Ok(Json(session.view()))
}

/// Rename request
#[derive(Debug, Deserialize)]
pub struct RenameRequest {
    pub id: u8,
    pub name: String,
}

pub async fn rename(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<RenameRequest>,
) -> Result<Json<RosterView>, ApiError> {
    let id = PlayerId::new(req.id)?;
    let mut session = state.write();
    session.roster_mut().rename(id, req.name);
    Ok(Json(session.view()))
}

/// Remove a player and fold history back into the pool
pub async fn delete(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<PlayerRequest>,
) -> Result<Json<RosterView>, ApiError> {
    let id = PlayerId::new(req.id)?;
    let mut session = state.write();
    session.remove_player(id);
    Ok(Json(session.view()))
}

pub async fn undo(State(state): State<Arc<ServerState>>) -> Json<RosterView> {
    let mut session = state.write();
    session.roster_mut().undo();
    Json(session.view())
}

pub async fn reset(State(state): State<Arc<ServerState>>) -> Json<RosterView> {
    let mut session = state.write();
    session.roster_mut().reset();
    Json(session.view())
}
