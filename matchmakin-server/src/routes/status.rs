//! Status endpoint

use crate::state::ServerState;
use axum::{extract::State, Json};
use matchmakin_core::SelectionMode;
use serde::Serialize;
use std::sync::Arc;

/// Liveness plus a one-glance summary of the running game
#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub alive: usize,
    pub eligible: usize,
    pub mode: SelectionMode,
}

pub async fn status_handler(State(state): State<Arc<ServerState>>) -> Json<StatusResponse> {
    let session = state.read();
    Json(StatusResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        alive: session.roster().alive(),
        eligible: session.roster().opponents().len(),
        mode: session.mode(),
    })
}
