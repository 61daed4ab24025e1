//! API error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use matchmakin_core::{RosterError, SessionError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] SessionError);

impl From<RosterError> for ApiError {
    fn from(err: RosterError) -> Self {
        Self(err.into())
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            SessionError::Cancelled => StatusCode::BAD_REQUEST,
            SessionError::Roster(err) => match err {
                RosterError::InvalidRoster { .. } | RosterError::EmptyName(_) => {
                    StatusCode::BAD_REQUEST
                }
                RosterError::NotInPool(_) => StatusCode::CONFLICT,
                RosterError::UnknownPlayer(_) => StatusCode::NOT_FOUND,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(%status, error = %self, "request rejected");
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
