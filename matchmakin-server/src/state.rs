//! Server state management
//!
//! One tracker session shared by every request.

use matchmakin_core::Session;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Server-wide shared state
pub struct ServerState {
    session: RwLock<Session>,
}

impl ServerState {
    /// Start with a default-named game; clients post names to /api/roster/new
    pub fn new() -> Self {
        Self::with_session(Session::default())
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session: RwLock::new(session),
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Session> {
        // Every mutation leaves the session valid, so a poisoned lock is still usable
        self.session.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Session> {
        self.session.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}
