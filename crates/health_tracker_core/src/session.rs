//! crates/health_tracker_core/src/session.rs
//!
//! The login state of a single interaction context. The HTTP layer builds one
//! per request from the session cookie; nothing here is process-global.

use crate::domain::SessionUser;
use crate::ports::{PortError, PortResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    LoggedOut,
    LoggedIn(SessionUser),
}

impl SessionState {
    pub fn login(&mut self, user: SessionUser) {
        *self = SessionState::LoggedIn(user);
    }

    /// Drops every session field.
    pub fn logout(&mut self) {
        *self = SessionState::LoggedOut;
    }

    pub fn current(&self) -> Option<&SessionUser> {
        match self {
            SessionState::LoggedIn(user) => Some(user),
            SessionState::LoggedOut => None,
        }
    }

    /// Returns the acting user, or `Unauthorized` for a protected action
    /// attempted while logged out.
    pub fn require_user(&self) -> PortResult<&SessionUser> {
        self.current().ok_or(PortError::Unauthorized)
    }
}

impl From<Option<SessionUser>> for SessionState {
    fn from(user: Option<SessionUser>) -> Self {
        user.map_or(SessionState::LoggedOut, SessionState::LoggedIn)
    }
}
