//! crates/health_tracker_core/src/ports.rs
//!
//! Defines the store contracts (traits) the application depends on.
//! These traits form the boundary of the hexagonal architecture, keeping the
//! core independent of the concrete document store.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Account, Reminder, SessionUser, SymptomRecord};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Store Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Returns every account registered under `username`.
    async fn find_by_username(&self, username: &str) -> PortResult<Vec<Account>>;

    /// Creates an account. Fails with `PortError::Conflict` if the username is
    /// already taken; the check and the insert are a single store operation.
    async fn create_account(&self, username: &str, password_hash: &str) -> PortResult<Account>;
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Replaces the user's symptom analysis, creating it if absent.
    async fn upsert_symptom_record(&self, record: SymptomRecord) -> PortResult<()>;

    async fn get_symptom_record(&self, user_id: Uuid) -> PortResult<Option<SymptomRecord>>;

    /// Replaces the user's reminder, creating it if absent.
    async fn upsert_reminder(&self, reminder: Reminder) -> PortResult<()>;

    async fn get_reminder(&self, user_id: Uuid) -> PortResult<Option<Reminder>>;
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create_auth_session(&self, session_id: &str, user_id: Uuid) -> PortResult<()>;

    /// Resolves a session id to its user, or `PortError::Unauthorized`.
    async fn validate_auth_session(&self, session_id: &str) -> PortResult<SessionUser>;

    async fn delete_auth_session(&self, session_id: &str) -> PortResult<()>;
}
