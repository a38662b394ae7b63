//! crates/health_tracker_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or serialization format.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::symptoms::RiskLevel;

/// A registered user. Only used internally for registration/login since it
/// carries the password hash.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
}

/// The identity attached to a logged-in session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub user_id: Uuid,
    pub username: String,
}

impl From<&Account> for SessionUser {
    fn from(account: &Account) -> Self {
        Self {
            user_id: account.id,
            username: account.username.clone(),
        }
    }
}

/// The latest symptom analysis for a user. One live record per user.
#[derive(Debug, Clone)]
pub struct SymptomRecord {
    pub user_id: Uuid,
    pub username: String,
    pub symptoms: Vec<String>,
    pub risk_level: RiskLevel,
    pub risk_score: i32,
    pub food_recommendations: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// The latest reminder for a user. One live record per user.
#[derive(Debug, Clone)]
pub struct Reminder {
    pub user_id: Uuid,
    pub username: String,
    pub reminder_text: String,
    pub reminder_date: NaiveDate,
    pub timestamp: DateTime<Utc>,
}
