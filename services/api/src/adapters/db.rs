//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, the concrete implementation of the
//! store ports from the `core` crate. It handles all interactions with the
//! PostgreSQL database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use health_tracker_core::domain::{Account, Reminder, SessionUser, SymptomRecord};
use health_tracker_core::ports::{
    AccountStore, PortError, PortResult, RecordStore, SessionStore,
};
use health_tracker_core::symptoms::RiskLevel;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements every store port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

fn unexpected(e: sqlx::Error) -> PortError {
    PortError::Unexpected(e.to_string())
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct AccountRecord {
    id: Uuid,
    username: String,
    password_hash: String,
}
impl AccountRecord {
    fn to_domain(self) -> Account {
        Account {
            id: self.id,
            username: self.username,
            password_hash: self.password_hash,
        }
    }
}

#[derive(FromRow)]
struct SessionUserRecord {
    user_id: Uuid,
    username: String,
}
impl SessionUserRecord {
    fn to_domain(self) -> SessionUser {
        SessionUser {
            user_id: self.user_id,
            username: self.username,
        }
    }
}

#[derive(FromRow)]
struct SymptomRecordRow {
    user_id: Uuid,
    username: String,
    symptoms: Vec<String>,
    risk_level: String,
    risk_score: i32,
    food_recommendations: Vec<String>,
    timestamp: DateTime<Utc>,
}
impl SymptomRecordRow {
    fn to_domain(self) -> PortResult<SymptomRecord> {
        let risk_level = self
            .risk_level
            .parse::<RiskLevel>()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(SymptomRecord {
            user_id: self.user_id,
            username: self.username,
            symptoms: self.symptoms,
            risk_level,
            risk_score: self.risk_score,
            food_recommendations: self.food_recommendations,
            timestamp: self.timestamp,
        })
    }
}

#[derive(FromRow)]
struct ReminderRecord {
    user_id: Uuid,
    username: String,
    reminder_text: String,
    reminder_date: NaiveDate,
    timestamp: DateTime<Utc>,
}
impl ReminderRecord {
    fn to_domain(self) -> Reminder {
        Reminder {
            user_id: self.user_id,
            username: self.username,
            reminder_text: self.reminder_text,
            reminder_date: self.reminder_date,
            timestamp: self.timestamp,
        }
    }
}

//=========================================================================================
// `AccountStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl AccountStore for DbAdapter {
    async fn find_by_username(&self, username: &str) -> PortResult<Vec<Account>> {
        let records = sqlx::query_as::<_, AccountRecord>(
            "SELECT id, username, password_hash FROM accounts WHERE username = $1",
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn create_account(&self, username: &str, password_hash: &str) -> PortResult<Account> {
        // The UNIQUE constraint on `username` makes check-and-insert atomic.
        let record = sqlx::query_as::<_, AccountRecord>(
            "INSERT INTO accounts (id, username, password_hash) VALUES ($1, $2, $3) \
             RETURNING id, username, password_hash",
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                PortError::Conflict(format!("Username '{}' already exists", username))
            }
            _ => unexpected(e),
        })?;

        Ok(record.to_domain())
    }
}

//=========================================================================================
// `RecordStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl RecordStore for DbAdapter {
    async fn upsert_symptom_record(&self, record: SymptomRecord) -> PortResult<()> {
        sqlx::query(
            "INSERT INTO symptom_analysis \
                (user_id, username, symptoms, risk_level, risk_score, food_recommendations, timestamp) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (user_id) DO UPDATE SET \
                username = EXCLUDED.username, \
                symptoms = EXCLUDED.symptoms, \
                risk_level = EXCLUDED.risk_level, \
                risk_score = EXCLUDED.risk_score, \
                food_recommendations = EXCLUDED.food_recommendations, \
                timestamp = EXCLUDED.timestamp",
        )
        .bind(record.user_id)
        .bind(&record.username)
        .bind(&record.symptoms)
        .bind(record.risk_level.as_str())
        .bind(record.risk_score)
        .bind(&record.food_recommendations)
        .bind(record.timestamp)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(())
    }

    async fn get_symptom_record(&self, user_id: Uuid) -> PortResult<Option<SymptomRecord>> {
        let record = sqlx::query_as::<_, SymptomRecordRow>(
            "SELECT user_id, username, symptoms, risk_level, risk_score, food_recommendations, timestamp \
             FROM symptom_analysis WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        record.map(|r| r.to_domain()).transpose()
    }

    async fn upsert_reminder(&self, reminder: Reminder) -> PortResult<()> {
        sqlx::query(
            "INSERT INTO reminders (user_id, username, reminder_text, reminder_date, timestamp) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (user_id) DO UPDATE SET \
                username = EXCLUDED.username, \
                reminder_text = EXCLUDED.reminder_text, \
                reminder_date = EXCLUDED.reminder_date, \
                timestamp = EXCLUDED.timestamp",
        )
        .bind(reminder.user_id)
        .bind(&reminder.username)
        .bind(&reminder.reminder_text)
        .bind(reminder.reminder_date)
        .bind(reminder.timestamp)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(())
    }

    async fn get_reminder(&self, user_id: Uuid) -> PortResult<Option<Reminder>> {
        let record = sqlx::query_as::<_, ReminderRecord>(
            "SELECT user_id, username, reminder_text, reminder_date, timestamp \
             FROM reminders WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(record.map(|r| r.to_domain()))
    }
}

//=========================================================================================
// `SessionStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl SessionStore for DbAdapter {
    async fn create_auth_session(&self, session_id: &str, user_id: Uuid) -> PortResult<()> {
        sqlx::query("INSERT INTO auth_sessions (id, user_id) VALUES ($1, $2)")
            .bind(session_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(())
    }

    async fn validate_auth_session(&self, session_id: &str) -> PortResult<SessionUser> {
        let record = sqlx::query_as::<_, SessionUserRecord>(
            "SELECT a.id AS user_id, a.username \
             FROM auth_sessions s JOIN accounts a ON a.id = s.user_id \
             WHERE s.id = $1",
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        record.map(|r| r.to_domain()).ok_or(PortError::Unauthorized)
    }

    async fn delete_auth_session(&self, session_id: &str) -> PortResult<()> {
        sqlx::query("DELETE FROM auth_sessions WHERE id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(())
    }
}
