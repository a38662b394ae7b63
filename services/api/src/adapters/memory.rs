//! services/api/src/adapters/memory.rs
//!
//! An in-memory implementation of the store ports. Used when no database is
//! configured, and by the handler tests.

use async_trait::async_trait;
use health_tracker_core::domain::{Account, Reminder, SessionUser, SymptomRecord};
use health_tracker_core::ports::{
    AccountStore, PortError, PortResult, RecordStore, SessionStore,
};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryAdapter {
    accounts: RwLock<Vec<Account>>,
    auth_sessions: RwLock<HashMap<String, Uuid>>,
    symptom_records: RwLock<HashMap<Uuid, SymptomRecord>>,
    reminders: RwLock<HashMap<Uuid, Reminder>>,
}

impl MemoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryAdapter {
    async fn find_by_username(&self, username: &str) -> PortResult<Vec<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .iter()
            .filter(|a| a.username == username)
            .cloned()
            .collect())
    }

    async fn create_account(&self, username: &str, password_hash: &str) -> PortResult<Account> {
        // Holding the write lock across the check keeps check-and-insert atomic.
        let mut accounts = self.accounts.write().await;
        if accounts.iter().any(|a| a.username == username) {
            return Err(PortError::Conflict(format!(
                "Username '{}' already exists",
                username
            )));
        }

        let account = Account {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        };
        accounts.push(account.clone());
        Ok(account)
    }
}

#[async_trait]
impl RecordStore for MemoryAdapter {
    async fn upsert_symptom_record(&self, record: SymptomRecord) -> PortResult<()> {
        self.symptom_records
            .write()
            .await
            .insert(record.user_id, record);
        Ok(())
    }

    async fn get_symptom_record(&self, user_id: Uuid) -> PortResult<Option<SymptomRecord>> {
        Ok(self.symptom_records.read().await.get(&user_id).cloned())
    }

    async fn upsert_reminder(&self, reminder: Reminder) -> PortResult<()> {
        self.reminders
            .write()
            .await
            .insert(reminder.user_id, reminder);
        Ok(())
    }

    async fn get_reminder(&self, user_id: Uuid) -> PortResult<Option<Reminder>> {
        Ok(self.reminders.read().await.get(&user_id).cloned())
    }
}

#[async_trait]
impl SessionStore for MemoryAdapter {
    async fn create_auth_session(&self, session_id: &str, user_id: Uuid) -> PortResult<()> {
        self.auth_sessions
            .write()
            .await
            .insert(session_id.to_string(), user_id);
        Ok(())
    }

    async fn validate_auth_session(&self, session_id: &str) -> PortResult<SessionUser> {
        let user_id = self
            .auth_sessions
            .read()
            .await
            .get(session_id)
            .copied()
            .ok_or(PortError::Unauthorized)?;

        let accounts = self.accounts.read().await;
        accounts
            .iter()
            .find(|a| a.id == user_id)
            .map(SessionUser::from)
            .ok_or(PortError::Unauthorized)
    }

    async fn delete_auth_session(&self, session_id: &str) -> PortResult<()> {
        self.auth_sessions.write().await.remove(session_id);
        Ok(())
    }
}
