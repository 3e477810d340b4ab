//! In-flight assessment attempts.
//!
//! An attempt carries what the server needs to grade without trusting the
//! client: the question ids it issued, or the terminal step counter.

use async_trait::async_trait;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::assessment::terminal::TerminalSession;
use crate::errors::AppError;
use crate::models::profile::TechPath;

const KEY_PREFIX: &str = "firstcommit:attempt";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttemptState {
    Quiz { question_ids: Vec<u32> },
    Terminal(TerminalSession),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Attempt {
    pub id: Uuid,
    pub user_id: Uuid,
    pub tech_path: Option<TechPath>,
    pub state: AttemptState,
}

impl Attempt {
    pub fn new(user_id: Uuid, tech_path: Option<TechPath>, state: AttemptState) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            tech_path,
            state,
        }
    }
}

/// Storage for attempts. Carried in `AppState` as `Arc<dyn AttemptStore>`.
#[async_trait]
pub trait AttemptStore: Send + Sync {
    async fn save(&self, attempt: &Attempt) -> Result<(), AppError>;
    async fn load(&self, id: Uuid) -> Result<Option<Attempt>, AppError>;
    /// Removes and returns the attempt in one step. Of several concurrent
    /// callers at most one gets `Some`.
    async fn take(&self, id: Uuid) -> Result<Option<Attempt>, AppError>;
}

/// Loads an attempt and checks it belongs to `user_id`.
/// Someone else's attempt reads as not found.
pub async fn load_owned(
    store: &dyn AttemptStore,
    id: Uuid,
    user_id: Uuid,
) -> Result<Attempt, AppError> {
    store
        .load(id)
        .await?
        .filter(|a| a.user_id == user_id)
        .ok_or_else(|| AppError::NotFound(format!("Assessment attempt {id} not found or expired")))
}

/// Claims an attempt for grading. An attempt can be claimed once; a second
/// submission of the same attempt is a conflict.
pub async fn claim(store: &dyn AttemptStore, id: Uuid) -> Result<Attempt, AppError> {
    store
        .take(id)
        .await?
        .ok_or_else(|| AppError::Conflict(format!("Assessment attempt {id} was already submitted")))
}

/// Redis-backed store. Attempts expire after `ttl_secs`; every save refreshes the TTL.
pub struct RedisAttemptStore {
    client: redis::Client,
    ttl_secs: u64,
}

impl RedisAttemptStore {
    pub fn new(client: redis::Client, ttl_secs: u64) -> Self {
        Self { client, ttl_secs }
    }

    fn key(id: Uuid) -> String {
        format!("{KEY_PREFIX}:{id}")
    }

    fn decode(id: Uuid, raw: &str) -> Result<Attempt, AppError> {
        serde_json::from_str(raw)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Corrupt attempt {id}: {e}")))
    }
}

#[async_trait]
impl AttemptStore for RedisAttemptStore {
    async fn save(&self, attempt: &Attempt) -> Result<(), AppError> {
        let payload = serde_json::to_string(attempt)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Attempt serialization failed: {e}")))?;
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let _: () = conn
            .set_ex(Self::key(attempt.id), payload, self.ttl_secs)
            .await?;
        debug!("Saved attempt {} (ttl {}s)", attempt.id, self.ttl_secs);
        Ok(())
    }

    async fn load(&self, id: Uuid) -> Result<Option<Attempt>, AppError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let raw: Option<String> = conn.get(Self::key(id)).await?;
        raw.map(|s| Self::decode(id, &s)).transpose()
    }

    async fn take(&self, id: Uuid) -> Result<Option<Attempt>, AppError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let raw: Option<String> = redis::cmd("GETDEL")
            .arg(Self::key(id))
            .query_async(&mut conn)
            .await?;
        raw.map(|s| Self::decode(id, &s)).transpose()
    }
}

#[cfg(test)]
pub use memory::MemoryAttemptStore;

#[cfg(test)]
mod memory {
    use std::collections::HashMap;

    use tokio::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct MemoryAttemptStore {
        attempts: Mutex<HashMap<Uuid, Attempt>>,
    }

    #[async_trait]
    impl AttemptStore for MemoryAttemptStore {
        async fn save(&self, attempt: &Attempt) -> Result<(), AppError> {
            self.attempts.lock().await.insert(attempt.id, attempt.clone());
            Ok(())
        }

        async fn load(&self, id: Uuid) -> Result<Option<Attempt>, AppError> {
            Ok(self.attempts.lock().await.get(&id).cloned())
        }

        async fn take(&self, id: Uuid) -> Result<Option<Attempt>, AppError> {
            Ok(self.attempts.lock().await.remove(&id))
        }
    }
}
