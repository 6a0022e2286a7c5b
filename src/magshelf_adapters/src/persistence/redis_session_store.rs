use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use magshelf_core::{AccountId, Session, SessionId, SessionStore, SessionStoreError};
use redis::{Commands, Connection};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

/// Sessions stored as JSON under `session:<id>`, expiring through Redis TTLs.
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: Arc<Mutex<Connection>>,
}

impl RedisSessionStore {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }
}

#[derive(Serialize, Deserialize)]
struct StoredSession {
    account_id: AccountId,
    expires_at: DateTime<Utc>,
}

#[async_trait::async_trait]
impl SessionStore for RedisSessionStore {
    #[tracing::instrument(name = "Creating session in Redis", skip_all)]
    async fn create(
        &self,
        account_id: AccountId,
        ttl: Duration,
    ) -> Result<Session, SessionStoreError> {
        let ttl_seconds = u64::try_from(ttl.num_seconds())
            .ok()
            .filter(|seconds| *seconds > 0)
            .ok_or_else(|| SessionStoreError::UnexpectedError("non-positive session TTL".to_owned()))?;

        let session = Session {
            id: SessionId::new(),
            account_id,
            expires_at: Utc::now() + ttl,
        };
        let value = serde_json::to_string(&StoredSession {
            account_id,
            expires_at: session.expires_at,
        })
        .map_err(|e| SessionStoreError::UnexpectedError(e.to_string()))?;

        let mut conn = self.conn.lock().await;
        conn.set_ex::<_, _, ()>(get_key(&session.id), value, ttl_seconds)
            .map_err(|e| SessionStoreError::UnexpectedError(e.to_string()))?;

        Ok(session)
    }

    #[tracing::instrument(name = "Reading session from Redis", skip_all)]
    async fn get(&self, id: &SessionId) -> Result<Session, SessionStoreError> {
        let mut conn = self.conn.lock().await;
        let value: Option<String> = conn
            .get(get_key(id))
            .map_err(|e| SessionStoreError::UnexpectedError(e.to_string()))?;
        let Some(value) = value else {
            return Err(SessionStoreError::SessionNotFound);
        };

        let stored: StoredSession = serde_json::from_str(&value)
            .map_err(|e| SessionStoreError::UnexpectedError(e.to_string()))?;
        let session = Session {
            id: id.clone(),
            account_id: stored.account_id,
            expires_at: stored.expires_at,
        };
        if !session.is_live(Utc::now()) {
            return Err(SessionStoreError::SessionNotFound);
        }
        Ok(session)
    }

    #[tracing::instrument(name = "Destroying session in Redis", skip_all)]
    async fn destroy(&self, id: &SessionId) -> Result<(), SessionStoreError> {
        let mut conn = self.conn.lock().await;
        conn.del::<_, ()>(get_key(id))
            .map_err(|e| SessionStoreError::UnexpectedError(e.to_string()))
    }
}

const SESSION_KEY_PREFIX: &str = "session:";

fn get_key(id: &SessionId) -> String {
    format!("{SESSION_KEY_PREFIX}{}", id.as_str())
}
