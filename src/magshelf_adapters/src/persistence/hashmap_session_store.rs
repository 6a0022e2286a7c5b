use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio::sync::RwLock;

use magshelf_core::{AccountId, Session, SessionId, SessionStore, SessionStoreError};

#[derive(Debug, Default, Clone)]
pub struct HashMapSessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
}

impl HashMapSessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl SessionStore for HashMapSessionStore {
    async fn create(
        &self,
        account_id: AccountId,
        ttl: Duration,
    ) -> Result<Session, SessionStoreError> {
        let now = Utc::now();
        let session = Session {
            id: SessionId::new(),
            account_id,
            expires_at: now + ttl,
        };

        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, stored| stored.is_live(now));
        sessions.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    async fn get(&self, id: &SessionId) -> Result<Session, SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        match sessions.get(id) {
            Some(session) if session.is_live(Utc::now()) => Ok(session.clone()),
            Some(_) => {
                sessions.remove(id);
                Err(SessionStoreError::SessionNotFound)
            }
            None => Err(SessionStoreError::SessionNotFound),
        }
    }

    async fn destroy(&self, id: &SessionId) -> Result<(), SessionStoreError> {
        self.sessions.write().await.remove(id);
        Ok(())
    }
}
