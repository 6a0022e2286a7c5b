use std::sync::Arc;

use async_trait::async_trait;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use chrono::Utc;
use magshelf_core::{
    AccountId, AccountProfile, AccountStore, AccountStoreError, AuthValidator, SessionId,
    SessionStore, SessionStoreError,
};

use super::{AuthError, session_cookie::session_id_from};

/// The account a guarded request resolved to and the session that proved it.
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub account: AccountProfile,
    pub session_id: SessionId,
}

/// Accepts requests carrying a live `connect.sid` session. The login token is
/// never consulted.
#[derive(Clone)]
pub struct RequestAuthenticator {
    account_store: Arc<dyn AccountStore>,
    session_store: Arc<dyn SessionStore>,
}

impl RequestAuthenticator {
    pub fn new(account_store: Arc<dyn AccountStore>, session_store: Arc<dyn SessionStore>) -> Self {
        Self {
            account_store,
            session_store,
        }
    }

    async fn from_session(&self, session_id: &SessionId) -> Result<AccountId, AuthError> {
        let session = self
            .session_store
            .get(session_id)
            .await
            .map_err(|e| match e {
                SessionStoreError::SessionNotFound => AuthError::SessionExpired,
                e => AuthError::UnexpectedError(e.to_string()),
            })?;

        if !session.is_live(Utc::now()) {
            return Err(AuthError::SessionExpired);
        }
        Ok(session.account_id)
    }

    async fn load(&self, account_id: AccountId) -> Result<AccountProfile, AuthError> {
        self.account_store
            .find_by_id(account_id)
            .await
            .map(|account| account.profile())
            .map_err(|e| match e {
                AccountStoreError::AccountNotFound => AuthError::AccountNotFound,
                e => AuthError::UnexpectedError(e.to_string()),
            })
    }
}

#[async_trait]
impl AuthValidator for RequestAuthenticator {
    type Claims = Authenticated;
    type RequestParts = Parts;
    type Error = AuthError;

    #[tracing::instrument(name = "RequestAuthenticator::validate", skip_all)]
    async fn validate(&self, parts: &Self::RequestParts) -> Result<Self::Claims, Self::Error> {
        let jar = CookieJar::from_headers(&parts.headers);
        let session_id = session_id_from(&jar).ok_or(AuthError::MissingCredentials)?;
        let account_id = self.from_session(&session_id).await?;

        Ok(Authenticated {
            account: self.load(account_id).await?,
            session_id,
        })
    }
}
