use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Duration;
use thiserror::Error;

use crate::domain::{
    account::{Account, AccountProfile},
    email::Email,
    ids::{AccountId, MagazineId},
    magazine::{Magazine, MagazineFilter},
    session::{Session, SessionId},
};

// AccountStore port trait and errors
#[derive(Debug, Error)]
pub enum AccountStoreError {
    #[error("User already exists")]
    AccountAlreadyExists,
    #[error("User not found")]
    AccountNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for AccountStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::AccountAlreadyExists, Self::AccountAlreadyExists)
                | (Self::AccountNotFound, Self::AccountNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_by_email(&self, email: &Email) -> Result<Account, AccountStoreError>;
    async fn find_by_google_id(&self, google_id: &str) -> Result<Account, AccountStoreError>;
    async fn find_by_id(&self, id: AccountId) -> Result<Account, AccountStoreError>;
    /// Fails with `AccountAlreadyExists` when the email or google id is taken.
    async fn create(&self, account: Account) -> Result<(), AccountStoreError>;
    async fn save(&self, account: &Account) -> Result<(), AccountStoreError>;
    /// Public profiles for the given ids. Unknown ids are absent from the map.
    async fn profiles(
        &self,
        ids: &[AccountId],
    ) -> Result<HashMap<AccountId, AccountProfile>, AccountStoreError>;
}

// MagazineStore port trait and errors
#[derive(Debug, Error)]
pub enum MagazineStoreError {
    #[error("Magazine not found")]
    MagazineNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for MagazineStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::MagazineNotFound, Self::MagazineNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait]
pub trait MagazineStore: Send + Sync {
    async fn create(&self, magazine: &Magazine) -> Result<(), MagazineStoreError>;
    /// Matching magazines, oldest first.
    async fn list(&self, filter: &MagazineFilter) -> Result<Vec<Magazine>, MagazineStoreError>;
    async fn list_by_owner(&self, owner: AccountId) -> Result<Vec<Magazine>, MagazineStoreError>;
    async fn find_by_id(&self, id: MagazineId) -> Result<Magazine, MagazineStoreError>;
    async fn save(&self, magazine: &Magazine) -> Result<(), MagazineStoreError>;
    /// Looks the magazine up by id and owner in a single predicate, so a
    /// foreign magazine is indistinguishable from a missing one.
    async fn find_owned(
        &self,
        id: MagazineId,
        owner: AccountId,
    ) -> Result<Magazine, MagazineStoreError>;
    /// Returns whether a row matching both id and owner was removed.
    async fn delete_owned(
        &self,
        id: MagazineId,
        owner: AccountId,
    ) -> Result<bool, MagazineStoreError>;
}

// SessionStore port trait and errors
#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("Session not found")]
    SessionNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create(&self, account_id: AccountId, ttl: Duration) -> Result<Session, SessionStoreError>;
    /// Expired sessions are reported as `SessionNotFound`.
    async fn get(&self, id: &SessionId) -> Result<Session, SessionStoreError>;
    async fn destroy(&self, id: &SessionId) -> Result<(), SessionStoreError>;
}
