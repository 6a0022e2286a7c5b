use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    email::Email,
    password::{Password, PasswordHash},
};

#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String>;
}

#[derive(Debug, Error)]
pub enum FileStorageError {
    #[error("Failed to store file: {0}")]
    Io(String),
}

#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Persists the bytes and returns the public URL they are served from.
    async fn store(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<String, FileStorageError>;
}

/// Identity returned by an external provider after a successful handshake.
#[derive(Debug, Clone)]
pub struct ProviderProfile {
    pub id: String,
    pub email: Option<Email>,
    pub name: Option<String>,
}

#[derive(Debug, Error)]
pub enum IdentityProviderError {
    #[error("Code exchange failed: {0}")]
    Exchange(String),
    #[error("Profile request failed: {0}")]
    Profile(String),
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// URL the browser is sent to, carrying `state` for CSRF protection.
    fn authorization_url(&self, state: &str) -> String;
    async fn exchange_code(&self, code: &str) -> Result<ProviderProfile, IdentityProviderError>;
}

#[derive(Debug, Error)]
pub enum PasswordHasherError {
    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHasherError>;
    /// `Ok(false)` on mismatch; errors are reserved for malformed hashes.
    async fn verify(
        &self,
        password: &Password,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHasherError>;
}
