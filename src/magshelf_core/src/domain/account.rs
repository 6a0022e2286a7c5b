use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use serde::Serialize;
use thiserror::Error;

use super::{
    code_grant::CodeGrant, email::Email, ids::AccountId, one_time_code::OneTimeCode,
    password::PasswordHash,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Invalid email")]
    InvalidEmail,
    #[error("Invalid password")]
    InvalidPassword,
    #[error("Invalid name")]
    InvalidName,
}

/// Public-facing name of an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, AccountError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AccountError::InvalidName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Uses the supplied name when present, otherwise the email's local part.
    pub fn or_from_email(raw: Option<&str>, email: &Email) -> Self {
        raw.and_then(|name| Self::parse(name).ok())
            .unwrap_or_else(|| Self(email.local_part().to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Everything needed to rebuild an [`Account`] from storage.
#[derive(Debug, Clone)]
pub struct AccountParts {
    pub id: AccountId,
    pub email: Email,
    pub name: DisplayName,
    pub password_hash: Option<PasswordHash>,
    pub google_id: Option<String>,
    pub is_verified: bool,
    pub code: Option<CodeGrant>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Account {
    id: AccountId,
    email: Email,
    name: DisplayName,
    password_hash: Option<PasswordHash>,
    google_id: Option<String>,
    is_verified: bool,
    code: Option<CodeGrant>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Account {
    /// A fresh, unverified account holding its first verification code.
    pub fn register(
        email: Email,
        name: DisplayName,
        password_hash: PasswordHash,
        code: CodeGrant,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AccountId::new(),
            email,
            name,
            password_hash: Some(password_hash),
            google_id: None,
            is_verified: false,
            code: Some(code),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn from_parts(parts: AccountParts) -> Self {
        let AccountParts {
            id,
            email,
            name,
            password_hash,
            google_id,
            is_verified,
            code,
            created_at,
            updated_at,
        } = parts;
        Self {
            id,
            email,
            name,
            password_hash,
            google_id,
            is_verified,
            code,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    pub fn password_hash(&self) -> Option<&PasswordHash> {
        self.password_hash.as_ref()
    }

    pub fn google_id(&self) -> Option<&str> {
        self.google_id.as_deref()
    }

    pub fn is_verified(&self) -> bool {
        self.is_verified
    }

    pub fn code(&self) -> Option<&CodeGrant> {
        self.code.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// True while a code has been issued and has not yet expired.
    pub fn has_live_code(&self, now: DateTime<Utc>) -> bool {
        self.code.as_ref().is_some_and(|grant| grant.is_live(now))
    }

    pub fn code_matches(&self, candidate: &OneTimeCode, now: DateTime<Utc>) -> bool {
        self.code
            .as_ref()
            .is_some_and(|grant| grant.matches(candidate, now))
    }

    /// Replaces any previous code. The password hash is overwritten too,
    /// so the most recent registration attempt wins.
    pub fn reissue_code(&mut self, code: CodeGrant, password_hash: PasswordHash, now: DateTime<Utc>) {
        self.code = Some(code);
        self.password_hash = Some(password_hash);
        self.updated_at = now;
    }

    pub fn issue_reset_code(&mut self, code: CodeGrant, now: DateTime<Utc>) {
        self.code = Some(code);
        self.updated_at = now;
    }

    pub fn mark_verified(&mut self, now: DateTime<Utc>) {
        self.is_verified = true;
        self.code = None;
        self.updated_at = now;
    }

    pub fn replace_password(&mut self, password_hash: PasswordHash, now: DateTime<Utc>) {
        self.password_hash = Some(password_hash);
        self.code = None;
        self.updated_at = now;
    }

    /// Returns false when a different provider id is already linked.
    pub fn link_google(&mut self, google_id: &str, now: DateTime<Utc>) -> bool {
        match self.google_id.as_deref() {
            Some(existing) => existing == google_id,
            None => {
                self.google_id = Some(google_id.to_owned());
                self.updated_at = now;
                true
            }
        }
    }

    pub fn profile(&self) -> AccountProfile {
        AccountProfile {
            id: self.id,
            email: self.email.as_ref().expose_secret().clone(),
            name: self.name.as_str().to_owned(),
        }
    }
}

/// Public projection of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountProfile {
    pub id: AccountId,
    pub email: String,
    pub name: String,
}
