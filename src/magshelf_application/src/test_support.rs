//! In-memory doubles for the ports, shared by the use case tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use magshelf_core::{
    Account, AccountId, AccountParts, AccountProfile, AccountStore, AccountStoreError,
    CodeGrant, DisplayName, Email, EmailClient, FileStorage, FileStorageError, Magazine,
    MagazineFilter, MagazineId, MagazineStore, MagazineStoreError, NewMagazine, OneTimeCode,
    Password, PasswordHash, PasswordHasher, PasswordHasherError,
};
use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;

pub fn email(raw: &str) -> Email {
    Email::try_from(raw.to_owned()).unwrap()
}

pub fn password(raw: &str) -> Password {
    Password::try_from(Secret::new(raw.to_owned())).unwrap()
}

pub fn hashed(raw: &str) -> PasswordHash {
    PasswordHash::new(Secret::new(format!("hashed:{raw}")))
}

/// Builds an account directly, bypassing registration.
pub fn account(
    address: &str,
    raw_password: &str,
    is_verified: bool,
    code: Option<(&str, DateTime<Utc>)>,
) -> Account {
    let email = email(address);
    let now = Utc::now();
    Account::from_parts(AccountParts {
        id: AccountId::new(),
        name: DisplayName::or_from_email(None, &email),
        email,
        password_hash: Some(hashed(raw_password)),
        google_id: None,
        is_verified,
        code: code.map(|(raw, expires_at)| {
            CodeGrant::from_parts(OneTimeCode::parse(raw).unwrap(), expires_at)
        }),
        created_at: now - Duration::hours(1),
        updated_at: now - Duration::hours(1),
    })
}

#[derive(Default, Clone)]
pub struct MockAccountStore {
    accounts: Arc<RwLock<HashMap<AccountId, Account>>>,
}

impl MockAccountStore {
    pub fn with(accounts: Vec<Account>) -> Self {
        Self {
            accounts: Arc::new(RwLock::new(
                accounts.into_iter().map(|a| (a.id(), a)).collect(),
            )),
        }
    }

    pub async fn by_email(&self, address: &str) -> Option<Account> {
        self.accounts
            .read()
            .await
            .values()
            .find(|a| a.email().as_ref().expose_secret() == address)
            .cloned()
    }
}

#[async_trait]
impl AccountStore for MockAccountStore {
    async fn find_by_email(&self, email: &Email) -> Result<Account, AccountStoreError> {
        self.accounts
            .read()
            .await
            .values()
            .find(|a| a.email() == email)
            .cloned()
            .ok_or(AccountStoreError::AccountNotFound)
    }

    async fn find_by_google_id(&self, google_id: &str) -> Result<Account, AccountStoreError> {
        self.accounts
            .read()
            .await
            .values()
            .find(|a| a.google_id() == Some(google_id))
            .cloned()
            .ok_or(AccountStoreError::AccountNotFound)
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Account, AccountStoreError> {
        self.accounts
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(AccountStoreError::AccountNotFound)
    }

    async fn create(&self, account: Account) -> Result<(), AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        if accounts.values().any(|a| a.email() == account.email()) {
            return Err(AccountStoreError::AccountAlreadyExists);
        }
        accounts.insert(account.id(), account);
        Ok(())
    }

    async fn save(&self, account: &Account) -> Result<(), AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        match accounts.get_mut(&account.id()) {
            Some(stored) => {
                *stored = account.clone();
                Ok(())
            }
            None => Err(AccountStoreError::AccountNotFound),
        }
    }

    async fn profiles(
        &self,
        ids: &[AccountId],
    ) -> Result<HashMap<AccountId, AccountProfile>, AccountStoreError> {
        let accounts = self.accounts.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| accounts.get(id).map(|a| (*id, a.profile())))
            .collect())
    }
}

#[derive(Default, Clone)]
pub struct MockMagazineStore {
    magazines: Arc<RwLock<Vec<Magazine>>>,
}

impl MockMagazineStore {
    pub async fn get(&self, id: MagazineId) -> Option<Magazine> {
        self.magazines
            .read()
            .await
            .iter()
            .find(|m| m.id == id)
            .cloned()
    }
}

#[async_trait]
impl MagazineStore for MockMagazineStore {
    async fn create(&self, magazine: &Magazine) -> Result<(), MagazineStoreError> {
        self.magazines.write().await.push(magazine.clone());
        Ok(())
    }

    async fn list(&self, filter: &MagazineFilter) -> Result<Vec<Magazine>, MagazineStoreError> {
        Ok(self
            .magazines
            .read()
            .await
            .iter()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect())
    }

    async fn list_by_owner(&self, owner: AccountId) -> Result<Vec<Magazine>, MagazineStoreError> {
        Ok(self
            .magazines
            .read()
            .await
            .iter()
            .filter(|m| m.is_owned_by(owner))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: MagazineId) -> Result<Magazine, MagazineStoreError> {
        self.get(id).await.ok_or(MagazineStoreError::MagazineNotFound)
    }

    async fn save(&self, magazine: &Magazine) -> Result<(), MagazineStoreError> {
        let mut magazines = self.magazines.write().await;
        let stored = magazines
            .iter_mut()
            .find(|m| m.id == magazine.id)
            .ok_or(MagazineStoreError::MagazineNotFound)?;
        *stored = magazine.clone();
        Ok(())
    }

    async fn find_owned(
        &self,
        id: MagazineId,
        owner: AccountId,
    ) -> Result<Magazine, MagazineStoreError> {
        self.get(id)
            .await
            .filter(|m| m.is_owned_by(owner))
            .ok_or(MagazineStoreError::MagazineNotFound)
    }

    async fn delete_owned(
        &self,
        id: MagazineId,
        owner: AccountId,
    ) -> Result<bool, MagazineStoreError> {
        let mut magazines = self.magazines.write().await;
        let before = magazines.len();
        magazines.retain(|m| !(m.id == id && m.is_owned_by(owner)));
        Ok(magazines.len() != before)
    }
}

/// Hashes by prefixing, so tests can assert on stored hashes.
pub struct MockPasswordHasher;

#[async_trait]
impl PasswordHasher for MockPasswordHasher {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHasherError> {
        Ok(hashed(password.as_ref().expose_secret()))
    }

    async fn verify(
        &self,
        password: &Password,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHasherError> {
        Ok(hashed(password.as_ref().expose_secret()).as_ref().expose_secret()
            == hash.as_ref().expose_secret())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub recipient: String,
    pub subject: String,
    pub content: String,
}

#[derive(Default, Clone)]
pub struct RecordingEmailClient {
    pub sent: Arc<RwLock<Vec<SentEmail>>>,
    pub fail: bool,
}

impl RecordingEmailClient {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub async fn sent(&self) -> Vec<SentEmail> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl EmailClient for RecordingEmailClient {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        if self.fail {
            return Err("mail server unavailable".to_owned());
        }
        self.sent.write().await.push(SentEmail {
            recipient: recipient.as_ref().expose_secret().clone(),
            subject: subject.to_owned(),
            content: content.to_owned(),
        });
        Ok(())
    }
}

#[derive(Default)]
pub struct MockFileStorage;

#[async_trait]
impl FileStorage for MockFileStorage {
    async fn store(
        &self,
        file_name: &str,
        _content_type: &str,
        _bytes: &[u8],
    ) -> Result<String, FileStorageError> {
        Ok(format!("http://files.test/uploads/{file_name}"))
    }
}

pub fn new_magazine(title: &str) -> NewMagazine {
    NewMagazine::parse(
        title,
        "A magazine about things",
        vec!["Tech".to_owned()],
        "http://files.test/uploads/a.pdf",
        "http://files.test/uploads/a.png",
    )
    .unwrap()
}
