use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use magshelf_core::{
    Account, AccountId, AccountProfile, AccountStore, AccountStoreError, Email,
};

#[derive(Default, Clone)]
pub struct HashMapAccountStore {
    accounts: Arc<RwLock<HashMap<AccountId, Account>>>,
}

impl HashMapAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Mirrors the partial unique indexes: a present email or google id may
/// belong to one account only.
fn conflicts(existing: &Account, candidate: &Account) -> bool {
    existing.id() != candidate.id()
        && (existing.email() == candidate.email()
            || (candidate.google_id().is_some() && existing.google_id() == candidate.google_id()))
}

#[async_trait::async_trait]
impl AccountStore for HashMapAccountStore {
    async fn find_by_email(&self, email: &Email) -> Result<Account, AccountStoreError> {
        let accounts = self.accounts.read().await;
        accounts
            .values()
            .find(|account| account.email() == email)
            .cloned()
            .ok_or(AccountStoreError::AccountNotFound)
    }

    async fn find_by_google_id(&self, google_id: &str) -> Result<Account, AccountStoreError> {
        let accounts = self.accounts.read().await;
        accounts
            .values()
            .find(|account| account.google_id() == Some(google_id))
            .cloned()
            .ok_or(AccountStoreError::AccountNotFound)
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Account, AccountStoreError> {
        let accounts = self.accounts.read().await;
        accounts
            .get(&id)
            .cloned()
            .ok_or(AccountStoreError::AccountNotFound)
    }

    async fn create(&self, account: Account) -> Result<(), AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&account.id())
            || accounts.values().any(|existing| conflicts(existing, &account))
        {
            return Err(AccountStoreError::AccountAlreadyExists);
        }
        accounts.insert(account.id(), account);
        Ok(())
    }

    async fn save(&self, account: &Account) -> Result<(), AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        if accounts.values().any(|existing| conflicts(existing, account)) {
            return Err(AccountStoreError::AccountAlreadyExists);
        }
        let stored = accounts
            .get_mut(&account.id())
            .ok_or(AccountStoreError::AccountNotFound)?;
        *stored = account.clone();
        Ok(())
    }

    async fn profiles(
        &self,
        ids: &[AccountId],
    ) -> Result<HashMap<AccountId, AccountProfile>, AccountStoreError> {
        let accounts = self.accounts.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| accounts.get(id).map(|account| (*id, account.profile())))
            .collect())
    }
}
