use chrono::Utc;
use magshelf_core::{Account, AccountStore, AccountStoreError, ProviderProfile};

#[derive(Debug, thiserror::Error)]
pub enum GoogleLoginError {
    #[error("Google account does not have an email.")]
    MissingEmail,
    #[error("User not registered. Please register first.")]
    NotRegistered,
    #[error("Please verify your email before logging in.")]
    NotVerified,
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
}

/// Resolves a Google profile to an existing account, linking it on first use.
///
/// Lookup goes by Google id first, then by email. Accounts are never created
/// here: a profile matching nothing is rejected.
pub struct GoogleLoginUseCase<'a, A>
where
    A: AccountStore + ?Sized,
{
    account_store: &'a A,
}

impl<'a, A> GoogleLoginUseCase<'a, A>
where
    A: AccountStore + ?Sized,
{
    pub fn new(account_store: &'a A) -> Self {
        Self { account_store }
    }

    #[tracing::instrument(name = "GoogleLoginUseCase::execute", skip_all)]
    pub async fn execute(&self, profile: ProviderProfile) -> Result<Account, GoogleLoginError> {
        let Some(email) = profile.email else {
            return Err(GoogleLoginError::MissingEmail);
        };

        match self.account_store.find_by_google_id(&profile.id).await {
            Ok(account) => return Ok(account),
            Err(AccountStoreError::AccountNotFound) => {}
            Err(e) => return Err(e.into()),
        }

        let mut account = match self.account_store.find_by_email(&email).await {
            Ok(account) => account,
            Err(AccountStoreError::AccountNotFound) => return Err(GoogleLoginError::NotRegistered),
            Err(e) => return Err(e.into()),
        };

        if account.google_id().is_none() {
            account.link_google(&profile.id, Utc::now());
            self.account_store.save(&account).await?;
            tracing::info!(account_id = %account.id(), "linked google identity");
        }

        if !account.is_verified() {
            return Err(GoogleLoginError::NotVerified);
        }

        Ok(account)
    }
}
