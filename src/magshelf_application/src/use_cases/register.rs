use chrono::Utc;
use magshelf_core::{
    Account, AccountStore, AccountStoreError, CodeGrant, DisplayName, Email, EmailClient,
    Password, PasswordHasher, PasswordHasherError,
};

use crate::emails::{REGISTRATION_SUBJECT, registration_body};

/// What registration did for an address that was not yet verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// First attempt: the account was created and a code mailed.
    CodeSent,
    /// The previous code had expired and a new one was mailed.
    CodeResent,
    /// A live code exists; nothing was changed.
    CodeAlreadySent,
}

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("Existing user. Please log in.")]
    AlreadyRegistered,
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
    #[error("Password hashing error: {0}")]
    PasswordHasherError(#[from] PasswordHasherError),
    #[error("Failed to send email: {0}")]
    EmailError(String),
}

/// Registration use case - creates unverified accounts and mails verification codes
pub struct RegisterUseCase<'a, A, H, E>
where
    A: AccountStore + ?Sized,
    H: PasswordHasher + ?Sized,
    E: EmailClient + ?Sized,
{
    account_store: &'a A,
    password_hasher: &'a H,
    email_client: &'a E,
}

impl<'a, A, H, E> RegisterUseCase<'a, A, H, E>
where
    A: AccountStore + ?Sized,
    H: PasswordHasher + ?Sized,
    E: EmailClient + ?Sized,
{
    pub fn new(account_store: &'a A, password_hasher: &'a H, email_client: &'a E) -> Self {
        Self {
            account_store,
            password_hasher,
            email_client,
        }
    }

    /// A retry after the code expired also replaces the stored password hash
    /// with the one derived from `password`.
    #[tracing::instrument(name = "RegisterUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
        name: Option<String>,
    ) -> Result<RegisterOutcome, RegisterError> {
        let now = Utc::now();

        let (account, outcome) = match self.account_store.find_by_email(&email).await {
            Ok(account) if account.is_verified() => return Err(RegisterError::AlreadyRegistered),
            Ok(account) if account.has_live_code(now) => {
                return Ok(RegisterOutcome::CodeAlreadySent);
            }
            Ok(mut account) => {
                let password_hash = self.password_hasher.hash(&password).await?;
                account.reissue_code(CodeGrant::issue(now), password_hash, now);
                self.account_store.save(&account).await?;
                (account, RegisterOutcome::CodeResent)
            }
            Err(AccountStoreError::AccountNotFound) => {
                let password_hash = self.password_hasher.hash(&password).await?;
                let name = DisplayName::or_from_email(name.as_deref(), &email);
                let account = Account::register(email, name, password_hash, CodeGrant::issue(now), now);
                self.account_store.create(account.clone()).await?;
                (account, RegisterOutcome::CodeSent)
            }
            Err(e) => return Err(e.into()),
        };

        self.send_code(&account).await?;
        tracing::info!(outcome = ?outcome, "verification code issued");

        Ok(outcome)
    }

    async fn send_code(&self, account: &Account) -> Result<(), RegisterError> {
        let Some(grant) = account.code() else {
            return Err(RegisterError::EmailError("no code to send".to_owned()));
        };
        let body = registration_body(grant.code()).map_err(|e| RegisterError::EmailError(e.to_string()))?;
        self.email_client
            .send_email(account.email(), REGISTRATION_SUBJECT, &body)
            .await
            .map_err(RegisterError::EmailError)
    }
}
