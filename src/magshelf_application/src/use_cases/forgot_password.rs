use chrono::Utc;
use magshelf_core::{AccountStore, AccountStoreError, CodeGrant, Email, EmailClient};

use crate::emails::{PASSWORD_RESET_SUBJECT, password_reset_body};

#[derive(Debug, thiserror::Error)]
pub enum ForgotPasswordError {
    #[error("User not found")]
    AccountNotFound,
    #[error("Account store error: {0}")]
    AccountStoreError(AccountStoreError),
    #[error("Failed to send email: {0}")]
    EmailError(String),
}

impl From<AccountStoreError> for ForgotPasswordError {
    fn from(error: AccountStoreError) -> Self {
        match error {
            AccountStoreError::AccountNotFound => Self::AccountNotFound,
            other => Self::AccountStoreError(other),
        }
    }
}

/// Issues a password reset code, whether or not the account is verified
pub struct ForgotPasswordUseCase<'a, A, E>
where
    A: AccountStore + ?Sized,
    E: EmailClient + ?Sized,
{
    account_store: &'a A,
    email_client: &'a E,
}

impl<'a, A, E> ForgotPasswordUseCase<'a, A, E>
where
    A: AccountStore + ?Sized,
    E: EmailClient + ?Sized,
{
    pub fn new(account_store: &'a A, email_client: &'a E) -> Self {
        Self {
            account_store,
            email_client,
        }
    }

    #[tracing::instrument(name = "ForgotPasswordUseCase::execute", skip_all)]
    pub async fn execute(&self, email: &Email) -> Result<(), ForgotPasswordError> {
        let mut account = self.account_store.find_by_email(email).await?;
        let now = Utc::now();

        let grant = CodeGrant::issue(now);
        let body = password_reset_body(grant.code())
            .map_err(|e| ForgotPasswordError::EmailError(e.to_string()))?;
        account.issue_reset_code(grant, now);
        self.account_store.save(&account).await?;

        self.email_client
            .send_email(account.email(), PASSWORD_RESET_SUBJECT, &body)
            .await
            .map_err(ForgotPasswordError::EmailError)
    }
}
