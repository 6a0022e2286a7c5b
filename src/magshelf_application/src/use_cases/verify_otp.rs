use chrono::Utc;
use magshelf_core::{AccountStore, AccountStoreError, Email, OneTimeCode};

#[derive(Debug, thiserror::Error)]
pub enum VerifyOtpError {
    #[error("User not found.")]
    AccountNotFound,
    #[error("Invalid or expired OTP.")]
    CodeMismatchOrExpired,
    #[error("Account store error: {0}")]
    AccountStoreError(AccountStoreError),
}

impl From<AccountStoreError> for VerifyOtpError {
    fn from(error: AccountStoreError) -> Self {
        match error {
            AccountStoreError::AccountNotFound => Self::AccountNotFound,
            other => Self::AccountStoreError(other),
        }
    }
}

/// Consumes a registration code and marks the account verified
pub struct VerifyOtpUseCase<'a, A>
where
    A: AccountStore + ?Sized,
{
    account_store: &'a A,
}

impl<'a, A> VerifyOtpUseCase<'a, A>
where
    A: AccountStore + ?Sized,
{
    pub fn new(account_store: &'a A) -> Self {
        Self { account_store }
    }

    #[tracing::instrument(name = "VerifyOtpUseCase::execute", skip_all)]
    pub async fn execute(&self, email: &Email, code: &str) -> Result<(), VerifyOtpError> {
        let mut account = self.account_store.find_by_email(email).await?;
        let now = Utc::now();

        let code = OneTimeCode::parse(code).map_err(|_| VerifyOtpError::CodeMismatchOrExpired)?;
        if !account.code_matches(&code, now) {
            return Err(VerifyOtpError::CodeMismatchOrExpired);
        }

        account.mark_verified(now);
        self.account_store.save(&account).await?;

        Ok(())
    }
}
