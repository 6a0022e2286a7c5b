use chrono::Utc;
use magshelf_core::{
    AccountStore, AccountStoreError, Email, OneTimeCode, Password, PasswordHasher,
    PasswordHasherError,
};

#[derive(Debug, thiserror::Error)]
pub enum ResetPasswordError {
    #[error("User not found")]
    AccountNotFound,
    #[error("Invalid or expired OTP")]
    CodeMismatchOrExpired,
    #[error("Account store error: {0}")]
    AccountStoreError(AccountStoreError),
    #[error("Password hashing error: {0}")]
    PasswordHasherError(#[from] PasswordHasherError),
}

impl From<AccountStoreError> for ResetPasswordError {
    fn from(error: AccountStoreError) -> Self {
        match error {
            AccountStoreError::AccountNotFound => Self::AccountNotFound,
            other => Self::AccountStoreError(other),
        }
    }
}

/// Replaces the password when the reset code matches
pub struct ResetPasswordUseCase<'a, A, H>
where
    A: AccountStore + ?Sized,
    H: PasswordHasher + ?Sized,
{
    account_store: &'a A,
    password_hasher: &'a H,
}

impl<'a, A, H> ResetPasswordUseCase<'a, A, H>
where
    A: AccountStore + ?Sized,
    H: PasswordHasher + ?Sized,
{
    pub fn new(account_store: &'a A, password_hasher: &'a H) -> Self {
        Self {
            account_store,
            password_hasher,
        }
    }

    #[tracing::instrument(name = "ResetPasswordUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        email: &Email,
        code: &str,
        new_password: Password,
    ) -> Result<(), ResetPasswordError> {
        let mut account = self.account_store.find_by_email(email).await?;
        let now = Utc::now();

        let code =
            OneTimeCode::parse(code).map_err(|_| ResetPasswordError::CodeMismatchOrExpired)?;
        if !account.code_matches(&code, now) {
            return Err(ResetPasswordError::CodeMismatchOrExpired);
        }

        let password_hash = self.password_hasher.hash(&new_password).await?;
        account.replace_password(password_hash, now);
        self.account_store.save(&account).await?;

        Ok(())
    }
}
