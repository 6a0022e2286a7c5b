use magshelf_core::{
    Account, AccountStore, AccountStoreError, Email, Password, PasswordHasher,
    PasswordHasherError,
};

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("User not found. Please register.")]
    AccountNotFound,
    #[error("Please verify your email before logging in.")]
    NotVerified,
    #[error("Invalid credentials")]
    IncorrectPassword,
    #[error("Account store error: {0}")]
    AccountStoreError(AccountStoreError),
    #[error("Password hashing error: {0}")]
    PasswordHasherError(#[from] PasswordHasherError),
}

impl From<AccountStoreError> for LoginError {
    fn from(error: AccountStoreError) -> Self {
        match error {
            AccountStoreError::AccountNotFound => Self::AccountNotFound,
            other => Self::AccountStoreError(other),
        }
    }
}

/// Password login use case - checks credentials and returns the account
pub struct LoginUseCase<'a, A, H>
where
    A: AccountStore + ?Sized,
    H: PasswordHasher + ?Sized,
{
    account_store: &'a A,
    password_hasher: &'a H,
}

impl<'a, A, H> LoginUseCase<'a, A, H>
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

    /// Accounts linked to Google skip both the verification and the password
    /// check.
    #[tracing::instrument(name = "LoginUseCase::execute", skip_all)]
    pub async fn execute(&self, email: &Email, password: &Password) -> Result<Account, LoginError> {
        let account = self.account_store.find_by_email(email).await?;

        if account.google_id().is_some() {
            tracing::info!("account has a linked google identity");
            return Ok(account);
        }

        if !account.is_verified() {
            return Err(LoginError::NotVerified);
        }

        let Some(hash) = account.password_hash() else {
            return Err(LoginError::IncorrectPassword);
        };
        if !self.password_hasher.verify(password, hash).await? {
            return Err(LoginError::IncorrectPassword);
        }

        Ok(account)
    }
}
