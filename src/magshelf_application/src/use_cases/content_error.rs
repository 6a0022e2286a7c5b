use magshelf_core::{AccountStoreError, MagazineError, MagazineStoreError};

/// Failures shared by the magazine use cases.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Magazine not found")]
    MagazineNotFound,
    #[error("Magazine not found or not authorized")]
    NotFoundOrForbidden,
    #[error("{0}")]
    Invalid(#[from] MagazineError),
    #[error("Magazine store error: {0}")]
    MagazineStoreError(MagazineStoreError),
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
}

impl From<MagazineStoreError> for ContentError {
    fn from(error: MagazineStoreError) -> Self {
        match error {
            MagazineStoreError::MagazineNotFound => Self::MagazineNotFound,
            other => Self::MagazineStoreError(other),
        }
    }
}
