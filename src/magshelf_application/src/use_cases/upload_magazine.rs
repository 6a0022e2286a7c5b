use chrono::Utc;
use magshelf_core::{AccountId, Magazine, MagazineStore, NewMagazine};

use super::ContentError;

/// Publishes a magazine owned by the caller
pub struct UploadMagazineUseCase<'a, M>
where
    M: MagazineStore + ?Sized,
{
    magazine_store: &'a M,
}

impl<'a, M> UploadMagazineUseCase<'a, M>
where
    M: MagazineStore + ?Sized,
{
    pub fn new(magazine_store: &'a M) -> Self {
        Self { magazine_store }
    }

    #[tracing::instrument(name = "UploadMagazineUseCase::execute", skip(self, magazine))]
    pub async fn execute(
        &self,
        owner: AccountId,
        magazine: NewMagazine,
    ) -> Result<Magazine, ContentError> {
        let magazine = Magazine::publish(magazine, owner, Utc::now());
        self.magazine_store.create(&magazine).await?;
        Ok(magazine)
    }
}
