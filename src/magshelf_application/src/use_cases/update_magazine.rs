use chrono::Utc;
use magshelf_core::{AccountId, Magazine, MagazineId, MagazinePatch, MagazineStore, MagazineStoreError};

use super::ContentError;

/// Owner-only partial update
pub struct UpdateMagazineUseCase<'a, M>
where
    M: MagazineStore + ?Sized,
{
    magazine_store: &'a M,
}

impl<'a, M> UpdateMagazineUseCase<'a, M>
where
    M: MagazineStore + ?Sized,
{
    pub fn new(magazine_store: &'a M) -> Self {
        Self { magazine_store }
    }

    #[tracing::instrument(name = "UpdateMagazineUseCase::execute", skip(self, patch))]
    pub async fn execute(
        &self,
        magazine_id: MagazineId,
        owner: AccountId,
        patch: MagazinePatch,
    ) -> Result<Magazine, ContentError> {
        let mut magazine = match self.magazine_store.find_owned(magazine_id, owner).await {
            Ok(magazine) => magazine,
            Err(MagazineStoreError::MagazineNotFound) => {
                return Err(ContentError::NotFoundOrForbidden);
            }
            Err(e) => return Err(e.into()),
        };

        magazine.apply(patch, Utc::now());
        self.magazine_store.save(&magazine).await?;

        Ok(magazine)
    }
}
