use magshelf_core::{AccountId, MagazineId, MagazineStore};

use super::ContentError;

/// Owner-only delete
pub struct DeleteMagazineUseCase<'a, M>
where
    M: MagazineStore + ?Sized,
{
    magazine_store: &'a M,
}

impl<'a, M> DeleteMagazineUseCase<'a, M>
where
    M: MagazineStore + ?Sized,
{
    pub fn new(magazine_store: &'a M) -> Self {
        Self { magazine_store }
    }

    #[tracing::instrument(name = "DeleteMagazineUseCase::execute", skip(self))]
    pub async fn execute(&self, magazine_id: MagazineId, owner: AccountId) -> Result<(), ContentError> {
        if self.magazine_store.delete_owned(magazine_id, owner).await? {
            Ok(())
        } else {
            Err(ContentError::NotFoundOrForbidden)
        }
    }
}
