use magshelf_core::{AccountId, Magazine, MagazineStore};

use super::ContentError;

/// The caller's own magazines, unpopulated
pub struct ListUserMagazinesUseCase<'a, M>
where
    M: MagazineStore + ?Sized,
{
    magazine_store: &'a M,
}

impl<'a, M> ListUserMagazinesUseCase<'a, M>
where
    M: MagazineStore + ?Sized,
{
    pub fn new(magazine_store: &'a M) -> Self {
        Self { magazine_store }
    }

    #[tracing::instrument(name = "ListUserMagazinesUseCase::execute", skip(self))]
    pub async fn execute(&self, owner: AccountId) -> Result<Vec<Magazine>, ContentError> {
        Ok(self.magazine_store.list_by_owner(owner).await?)
    }
}
