use magshelf_core::{AccountStore, MagazineFilter, MagazineStore, MagazineView};

use super::{ContentError, populate::profiles_for};

/// Public listing with optional category and search filters, populated with profiles
pub struct ListMagazinesUseCase<'a, M, A>
where
    M: MagazineStore + ?Sized,
    A: AccountStore + ?Sized,
{
    magazine_store: &'a M,
    account_store: &'a A,
}

impl<'a, M, A> ListMagazinesUseCase<'a, M, A>
where
    M: MagazineStore + ?Sized,
    A: AccountStore + ?Sized,
{
    pub fn new(magazine_store: &'a M, account_store: &'a A) -> Self {
        Self {
            magazine_store,
            account_store,
        }
    }

    #[tracing::instrument(name = "ListMagazinesUseCase::execute", skip(self))]
    pub async fn execute(&self, filter: &MagazineFilter) -> Result<Vec<MagazineView>, ContentError> {
        let magazines = self.magazine_store.list(filter).await?;
        let profiles = profiles_for(self.account_store, &magazines).await?;
        Ok(magazines
            .iter()
            .map(|magazine| MagazineView::populate(magazine, &profiles))
            .collect())
    }
}
