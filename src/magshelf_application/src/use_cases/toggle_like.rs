use chrono::Utc;
use magshelf_core::{AccountId, AccountStore, MagazineId, MagazineStore, MagazineView, PersonView};

use super::{ContentError, populate::profiles_for};

/// Adds or removes the caller's like and returns the resulting like set
pub struct ToggleLikeUseCase<'a, M, A>
where
    M: MagazineStore + ?Sized,
    A: AccountStore + ?Sized,
{
    magazine_store: &'a M,
    account_store: &'a A,
}

impl<'a, M, A> ToggleLikeUseCase<'a, M, A>
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

    #[tracing::instrument(name = "ToggleLikeUseCase::execute", skip(self))]
    pub async fn execute(
        &self,
        magazine_id: MagazineId,
        account: AccountId,
    ) -> Result<Vec<PersonView>, ContentError> {
        let mut magazine = self.magazine_store.find_by_id(magazine_id).await?;
        let liked = magazine.toggle_like(account, Utc::now());
        self.magazine_store.save(&magazine).await?;
        tracing::debug!(liked, "like toggled");

        let profiles = profiles_for(self.account_store, std::slice::from_ref(&magazine)).await?;
        Ok(MagazineView::likes(&magazine, &profiles))
    }
}
