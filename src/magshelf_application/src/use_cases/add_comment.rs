use chrono::Utc;
use magshelf_core::{
    AccountId, AccountStore, CommentText, CommentView, MagazineId, MagazineStore, MagazineView,
};

use super::{ContentError, populate::profiles_for};

/// Appends a comment by the caller and returns the full comment list
pub struct AddCommentUseCase<'a, M, A>
where
    M: MagazineStore + ?Sized,
    A: AccountStore + ?Sized,
{
    magazine_store: &'a M,
    account_store: &'a A,
}

impl<'a, M, A> AddCommentUseCase<'a, M, A>
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

    #[tracing::instrument(name = "AddCommentUseCase::execute", skip(self, text))]
    pub async fn execute(
        &self,
        magazine_id: MagazineId,
        author: AccountId,
        text: CommentText,
    ) -> Result<Vec<CommentView>, ContentError> {
        let mut magazine = self.magazine_store.find_by_id(magazine_id).await?;
        magazine.add_comment(author, text, Utc::now());
        self.magazine_store.save(&magazine).await?;

        let profiles = profiles_for(self.account_store, std::slice::from_ref(&magazine)).await?;
        Ok(MagazineView::comments(&magazine, &profiles))
    }
}
