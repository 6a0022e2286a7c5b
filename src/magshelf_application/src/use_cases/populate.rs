use std::collections::HashMap;

use magshelf_core::{AccountId, AccountProfile, AccountStore, AccountStoreError, Magazine};

/// Fetches the public profiles of every account the magazines reference, in one store call.
pub(crate) async fn profiles_for<A>(
    account_store: &A,
    magazines: &[Magazine],
) -> Result<HashMap<AccountId, AccountProfile>, AccountStoreError>
where
    A: AccountStore + ?Sized,
{
    let mut ids: Vec<AccountId> = magazines
        .iter()
        .flat_map(Magazine::referenced_accounts)
        .collect();
    ids.sort();
    ids.dedup();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    account_store.profiles(&ids).await
}
