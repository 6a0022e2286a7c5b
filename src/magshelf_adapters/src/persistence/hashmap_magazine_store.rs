use std::sync::Arc;
use tokio::sync::RwLock;

use magshelf_core::{
    AccountId, Magazine, MagazineFilter, MagazineId, MagazineStore, MagazineStoreError,
};

/// Keeps magazines in insertion order, which doubles as creation order.
#[derive(Default, Clone)]
pub struct HashMapMagazineStore {
    magazines: Arc<RwLock<Vec<Magazine>>>,
}

impl HashMapMagazineStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl MagazineStore for HashMapMagazineStore {
    async fn create(&self, magazine: &Magazine) -> Result<(), MagazineStoreError> {
        self.magazines.write().await.push(magazine.clone());
        Ok(())
    }

    async fn list(&self, filter: &MagazineFilter) -> Result<Vec<Magazine>, MagazineStoreError> {
        let magazines = self.magazines.read().await;
        Ok(magazines
            .iter()
            .filter(|magazine| filter.matches(magazine))
            .cloned()
            .collect())
    }

    async fn list_by_owner(&self, owner: AccountId) -> Result<Vec<Magazine>, MagazineStoreError> {
        let magazines = self.magazines.read().await;
        Ok(magazines
            .iter()
            .filter(|magazine| magazine.is_owned_by(owner))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: MagazineId) -> Result<Magazine, MagazineStoreError> {
        let magazines = self.magazines.read().await;
        magazines
            .iter()
            .find(|magazine| magazine.id == id)
            .cloned()
            .ok_or(MagazineStoreError::MagazineNotFound)
    }

    async fn save(&self, magazine: &Magazine) -> Result<(), MagazineStoreError> {
        let mut magazines = self.magazines.write().await;
        let stored = magazines
            .iter_mut()
            .find(|stored| stored.id == magazine.id)
            .ok_or(MagazineStoreError::MagazineNotFound)?;
        *stored = magazine.clone();
        Ok(())
    }

    async fn find_owned(
        &self,
        id: MagazineId,
        owner: AccountId,
    ) -> Result<Magazine, MagazineStoreError> {
        let magazines = self.magazines.read().await;
        magazines
            .iter()
            .find(|magazine| magazine.id == id && magazine.is_owned_by(owner))
            .cloned()
            .ok_or(MagazineStoreError::MagazineNotFound)
    }

    async fn delete_owned(
        &self,
        id: MagazineId,
        owner: AccountId,
    ) -> Result<bool, MagazineStoreError> {
        let mut magazines = self.magazines.write().await;
        let position = magazines
            .iter()
            .position(|magazine| magazine.id == id && magazine.is_owned_by(owner));
        Ok(position.map(|index| magazines.remove(index)).is_some())
    }
}
