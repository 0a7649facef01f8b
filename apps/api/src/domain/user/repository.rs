use super::entity::{NewUser, User};
use crate::domain::shared::errors::StoreError;
use async_trait::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &NewUser) -> Result<User, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn find_all(&self) -> Result<Vec<User>, StoreError>;
    /// Users with the given ids, in store insertion order.
    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<User>, StoreError>;
    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<User, StoreError>;
    async fn update_image(&self, id: Uuid, image: &str) -> Result<User, StoreError>;
    /// Removes the user; blogs, comments, likes and follow edges go with it.
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}
