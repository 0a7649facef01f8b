use super::entity::{Blog, BlogContent, NewBlog};
use crate::domain::shared::errors::StoreError;
use async_trait::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlogRepository: Send + Sync {
    async fn create(&self, blog: &NewBlog) -> Result<Blog, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>, StoreError>;
    async fn find_all(&self) -> Result<Vec<Blog>, StoreError>;
    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Blog>, StoreError>;
    async fn update(&self, id: Uuid, content: &BlogContent) -> Result<Blog, StoreError>;
    /// Removes the blog; its comments and likes go with it.
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}
