use super::{
    comment::{Comment, NewComment},
    edge::Edge,
    like::Like,
};
use crate::domain::shared::errors::StoreError;
use async_trait::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(&self, comment: &NewComment) -> Result<Comment, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, StoreError>;
    async fn find_by_blog(&self, blog_id: Uuid) -> Result<Vec<Comment>, StoreError>;
    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Comment>, StoreError>;
    /// Direct children of any of `parent_ids`, in insertion order.
    async fn find_children(&self, parent_ids: &[Uuid]) -> Result<Vec<Comment>, StoreError>;
    async fn update_body(&self, id: Uuid, body: &str) -> Result<Comment, StoreError>;
    /// Points the comment's direct replies at `new_parent`, then removes the
    /// comment. Both writes land together or not at all. Returns how many
    /// replies moved.
    async fn delete_promoting(&self, id: Uuid, new_parent: Option<Uuid>)
    -> Result<u64, StoreError>;
    /// Removes the comment and, transitively, its replies.
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

/// Storage for like and follow edges.
///
/// `connect` and `disconnect` are each a single store call and report whether
/// they changed anything; neither fails when the edge is already in the
/// requested state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EdgeRepository: Send + Sync {
    async fn exists(&self, edge: &Edge) -> Result<bool, StoreError>;
    async fn connect(&self, edge: &Edge) -> Result<bool, StoreError>;
    async fn disconnect(&self, edge: &Edge) -> Result<bool, StoreError>;
    async fn likes_of_blog(&self, blog_id: Uuid) -> Result<Vec<Like>, StoreError>;
    async fn followers_of(&self, user_id: Uuid) -> Result<Vec<Uuid>, StoreError>;
    async fn following_of(&self, user_id: Uuid) -> Result<Vec<Uuid>, StoreError>;
}
