use super::dto::{CreateCommentRequest, DeleteCommentRequest, UpdateCommentRequest};
use crate::{
    application::envelope::{CommentResponse, CommentsResponse, DeleteResponse, respond},
    domain::{
        policy::{
            ownership::ensure_owner,
            rules::{CommentDeletePolicy, DomainRules},
        },
        shared::{errors::DomainError, store::Store},
        social::{
            comment::{Comment, CommentBody, NewComment},
            comment_tree::{CommentNode, load_comment_tree},
        },
    },
};
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Threaded comments on blogs.
pub struct CommentUseCase {
    store: Store,
    rules: DomainRules,
}

impl CommentUseCase {
    pub fn new(store: Store, rules: DomainRules) -> Self {
        Self { store, rules }
    }

    /// Every comment on the blog, each with replies two levels deep.
    #[instrument(skip(self))]
    pub async fn get_comments_on_blog(&self, blog_id: Uuid) -> CommentsResponse {
        respond("get_comments_on_blog", self.comments_on_blog(blog_id).await)
    }

    /// Every comment the user wrote, each with replies two levels deep.
    #[instrument(skip(self))]
    pub async fn get_comments_of_user(&self, user_id: Uuid) -> CommentsResponse {
        respond("get_comments_of_user", self.comments_of_user(user_id).await)
    }

    #[instrument(skip(self, request), fields(blog_id = %request.blog_id, user_id = %request.user_id))]
    pub async fn create_comment(&self, request: CreateCommentRequest) -> CommentResponse {
        respond("create_comment", self.try_create(request).await)
    }

    #[instrument(skip(self, request), fields(user_id = %request.user_id))]
    pub async fn update_comment(&self, id: Uuid, request: UpdateCommentRequest) -> CommentResponse {
        respond("update_comment", self.try_update(id, request).await)
    }

    #[instrument(skip(self))]
    pub async fn delete_comment(&self, id: Uuid, request: DeleteCommentRequest) -> DeleteResponse {
        respond("delete_comment", self.try_delete(id, request.user_id).await)
    }

    async fn comments_on_blog(&self, blog_id: Uuid) -> Result<Vec<CommentNode>, DomainError> {
        if self.store.blogs.find_by_id(blog_id).await?.is_none() {
            return Err(DomainError::not_found("blogId", "Blog not found"));
        }
        let top = self.store.comments.find_by_blog(blog_id).await?;
        Ok(load_comment_tree(self.store.comments.as_ref(), top).await?)
    }

    async fn comments_of_user(&self, user_id: Uuid) -> Result<Vec<CommentNode>, DomainError> {
        if self.store.users.find_by_id(user_id).await?.is_none() {
            return Err(DomainError::not_found("userId", "User not found"));
        }
        let top = self.store.comments.find_by_user(user_id).await?;
        Ok(load_comment_tree(self.store.comments.as_ref(), top).await?)
    }

    async fn try_create(&self, request: CreateCommentRequest) -> Result<Comment, DomainError> {
        if self.store.blogs.find_by_id(request.blog_id).await?.is_none() {
            return Err(DomainError::not_found("blogId", "Blog not found"));
        }
        if self.store.users.find_by_id(request.user_id).await?.is_none() {
            return Err(DomainError::not_found("userId", "User not found"));
        }
        if let Some(parent_id) = request.parent_id {
            let parent = self
                .store
                .comments
                .find_by_id(parent_id)
                .await?
                .ok_or_else(|| DomainError::not_found("parent_id", "Parent comment not found"))?;
            if parent.blog_id != request.blog_id {
                return Err(DomainError::validation(
                    "parent_id",
                    "Parent comment belongs to a different blog",
                ));
            }
        }

        let body = CommentBody::new(request.comment)?;
        let comment = self
            .store
            .comments
            .create(&NewComment {
                blog_id: request.blog_id,
                user_id: request.user_id,
                body,
                parent_id: request.parent_id,
            })
            .await?;

        info!(comment_id = %comment.id, "comment created");
        Ok(comment)
    }

    async fn try_update(
        &self,
        id: Uuid,
        request: UpdateCommentRequest,
    ) -> Result<Comment, DomainError> {
        let comment = self.find(id).await?;
        ensure_owner(request.user_id, comment.user_id)?;

        let body = CommentBody::new(request.comment)?;
        Ok(self.store.comments.update_body(comment.id, &body.value).await?)
    }

    async fn try_delete(&self, id: Uuid, actor_id: Uuid) -> Result<bool, DomainError> {
        let comment = self.find(id).await?;
        ensure_owner(actor_id, comment.user_id)?;

        match self.rules.comment_delete {
            CommentDeletePolicy::Cascade => self.store.comments.delete(comment.id).await?,
            CommentDeletePolicy::Restrict => {
                let replies = self.store.comments.find_children(&[comment.id]).await?;
                if !replies.is_empty() {
                    return Err(DomainError::constraint("id", "Comment has replies"));
                }
                self.store.comments.delete(comment.id).await?;
            }
            CommentDeletePolicy::Promote => {
                let moved = self
                    .store
                    .comments
                    .delete_promoting(comment.id, comment.parent_id)
                    .await?;
                debug!(moved, "replies promoted");
            }
        }

        info!(comment_id = %comment.id, "comment deleted");
        Ok(true)
    }

    async fn find(&self, id: Uuid) -> Result<Comment, DomainError> {
        self.store
            .comments
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("id", "Comment not found"))
    }
}
