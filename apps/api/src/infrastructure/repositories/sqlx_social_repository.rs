use crate::{
    domain::{
        shared::errors::StoreError,
        social::{
            comment::{Comment, NewComment},
            edge::Edge,
            like::Like,
            repository::{CommentRepository, EdgeRepository},
        },
    },
    infrastructure::database::errors::map_sqlx_error,
};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

pub struct SqlxCommentRepository {
    pub pool: PgPool,
}

impl SqlxCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for SqlxCommentRepository {
    async fn create(&self, comment: &NewComment) -> Result<Comment, StoreError> {
        sqlx::query_as::<_, Comment>(
            "INSERT INTO comments (id, comment_body, user_id, blog_id, parent_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, comment_body, user_id, blog_id, parent_id, created_at, updated_at",
        )
        .bind(Uuid::now_v7())
        .bind(&comment.body.value)
        .bind(comment.user_id)
        .bind(comment.blog_id)
        .bind(comment.parent_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, StoreError> {
        sqlx::query_as::<_, Comment>(
            "SELECT id, comment_body, user_id, blog_id, parent_id, created_at, updated_at \
             FROM comments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn find_by_blog(&self, blog_id: Uuid) -> Result<Vec<Comment>, StoreError> {
        sqlx::query_as::<_, Comment>(
            "SELECT id, comment_body, user_id, blog_id, parent_id, created_at, updated_at \
             FROM comments WHERE blog_id = $1 ORDER BY created_at, id",
        )
        .bind(blog_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Comment>, StoreError> {
        sqlx::query_as::<_, Comment>(
            "SELECT id, comment_body, user_id, blog_id, parent_id, created_at, updated_at \
             FROM comments WHERE user_id = $1 ORDER BY created_at, id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn find_children(&self, parent_ids: &[Uuid]) -> Result<Vec<Comment>, StoreError> {
        if parent_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, Comment>(
            "SELECT id, comment_body, user_id, blog_id, parent_id, created_at, updated_at \
             FROM comments WHERE parent_id = ANY($1) ORDER BY created_at, id",
        )
        .bind(parent_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn update_body(&self, id: Uuid, body: &str) -> Result<Comment, StoreError> {
        sqlx::query_as::<_, Comment>(
            "UPDATE comments SET comment_body = $2, updated_at = NOW() WHERE id = $1 \
             RETURNING id, comment_body, user_id, blog_id, parent_id, created_at, updated_at",
        )
        .bind(id)
        .bind(body)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn delete_promoting(
        &self,
        id: Uuid,
        new_parent: Option<Uuid>,
    ) -> Result<u64, StoreError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        // The row lock blocks new replies (their FK check needs a key-share
        // lock on the parent) until the delete commits.
        let locked =
            sqlx::query_scalar::<_, Uuid>("SELECT id FROM comments WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(map_sqlx_error)?;
        if locked.is_none() {
            return Err(StoreError::NotFound);
        }

        let moved = sqlx::query(
            "UPDATE comments SET parent_id = $2, updated_at = NOW() WHERE parent_id = $1",
        )
        .bind(id)
        .bind(new_parent)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?
        .rows_affected();

        sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(moved)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

/// Likes and follows. Both tables are keyed on the edge's two ids, so
/// `connect` relies on `ON CONFLICT DO NOTHING` and never duplicates.
pub struct SqlxEdgeRepository {
    pub pool: PgPool,
}

impl SqlxEdgeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EdgeRepository for SqlxEdgeRepository {
    async fn exists(&self, edge: &Edge) -> Result<bool, StoreError> {
        let (sql, a, b) = match *edge {
            Edge::Like { user_id, blog_id } => (
                "SELECT EXISTS(SELECT 1 FROM likes WHERE user_id = $1 AND blog_id = $2)",
                user_id,
                blog_id,
            ),
            Edge::Follow {
                follower_id,
                followee_id,
            } => (
                "SELECT EXISTS(SELECT 1 FROM follows WHERE follower_id = $1 AND followee_id = $2)",
                follower_id,
                followee_id,
            ),
        };
        sqlx::query_scalar::<_, bool>(sql)
            .bind(a)
            .bind(b)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    async fn connect(&self, edge: &Edge) -> Result<bool, StoreError> {
        let (sql, a, b) = match *edge {
            Edge::Like { user_id, blog_id } => (
                "INSERT INTO likes (user_id, blog_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
                user_id,
                blog_id,
            ),
            Edge::Follow {
                follower_id,
                followee_id,
            } => (
                "INSERT INTO follows (follower_id, followee_id) VALUES ($1, $2) \
                 ON CONFLICT DO NOTHING",
                follower_id,
                followee_id,
            ),
        };
        let result = sqlx::query(sql)
            .bind(a)
            .bind(b)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(result.rows_affected() == 1)
    }

    async fn disconnect(&self, edge: &Edge) -> Result<bool, StoreError> {
        let (sql, a, b) = match *edge {
            Edge::Like { user_id, blog_id } => (
                "DELETE FROM likes WHERE user_id = $1 AND blog_id = $2",
                user_id,
                blog_id,
            ),
            Edge::Follow {
                follower_id,
                followee_id,
            } => (
                "DELETE FROM follows WHERE follower_id = $1 AND followee_id = $2",
                follower_id,
                followee_id,
            ),
        };
        let result = sqlx::query(sql)
            .bind(a)
            .bind(b)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(result.rows_affected() > 0)
    }

    async fn likes_of_blog(&self, blog_id: Uuid) -> Result<Vec<Like>, StoreError> {
        sqlx::query_as::<_, Like>(
            "SELECT user_id, blog_id FROM likes WHERE blog_id = $1 ORDER BY created_at",
        )
        .bind(blog_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn followers_of(&self, user_id: Uuid) -> Result<Vec<Uuid>, StoreError> {
        sqlx::query_scalar::<_, Uuid>(
            "SELECT follower_id FROM follows WHERE followee_id = $1 ORDER BY created_at",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn following_of(&self, user_id: Uuid) -> Result<Vec<Uuid>, StoreError> {
        sqlx::query_scalar::<_, Uuid>(
            "SELECT followee_id FROM follows WHERE follower_id = $1 ORDER BY created_at",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }
}
