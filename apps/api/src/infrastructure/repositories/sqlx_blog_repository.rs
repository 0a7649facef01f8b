use crate::{
    domain::{
        blog::{
            entity::{Blog, BlogContent, NewBlog},
            repository::BlogRepository,
        },
        shared::errors::StoreError,
    },
    infrastructure::database::errors::map_sqlx_error,
};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

pub struct SqlxBlogRepository {
    pub pool: PgPool,
}

impl SqlxBlogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlogRepository for SqlxBlogRepository {
    async fn create(&self, blog: &NewBlog) -> Result<Blog, StoreError> {
        sqlx::query_as::<_, Blog>(
            "INSERT INTO blogs (id, title, description, body, tags, user_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id, title, description, body, tags, user_id, created_at, updated_at",
        )
        .bind(Uuid::now_v7())
        .bind(&blog.content.title)
        .bind(&blog.content.description)
        .bind(&blog.content.body)
        .bind(&blog.content.tags)
        .bind(blog.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>, StoreError> {
        sqlx::query_as::<_, Blog>(
            "SELECT id, title, description, body, tags, user_id, created_at, updated_at \
             FROM blogs WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn find_all(&self) -> Result<Vec<Blog>, StoreError> {
        sqlx::query_as::<_, Blog>(
            "SELECT id, title, description, body, tags, user_id, created_at, updated_at \
             FROM blogs ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Blog>, StoreError> {
        sqlx::query_as::<_, Blog>(
            "SELECT id, title, description, body, tags, user_id, created_at, updated_at \
             FROM blogs WHERE user_id = $1 ORDER BY created_at, id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn update(&self, id: Uuid, content: &BlogContent) -> Result<Blog, StoreError> {
        sqlx::query_as::<_, Blog>(
            "UPDATE blogs SET title = $2, description = $3, body = $4, tags = $5, \
             updated_at = NOW() WHERE id = $1 \
             RETURNING id, title, description, body, tags, user_id, created_at, updated_at",
        )
        .bind(id)
        .bind(&content.title)
        .bind(&content.description)
        .bind(&content.body)
        .bind(&content.tags)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
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
