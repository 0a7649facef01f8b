pub mod in_memory_store;
pub mod sqlx_blog_repository;
pub mod sqlx_social_repository;
pub mod sqlx_user_repository;

use crate::domain::shared::store::Store;
use sqlx::PgPool;
use std::sync::Arc;

pub use in_memory_store::InMemoryStore;
pub use sqlx_blog_repository::SqlxBlogRepository;
pub use sqlx_social_repository::{SqlxCommentRepository, SqlxEdgeRepository};
pub use sqlx_user_repository::SqlxUserRepository;

/// Entity Store backed by Postgres, one repository per aggregate sharing the pool.
pub fn postgres_store(pool: PgPool) -> Store {
    Store {
        users: Arc::new(SqlxUserRepository::new(pool.clone())),
        blogs: Arc::new(SqlxBlogRepository::new(pool.clone())),
        comments: Arc::new(SqlxCommentRepository::new(pool.clone())),
        edges: Arc::new(SqlxEdgeRepository::new(pool)),
    }
}
