//! Translation of PostgreSQL failures into [`StoreError`].
//!
//! Classification uses the SQLSTATE code and the violated constraint's name,
//! both of which the schema in `migrations/` fixes.

use crate::domain::shared::errors::StoreError;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

pub fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::RowNotFound = err {
        return StoreError::NotFound;
    }
    if let sqlx::Error::Database(db_err) = &err {
        let field = constraint_field(db_err.constraint()).to_string();
        match db_err.code().as_deref() {
            Some(UNIQUE_VIOLATION) => return StoreError::UniqueViolation { field },
            Some(FOREIGN_KEY_VIOLATION) => return StoreError::MissingReference { field },
            _ => {}
        }
    }
    tracing::error!(database_error = %err);
    StoreError::Backend(err.to_string())
}

/// API field name for a schema constraint.
pub fn constraint_field(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some("users_username_key") => "username",
        Some("users_email_key") => "email",
        Some("blogs_user_id_fkey")
        | Some("comments_user_id_fkey")
        | Some("likes_user_id_fkey")
        | Some("follows_followee_id_fkey") => "userId",
        Some("comments_blog_id_fkey") | Some("likes_blog_id_fkey") | Some("likes_pkey") => {
            "blogId"
        }
        Some("comments_parent_id_fkey") => "parent_id",
        Some("follows_follower_id_fkey") | Some("follows_pkey") => "followerId",
        _ => "id",
    }
}
