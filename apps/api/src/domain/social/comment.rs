use crate::domain::shared::{errors::DomainError, validation::into_domain_error};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Comment {
    pub id: Uuid,
    pub comment_body: String,
    pub user_id: Uuid,
    pub blog_id: Uuid,
    /// `None` for a root comment.
    #[serde(rename = "parent_id")]
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct CommentBody {
    #[validate(length(min = 1, message = "Comment cannot be empty"))]
    pub value: String,
}

impl CommentBody {
    pub fn new(value: String) -> Result<Self, DomainError> {
        let body = Self {
            value: value.trim().to_string(),
        };
        body.validate().map_err(|e| into_domain_error(e, "comment"))?;
        Ok(body)
    }
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub blog_id: Uuid,
    pub user_id: Uuid,
    pub body: CommentBody,
    pub parent_id: Option<Uuid>,
}
