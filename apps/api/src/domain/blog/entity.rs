use crate::domain::{
    shared::{errors::DomainError, validation::into_domain_error},
    social::{comment::Comment, like::Like},
    user::entity::UserProfile,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub body: String,
    pub tags: Vec<String>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The editable part of a blog. Tags keep the order they were given in.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct BlogContent {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub description: String,
    pub body: String,
    pub tags: Vec<String>,
}

impl BlogContent {
    pub fn new(
        title: String,
        description: String,
        body: String,
        tags: Vec<String>,
    ) -> Result<Self, DomainError> {
        let content = Self {
            title: title.trim().to_string(),
            description,
            body,
            tags,
        };
        content
            .validate()
            .map_err(|e| into_domain_error(e, "title"))?;
        Ok(content)
    }
}

#[derive(Debug, Clone)]
pub struct NewBlog {
    pub content: BlogContent,
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BlogDetail {
    #[serde(flatten)]
    pub blog: Blog,
    pub user: Option<UserProfile>,
    pub comments: Vec<Comment>,
    pub likes: Vec<Like>,
}
