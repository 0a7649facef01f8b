use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Fields shared by `createBlog` and `updateBlog`. `user_id` is the acting
/// user: the author on create, the claimed owner on update.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BlogInput {
    pub title: String,
    pub description: String,
    pub body: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DeleteBlogRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ToggleLikeRequest {
    pub blog_id: Uuid,
    pub user_id: Uuid,
}
