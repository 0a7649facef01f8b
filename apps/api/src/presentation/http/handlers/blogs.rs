use crate::{
    application::{
        blogs::dto::{BlogInput, DeleteBlogRequest, ToggleLikeRequest},
        comments::dto::CreateCommentRequest,
        envelope::{
            BlogDetailResponse, BlogResponse, BlogsResponse, CommentResponse, CommentsResponse,
            DeleteResponse, LikeResponse,
        },
    },
    presentation::http::{
        errors::{AppError, envelope_response},
        middleware::session::resolve_actor,
        state::AppState,
    },
};
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{HeaderMap, StatusCode},
};
use serde::Deserialize;
use uuid::Uuid;

type Reply<T> = Result<(StatusCode, Json<T>), AppError>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeBody {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCommentBody {
    pub comment: String,
    pub user_id: Uuid,
    #[serde(rename = "parent_id", default)]
    pub parent_id: Option<Uuid>,
}

pub async fn list_blogs(State(state): State<AppState>) -> Reply<BlogsResponse> {
    Ok(envelope_response(state.facade.blogs.get_all_blogs().await))
}

pub async fn get_blog(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Reply<BlogDetailResponse> {
    let Path(id) = path?;
    Ok(envelope_response(state.facade.blogs.get_blog(id).await))
}

pub async fn create_blog(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<BlogInput>, JsonRejection>,
) -> Reply<BlogResponse> {
    let Json(mut input) = body?;
    input.user_id = resolve_actor(&headers, &state.config, input.user_id, "userId")?;
    Ok(envelope_response(state.facade.blogs.create_blog(input).await))
}

pub async fn update_blog(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<BlogInput>, JsonRejection>,
) -> Reply<BlogResponse> {
    let Path(id) = path?;
    let Json(mut input) = body?;
    input.user_id = resolve_actor(&headers, &state.config, input.user_id, "userId")?;
    Ok(envelope_response(
        state.facade.blogs.update_blog(id, input).await,
    ))
}

pub async fn delete_blog(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<DeleteBlogRequest>, JsonRejection>,
) -> Reply<DeleteResponse> {
    let Path(id) = path?;
    let Json(mut request) = body?;
    request.user_id = resolve_actor(&headers, &state.config, request.user_id, "userId")?;
    Ok(envelope_response(
        state.facade.blogs.delete_blog(id, request).await,
    ))
}

pub async fn toggle_like(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<LikeBody>, JsonRejection>,
) -> Reply<LikeResponse> {
    let Path(blog_id) = path?;
    let Json(body) = body?;
    let user_id = resolve_actor(&headers, &state.config, body.user_id, "userId")?;
    Ok(envelope_response(
        state
            .facade
            .blogs
            .toggle_like(ToggleLikeRequest { blog_id, user_id })
            .await,
    ))
}

pub async fn list_comments(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Reply<CommentsResponse> {
    let Path(blog_id) = path?;
    Ok(envelope_response(
        state.facade.comments.get_comments_on_blog(blog_id).await,
    ))
}

pub async fn create_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<NewCommentBody>, JsonRejection>,
) -> Reply<CommentResponse> {
    let Path(blog_id) = path?;
    let Json(body) = body?;
    let user_id = resolve_actor(&headers, &state.config, body.user_id, "userId")?;
    Ok(envelope_response(
        state
            .facade
            .comments
            .create_comment(CreateCommentRequest {
                blog_id,
                comment: body.comment,
                user_id,
                parent_id: body.parent_id,
            })
            .await,
    ))
}
