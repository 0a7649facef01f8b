use crate::{
    application::{
        comments::dto::{DeleteCommentRequest, UpdateCommentRequest},
        envelope::{CommentResponse, DeleteResponse},
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
use uuid::Uuid;

type Reply<T> = Result<(StatusCode, Json<T>), AppError>;

pub async fn update_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<UpdateCommentRequest>, JsonRejection>,
) -> Reply<CommentResponse> {
    let Path(id) = path?;
    let Json(mut request) = body?;
    request.user_id = resolve_actor(&headers, &state.config, request.user_id, "userId")?;
    Ok(envelope_response(
        state.facade.comments.update_comment(id, request).await,
    ))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<DeleteCommentRequest>, JsonRejection>,
) -> Reply<DeleteResponse> {
    let Path(id) = path?;
    let Json(mut request) = body?;
    request.user_id = resolve_actor(&headers, &state.config, request.user_id, "userId")?;
    Ok(envelope_response(
        state.facade.comments.delete_comment(id, request).await,
    ))
}
