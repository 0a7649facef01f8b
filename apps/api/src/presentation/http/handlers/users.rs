use crate::{
    application::{
        envelope::{CommentsResponse, DeleteResponse, UserDetailResponse, UserResponse, UsersResponse},
        users::dto::{
            ChangePasswordRequest, FollowRequest, ImageUploadRequest, LoginRequest,
            RegisterRequest,
        },
    },
    presentation::http::{
        errors::{AppError, envelope_response},
        middleware::session::{issue_token, resolve_actor, resolve_login_text},
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
pub struct FollowBody {
    pub follower_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct ImageBody {
    pub image: String,
}

pub async fn list_users(State(state): State<AppState>) -> Reply<UsersResponse> {
    Ok(envelope_response(state.facade.users.get_all_users().await))
}

pub async fn get_user(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Reply<UserDetailResponse> {
    let Path(id) = path?;
    Ok(envelope_response(state.facade.users.get_user(id).await))
}

pub async fn get_user_comments(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Reply<CommentsResponse> {
    let Path(id) = path?;
    Ok(envelope_response(
        state.facade.comments.get_comments_of_user(id).await,
    ))
}

pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Reply<UserResponse> {
    let Json(body) = body?;
    let response = state.facade.users.register(body).await;
    Ok(envelope_response(with_token(&state, response)?))
}

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Reply<UserResponse> {
    let Json(body) = body?;
    let response = state.facade.users.login(body).await;
    Ok(envelope_response(with_token(&state, response)?))
}

pub async fn change_password(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> Reply<UserResponse> {
    let Json(body) = body?;
    resolve_login_text(&headers, &state.config, &body.text)?;
    Ok(envelope_response(
        state.facade.users.change_password(body).await,
    ))
}

pub async fn follow_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<FollowBody>, JsonRejection>,
) -> Reply<UserDetailResponse> {
    let request = follow_request(&state, &headers, path?, body?)?;
    Ok(envelope_response(state.facade.users.follow_user(request).await))
}

pub async fn unfollow_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<FollowBody>, JsonRejection>,
) -> Reply<UserDetailResponse> {
    let request = follow_request(&state, &headers, path?, body?)?;
    Ok(envelope_response(
        state.facade.users.unfollow_user(request).await,
    ))
}

pub async fn delete_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
) -> Reply<DeleteResponse> {
    let Path(id) = path?;
    let id = resolve_actor(&headers, &state.config, id, "userId")?;
    Ok(envelope_response(state.facade.users.delete_user(id).await))
}

pub async fn upload_image(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<ImageBody>, JsonRejection>,
) -> Reply<UserResponse> {
    let Path(id) = path?;
    let Json(body) = body?;
    let user_id = resolve_actor(&headers, &state.config, id, "userId")?;
    Ok(envelope_response(
        state
            .facade
            .users
            .upload_image(ImageUploadRequest {
                image: body.image,
                user_id,
            })
            .await,
    ))
}

fn follow_request(
    state: &AppState,
    headers: &HeaderMap,
    Path(user_id): Path<Uuid>,
    Json(body): Json<FollowBody>,
) -> Result<FollowRequest, AppError> {
    let follower_id = resolve_actor(headers, &state.config, body.follower_id, "followerId")?;
    Ok(FollowRequest {
        user_id,
        follower_id,
    })
}

/// Attaches a bearer token to a successful login or registration when
/// sessions are enabled.
fn with_token(state: &AppState, mut response: UserResponse) -> Result<UserResponse, AppError> {
    if let (Some(secret), Some(user)) = (state.config.session_secret(), response.user.as_ref()) {
        response.token = Some(issue_token(user, secret, state.config.session_ttl_hours)?);
    }
    Ok(response)
}
