use super::{
    handlers::{blogs, comments, health, users},
    middleware::request_id::request_id_middleware,
    state::AppState,
};
use axum::{
    Router, middleware,
    routing::{get, post, put},
};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/health", get(health::health_check))
        // Auth
        .route("/api/v1/auth/register", post(users::register))
        .route("/api/v1/auth/login", post(users::login))
        .route("/api/v1/auth/change-password", post(users::change_password))
        // Users
        .route("/api/v1/users", get(users::list_users))
        .route(
            "/api/v1/users/{id}",
            get(users::get_user).delete(users::delete_user),
        )
        .route("/api/v1/users/{id}/comments", get(users::get_user_comments))
        .route("/api/v1/users/{id}/follow", post(users::follow_user))
        .route("/api/v1/users/{id}/unfollow", post(users::unfollow_user))
        .route("/api/v1/users/{id}/image", put(users::upload_image))
        // Blogs
        .route(
            "/api/v1/blogs",
            get(blogs::list_blogs).post(blogs::create_blog),
        )
        .route(
            "/api/v1/blogs/{id}",
            get(blogs::get_blog)
                .put(blogs::update_blog)
                .delete(blogs::delete_blog),
        )
        .route("/api/v1/blogs/{id}/like", post(blogs::toggle_like))
        .route(
            "/api/v1/blogs/{id}/comments",
            get(blogs::list_comments).post(blogs::create_comment),
        )
        // Comments
        .route(
            "/api/v1/comments/{id}",
            put(comments::update_comment).delete(comments::delete_comment),
        )
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
