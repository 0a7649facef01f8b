use super::helpers::{TestApp, expect_error, expect_status, read_json, spawn_app_with};
use axum::http::StatusCode;
use blog_api::config::{ActorIdentity, Config};
use serde_json::{Value, json};

async fn session_app() -> TestApp {
    spawn_app_with(Config {
        actor_identity: ActorIdentity::Session,
        jwt_secret: Some("integration-secret".into()),
        ..Config::default()
    })
    .await
}

fn blog_body(user_id: &str) -> Value {
    json!({ "title": "Mine", "description": "", "body": "", "userId": user_id })
}

#[tokio::test]
async fn register_and_login_issue_tokens() {
    let t = session_app().await;
    let alice = t.register("alice").await;
    assert!(alice.token.is_some());

    let res = t
        .call(
            "POST",
            "/api/v1/auth/login",
            Some(json!({ "text": "alice", "password": super::helpers::PASSWORD })),
        )
        .await;
    let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert!(body["token"].as_str().is_some());
}

#[tokio::test]
async fn mutations_require_the_actors_own_session() {
    let t = session_app().await;
    let alice = t.register("alice").await;
    let bob = t.register("bob").await;

    let res = t.call("POST", "/api/v1/blogs", Some(blog_body(&alice.id))).await;
    let error = expect_error(res, StatusCode::FORBIDDEN).await;
    assert_eq!(error["field"], "authorization");

    let res = t
        .call_as("POST", "/api/v1/blogs", Some(blog_body(&alice.id)), bob.token.as_deref())
        .await;
    let error = expect_error(res, StatusCode::FORBIDDEN).await;
    assert_eq!(error["field"], "userId");

    let res = t
        .call_as("POST", "/api/v1/blogs", Some(blog_body(&alice.id)), alice.token.as_deref())
        .await;
    expect_status(res, StatusCode::OK).await;

    let res = t
        .call_as(
            "DELETE",
            &format!("/api/v1/users/{}", alice.id),
            None,
            bob.token.as_deref(),
        )
        .await;
    expect_error(res, StatusCode::FORBIDDEN).await;
}

#[tokio::test]
async fn password_change_requires_a_matching_session() {
    let t = session_app().await;
    let alice = t.register("alice").await;
    let bob = t.register("bob").await;
    let body = json!({ "text": "alice", "newPassword": "another-secret" });

    let res = t
        .call_as("POST", "/api/v1/auth/change-password", Some(body.clone()), bob.token.as_deref())
        .await;
    expect_error(res, StatusCode::FORBIDDEN).await;

    let res = t
        .call_as("POST", "/api/v1/auth/change-password", Some(body), alice.token.as_deref())
        .await;
    expect_status(res, StatusCode::OK).await;
}

#[tokio::test]
async fn reads_stay_public() {
    let t = session_app().await;
    let alice = t.register("alice").await;
    let blog = t.create_blog(&alice, "Public").await;

    let res = t.call("GET", &format!("/api/v1/blogs/{}", blog), None).await;
    expect_status(res, StatusCode::OK).await;

    let res = t.call("GET", "/health", None).await;
    let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(body["store"], "memory");
}
