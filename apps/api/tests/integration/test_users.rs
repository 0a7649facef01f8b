use super::helpers::{PASSWORD, expect_error, expect_status, read_json, spawn_app, spawn_app_with};
use axum::http::StatusCode;
use blog_api::{
    config::Config,
    domain::policy::rules::{CascadePolicy, DuplicateFollowPolicy, SelfFollowPolicy},
};
use serde_json::{Value, json};
use uuid::Uuid;

#[tokio::test]
async fn registration_checks_password_first() {
    let t = spawn_app().await;

    let res = t
        .call(
            "POST",
            "/api/v1/auth/register",
            Some(json!({ "username": "x", "email": "x@example.com", "password": "ab" })),
        )
        .await;
    let error = expect_error(res, StatusCode::BAD_REQUEST).await;
    assert_eq!(error["field"], "password");
}

#[tokio::test]
async fn registration_hides_the_digest_and_rejects_duplicates() {
    let t = spawn_app().await;

    let res = t
        .call(
            "POST",
            "/api/v1/auth/register",
            Some(json!({ "username": "alice", "email": "alice@example.com", "password": PASSWORD })),
        )
        .await;
    let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(body["error"], Value::Null);
    assert_eq!(body["user"]["username"], "alice");
    assert!(body["user"].get("passwordHash").is_none());
    assert!(body.get("token").is_none());

    let res = t
        .call(
            "POST",
            "/api/v1/auth/register",
            Some(json!({ "username": "alice", "email": "other@example.com", "password": PASSWORD })),
        )
        .await;
    let error = expect_error(res, StatusCode::CONFLICT).await;
    assert_eq!(error["field"], "username");
}

#[tokio::test]
async fn login_picks_lookup_field_from_text() {
    let t = spawn_app().await;
    let alice = t.register("alice").await;

    for text in [alice.username.as_str(), alice.email.as_str()] {
        let res = t
            .call(
                "POST",
                "/api/v1/auth/login",
                Some(json!({ "text": text, "password": PASSWORD })),
            )
            .await;
        let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;
        assert_eq!(body["user"]["id"], alice.id.as_str());
    }

    let res = t
        .call(
            "POST",
            "/api/v1/auth/login",
            Some(json!({ "text": "nobody@example.com", "password": PASSWORD })),
        )
        .await;
    let error = expect_error(res, StatusCode::NOT_FOUND).await;
    assert_eq!(error["field"], "email");

    let res = t
        .call(
            "POST",
            "/api/v1/auth/login",
            Some(json!({ "text": "nobody", "password": PASSWORD })),
        )
        .await;
    let error = expect_error(res, StatusCode::NOT_FOUND).await;
    assert_eq!(error["field"], "username");

    let res = t
        .call(
            "POST",
            "/api/v1/auth/login",
            Some(json!({ "text": "alice", "password": "wrong-password" })),
        )
        .await;
    let error = expect_error(res, StatusCode::FORBIDDEN).await;
    assert_eq!(error, json!({ "field": "password", "message": "Incorrect password" }));
}

#[tokio::test]
async fn changed_password_replaces_the_old_one() {
    let t = spawn_app().await;
    t.register("alice").await;

    let res = t
        .call(
            "POST",
            "/api/v1/auth/change-password",
            Some(json!({ "text": "alice", "newPassword": "abc" })),
        )
        .await;
    let error = expect_error(res, StatusCode::BAD_REQUEST).await;
    assert_eq!(error["field"], "newPassword");

    let res = t
        .call(
            "POST",
            "/api/v1/auth/change-password",
            Some(json!({ "text": "alice@example.com", "newPassword": "brand-new-secret" })),
        )
        .await;
    expect_status(res, StatusCode::OK).await;

    let res = t
        .call(
            "POST",
            "/api/v1/auth/login",
            Some(json!({ "text": "alice", "password": PASSWORD })),
        )
        .await;
    expect_error(res, StatusCode::FORBIDDEN).await;

    let res = t
        .call(
            "POST",
            "/api/v1/auth/login",
            Some(json!({ "text": "alice", "password": "brand-new-secret" })),
        )
        .await;
    expect_status(res, StatusCode::OK).await;
}

#[tokio::test]
async fn follow_and_unfollow_are_directional_and_idempotent() {
    let t = spawn_app().await;
    let alice = t.register("alice").await;
    let bob = t.register("bob").await;
    let follow = format!("/api/v1/users/{}/follow", bob.id);

    for _ in 0..2 {
        let res = t.call("POST", &follow, Some(json!({ "followerId": alice.id }))).await;
        let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;
        assert_eq!(body["user"]["id"], alice.id.as_str());
        let following = body["user"]["following"].as_array().unwrap();
        assert_eq!(following.len(), 1);
        assert_eq!(following[0]["id"], bob.id.as_str());
    }

    let res = t.call("GET", &format!("/api/v1/users/{}", bob.id), None).await;
    let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(body["user"]["followers"][0]["username"], "alice");
    assert_eq!(body["user"]["following"], json!([]));

    let res = t
        .call(
            "POST",
            &format!("/api/v1/users/{}/unfollow", bob.id),
            Some(json!({ "followerId": alice.id })),
        )
        .await;
    let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(body["user"]["following"], json!([]));
}

#[tokio::test]
async fn follow_reports_which_user_is_missing() {
    let t = spawn_app().await;
    let alice = t.register("alice").await;

    let res = t
        .call(
            "POST",
            &format!("/api/v1/users/{}/follow", Uuid::now_v7()),
            Some(json!({ "followerId": alice.id })),
        )
        .await;
    let error = expect_error(res, StatusCode::NOT_FOUND).await;
    assert_eq!(error["field"], "userId");

    let res = t
        .call(
            "POST",
            &format!("/api/v1/users/{}/follow", alice.id),
            Some(json!({ "followerId": Uuid::now_v7() })),
        )
        .await;
    let error = expect_error(res, StatusCode::NOT_FOUND).await;
    assert_eq!(error, json!({ "field": "followerId", "message": "Follower not found" }));
}

#[tokio::test]
async fn strict_follow_rules_are_enforced() {
    let t = spawn_app_with(Config {
        self_follow: SelfFollowPolicy::Reject,
        duplicate_follow: DuplicateFollowPolicy::Reject,
        ..Config::default()
    })
    .await;
    let alice = t.register("alice").await;
    let bob = t.register("bob").await;

    let res = t
        .call(
            "POST",
            &format!("/api/v1/users/{}/follow", alice.id),
            Some(json!({ "followerId": alice.id })),
        )
        .await;
    expect_error(res, StatusCode::BAD_REQUEST).await;

    let follow = format!("/api/v1/users/{}/follow", bob.id);
    let res = t.call("POST", &follow, Some(json!({ "followerId": alice.id }))).await;
    expect_status(res, StatusCode::OK).await;
    let res = t.call("POST", &follow, Some(json!({ "followerId": alice.id }))).await;
    expect_error(res, StatusCode::CONFLICT).await;
}

#[tokio::test]
async fn deleting_a_user_takes_their_content_along() {
    let t = spawn_app().await;
    let alice = t.register("alice").await;
    let bob = t.register("bob").await;
    let blog = t.create_blog(&alice, "Soon gone").await;
    t.comment(&bob, &blog, "nice", None).await;
    let uri = format!("/api/v1/users/{}", alice.id);

    let res = t.call("DELETE", &uri, None).await;
    let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(body["deleted"], true);

    let res = t.call("GET", "/api/v1/blogs", None).await;
    let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(body["blogs"], json!([]));

    let res = t
        .call("GET", &format!("/api/v1/users/{}/comments", bob.id), None)
        .await;
    let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(body["comments"], json!([]));

    let res = t.call("DELETE", &uri, None).await;
    let error = expect_error(res, StatusCode::NOT_FOUND).await;
    assert_eq!(error["field"], "userId");
}

#[tokio::test]
async fn restrict_policy_keeps_users_with_content() {
    let t = spawn_app_with(Config {
        user_delete_policy: CascadePolicy::Restrict,
        ..Config::default()
    })
    .await;
    let alice = t.register("alice").await;
    let bob = t.register("bob").await;
    t.create_blog(&alice, "Keeps me here").await;

    let res = t
        .call("DELETE", &format!("/api/v1/users/{}", alice.id), None)
        .await;
    expect_error(res, StatusCode::CONFLICT).await;

    let res = t.call("DELETE", &format!("/api/v1/users/{}", bob.id), None).await;
    expect_status(res, StatusCode::OK).await;
}

#[tokio::test]
async fn image_upload_sets_the_profile_image() {
    let t = spawn_app().await;
    let alice = t.register("alice").await;
    let uri = format!("/api/v1/users/{}/image", alice.id);

    let res = t
        .call("PUT", &uri, Some(json!({ "image": "https://cdn.example.com/a.png" })))
        .await;
    let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(body["user"]["image"], "https://cdn.example.com/a.png");

    let res = t.call("PUT", &uri, Some(json!({ "image": "  " }))).await;
    let error = expect_error(res, StatusCode::BAD_REQUEST).await;
    assert_eq!(error["field"], "image");

    let res = t
        .call(
            "PUT",
            &format!("/api/v1/users/{}/image", Uuid::now_v7()),
            Some(json!({ "image": "x.png" })),
        )
        .await;
    expect_error(res, StatusCode::NOT_FOUND).await;
}

#[tokio::test]
async fn user_listing_includes_blogs() {
    let t = spawn_app().await;
    let alice = t.register("alice").await;
    t.register("bob").await;
    t.create_blog(&alice, "Hello").await;

    let res = t.call("GET", "/api/v1/users", None).await;
    let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    let users = body["users"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["blogs"][0]["title"], "Hello");
    assert_eq!(users[1]["blogs"], json!([]));

    let res = t.call("GET", "/api/v1/users/not-a-uuid", None).await;
    let error = expect_error(res, StatusCode::BAD_REQUEST).await;
    assert_eq!(error["field"], "id");
}
