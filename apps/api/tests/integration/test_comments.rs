use super::helpers::{expect_error, expect_status, read_json, spawn_app, spawn_app_with};
use axum::http::StatusCode;
use blog_api::{config::Config, domain::policy::rules::CommentDeletePolicy};
use serde_json::{Value, json};
use uuid::Uuid;

async fn comments_on(t: &super::helpers::TestApp, blog: &str) -> Vec<Value> {
    let res = t
        .call("GET", &format!("/api/v1/blogs/{}/comments", blog), None)
        .await;
    let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    body["comments"].as_array().expect("comments array").clone()
}

#[tokio::test]
async fn tree_stops_at_the_grandchild() {
    let t = spawn_app().await;
    let alice = t.register("alice").await;
    let blog = t.create_blog(&alice, "Thread").await;
    let root = t.comment(&alice, &blog, "root", None).await;
    let child = t.comment(&alice, &blog, "child", Some(&root)).await;
    let grandchild = t.comment(&alice, &blog, "grandchild", Some(&child)).await;
    let great = t.comment(&alice, &blog, "great-grandchild", Some(&grandchild)).await;

    let comments = comments_on(&t, &blog).await;

    let top: Vec<&str> = comments.iter().map(|c| c["id"].as_str().unwrap()).collect();
    assert_eq!(top, vec![root.as_str(), child.as_str(), grandchild.as_str(), great.as_str()]);

    let loaded = &comments[0]["children"][0]["children"][0];
    assert_eq!(loaded["id"], grandchild.as_str());
    assert_eq!(loaded["commentBody"], "grandchild");
    assert_eq!(loaded["parent_id"], child.as_str());
    assert_eq!(loaded["children"], json!([]));
}

#[tokio::test]
async fn parent_must_exist_on_the_same_blog() {
    let t = spawn_app().await;
    let alice = t.register("alice").await;
    let first = t.create_blog(&alice, "One").await;
    let second = t.create_blog(&alice, "Two").await;
    let elsewhere = t.comment(&alice, &first, "over here", None).await;
    let uri = format!("/api/v1/blogs/{}/comments", second);

    let res = t
        .call(
            "POST",
            &uri,
            Some(json!({ "comment": "reply", "userId": alice.id, "parent_id": elsewhere })),
        )
        .await;
    let error = expect_error(res, StatusCode::BAD_REQUEST).await;
    assert_eq!(error["field"], "parent_id");

    let res = t
        .call(
            "POST",
            &uri,
            Some(json!({ "comment": "reply", "userId": alice.id, "parent_id": Uuid::now_v7() })),
        )
        .await;
    let error = expect_error(res, StatusCode::NOT_FOUND).await;
    assert_eq!(error["field"], "parent_id");

    assert!(comments_on(&t, &second).await.is_empty());
}

#[tokio::test]
async fn comment_on_missing_blog_is_not_found() {
    let t = spawn_app().await;
    let alice = t.register("alice").await;

    let res = t
        .call(
            "POST",
            &format!("/api/v1/blogs/{}/comments", Uuid::now_v7()),
            Some(json!({ "comment": "hello", "userId": alice.id })),
        )
        .await;
    let error = expect_error(res, StatusCode::NOT_FOUND).await;
    assert_eq!(error, json!({ "field": "blogId", "message": "Blog not found" }));

    let res = t
        .call("GET", &format!("/api/v1/blogs/{}/comments", Uuid::now_v7()), None)
        .await;
    expect_error(res, StatusCode::NOT_FOUND).await;
}

#[tokio::test]
async fn only_the_author_edits_a_comment() {
    let t = spawn_app().await;
    let alice = t.register("alice").await;
    let bob = t.register("bob").await;
    let blog = t.create_blog(&alice, "Post").await;
    let comment = t.comment(&alice, &blog, "original", None).await;
    let uri = format!("/api/v1/comments/{}", comment);

    let res = t
        .call("PUT", &uri, Some(json!({ "comment": "edited", "userId": bob.id })))
        .await;
    expect_error(res, StatusCode::FORBIDDEN).await;

    let res = t.call("DELETE", &uri, Some(json!({ "userId": bob.id }))).await;
    expect_error(res, StatusCode::FORBIDDEN).await;

    assert_eq!(comments_on(&t, &blog).await[0]["commentBody"], "original");

    let res = t
        .call("PUT", &uri, Some(json!({ "comment": "edited", "userId": alice.id })))
        .await;
    let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(body["comment"]["commentBody"], "edited");
    assert_eq!(body["comment"]["blogId"], blog.as_str());

    let res = t
        .call("PUT", &uri, Some(json!({ "comment": " ", "userId": alice.id })))
        .await;
    let error = expect_error(res, StatusCode::BAD_REQUEST).await;
    assert_eq!(error["field"], "comment");
}

#[tokio::test]
async fn deleting_a_comment_removes_its_replies() {
    let t = spawn_app().await;
    let alice = t.register("alice").await;
    let blog = t.create_blog(&alice, "Post").await;
    let root = t.comment(&alice, &blog, "root", None).await;
    t.comment(&alice, &blog, "reply", Some(&root)).await;

    let res = t
        .call(
            "DELETE",
            &format!("/api/v1/comments/{}", root),
            Some(json!({ "userId": alice.id })),
        )
        .await;
    let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(body["deleted"], true);

    assert!(comments_on(&t, &blog).await.is_empty());
}

#[tokio::test]
async fn promote_policy_reattaches_replies() {
    let t = spawn_app_with(Config {
        comment_delete_policy: CommentDeletePolicy::Promote,
        ..Config::default()
    })
    .await;
    let alice = t.register("alice").await;
    let blog = t.create_blog(&alice, "Post").await;
    let root = t.comment(&alice, &blog, "root", None).await;
    let middle = t.comment(&alice, &blog, "middle", Some(&root)).await;
    let leaf = t.comment(&alice, &blog, "leaf", Some(&middle)).await;

    let res = t
        .call(
            "DELETE",
            &format!("/api/v1/comments/{}", middle),
            Some(json!({ "userId": alice.id })),
        )
        .await;
    expect_status(res, StatusCode::OK).await;

    let comments = comments_on(&t, &blog).await;
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["children"][0]["id"], leaf.as_str());
    assert_eq!(comments[1]["parent_id"], root.as_str());
}

#[tokio::test]
async fn restrict_policy_keeps_comments_with_replies() {
    let t = spawn_app_with(Config {
        comment_delete_policy: CommentDeletePolicy::Restrict,
        ..Config::default()
    })
    .await;
    let alice = t.register("alice").await;
    let blog = t.create_blog(&alice, "Post").await;
    let root = t.comment(&alice, &blog, "root", None).await;
    let reply = t.comment(&alice, &blog, "reply", Some(&root)).await;

    let res = t
        .call(
            "DELETE",
            &format!("/api/v1/comments/{}", root),
            Some(json!({ "userId": alice.id })),
        )
        .await;
    expect_error(res, StatusCode::CONFLICT).await;

    let res = t
        .call(
            "DELETE",
            &format!("/api/v1/comments/{}", reply),
            Some(json!({ "userId": alice.id })),
        )
        .await;
    expect_status(res, StatusCode::OK).await;
}

#[tokio::test]
async fn comments_of_a_user_include_their_replies() {
    let t = spawn_app().await;
    let alice = t.register("alice").await;
    let bob = t.register("bob").await;
    let blog = t.create_blog(&alice, "Post").await;
    let question = t.comment(&bob, &blog, "question", None).await;
    let answer = t.comment(&alice, &blog, "answer", Some(&question)).await;

    let res = t
        .call("GET", &format!("/api/v1/users/{}/comments", bob.id), None)
        .await;
    let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    let comments = body["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["id"], question.as_str());
    assert_eq!(comments[0]["children"][0]["id"], answer.as_str());

    let res = t
        .call("GET", &format!("/api/v1/users/{}/comments", Uuid::now_v7()), None)
        .await;
    let error = expect_error(res, StatusCode::NOT_FOUND).await;
    assert_eq!(error["field"], "userId");
}
