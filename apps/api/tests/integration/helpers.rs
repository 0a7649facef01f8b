use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use blog_api::{
    application::DomainFacade,
    config::Config,
    infrastructure::{repositories::InMemoryStore, security::password::BcryptHasher},
    presentation::http::{routes::create_router, state::AppState},
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

pub const PASSWORD: &str = "secret-password";

pub struct TestApp {
    pub app: Router,
}

pub struct TestUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub token: Option<String>,
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(Config::default()).await
}

pub async fn spawn_app_with(config: Config) -> TestApp {
    let store = InMemoryStore::new().into_store();
    let hasher = Arc::new(BcryptHasher::new(4));
    let facade = Arc::new(DomainFacade::new(store, hasher, config.rules()));

    let state = AppState {
        config,
        facade,
        db: None,
    };

    TestApp {
        app: create_router(state),
    }
}

impl TestApp {
    pub async fn call(&self, method: &str, uri: &str, body: Option<Value>) -> axum::response::Response {
        self.call_as(method, uri, body, None).await
    }

    pub async fn call_as(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let req = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("failed to build request");
        send(&self.app, req).await
    }

    pub async fn register(&self, username: &str) -> TestUser {
        let email = format!("{}@example.com", username);
        let res = self
            .call(
                "POST",
                "/api/v1/auth/register",
                Some(json!({ "username": username, "email": email, "password": PASSWORD })),
            )
            .await;
        let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;
        TestUser {
            id: body["user"]["id"].as_str().expect("missing user id").to_string(),
            username: username.to_string(),
            email,
            token: body["token"].as_str().map(String::from),
        }
    }

    pub async fn create_blog(&self, owner: &TestUser, title: &str) -> String {
        let res = self
            .call_as(
                "POST",
                "/api/v1/blogs",
                Some(json!({
                    "title": title,
                    "description": "about things",
                    "body": "words",
                    "tags": ["rust", "axum"],
                    "userId": owner.id,
                })),
                owner.token.as_deref(),
            )
            .await;
        let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;
        body["blog"]["id"].as_str().expect("missing blog id").to_string()
    }

    pub async fn comment(
        &self,
        author: &TestUser,
        blog_id: &str,
        text: &str,
        parent_id: Option<&str>,
    ) -> String {
        let res = self
            .call_as(
                "POST",
                &format!("/api/v1/blogs/{}/comments", blog_id),
                Some(json!({ "comment": text, "userId": author.id, "parent_id": parent_id })),
                author.token.as_deref(),
            )
            .await;
        let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;
        body["comment"]["id"]
            .as_str()
            .expect("missing comment id")
            .to_string()
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> axum::response::Response {
    app.clone().oneshot(req).await.expect("request failed")
}

pub async fn read_json<T: DeserializeOwned>(res: axum::response::Response) -> T {
    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).expect("failed to parse json")
}

pub async fn read_text(res: axum::response::Response) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    String::from_utf8(bytes.to_vec()).expect("invalid utf8")
}

pub async fn expect_status(
    res: axum::response::Response,
    expected: StatusCode,
) -> axum::response::Response {
    let actual = res.status();

    if actual == expected {
        return res;
    }

    let body = read_text(res).await;
    panic!(
        "HTTP status mismatch. Expected {}, got {}. Response body: {}",
        expected, actual, body
    );
}

/// Asserts the status and returns the envelope's `error` object.
pub async fn expect_error(res: axum::response::Response, expected: StatusCode) -> Value {
    let body: Value = read_json(expect_status(res, expected).await).await;
    body["error"].clone()
}
