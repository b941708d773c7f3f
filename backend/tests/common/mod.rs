//! Shared harness for the HTTP integration tests: an in-memory SQLite
//! state, mail-capturing senders, and request helpers built on
//! `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use accounts_backend::config::Config;
use accounts_backend::database::models::{NewUser, User, UserPatch};
use accounts_backend::errors::{ServiceError, ServiceResult};
use accounts_backend::repositories::{SqliteUserRepository, UserStore};
use accounts_backend::services::{Mail, MailSender};
use accounts_backend::{AppState, app};
use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Captures outgoing mail so tests can read tokens and passwords out of
/// it.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<Mail>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<Mail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailSender for RecordingMailer {
    async fn send(&self, mail: Mail) -> ServiceResult<()> {
        self.sent.lock().unwrap().push(mail);
        Ok(())
    }
}

/// Always fails, for asserting that flows survive delivery errors.
pub struct FailingMailer;

#[async_trait]
impl MailSender for FailingMailer {
    async fn send(&self, _mail: Mail) -> ServiceResult<()> {
        Err(ServiceError::internal("smtp unreachable"))
    }
}

/// A store whose every call fails, for asserting how flows degrade
/// when the database is unreachable.
pub struct FailingStore;

#[async_trait]
impl UserStore for FailingStore {
    async fn insert(&self, _new_user: NewUser) -> anyhow::Result<User> {
        Err(anyhow::anyhow!("store offline"))
    }
    async fn find_by_id(&self, _id: &str) -> anyhow::Result<Option<User>> {
        Err(anyhow::anyhow!("store offline"))
    }
    async fn find_by_email(&self, _email: &str) -> anyhow::Result<Option<User>> {
        Err(anyhow::anyhow!("store offline"))
    }
    async fn find_by_invitation_token(&self, _token: &str) -> anyhow::Result<Option<User>> {
        Err(anyhow::anyhow!("store offline"))
    }
    async fn list(&self) -> anyhow::Result<Vec<User>> {
        Err(anyhow::anyhow!("store offline"))
    }
    async fn email_exists_excluding(
        &self,
        _email: &str,
        _exclude_user_id: &str,
    ) -> anyhow::Result<bool> {
        Err(anyhow::anyhow!("store offline"))
    }
    async fn update(&self, _id: &str, _patch: UserPatch) -> anyhow::Result<Option<User>> {
        Err(anyhow::anyhow!("store offline"))
    }
    async fn delete(&self, _id: &str) -> anyhow::Result<bool> {
        Err(anyhow::anyhow!("store offline"))
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        max_connections: 1,
        acquire_timeout_seconds: 3,
        jwt_secret: "integration-test-secret".to_string(),
        jwt_expires_in_seconds: 3600,
        // minimum bcrypt cost, keeps the suite quick
        bcrypt_cost: 4,
        server_port: 0,
        confirm_base_url: "http://localhost:4000".to_string(),
        frontend_url: "http://localhost:3000".to_string(),
        email: None,
    }
}

/// Builds an app over a fresh in-memory database and the given mailer.
pub async fn test_app(mailer: Arc<dyn MailSender>) -> Router {
    // one connection keeps the in-memory database alive
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");

    let state = AppState::from_parts(
        Arc::new(SqliteUserRepository::new(pool)),
        mailer,
        test_config(),
    );
    app(state)
}

/// Builds an app over an explicit store, bypassing SQLite entirely.
pub fn test_app_with_store(store: Arc<dyn UserStore>, mailer: Arc<dyn MailSender>) -> Router {
    app(AppState::from_parts(store, mailer, test_config()))
}

/// Sends a request and returns the status plus the parsed JSON body
/// (`Value::Null` when the body is empty).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let response = raw_send(app, method, uri, token, body).await;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, json)
}

pub async fn raw_send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> axum::response::Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.expect("request")
}

/// Sends a body-less request with a raw `Authorization` header value.
pub async fn send_with_auth_header(
    app: &Router,
    method: &str,
    uri: &str,
    auth_header: &str,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, auth_header)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.expect("request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, json)
}

/// Registers an account, follows the confirmation link, and returns
/// `(user_id, session_token)`.
pub async fn register_and_confirm(
    app: &Router,
    email: &str,
    password: &str,
    permission: &str,
) -> (String, String) {
    let (status, body) = send(
        app,
        "POST",
        "/register",
        None,
        Some(serde_json::json!({
            "email": email,
            "password": password,
            "permission": permission,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");

    let user_id = body["id"].as_str().expect("user id").to_string();
    let invitation_token = body["invitationToken"]
        .as_str()
        .expect("invitation token")
        .to_string();

    let response = raw_send(app, "GET", &format!("/confirm/{invitation_token}"), None, None).await;
    assert!(response.status().is_redirection(), "confirm did not redirect");
    let location = response
        .headers()
        .get(header::LOCATION)
        .expect("redirect location")
        .to_str()
        .unwrap();
    let session_token = location
        .split("token=")
        .nth(1)
        .expect("token in redirect")
        .to_string();

    (user_id, session_token)
}
