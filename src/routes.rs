// src/routes.rs
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::account;
use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/signup", post(account::signup))
        .route("/login", post(account::login))
        .route("/account", get(account::account))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::JsonFileStore;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use std::path::PathBuf;
    use tower::ServiceExt;

    fn router_with_store(path: PathBuf) -> Router {
        create_router(Arc::new(AppState {
            accounts: Arc::new(JsonFileStore::new(path)),
        }))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_signup_then_login() {
        let dir = tempfile::tempdir().unwrap();
        let app = router_with_store(dir.path().join("credentials.json"));

        let (status, body) = send(
            &app,
            Method::POST,
            "/signup",
            Some(r#"{"name":"A","email":"a@b.com","password":"secret1"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true}));

        let (status, body) = send(
            &app,
            Method::POST,
            "/login",
            Some(r#"{"email":"a@b.com","password":"secret1"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true, "name": "A"}));
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_invalid_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let app = router_with_store(dir.path().join("credentials.json"));

        send(
            &app,
            Method::POST,
            "/signup",
            Some(r#"{"name":"A","email":"a@b.com","password":"secret1"}"#),
        )
        .await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/login",
            Some(r#"{"email":"a@b.com","password":"wrong"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"error": "invalid credentials"}));
    }

    #[tokio::test]
    async fn test_login_without_account() {
        let dir = tempfile::tempdir().unwrap();
        let app = router_with_store(dir.path().join("credentials.json"));

        let (status, body) = send(
            &app,
            Method::POST,
            "/login",
            Some(r#"{"email":"a@b.com","password":"secret1"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "no account"}));
    }

    #[tokio::test]
    async fn test_missing_fields_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let app = router_with_store(dir.path().join("credentials.json"));

        for (uri, payload) in [
            ("/signup", Some(r#"{"name":"A","email":"a@b.com"}"#)),
            ("/signup", Some(r#"{"email":"","password":"secret1"}"#)),
            ("/signup", Some("not json")),
            ("/signup", None),
            ("/login", Some(r#"{"email":"a@b.com"}"#)),
            ("/login", Some(r#"{"password":"secret1"}"#)),
        ] {
            let (status, body) = send(&app, Method::POST, uri, payload).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri} {payload:?}");
            assert_eq!(body, json!({"error": "email and password required"}));
        }

        assert!(!dir.path().join("credentials.json").exists());
    }

    #[tokio::test]
    async fn test_account_never_exposes_password() {
        let dir = tempfile::tempdir().unwrap();
        let app = router_with_store(dir.path().join("credentials.json"));

        let (status, body) = send(&app, Method::GET, "/account", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "no account"}));

        for password in ["secret1", "p@ssword with spaces", "\"quoted\""] {
            let signup = json!({"name": "A", "email": "a@b.com", "password": password}).to_string();
            send(&app, Method::POST, "/signup", Some(&signup)).await;

            let (status, body) = send(&app, Method::GET, "/account", None).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, json!({"email": "a@b.com", "name": "A"}));
            assert!(body.get("password").is_none());
        }
    }

    #[tokio::test]
    async fn test_write_failure_is_server_error() {
        let dir = tempfile::tempdir().unwrap();
        let app = router_with_store(dir.path().join("missing").join("credentials.json"));

        let (status, body) = send(
            &app,
            Method::POST,
            "/signup",
            Some(r#"{"email":"a@b.com","password":"secret1"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "write failed"}));
    }

    #[tokio::test]
    async fn test_corrupt_store_is_server_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        std::fs::write(&path, "{broken").unwrap();
        let app = router_with_store(path);

        let (status, body) = send(&app, Method::GET, "/account", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "storage failure"}));
    }
}
