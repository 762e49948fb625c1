#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use bookstore::{config::AuthConfig, db, rest, AppState};
use jsonwebtoken::Algorithm;
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret";

pub fn auth_config() -> AuthConfig {
    AuthConfig {
        signing_secret: TEST_SECRET.to_string(),
        signing_algorithm: Algorithm::HS256,
        token_ttl_minutes: 30,
    }
}

/// A router backed by a fresh in-memory database.
pub async fn test_app() -> (Router, AppState) {
    // One connection: every sqlite::memory: connection is its own database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    db::migrate(&pool).await.unwrap();

    let state = AppState::new(pool, &auth_config());
    (rest::router(state.clone()), state)
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

pub async fn insert_seller(
    state: &AppState,
    first_name: &str,
    last_name: &str,
    email: &str,
    password: &str,
) -> i64 {
    let password_hash = state.credentials.hash(password).unwrap();
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO sellers (first_name, last_name, email, password_hash) VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(first_name)
    .bind(last_name)
    .bind(email)
    .bind(password_hash)
    .fetch_one(&state.db)
    .await
    .unwrap()
}

pub async fn insert_book(
    state: &AppState,
    seller_id: i64,
    title: &str,
    author: &str,
    year: i64,
    count_pages: i64,
) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO books (title, author, year, count_pages, seller_id) VALUES (?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(title)
    .bind(author)
    .bind(year)
    .bind(count_pages)
    .bind(seller_id)
    .fetch_one(&state.db)
    .await
    .unwrap()
}
