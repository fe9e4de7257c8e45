//! Test utilities and fixtures for license-server integration tests

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use serde_json::Value;
use tower::ServiceExt;

pub use license_server::db::{init_db, queries, AppState};
pub use license_server::handlers;
pub use license_server::models::*;

/// Create app state backed by an in-memory database.
///
/// The pool is capped at one connection so every request observes the same
/// in-memory database. Scope direct `state.db.get()` borrows so they are
/// released before driving requests through the router.
pub fn create_test_app_state() -> AppState {
    let manager = SqliteConnectionManager::memory();
    let pool = Pool::builder().max_size(1).build(manager).unwrap();
    {
        let conn = pool.get().unwrap();
        init_db(&conn).unwrap();
    }
    AppState { db: pool }
}

/// Create a Router with all endpoints wired to the given state.
pub fn test_app(state: AppState) -> Router {
    handlers::router().with_state(state)
}

/// Create a standalone in-memory database for query-level tests.
pub fn setup_test_db() -> Connection {
    let conn = Connection::open_in_memory().expect("Failed to create in-memory database");
    init_db(&conn).expect("Failed to initialize schema");
    conn
}

/// Insert a license directly, bypassing the HTTP layer.
pub fn insert_test_license(
    conn: &Connection,
    key: &str,
    product: &str,
    purchase_type: PurchaseType,
    expires_at: Option<i64>,
) -> License {
    let input = NewLicense {
        license_key: key.to_string(),
        user_email: "buyer@example.com".to_string(),
        product: product.to_string(),
        purchase_type,
        expires_at,
    };
    queries::create_license(conn, &input).expect("Failed to create test license")
}

/// POST a JSON body and return (status, parsed JSON body).
pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).expect("Response should be valid JSON");
    (status, json)
}

pub fn now_ts() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

pub fn past_timestamp(days: i64) -> i64 {
    now_ts() - days * 86400
}

pub fn future_timestamp(days: i64) -> i64 {
    now_ts() + days * 86400
}
