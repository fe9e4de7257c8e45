mod licenses;
mod verify;

pub use licenses::*;
pub use verify::*;

use axum::{
    routing::{get, post},
    Router,
};

use crate::db::AppState;

async fn root() -> &'static str {
    "License Server is running!"
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/api/licenses", post(issue_license))
        .route("/api/license/verify", post(verify_license))
}
