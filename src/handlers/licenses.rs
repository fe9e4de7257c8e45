use axum::extract::State;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::{queries, AppState};
use crate::error::AppError;
use crate::extractors::Json;
use crate::keygen;
use crate::models::{NewLicense, PurchaseType};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueLicenseRequest {
    /// Explicit key; one is generated when absent
    #[serde(default)]
    pub license_key: Option<String>,
    pub user_email: String,
    pub product: String,
    #[serde(default)]
    pub purchase_type: Option<PurchaseType>,
    /// ISO-8601 timestamp; only meaningful for subscriptions
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueLicenseResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Error wrapper that renders failures in the issue envelope:
/// `{"success": false, "error": ...}`.
pub struct IssueError(AppError);

impl<E> From<E> for IssueError
where
    AppError: From<E>,
{
    fn from(e: E) -> Self {
        IssueError(AppError::from(e))
    }
}

impl IntoResponse for IssueError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        let body = IssueLicenseResponse {
            success: false,
            license_key: None,
            error: Some(self.0.public_message()),
        };
        (status, axum::Json(body)).into_response()
    }
}

/// Create a license record. Called by e-commerce webhooks (Shopify, Wix)
/// after a purchase completes.
pub async fn issue_license(
    State(state): State<AppState>,
    Json(req): Json<IssueLicenseRequest>,
) -> Result<Json<IssueLicenseResponse>, IssueError> {
    if req.user_email.trim().is_empty() {
        return Err(AppError::BadRequest("userEmail is required".into()).into());
    }
    if req.product.trim().is_empty() {
        return Err(AppError::BadRequest("product is required".into()).into());
    }

    let license_key = match req.license_key {
        Some(key) if !key.trim().is_empty() => key,
        _ => keygen::generate_license_key(),
    };

    let input = NewLicense {
        license_key,
        user_email: req.user_email,
        product: req.product,
        purchase_type: req.purchase_type.unwrap_or(PurchaseType::OneTime),
        expires_at: req.expires_at.map(|t| t.timestamp()),
    };

    let conn = state.db.get()?;
    let license = queries::create_license(&conn, &input)?;

    tracing::info!(
        license_key = %license.license_key,
        product = %license.product,
        purchase_type = %license.purchase_type,
        "license issued"
    );

    Ok(Json(IssueLicenseResponse {
        success: true,
        license_key: Some(license.license_key),
        error: None,
    }))
}
