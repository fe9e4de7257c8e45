use axum::extract::State;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::db::{queries, AppState};
use crate::error::AppError;
use crate::extractors::Json;
use crate::models::{LicenseStatus, PurchaseType};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub license_key: String,
    pub machine_id: String,
    pub product: String,
}

/// Why a verification came back invalid. These are normal domain outcomes,
/// returned with HTTP 200, not transport errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    LicenseNotFound,
    LicenseInactive,
    LicenseExpired,
    MachineMismatch,
}

impl InvalidReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvalidReason::LicenseNotFound => "license_not_found",
            InvalidReason::LicenseInactive => "license_inactive",
            InvalidReason::LicenseExpired => "license_expired",
            InvalidReason::MachineMismatch => "machine_mismatch",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl VerifyResponse {
    fn valid() -> Self {
        Self {
            valid: true,
            reason: None,
            error: None,
        }
    }

    fn invalid(reason: InvalidReason) -> Self {
        Self {
            valid: false,
            reason: Some(reason.as_str()),
            error: None,
        }
    }
}

/// Error wrapper that renders failures in the verify envelope:
/// `{"valid": false, "error": ...}`.
pub struct VerifyError(AppError);

impl<E> From<E> for VerifyError
where
    AppError: From<E>,
{
    fn from(e: E) -> Self {
        VerifyError(AppError::from(e))
    }
}

impl IntoResponse for VerifyError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        let body = VerifyResponse {
            valid: false,
            reason: None,
            error: Some(self.0.public_message()),
        };
        (status, axum::Json(body)).into_response()
    }
}

/// Verify a license key against a machine identifier.
///
/// Checks run in a fixed order: existence, status, subscription expiry,
/// machine binding. An expired status fails the status check as inactive;
/// the dedicated expiry branch is only reachable while the stored status is
/// still active and the date has passed.
pub async fn verify_license(
    State(state): State<AppState>,
    Json(req): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>, VerifyError> {
    let conn = state.db.get()?;

    let license = match queries::get_license(&conn, &req.license_key, &req.product)? {
        Some(l) => l,
        None => return Ok(Json(VerifyResponse::invalid(InvalidReason::LicenseNotFound))),
    };

    if license.status != LicenseStatus::Active {
        return Ok(Json(VerifyResponse::invalid(InvalidReason::LicenseInactive)));
    }

    if license.purchase_type == PurchaseType::Subscription {
        if let Some(expires_at) = license.expires_at {
            if Utc::now().timestamp() > expires_at {
                queries::mark_expired(&conn, &req.license_key, &req.product)?;
                tracing::info!(license_key = %req.license_key, "subscription license expired");
                return Ok(Json(VerifyResponse::invalid(InvalidReason::LicenseExpired)));
            }
        }
    }

    match license.machine_id.as_deref() {
        None => {
            // First activation. The conditional update means two concurrent
            // verifications of an unbound license cannot both bind; the
            // loser re-reads and compares against the committed value.
            let bound = queries::bind_machine_if_absent(
                &conn,
                &req.license_key,
                &req.product,
                &req.machine_id,
            )?;
            if !bound {
                let current = queries::get_license(&conn, &req.license_key, &req.product)?
                    .ok_or_else(|| {
                        AppError::Internal("license disappeared during verification".into())
                    })?;
                if current.machine_id.as_deref() != Some(req.machine_id.as_str()) {
                    return Ok(Json(VerifyResponse::invalid(InvalidReason::MachineMismatch)));
                }
            }
        }
        Some(bound) if bound != req.machine_id => {
            return Ok(Json(VerifyResponse::invalid(InvalidReason::MachineMismatch)));
        }
        Some(_) => {}
    }

    Ok(Json(VerifyResponse::valid()))
}
