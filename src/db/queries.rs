use chrono::Utc;
use rusqlite::{params, Connection};

use crate::error::Result;
use crate::models::{License, LicenseStatus, NewLicense};

use super::from_row::{query_one, LICENSE_COLS};

fn now() -> i64 {
    Utc::now().timestamp()
}

/// Insert a new license. The unique constraint on license_key surfaces a
/// duplicate explicit key as a database error.
pub fn create_license(conn: &Connection, input: &NewLicense) -> Result<License> {
    let created_at = now();

    conn.execute(
        "INSERT INTO licenses (license_key, user_email, product, purchase_type, status, machine_id, created_at, expires_at)
         VALUES (?1, ?2, ?3, ?4, 'active', NULL, ?5, ?6)",
        params![
            &input.license_key,
            &input.user_email,
            &input.product,
            input.purchase_type.as_str(),
            created_at,
            input.expires_at,
        ],
    )?;

    Ok(License {
        license_key: input.license_key.clone(),
        user_email: input.user_email.clone(),
        product: input.product.clone(),
        purchase_type: input.purchase_type,
        status: LicenseStatus::Active,
        machine_id: None,
        created_at,
        expires_at: input.expires_at,
    })
}

/// Look up a license by exact (license_key, product). A key verified against
/// the wrong product is indistinguishable from a missing key.
pub fn get_license(conn: &Connection, license_key: &str, product: &str) -> Result<Option<License>> {
    query_one(
        conn,
        &format!(
            "SELECT {} FROM licenses WHERE license_key = ?1 AND product = ?2",
            LICENSE_COLS
        ),
        &[&license_key, &product],
    )
}

/// Flip an active license to expired. Returns whether a row changed.
pub fn mark_expired(conn: &Connection, license_key: &str, product: &str) -> Result<bool> {
    let affected = conn.execute(
        "UPDATE licenses SET status = 'expired'
         WHERE license_key = ?1 AND product = ?2 AND status = 'active'",
        params![license_key, product],
    )?;
    Ok(affected > 0)
}

/// Bind a machine to an unbound license in a single conditional update.
///
/// Returns true if this call performed the bind. False means the license was
/// already bound (possibly by a concurrent request that won the race); the
/// caller must re-read and compare.
pub fn bind_machine_if_absent(
    conn: &Connection,
    license_key: &str,
    product: &str,
    machine_id: &str,
) -> Result<bool> {
    let affected = conn.execute(
        "UPDATE licenses SET machine_id = ?1
         WHERE license_key = ?2 AND product = ?3 AND machine_id IS NULL",
        params![machine_id, license_key, product],
    )?;
    Ok(affected > 0)
}
