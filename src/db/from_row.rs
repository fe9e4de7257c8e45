//! Row mapping trait and helpers for reducing boilerplate in queries.

use rusqlite::{Connection, OptionalExtension, Row, ToSql};

use crate::models::{License, LicenseStatus, PurchaseType};

/// Parse a string column into an enum type, converting parse errors to
/// rusqlite errors instead of panicking on unexpected stored values.
fn parse_enum<T: std::str::FromStr>(row: &Row, col: usize, col_name: &str) -> rusqlite::Result<T> {
    row.get::<_, String>(col)?.parse::<T>().map_err(|_| {
        rusqlite::Error::InvalidColumnType(col, col_name.to_string(), rusqlite::types::Type::Text)
    })
}

/// Trait for constructing a type from a database row.
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> rusqlite::Result<Self>;
}

/// Query for a single optional result.
pub fn query_one<T: FromRow>(
    conn: &Connection,
    sql: &str,
    params: &[&dyn ToSql],
) -> crate::error::Result<Option<T>> {
    conn.query_row(sql, params, T::from_row)
        .optional()
        .map_err(Into::into)
}

pub const LICENSE_COLS: &str =
    "license_key, user_email, product, purchase_type, status, machine_id, created_at, expires_at";

impl FromRow for License {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(License {
            license_key: row.get(0)?,
            user_email: row.get(1)?,
            product: row.get(2)?,
            purchase_type: parse_enum::<PurchaseType>(row, 3, "purchase_type")?,
            status: parse_enum::<LicenseStatus>(row, 4, "status")?,
            machine_id: row.get(5)?,
            created_at: row.get(6)?,
            expires_at: row.get(7)?,
        })
    }
}
