use rusqlite::Connection;

/// Initialize the database schema.
pub fn init_db(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        -- Licenses: one row per issued key
        -- machine_id: NULL until the first successful verification binds it
        CREATE TABLE IF NOT EXISTS licenses (
            license_key TEXT PRIMARY KEY,
            user_email TEXT NOT NULL,
            product TEXT NOT NULL,
            purchase_type TEXT NOT NULL DEFAULT 'one-time' CHECK (purchase_type IN ('one-time', 'subscription')),
            status TEXT NOT NULL DEFAULT 'active' CHECK (status IN ('active', 'expired', 'revoked')),
            machine_id TEXT,
            created_at INTEGER NOT NULL,
            expires_at INTEGER
        );
        CREATE INDEX IF NOT EXISTS idx_licenses_key_product ON licenses(license_key, product);
        "#,
    )?;
    Ok(())
}
