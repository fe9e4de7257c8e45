//! Query-level tests against an in-memory database.

mod common;
use common::*;

#[test]
fn test_create_license_sets_defaults() {
    let conn = setup_test_db();
    let license = insert_test_license(&conn, "key-1", "Widget", PurchaseType::OneTime, None);

    assert_eq!(license.status, LicenseStatus::Active);
    assert_eq!(license.machine_id, None);
    assert!(license.created_at > 0);
}

#[test]
fn test_duplicate_key_violates_unique_constraint() {
    let conn = setup_test_db();
    insert_test_license(&conn, "key-1", "Widget", PurchaseType::OneTime, None);

    let input = NewLicense {
        license_key: "key-1".to_string(),
        user_email: "other@example.com".to_string(),
        // Keys are globally unique, even across products
        product: "OtherProduct".to_string(),
        purchase_type: PurchaseType::OneTime,
        expires_at: None,
    };
    assert!(queries::create_license(&conn, &input).is_err());
}

#[test]
fn test_get_license_requires_matching_product() {
    let conn = setup_test_db();
    insert_test_license(&conn, "key-1", "Widget", PurchaseType::OneTime, None);

    assert!(queries::get_license(&conn, "key-1", "Widget").unwrap().is_some());
    assert!(queries::get_license(&conn, "key-1", "Gadget").unwrap().is_none());
    assert!(queries::get_license(&conn, "key-2", "Widget").unwrap().is_none());
}

#[test]
fn test_bind_machine_if_absent_binds_only_once() {
    let conn = setup_test_db();
    insert_test_license(&conn, "key-1", "Widget", PurchaseType::OneTime, None);

    assert!(queries::bind_machine_if_absent(&conn, "key-1", "Widget", "machine-A").unwrap());
    // Second bind attempt loses, regardless of the machine presented
    assert!(!queries::bind_machine_if_absent(&conn, "key-1", "Widget", "machine-B").unwrap());

    let license = queries::get_license(&conn, "key-1", "Widget").unwrap().unwrap();
    assert_eq!(license.machine_id.as_deref(), Some("machine-A"));
}

#[test]
fn test_mark_expired_is_monotone() {
    let conn = setup_test_db();
    insert_test_license(
        &conn,
        "key-1",
        "Widget",
        PurchaseType::Subscription,
        Some(past_timestamp(1)),
    );

    assert!(queries::mark_expired(&conn, "key-1", "Widget").unwrap());
    // Already expired: no row changes, status stays expired
    assert!(!queries::mark_expired(&conn, "key-1", "Widget").unwrap());

    let license = queries::get_license(&conn, "key-1", "Widget").unwrap().unwrap();
    assert_eq!(license.status, LicenseStatus::Expired);
}

#[test]
fn test_mark_expired_does_not_touch_revoked() {
    let conn = setup_test_db();
    insert_test_license(&conn, "key-1", "Widget", PurchaseType::Subscription, None);
    conn.execute(
        "UPDATE licenses SET status = 'revoked' WHERE license_key = 'key-1'",
        [],
    )
    .unwrap();

    assert!(!queries::mark_expired(&conn, "key-1", "Widget").unwrap());

    let license = queries::get_license(&conn, "key-1", "Widget").unwrap().unwrap();
    assert_eq!(license.status, LicenseStatus::Revoked);
}
