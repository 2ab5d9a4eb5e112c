//! Integration tests for the SQLite booking store.

use rhyno_store::{BookingStore, NewBooking};
use sqlx::sqlite::SqlitePoolOptions;

async fn test_store() -> BookingStore {
    // A single connection keeps every query on the same in-memory DB.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite");

    let store = BookingStore::new(pool);
    store.migrate().await.expect("Migration failed");
    store
}

fn booking(name: &str, email: &str, se03_qty: i64) -> NewBooking {
    NewBooking {
        customer_name: name.to_string(),
        customer_email: email.to_string(),
        customer_state: None,
        se03lite_qty: 0,
        se03_qty,
        se03max_qty: 0,
    }
}

#[tokio::test]
async fn create_assigns_sequential_ids_and_defaults() {
    let store = test_store().await;

    let first = store
        .create(NewBooking {
            customer_name: "Jane Doe".to_string(),
            customer_email: "jane@x.com".to_string(),
            customer_state: Some("Gujarat".to_string()),
            se03lite_qty: 0,
            se03_qty: 2,
            se03max_qty: 0,
        })
        .await
        .expect("create failed");
    let second = store
        .create(booking("John Roe", "john@x.com", 1))
        .await
        .expect("create failed");

    assert!(second > first);

    let record = store
        .get(first)
        .await
        .expect("get failed")
        .expect("record missing");
    assert_eq!(record.customer_name, "Jane Doe");
    assert_eq!(record.customer_email, "jane@x.com");
    assert_eq!(record.customer_state.as_deref(), Some("Gujarat"));
    assert_eq!(record.se03lite_qty, 0);
    assert_eq!(record.se03_qty, 2);
    assert_eq!(record.se03max_qty, 0);
}

#[tokio::test]
async fn count_tracks_inserts_and_deletes() {
    let store = test_store().await;
    assert_eq!(store.count().await.expect("count failed"), 0);

    let id = store
        .create(booking("A", "a@x.com", 1))
        .await
        .expect("create failed");
    store
        .create(booking("B", "b@x.com", 1))
        .await
        .expect("create failed");
    assert_eq!(store.count().await.expect("count failed"), 2);

    assert!(store.delete(id).await.expect("delete failed"));
    assert_eq!(store.count().await.expect("count failed"), 1);
}

#[tokio::test]
async fn list_recent_orders_newest_first() {
    let store = test_store().await;
    for i in 0..4 {
        store
            .create(booking(&format!("Customer {i}"), "c@x.com", i))
            .await
            .expect("create failed");
    }

    let recent = store.list_recent(3).await.expect("list_recent failed");
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0].customer_name, "Customer 3");
    assert_eq!(recent[1].customer_name, "Customer 2");
    assert_eq!(recent[2].customer_name, "Customer 1");

    // Timestamps never increase as we walk the list; id breaks ties.
    for pair in recent.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
        assert!(pair[0].id > pair[1].id);
    }
}

#[tokio::test]
async fn list_recent_is_prefix_of_longer_listing() {
    let store = test_store().await;
    for i in 0..5 {
        store
            .create(booking(&format!("Customer {i}"), "c@x.com", 0))
            .await
            .expect("create failed");
    }

    let three = store.list_recent(3).await.expect("list_recent failed");
    let four = store.list_recent(4).await.expect("list_recent failed");
    assert_eq!(three.as_slice(), &four[..3]);

    let all = store.list_all().await.expect("list_all failed");
    assert_eq!(all.len(), 5);
    assert_eq!(four.as_slice(), &all[..4]);
}

#[tokio::test]
async fn list_recent_returns_at_most_limit() {
    let store = test_store().await;
    store
        .create(booking("Only", "o@x.com", 0))
        .await
        .expect("create failed");

    let recent = store.list_recent(5).await.expect("list_recent failed");
    assert_eq!(recent.len(), 1);
}

#[tokio::test]
async fn delete_is_idempotent_in_effect() {
    let store = test_store().await;
    let id = store
        .create(booking("Gone", "g@x.com", 0))
        .await
        .expect("create failed");

    assert!(store.delete(id).await.expect("delete failed"));
    assert!(!store.delete(id).await.expect("second delete failed"));
    assert!(store.get(id).await.expect("get failed").is_none());
}

#[tokio::test]
async fn delete_of_unknown_id_reports_not_found() {
    let store = test_store().await;
    assert!(!store.delete(999).await.expect("delete failed"));
    assert_eq!(store.count().await.expect("count failed"), 0);
}
