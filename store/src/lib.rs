//! SQLite-backed persistence for Rhyno pre-booking records.
//!
//! This crate owns the `prebookings` table. All reads and writes go
//! through [`BookingStore`]; no other component touches the schema.
//!
//! # Example
//!
//! ```no_run
//! use rhyno_store::{BookingStore, NewBooking};
//! use sqlx::sqlite::SqlitePoolOptions;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = SqlitePoolOptions::new()
//!     .max_connections(1)
//!     .connect("sqlite::memory:")
//!     .await?;
//! let store = BookingStore::new(pool);
//! store.migrate().await?;
//!
//! let id = store
//!     .create(NewBooking {
//!         customer_name: "Jane Doe".to_string(),
//!         customer_email: "jane@example.com".to_string(),
//!         customer_state: None,
//!         se03lite_qty: 0,
//!         se03_qty: 2,
//!         se03max_qty: 0,
//!     })
//!     .await?;
//! # let _ = id;
//! # Ok(())
//! # }
//! ```

pub mod error;

pub use error::{Result, StoreError};

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

/// A persisted pre-booking record.
///
/// Created exactly once by the booking workflow, never updated, and
/// deleted only through an explicit admin delete.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct BookingRecord {
    /// Store-assigned sequential id. Unique, immutable, never reused.
    pub id: i64,
    /// Customer name. Non-empty, enforced by the booking workflow.
    pub customer_name: String,
    /// Customer email. Non-empty; format is not validated.
    pub customer_email: String,
    /// Customer state/region, if supplied.
    pub customer_state: Option<String>,
    /// SE03 Lite quantity.
    pub se03lite_qty: i64,
    /// SE03 quantity.
    pub se03_qty: i64,
    /// SE03 Max quantity.
    pub se03max_qty: i64,
    /// Creation timestamp, set when the record was persisted.
    pub created_at: DateTime<Utc>,
}

/// Fields of a booking about to be persisted.
///
/// The id and creation timestamp are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewBooking {
    /// Customer name.
    pub customer_name: String,
    /// Customer email.
    pub customer_email: String,
    /// Customer state/region, if supplied.
    pub customer_state: Option<String>,
    /// SE03 Lite quantity.
    pub se03lite_qty: i64,
    /// SE03 quantity.
    pub se03_qty: i64,
    /// SE03 Max quantity.
    pub se03max_qty: i64,
}

/// SQLite-backed booking record store.
///
/// Cheap to clone; the connection pool is shared.
#[derive(Debug, Clone)]
pub struct BookingStore {
    /// SQLite connection pool.
    pool: SqlitePool,
}

impl BookingStore {
    /// Create a store over an existing connection pool.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Apply the embedded schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Migration`] if a migration fails.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Insert a new booking record and return its assigned id.
    ///
    /// The creation timestamp is set here, at persist time.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the insert fails.
    pub async fn create(&self, booking: NewBooking) -> Result<i64> {
        let created_at = Utc::now();

        let result = sqlx::query(
            r"
            INSERT INTO prebookings
                (customer_name, customer_email, customer_state,
                 se03lite_qty, se03_qty, se03max_qty, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(&booking.customer_name)
        .bind(&booking.customer_email)
        .bind(&booking.customer_state)
        .bind(booking.se03lite_qty)
        .bind(booking.se03_qty)
        .bind(booking.se03max_qty)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        tracing::debug!(booking_id = id, "Booking record persisted");
        Ok(id)
    }

    /// Total number of booking records.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the query fails.
    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM prebookings")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// The most recent bookings, newest first.
    ///
    /// Ties on `created_at` break by id descending, which matches
    /// insertion order for monotonically increasing ids.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the query fails.
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<BookingRecord>> {
        let records = sqlx::query_as::<_, BookingRecord>(
            r"
            SELECT id, customer_name, customer_email, customer_state,
                   se03lite_qty, se03_qty, se03max_qty, created_at
            FROM prebookings
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            ",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    /// All bookings, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the query fails.
    pub async fn list_all(&self) -> Result<Vec<BookingRecord>> {
        let records = sqlx::query_as::<_, BookingRecord>(
            r"
            SELECT id, customer_name, customer_email, customer_state,
                   se03lite_qty, se03_qty, se03max_qty, created_at
            FROM prebookings
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    /// Fetch a single booking by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the query fails.
    pub async fn get(&self, id: i64) -> Result<Option<BookingRecord>> {
        let record = sqlx::query_as::<_, BookingRecord>(
            r"
            SELECT id, customer_name, customer_email, customer_state,
                   se03lite_qty, se03_qty, se03max_qty, created_at
            FROM prebookings
            WHERE id = ?
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    /// Permanently delete a booking.
    ///
    /// Returns `false` when no record with that id exists. Deleting
    /// the same id twice reports not-found on the second attempt
    /// rather than an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the delete fails.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM prebookings WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::debug!(booking_id = id, "Booking record deleted");
        }
        Ok(deleted)
    }
}
