//! PostgreSQL reservation store implementation.
//!
//! Rows live in one `reservations` table; the unique index on `number` is
//! the final arbiter of reservation-number uniqueness, and a violation of it
//! surfaces as [`StoreError::DuplicateReservationNumber`] so the service can
//! run its regenerate-and-retry cycle.
//!
//! Queries use the runtime API (`sqlx::query` + `try_get`) rather than the
//! compile-time macros, so building this crate needs no `DATABASE_URL`.
//!
//! # Example
//!
//! ```no_run
//! use retiro_booking::stores::PostgresReservationStore;
//! use sqlx::PgPool;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = PgPool::connect("postgresql://localhost/retiro").await?;
//! let store = PostgresReservationStore::new(pool);
//! store.migrate().await?;
//! # Ok(())
//! # }
//! ```

use crate::providers::{ReservationStore, StoreError};
use chrono::{DateTime, NaiveDate, Utc};
use retiro_core::types::{
    AddOn, EmergencyContact, GuestDetails, Money, PaymentMethod, Reservation, ReservationId,
    ReservationNumber, ReservationStatus, RetreatId, RoomType,
};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

const RESERVATION_COLUMNS: &str = "id, number, retreat_id, retreat_title, first_name, last_name, \
     email, phone, birth_date, nationality, emergency_contact_name, emergency_contact_phone, \
     dietary, medical, motivation, room_type, add_ons, payment_method, total_cents, status, \
     newsletter_opt_in, created_at, updated_at";

/// PostgreSQL reservation store.
#[derive(Clone)]
pub struct PostgresReservationStore {
    /// PostgreSQL connection pool.
    pool: PgPool,
}

impl PostgresReservationStore {
    /// Create a new PostgreSQL reservation store.
    ///
    /// # Arguments
    ///
    /// * `pool` - PostgreSQL connection pool
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run database migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] if migrations fail.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(format!("migration failed: {e}")))?;
        Ok(())
    }
}

impl ReservationStore for PostgresReservationStore {
    async fn insert(&self, reservation: &Reservation) -> Result<Reservation, StoreError> {
        let total_cents = i64::try_from(reservation.total.cents())
            .map_err(|_| StoreError::Backend("total exceeds BIGINT range".to_string()))?;
        let add_ons: Vec<String> = reservation
            .add_ons
            .iter()
            .map(|a| a.as_str().to_string())
            .collect();

        sqlx::query(
            "INSERT INTO reservations \
                 (id, number, retreat_id, retreat_title, first_name, last_name, email, phone, \
                  birth_date, nationality, emergency_contact_name, emergency_contact_phone, \
                  dietary, medical, motivation, room_type, add_ons, payment_method, total_cents, \
                  status, newsletter_opt_in, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, \
                     $18, $19, $20, $21, $22, $23)",
        )
        .bind(reservation.id.as_uuid())
        .bind(reservation.number.as_str())
        .bind(reservation.retreat_id.as_uuid())
        .bind(&reservation.retreat_title)
        .bind(&reservation.guest.first_name)
        .bind(&reservation.guest.last_name)
        .bind(&reservation.guest.email)
        .bind(&reservation.guest.phone)
        .bind(reservation.guest.birth_date)
        .bind(&reservation.guest.nationality)
        .bind(&reservation.emergency_contact.name)
        .bind(&reservation.emergency_contact.phone)
        .bind(reservation.dietary.as_deref())
        .bind(reservation.medical.as_deref())
        .bind(&reservation.motivation)
        .bind(reservation.room_type.as_str())
        .bind(add_ons)
        .bind(reservation.payment_method.as_str())
        .bind(total_cents)
        .bind(reservation.status.as_str())
        .bind(reservation.newsletter_opt_in)
        .bind(reservation.created_at)
        .bind(reservation.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(reservation.clone())
    }

    async fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>, StoreError> {
        let row = sqlx::query(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(format!("failed to fetch reservation: {e}")))?;

        row.as_ref().map(reservation_from_row).transpose()
    }

    async fn update_status(
        &self,
        id: ReservationId,
        expected: ReservationStatus,
        next: ReservationStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Reservation>, StoreError> {
        let row = sqlx::query(&format!(
            "UPDATE reservations \
             SET status = $3, updated_at = $4 \
             WHERE id = $1 AND status = $2 \
             RETURNING {RESERVATION_COLUMNS}"
        ))
        .bind(id.as_uuid())
        .bind(expected.as_str())
        .bind(next.as_str())
        .bind(updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(format!("failed to update reservation: {e}")))?;

        row.as_ref().map(reservation_from_row).transpose()
    }

    async fn reservation_number_exists(
        &self,
        number: &ReservationNumber,
    ) -> Result<bool, StoreError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM reservations WHERE number = $1)")
            .bind(number.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(format!("failed to check number: {e}")))?;

        row.try_get::<bool, _>(0)
            .map_err(|e| StoreError::Backend(format!("failed to read existence flag: {e}")))
    }
}

/// Map an insert error, routing the number-uniqueness violation to its own
/// variant so the service can retry.
fn map_insert_error(e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return StoreError::DuplicateReservationNumber;
        }
    }
    StoreError::Backend(format!("failed to insert reservation: {e}"))
}

fn reservation_from_row(row: &PgRow) -> Result<Reservation, StoreError> {
    let room_type: String = get(row, "room_type")?;
    let room_type = RoomType::parse(&room_type)
        .ok_or_else(|| StoreError::Backend(format!("corrupt room type `{room_type}`")))?;

    let payment_method: String = get(row, "payment_method")?;
    let payment_method = PaymentMethod::parse(&payment_method)
        .ok_or_else(|| StoreError::Backend(format!("corrupt payment method `{payment_method}`")))?;

    let status: String = get(row, "status")?;
    let status = ReservationStatus::parse(&status)
        .ok_or_else(|| StoreError::Backend(format!("corrupt status `{status}`")))?;

    let add_on_ids: Vec<String> = get(row, "add_ons")?;
    let mut add_ons = Vec::with_capacity(add_on_ids.len());
    for id in &add_on_ids {
        add_ons.push(
            AddOn::parse(id)
                .ok_or_else(|| StoreError::Backend(format!("corrupt add-on `{id}`")))?,
        );
    }

    let total_cents: i64 = get(row, "total_cents")?;
    let total = u64::try_from(total_cents)
        .map(Money::from_cents)
        .map_err(|_| StoreError::Backend(format!("negative total {total_cents}")))?;

    let birth_date: NaiveDate = get(row, "birth_date")?;

    Ok(Reservation {
        id: ReservationId::from_uuid(get::<Uuid>(row, "id")?),
        number: ReservationNumber::new(get(row, "number")?),
        retreat_id: RetreatId::from_uuid(get::<Uuid>(row, "retreat_id")?),
        retreat_title: get(row, "retreat_title")?,
        guest: GuestDetails {
            first_name: get(row, "first_name")?,
            last_name: get(row, "last_name")?,
            email: get(row, "email")?,
            phone: get(row, "phone")?,
            birth_date,
            nationality: get(row, "nationality")?,
        },
        emergency_contact: EmergencyContact {
            name: get(row, "emergency_contact_name")?,
            phone: get(row, "emergency_contact_phone")?,
        },
        room_type,
        dietary: get(row, "dietary")?,
        medical: get(row, "medical")?,
        motivation: get(row, "motivation")?,
        add_ons,
        payment_method,
        total,
        status,
        newsletter_opt_in: get(row, "newsletter_opt_in")?,
        created_at: get(row, "created_at")?,
        updated_at: get(row, "updated_at")?,
    })
}

/// Read one column, mapping decode failures onto [`StoreError::Backend`].
fn get<'r, T>(row: &'r PgRow, column: &str) -> Result<T, StoreError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(column)
        .map_err(|e| StoreError::Backend(format!("failed to decode `{column}`: {e}")))
}
