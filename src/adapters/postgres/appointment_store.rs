//! PostgreSQL implementation of AppointmentStore.
//!
//! Creation serializes the overlap check and the insert per provider with
//! a transaction-scoped advisory lock; the schema's exclusion constraint
//! on (provider_id, time range) backs the same invariant at the database
//! level. Notifications ride in the same transaction as the mutation that
//! produced them.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::appointment::Appointment;
use crate::domain::availability::OccupiedInterval;
use crate::domain::foundation::{AppointmentId, DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::notification::Notification;
use crate::ports::AppointmentStore;

use super::{db_error, parse_modality, parse_status, parse_user_uuid, user_id_from_uuid};

/// PostgreSQL implementation of the AppointmentStore port.
pub struct PostgresAppointmentStore {
    pool: PgPool,
}

impl PostgresAppointmentStore {
    /// Creates a new PostgresAppointmentStore with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Advisory lock key derived from the provider id. One lock per provider
/// serializes concurrent creations against the same calendar.
fn provider_lock_key(provider: &Uuid) -> i64 {
    let bytes: [u8; 8] = provider.as_bytes()[..8].try_into().unwrap();
    i64::from_be_bytes(bytes)
}

/// Database row representation of an appointment.
#[derive(Debug, sqlx::FromRow)]
struct AppointmentRow {
    id: Uuid,
    client_id: Uuid,
    provider_id: Uuid,
    starts_at: DateTime<Utc>,
    duration_min: i32,
    subject: Option<String>,
    modality: String,
    status: String,
    meeting_link: Option<String>,
    provider_notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AppointmentRow> for Appointment {
    type Error = DomainError;

    fn try_from(row: AppointmentRow) -> Result<Self, Self::Error> {
        Ok(Appointment {
            id: AppointmentId::from_uuid(row.id),
            client_id: user_id_from_uuid(row.client_id)?,
            provider_id: user_id_from_uuid(row.provider_id)?,
            starts_at: Timestamp::from_datetime(row.starts_at),
            duration_min: row.duration_min as u32,
            subject: row.subject,
            modality: parse_modality(&row.modality)?,
            status: parse_status(&row.status)?,
            meeting_link: row.meeting_link,
            provider_notes: row.provider_notes,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

async fn insert_notifications(
    tx: &mut Transaction<'_, Postgres>,
    notifications: &[Notification],
) -> Result<(), DomainError> {
    for notification in notifications {
        let recipient = parse_user_uuid(&notification.recipient_id)?;
        sqlx::query(
            r#"
            INSERT INTO notifications (id, recipient_id, title, message, kind, reference_link, read, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(notification.id.as_uuid())
        .bind(recipient)
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(notification.kind.as_str())
        .bind(&notification.reference_link)
        .bind(notification.read)
        .bind(notification.created_at.as_datetime())
        .execute(&mut **tx)
        .await
        .map_err(|e| db_error("Failed to insert notification", e))?;
    }
    Ok(())
}

#[async_trait]
impl AppointmentStore for PostgresAppointmentStore {
    async fn create(
        &self,
        appointment: &Appointment,
        notifications: &[Notification],
    ) -> Result<(), DomainError> {
        let client_uuid = parse_user_uuid(&appointment.client_id)?;
        let provider_uuid = parse_user_uuid(&appointment.provider_id)?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        // Held until commit/rollback; serializes check + insert per provider.
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(provider_lock_key(&provider_uuid))
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to acquire provider lock", e))?;

        let conflict: Option<Uuid> = sqlx::query_scalar(
            r#"
            SELECT id FROM appointments
            WHERE provider_id = $1
              AND status IN ('SOLICITADO', 'CONFIRMADO')
              AND tstzrange(starts_at, starts_at + make_interval(mins => duration_min)) &&
                  tstzrange($2, $2 + make_interval(mins => $3))
            LIMIT 1
            "#,
        )
        .bind(provider_uuid)
        .bind(appointment.starts_at.as_datetime())
        .bind(appointment.duration_min as i32)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to check availability", e))?;

        if conflict.is_some() {
            return Err(DomainError::new(
                ErrorCode::SlotUnavailable,
                "Time range overlaps an existing booking",
            ));
        }

        sqlx::query(
            r#"
            INSERT INTO appointments (
                id, client_id, provider_id, starts_at, duration_min, subject,
                modality, status, meeting_link, provider_notes, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(appointment.id.as_uuid())
        .bind(client_uuid)
        .bind(provider_uuid)
        .bind(appointment.starts_at.as_datetime())
        .bind(appointment.duration_min as i32)
        .bind(&appointment.subject)
        .bind(appointment.modality.as_str())
        .bind(appointment.status.as_str())
        .bind(&appointment.meeting_link)
        .bind(&appointment.provider_notes)
        .bind(appointment.created_at.as_datetime())
        .bind(appointment.updated_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("appointments_no_overlap") {
                    return DomainError::new(
                        ErrorCode::SlotUnavailable,
                        "Time range overlaps an existing booking",
                    );
                }
            }
            db_error("Failed to insert appointment", e)
        })?;

        insert_notifications(&mut tx, notifications).await?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit appointment creation", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &AppointmentId) -> Result<Option<Appointment>, DomainError> {
        let row: Option<AppointmentRow> = sqlx::query_as(
            r#"
            SELECT id, client_id, provider_id, starts_at, duration_min, subject,
                   modality, status, meeting_link, provider_notes, created_at, updated_at
            FROM appointments
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load appointment", e))?;

        row.map(Appointment::try_from).transpose()
    }

    async fn update(
        &self,
        appointment: &Appointment,
        notifications: &[Notification],
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        let result = sqlx::query(
            r#"
            UPDATE appointments SET
                status = $2,
                meeting_link = $3,
                provider_notes = $4,
                starts_at = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(appointment.id.as_uuid())
        .bind(appointment.status.as_str())
        .bind(&appointment.meeting_link)
        .bind(&appointment.provider_notes)
        .bind(appointment.starts_at.as_datetime())
        .bind(appointment.updated_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to update appointment", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::AppointmentNotFound,
                "Appointment not found",
            ));
        }

        insert_notifications(&mut tx, notifications).await?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit appointment update", e))?;

        Ok(())
    }

    async fn occupied_on(
        &self,
        provider_id: &UserId,
        date: NaiveDate,
    ) -> Result<Vec<OccupiedInterval>, DomainError> {
        let provider_uuid = parse_user_uuid(provider_id)?;
        let day_start = date.and_hms_opt(0, 0, 0).unwrap().and_utc();
        let day_end = day_start + chrono::Duration::days(1);

        let rows: Vec<(DateTime<Utc>, i32)> = sqlx::query_as(
            r#"
            SELECT starts_at, duration_min
            FROM appointments
            WHERE provider_id = $1
              AND starts_at >= $2
              AND starts_at < $3
              AND status IN ('SOLICITADO', 'CONFIRMADO')
            "#,
        )
        .bind(provider_uuid)
        .bind(day_start)
        .bind(day_end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load bookings", e))?;

        Ok(rows
            .into_iter()
            .map(|(starts_at, duration_min)| {
                OccupiedInterval::new(Timestamp::from_datetime(starts_at), duration_min as u32)
            })
            .collect())
    }
}
