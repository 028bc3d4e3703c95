//! PostgreSQL implementation of AppointmentReader.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::appointment::AppointmentStatus;
use crate::domain::foundation::{AppointmentId, DomainError, Timestamp, UserId};
use crate::ports::{AppointmentReader, AppointmentView, ListScope};

use super::{db_error, parse_modality, parse_status, parse_user_uuid, user_id_from_uuid};

/// PostgreSQL implementation of the AppointmentReader port.
pub struct PostgresAppointmentReader {
    pool: PgPool,
}

impl PostgresAppointmentReader {
    /// Creates a new PostgresAppointmentReader with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row for the denormalized listing query.
#[derive(Debug, sqlx::FromRow)]
struct AppointmentViewRow {
    id: Uuid,
    starts_at: DateTime<Utc>,
    duration_min: i32,
    modality: String,
    status: String,
    subject: Option<String>,
    meeting_link: Option<String>,
    provider_notes: Option<String>,
    client_id: Uuid,
    client_name: String,
    provider_id: Uuid,
    provider_name: String,
    has_review: bool,
}

impl TryFrom<AppointmentViewRow> for AppointmentView {
    type Error = DomainError;

    fn try_from(row: AppointmentViewRow) -> Result<Self, Self::Error> {
        Ok(AppointmentView {
            id: AppointmentId::from_uuid(row.id),
            starts_at: Timestamp::from_datetime(row.starts_at),
            duration_min: row.duration_min as u32,
            modality: parse_modality(&row.modality)?,
            status: parse_status(&row.status)?,
            subject: row.subject,
            meeting_link: row.meeting_link,
            provider_notes: row.provider_notes,
            client_id: user_id_from_uuid(row.client_id)?,
            client_name: row.client_name,
            provider_id: user_id_from_uuid(row.provider_id)?,
            provider_name: row.provider_name,
            has_review: row.has_review,
        })
    }
}

#[async_trait]
impl AppointmentReader for PostgresAppointmentReader {
    async fn list(
        &self,
        scope: &ListScope,
        status: Option<AppointmentStatus>,
    ) -> Result<Vec<AppointmentView>, DomainError> {
        let (client_filter, provider_filter) = match scope {
            ListScope::Client(id) => (Some(parse_user_uuid(id)?), None),
            ListScope::Provider(id) => (None, Some(parse_user_uuid(id)?)),
            ListScope::All => (None, None),
        };

        let rows: Vec<AppointmentViewRow> = sqlx::query_as(
            r#"
            SELECT a.id, a.starts_at, a.duration_min, a.modality, a.status,
                   a.subject, a.meeting_link, a.provider_notes,
                   a.client_id, c.name AS client_name,
                   a.provider_id, p.name AS provider_name,
                   EXISTS (
                       SELECT 1 FROM reviews r WHERE r.appointment_id = a.id
                   ) AS has_review
            FROM appointments a
            JOIN users c ON a.client_id = c.id
            JOIN users p ON a.provider_id = p.id
            WHERE ($1::uuid IS NULL OR a.client_id = $1)
              AND ($2::uuid IS NULL OR a.provider_id = $2)
              AND ($3::text IS NULL OR a.status = $3)
            ORDER BY a.starts_at DESC
            "#,
        )
        .bind(client_filter)
        .bind(provider_filter)
        .bind(status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list appointments", e))?;

        rows.into_iter().map(AppointmentView::try_from).collect()
    }
}
