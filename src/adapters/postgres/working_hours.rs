//! PostgreSQL implementation of WorkingHoursProvider.
//!
//! Reads per-provider schedule configuration. A provider row with no
//! explicit shifts gets the two-shift template; a missing row means the
//! provider is unknown to scheduling.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::availability::{WorkShift, WorkingHours};
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::WorkingHoursProvider;

use super::{db_error, parse_user_uuid};

/// PostgreSQL implementation of the WorkingHoursProvider port.
pub struct PostgresWorkingHours {
    pool: PgPool,
}

impl PostgresWorkingHours {
    /// Creates a new PostgresWorkingHours with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkingHoursProvider for PostgresWorkingHours {
    async fn for_provider(
        &self,
        provider_id: &UserId,
    ) -> Result<Option<WorkingHours>, DomainError> {
        let uuid = match parse_user_uuid(provider_id) {
            Ok(uuid) => uuid,
            Err(_) => return Ok(None),
        };

        let row: Option<(Option<i32>, String)> = sqlx::query_as(
            r#"
            SELECT default_duration_min, shifts::text
            FROM provider_schedules
            WHERE provider_id = $1
            "#,
        )
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load provider schedule", e))?;

        let Some((duration, shifts_json)) = row else {
            return Ok(None);
        };

        let shifts: Vec<WorkShift> = serde_json::from_str(&shifts_json).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid shift configuration: {}", e),
            )
        })?;

        let duration = duration.map(|d| d as u32);
        let hours = if shifts.is_empty() {
            WorkingHours::new(duration, WorkingHours::default_template().shifts().to_vec())
        } else {
            WorkingHours::new(duration, shifts)
        };

        Ok(Some(hours))
    }
}
