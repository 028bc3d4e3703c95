//! PostgreSQL implementation of ReviewStore.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    AppointmentId, DomainError, ErrorCode, ReviewId, Score, Timestamp,
};
use crate::domain::review::Review;
use crate::ports::ReviewStore;

use super::{db_error, parse_user_uuid, user_id_from_uuid};

/// PostgreSQL implementation of the ReviewStore port.
///
/// The unique constraint on appointment_id is the authority on review
/// uniqueness; a concurrent duplicate insert surfaces as AlreadyReviewed.
pub struct PostgresReviewStore {
    pool: PgPool,
}

impl PostgresReviewStore {
    /// Creates a new PostgresReviewStore with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a review.
#[derive(Debug, sqlx::FromRow)]
struct ReviewRow {
    id: Uuid,
    appointment_id: Uuid,
    rater_id: Uuid,
    rated_id: Uuid,
    score: i16,
    comment: Option<String>,
    anonymous: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<ReviewRow> for Review {
    type Error = DomainError;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        let score = Score::try_from_i32(row.score as i32).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid score: {}", e))
        })?;
        Ok(Review {
            id: ReviewId::from_uuid(row.id),
            appointment_id: AppointmentId::from_uuid(row.appointment_id),
            rater_id: user_id_from_uuid(row.rater_id)?,
            rated_id: user_id_from_uuid(row.rated_id)?,
            score,
            comment: row.comment,
            anonymous: row.anonymous,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl ReviewStore for PostgresReviewStore {
    async fn create(&self, review: &Review) -> Result<(), DomainError> {
        let rater_uuid = parse_user_uuid(&review.rater_id)?;
        let rated_uuid = parse_user_uuid(&review.rated_id)?;

        sqlx::query(
            r#"
            INSERT INTO reviews (
                id, appointment_id, rater_id, rated_id, score, comment, anonymous, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(review.id.as_uuid())
        .bind(review.appointment_id.as_uuid())
        .bind(rater_uuid)
        .bind(rated_uuid)
        .bind(review.score.value() as i16)
        .bind(&review.comment)
        .bind(review.anonymous)
        .bind(review.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("reviews_appointment_id_key") {
                    return DomainError::new(
                        ErrorCode::AlreadyReviewed,
                        "Appointment has already been reviewed",
                    );
                }
            }
            db_error("Failed to insert review", e)
        })?;

        Ok(())
    }

    async fn find_by_appointment(
        &self,
        appointment_id: &AppointmentId,
    ) -> Result<Option<Review>, DomainError> {
        let row: Option<ReviewRow> = sqlx::query_as(
            r#"
            SELECT id, appointment_id, rater_id, rated_id, score, comment, anonymous, created_at
            FROM reviews
            WHERE appointment_id = $1
            "#,
        )
        .bind(appointment_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load review", e))?;

        row.map(Review::try_from).transpose()
    }
}
