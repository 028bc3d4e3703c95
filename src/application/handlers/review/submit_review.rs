//! SubmitReviewHandler - Command handler for post-appointment reviews.

use std::sync::Arc;

use crate::domain::foundation::{AppointmentId, ErrorCode, ReviewId, Score, UserId};
use crate::domain::review::{Review, ReviewError};
use crate::ports::{AppointmentStore, ReviewStore};

/// Command to submit a review for a completed appointment.
#[derive(Debug, Clone)]
pub struct SubmitReviewCommand {
    pub rater_id: UserId,
    pub appointment_id: AppointmentId,
    /// Raw score; validated into [`Score`] before any lookup.
    pub score: i32,
    pub comment: Option<String>,
    pub anonymous: bool,
}

/// Result of a successful review submission.
#[derive(Debug, Clone)]
pub struct SubmitReviewResult {
    pub review_id: ReviewId,
}

/// Handler for review submission.
///
/// Guard order: score range, appointment exists, rater owns it,
/// appointment is REALIZADO, and no prior review. The uniqueness check
/// lives in the store so a concurrent duplicate still conflicts.
pub struct SubmitReviewHandler {
    appointments: Arc<dyn AppointmentStore>,
    reviews: Arc<dyn ReviewStore>,
}

impl SubmitReviewHandler {
    pub fn new(appointments: Arc<dyn AppointmentStore>, reviews: Arc<dyn ReviewStore>) -> Self {
        Self {
            appointments,
            reviews,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitReviewCommand,
    ) -> Result<SubmitReviewResult, ReviewError> {
        let score = Score::try_from_i32(cmd.score)
            .map_err(|e| ReviewError::validation("score", e.to_string()))?;

        let appointment = self
            .appointments
            .find_by_id(&cmd.appointment_id)
            .await
            .map_err(|e| ReviewError::infrastructure(e.to_string()))?
            .ok_or_else(|| ReviewError::appointment_not_found(cmd.appointment_id))?;

        let review = Review::submit(
            &appointment,
            cmd.rater_id,
            score,
            cmd.comment,
            cmd.anonymous,
        )?;

        self.reviews.create(&review).await.map_err(|e| match e.code {
            ErrorCode::AlreadyReviewed => ReviewError::already_reviewed(cmd.appointment_id),
            _ => ReviewError::infrastructure(e.to_string()),
        })?;

        tracing::info!(
            review_id = %review.id,
            appointment_id = %review.appointment_id,
            "review submitted"
        );

        Ok(SubmitReviewResult {
            review_id: review.id,
        })
    }
}
