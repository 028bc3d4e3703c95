//! Request/response DTOs for review endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AppointmentId, ReviewId};

/// Body for `POST /api/reviews`.
#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub appointment_id: AppointmentId,
    pub score: i32,
    pub comment: Option<String>,
    #[serde(default)]
    pub anonymous: bool,
}

/// Response for a created review.
#[derive(Debug, Serialize)]
pub struct CreateReviewResponse {
    pub review_id: ReviewId,
}
