//! Review entity.
//!
//! At most one review exists per appointment; the unique constraint is
//! enforced by the review store at insert time. Reviews are immutable
//! once created.

use serde::{Deserialize, Serialize};

use crate::domain::appointment::{Appointment, AppointmentStatus};
use crate::domain::foundation::{AppointmentId, ReviewId, Score, Timestamp, UserId};

use super::ReviewError;

/// A client's rating of a completed appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,

    /// The appointment being reviewed (unique per review).
    pub appointment_id: AppointmentId,

    /// The client who wrote the review.
    pub rater_id: UserId,

    /// The provider being reviewed.
    pub rated_id: UserId,

    pub score: Score,
    pub comment: Option<String>,

    /// When set, the rater's identity is hidden from the provider.
    pub anonymous: bool,

    pub created_at: Timestamp,
}

impl Review {
    /// Creates a review for a completed appointment.
    ///
    /// Guards, in order: the rater must be the appointment's client
    /// (`NotYourAppointment`), and the appointment must be REALIZADO
    /// (`NotCompleted`). Uniqueness per appointment is the store's
    /// responsibility at insert time.
    pub fn submit(
        appointment: &Appointment,
        rater_id: UserId,
        score: Score,
        comment: Option<String>,
        anonymous: bool,
    ) -> Result<Self, ReviewError> {
        if !appointment.is_owned_by_client(&rater_id) {
            return Err(ReviewError::NotYourAppointment);
        }
        if appointment.status != AppointmentStatus::Realizado {
            return Err(ReviewError::not_completed(appointment.status.as_str()));
        }

        Ok(Self {
            id: ReviewId::new(),
            appointment_id: appointment.id,
            rater_id,
            rated_id: appointment.provider_id.clone(),
            score,
            comment,
            anonymous,
            created_at: Timestamp::now(),
        })
    }
}
