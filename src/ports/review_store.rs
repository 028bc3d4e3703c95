//! Review store port.
//!
//! Persists reviews and enforces the one-review-per-appointment
//! constraint at insert time.

use async_trait::async_trait;

use crate::domain::foundation::{AppointmentId, DomainError};
use crate::domain::review::Review;

/// Store port for Review persistence.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Insert a new review.
    ///
    /// # Errors
    ///
    /// - `AlreadyReviewed` if a review exists for the same appointment
    /// - `DatabaseError` on persistence failure
    async fn create(&self, review: &Review) -> Result<(), DomainError>;

    /// Find the review attached to an appointment, if any.
    async fn find_by_appointment(
        &self,
        appointment_id: &AppointmentId,
    ) -> Result<Option<Review>, DomainError>;
}
