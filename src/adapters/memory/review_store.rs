//! In-memory implementation of ReviewStore.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::foundation::{AppointmentId, DomainError, ErrorCode};
use crate::domain::review::Review;
use crate::ports::ReviewStore;

/// In-memory implementation of the ReviewStore port.
#[derive(Default)]
pub struct InMemoryReviewStore {
    reviews: Mutex<Vec<Review>>,
}

impl InMemoryReviewStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all reviews, for assertions in tests.
    pub fn reviews(&self) -> Vec<Review> {
        self.reviews.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReviewStore for InMemoryReviewStore {
    async fn create(&self, review: &Review) -> Result<(), DomainError> {
        let mut reviews = self.reviews.lock().unwrap();
        if reviews
            .iter()
            .any(|r| r.appointment_id == review.appointment_id)
        {
            return Err(DomainError::new(
                ErrorCode::AlreadyReviewed,
                "Appointment has already been reviewed",
            ));
        }
        reviews.push(review.clone());
        Ok(())
    }

    async fn find_by_appointment(
        &self,
        appointment_id: &AppointmentId,
    ) -> Result<Option<Review>, DomainError> {
        Ok(self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .find(|r| &r.appointment_id == appointment_id)
            .cloned())
    }
}
