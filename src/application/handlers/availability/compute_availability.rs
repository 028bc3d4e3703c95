//! ComputeAvailabilityHandler - Query handler for a provider's free slots.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};

use crate::domain::appointment::AppointmentError;
use crate::domain::availability::available_slots;
use crate::domain::foundation::{Timestamp, UserId};
use crate::ports::{AppointmentStore, WorkingHoursProvider};

/// Query for a provider's bookable slots on a date.
#[derive(Debug, Clone)]
pub struct ComputeAvailabilityQuery {
    pub provider_id: UserId,
    pub date: NaiveDate,
}

/// Ordered slot start times for the requested day.
#[derive(Debug, Clone)]
pub struct ComputeAvailabilityResult {
    pub slots: Vec<NaiveTime>,
}

/// Handler for slot computation.
///
/// Past dates short-circuit to an empty result before any lookup; an
/// unknown provider is NotFound. The walk itself is the pure
/// `available_slots` function.
pub struct ComputeAvailabilityHandler {
    working_hours: Arc<dyn WorkingHoursProvider>,
    store: Arc<dyn AppointmentStore>,
}

impl ComputeAvailabilityHandler {
    pub fn new(
        working_hours: Arc<dyn WorkingHoursProvider>,
        store: Arc<dyn AppointmentStore>,
    ) -> Self {
        Self {
            working_hours,
            store,
        }
    }

    pub async fn handle(
        &self,
        query: ComputeAvailabilityQuery,
    ) -> Result<ComputeAvailabilityResult, AppointmentError> {
        let now = Timestamp::now();
        if query.date < now.date() {
            return Ok(ComputeAvailabilityResult { slots: vec![] });
        }

        let hours = self
            .working_hours
            .for_provider(&query.provider_id)
            .await?
            .ok_or_else(|| {
                AppointmentError::provider_unavailable(query.provider_id.clone())
            })?;

        let occupied = self
            .store
            .occupied_on(&query.provider_id, query.date)
            .await?;

        let slots = available_slots(&hours, query.date, now, &occupied);

        Ok(ComputeAvailabilityResult { slots })
    }
}
