//! In-memory implementation of WorkingHoursProvider.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::availability::WorkingHours;
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::WorkingHoursProvider;

/// In-memory implementation of the WorkingHoursProvider port.
#[derive(Default)]
pub struct InMemoryWorkingHours {
    schedules: Mutex<HashMap<UserId, WorkingHours>>,
}

impl InMemoryWorkingHours {
    /// Creates an empty schedule registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the schedule for a provider.
    pub fn set(&self, provider_id: UserId, hours: WorkingHours) {
        self.schedules.lock().unwrap().insert(provider_id, hours);
    }
}

#[async_trait]
impl WorkingHoursProvider for InMemoryWorkingHours {
    async fn for_provider(
        &self,
        provider_id: &UserId,
    ) -> Result<Option<WorkingHours>, DomainError> {
        Ok(self.schedules.lock().unwrap().get(provider_id).cloned())
    }
}
