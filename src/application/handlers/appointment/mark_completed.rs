//! MarkCompletedHandler - Command handler for completing appointments.

use std::sync::Arc;

use crate::domain::appointment::{Appointment, AppointmentError};
use crate::domain::foundation::{AppointmentId, UserId};
use crate::ports::AppointmentStore;

/// Command for a provider to mark an appointment as completed.
#[derive(Debug, Clone)]
pub struct MarkCompletedCommand {
    pub provider_id: UserId,
    pub appointment_id: AppointmentId,
}

/// Result of a successful completion.
#[derive(Debug, Clone)]
pub struct MarkCompletedResult {
    pub appointment: Appointment,
}

/// Handler for marking confirmed appointments as REALIZADO. Completion
/// produces no notification; the review gate opens silently.
pub struct MarkCompletedHandler {
    store: Arc<dyn AppointmentStore>,
}

impl MarkCompletedHandler {
    pub fn new(store: Arc<dyn AppointmentStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: MarkCompletedCommand,
    ) -> Result<MarkCompletedResult, AppointmentError> {
        let mut appointment = self
            .store
            .find_by_id(&cmd.appointment_id)
            .await?
            .ok_or_else(|| AppointmentError::not_found(cmd.appointment_id))?;

        if !appointment.is_owned_by_provider(&cmd.provider_id) {
            return Err(AppointmentError::NotOwner);
        }

        appointment.mark_completed()?;

        self.store.update(&appointment, &[]).await?;

        tracing::info!(appointment_id = %appointment.id, "appointment completed");

        Ok(MarkCompletedResult { appointment })
    }
}
