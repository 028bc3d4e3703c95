//! UpdateNotesHandler - Command handler for provider note updates.

use std::sync::Arc;

use crate::domain::appointment::{Appointment, AppointmentError};
use crate::domain::foundation::{AppointmentId, UserId};
use crate::ports::AppointmentStore;

/// Command for a provider to replace the notes on their appointment.
#[derive(Debug, Clone)]
pub struct UpdateNotesCommand {
    pub provider_id: UserId,
    pub appointment_id: AppointmentId,
    pub provider_notes: Option<String>,
}

/// Result of a successful note update.
#[derive(Debug, Clone)]
pub struct UpdateNotesResult {
    pub appointment: Appointment,
}

/// Handler for note updates. Allowed in any status and produces no
/// notification.
pub struct UpdateNotesHandler {
    store: Arc<dyn AppointmentStore>,
}

impl UpdateNotesHandler {
    pub fn new(store: Arc<dyn AppointmentStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: UpdateNotesCommand,
    ) -> Result<UpdateNotesResult, AppointmentError> {
        let mut appointment = self
            .store
            .find_by_id(&cmd.appointment_id)
            .await?
            .ok_or_else(|| AppointmentError::not_found(cmd.appointment_id))?;

        if !appointment.is_owned_by_provider(&cmd.provider_id) {
            return Err(AppointmentError::NotOwner);
        }

        appointment.update_notes(cmd.provider_notes);

        self.store.update(&appointment, &[]).await?;

        Ok(UpdateNotesResult { appointment })
    }
}
