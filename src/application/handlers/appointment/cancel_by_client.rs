//! CancelByClientHandler - Command handler for client cancellations.

use std::sync::Arc;

use crate::domain::appointment::{Appointment, AppointmentError};
use crate::domain::foundation::{AppointmentId, UserId};
use crate::domain::notification::{Notification, NotificationKind};
use crate::ports::{AppointmentStore, UserDirectory};

use super::format_start;

/// Command for a client to cancel their own appointment.
#[derive(Debug, Clone)]
pub struct CancelByClientCommand {
    pub client_id: UserId,
    pub appointment_id: AppointmentId,
}

/// Result of a successful client cancellation.
#[derive(Debug, Clone)]
pub struct CancelByClientResult {
    pub appointment: Appointment,
}

/// Handler for client cancellations.
pub struct CancelByClientHandler {
    store: Arc<dyn AppointmentStore>,
    directory: Arc<dyn UserDirectory>,
}

impl CancelByClientHandler {
    pub fn new(store: Arc<dyn AppointmentStore>, directory: Arc<dyn UserDirectory>) -> Self {
        Self { store, directory }
    }

    pub async fn handle(
        &self,
        cmd: CancelByClientCommand,
    ) -> Result<CancelByClientResult, AppointmentError> {
        let mut appointment = self
            .store
            .find_by_id(&cmd.appointment_id)
            .await?
            .ok_or_else(|| AppointmentError::not_found(cmd.appointment_id))?;

        if !appointment.is_owned_by_client(&cmd.client_id) {
            return Err(AppointmentError::NotOwner);
        }

        appointment.cancel_by_client()?;

        let client_name = self
            .directory
            .find_user(&cmd.client_id)
            .await?
            .map(|u| u.name)
            .unwrap_or_else(|| cmd.client_id.to_string());
        let notification = Notification::new(
            appointment.provider_id.clone(),
            "Agendamento Cancelado",
            format!(
                "O agendamento com {} para {} foi CANCELADO pelo cliente.",
                client_name,
                format_start(&appointment.starts_at)
            ),
            NotificationKind::AgendamentoCancelado,
            Some("/atendente/minha-agenda/".to_string()),
        );

        self.store.update(&appointment, &[notification]).await?;

        tracing::info!(appointment_id = %appointment.id, "appointment cancelled by client");

        Ok(CancelByClientResult { appointment })
    }
}
