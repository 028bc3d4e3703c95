//! ConfirmAppointmentHandler - Command handler for confirming requests.

use std::sync::Arc;

use crate::domain::appointment::{Appointment, AppointmentError};
use crate::domain::foundation::{AppointmentId, UserId};
use crate::domain::notification::{Notification, NotificationKind};
use crate::ports::{AppointmentStore, UserDirectory};

use super::format_start;

/// Command to confirm a requested appointment.
#[derive(Debug, Clone)]
pub struct ConfirmAppointmentCommand {
    /// The provider performing the confirmation.
    pub provider_id: UserId,
    pub appointment_id: AppointmentId,
    pub meeting_link: Option<String>,
    pub provider_notes: Option<String>,
}

/// Result of a successful confirmation.
#[derive(Debug, Clone)]
pub struct ConfirmAppointmentResult {
    pub appointment: Appointment,
}

/// Handler for confirming appointment requests.
///
/// The ownership check runs before the status guard, so a provider
/// touching someone else's appointment gets Forbidden rather than a
/// status conflict.
pub struct ConfirmAppointmentHandler {
    store: Arc<dyn AppointmentStore>,
    directory: Arc<dyn UserDirectory>,
}

impl ConfirmAppointmentHandler {
    pub fn new(store: Arc<dyn AppointmentStore>, directory: Arc<dyn UserDirectory>) -> Self {
        Self { store, directory }
    }

    pub async fn handle(
        &self,
        cmd: ConfirmAppointmentCommand,
    ) -> Result<ConfirmAppointmentResult, AppointmentError> {
        let mut appointment = self
            .store
            .find_by_id(&cmd.appointment_id)
            .await?
            .ok_or_else(|| AppointmentError::not_found(cmd.appointment_id))?;

        if !appointment.is_owned_by_provider(&cmd.provider_id) {
            return Err(AppointmentError::NotOwner);
        }

        appointment.confirm(cmd.meeting_link, cmd.provider_notes)?;

        let provider_name = self
            .directory
            .find_user(&cmd.provider_id)
            .await?
            .map(|u| u.name)
            .unwrap_or_else(|| cmd.provider_id.to_string());
        let notification = Notification::new(
            appointment.client_id.clone(),
            "Agendamento Confirmado!",
            format!(
                "Seu agendamento com {} para {} foi CONFIRMADO.",
                provider_name,
                format_start(&appointment.starts_at)
            ),
            NotificationKind::AgendamentoConfirmado,
            Some(format!("/cliente/meus-agendamentos/#{}", appointment.id)),
        );

        self.store.update(&appointment, &[notification]).await?;

        tracing::info!(appointment_id = %appointment.id, "appointment confirmed");

        Ok(ConfirmAppointmentResult { appointment })
    }
}
