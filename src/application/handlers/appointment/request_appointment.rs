//! RequestAppointmentHandler - Command handler for creating appointment requests.

use std::sync::Arc;

use crate::domain::appointment::{Appointment, AppointmentError, Modality};
use crate::domain::foundation::{ErrorCode, Timestamp, UserId};
use crate::domain::notification::{Notification, NotificationKind};
use crate::ports::{AppointmentStore, UserDirectory};

use super::format_start;

/// Command to request a new appointment on behalf of a client.
#[derive(Debug, Clone)]
pub struct RequestAppointmentCommand {
    pub client_id: UserId,
    pub provider_id: UserId,
    pub starts_at: Timestamp,
    pub duration_min: u32,
    pub subject: Option<String>,
    pub modality: Modality,
}

/// Result of a successful appointment request.
#[derive(Debug, Clone)]
pub struct RequestAppointmentResult {
    pub appointment: Appointment,
}

/// Handler for creating appointment requests.
///
/// Validates the target provider against the directory, builds the
/// SOLICITADO aggregate, and hands the overlap check to the store's
/// atomic create together with the provider's notification.
pub struct RequestAppointmentHandler {
    store: Arc<dyn AppointmentStore>,
    directory: Arc<dyn UserDirectory>,
}

impl RequestAppointmentHandler {
    pub fn new(store: Arc<dyn AppointmentStore>, directory: Arc<dyn UserDirectory>) -> Self {
        Self { store, directory }
    }

    pub async fn handle(
        &self,
        cmd: RequestAppointmentCommand,
    ) -> Result<RequestAppointmentResult, AppointmentError> {
        // 1. The target must be an active provider
        let provider = self.directory.find_user(&cmd.provider_id).await?;
        if !provider.map(|p| p.is_active_provider()).unwrap_or(false) {
            return Err(AppointmentError::provider_unavailable(cmd.provider_id));
        }

        // 2. Build the aggregate (validates start and duration)
        let appointment = Appointment::request(
            cmd.client_id.clone(),
            cmd.provider_id.clone(),
            cmd.starts_at,
            cmd.duration_min,
            cmd.subject,
            cmd.modality,
        )?;

        // 3. Notify the provider about the new request
        let client_name = self
            .directory
            .find_user(&cmd.client_id)
            .await?
            .map(|u| u.name)
            .unwrap_or_else(|| cmd.client_id.to_string());
        let notification = Notification::new(
            cmd.provider_id.clone(),
            "Nova Solicitação",
            format!(
                "Nova solicitação de agendamento de {} para {}.",
                client_name,
                format_start(&appointment.starts_at)
            ),
            NotificationKind::NovoAgendamentoSolicitado,
            Some(format!("/atendente/solicitacoes/{}", appointment.id)),
        );

        // 4. Atomic overlap check + insert
        self.store
            .create(&appointment, &[notification])
            .await
            .map_err(|e| match e.code {
                ErrorCode::SlotUnavailable => {
                    AppointmentError::slot_taken(cmd.provider_id.clone(), cmd.starts_at)
                }
                _ => AppointmentError::infrastructure(e.to_string()),
            })?;

        tracing::info!(
            appointment_id = %appointment.id,
            provider_id = %appointment.provider_id,
            "appointment requested"
        );

        Ok(RequestAppointmentResult { appointment })
    }
}
