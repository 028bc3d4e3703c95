//! CancelByAdminHandler - Command handler for administrative cancellations.

use std::sync::Arc;

use crate::domain::appointment::{Appointment, AppointmentError};
use crate::domain::foundation::AppointmentId;
use crate::domain::notification::{Notification, NotificationKind};
use crate::ports::AppointmentStore;

use super::format_start;

/// Command for an administrator to force-cancel an appointment.
///
/// Role gating happens at the HTTP edge; any non-terminal appointment can
/// be cancelled regardless of ownership.
#[derive(Debug, Clone)]
pub struct CancelByAdminCommand {
    pub appointment_id: AppointmentId,
    /// Required; forwarded to both parties in the notification.
    pub reason: String,
}

/// Result of a successful administrative cancellation.
#[derive(Debug, Clone)]
pub struct CancelByAdminResult {
    pub appointment: Appointment,
}

/// Handler for administrative cancellations. Both parties are notified
/// within the same transaction as the status change.
pub struct CancelByAdminHandler {
    store: Arc<dyn AppointmentStore>,
}

impl CancelByAdminHandler {
    pub fn new(store: Arc<dyn AppointmentStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: CancelByAdminCommand,
    ) -> Result<CancelByAdminResult, AppointmentError> {
        let reason = cmd.reason.trim();
        if reason.is_empty() {
            return Err(AppointmentError::validation(
                "reason",
                "Cancellation reason is required",
            ));
        }

        let mut appointment = self
            .store
            .find_by_id(&cmd.appointment_id)
            .await?
            .ok_or_else(|| AppointmentError::not_found(cmd.appointment_id))?;

        appointment.cancel_by_admin()?;

        let message = format!(
            "O agendamento para {} foi cancelado pelo administrador. Motivo: {}",
            format_start(&appointment.starts_at),
            reason
        );
        let notifications = [
            Notification::new(
                appointment.client_id.clone(),
                "Agendamento Cancelado",
                message.clone(),
                NotificationKind::AgendamentoCanceladoAdmin,
                None,
            ),
            Notification::new(
                appointment.provider_id.clone(),
                "Agendamento Cancelado",
                message,
                NotificationKind::AgendamentoCanceladoAdmin,
                None,
            ),
        ];

        self.store.update(&appointment, &notifications).await?;

        tracing::info!(appointment_id = %appointment.id, "appointment cancelled by admin");

        Ok(CancelByAdminResult { appointment })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryAppointmentStore;
    use crate::domain::appointment::{AppointmentStatus, Modality};
    use crate::domain::foundation::{Timestamp, UserId};

    fn client_id() -> UserId {
        UserId::new("client-1").unwrap()
    }

    fn provider_id() -> UserId {
        UserId::new("provider-1").unwrap()
    }

    async fn store_with_request() -> (Arc<InMemoryAppointmentStore>, Appointment) {
        let store = Arc::new(InMemoryAppointmentStore::new());
        let appointment = Appointment::request(
            client_id(),
            provider_id(),
            Timestamp::now().plus_days(2),
            30,
            None,
            Modality::Online,
        )
        .unwrap();
        store.create(&appointment, &[]).await.unwrap();
        (store, appointment)
    }

    fn cmd(appointment_id: AppointmentId, reason: &str) -> CancelByAdminCommand {
        CancelByAdminCommand {
            appointment_id,
            reason: reason.to_string(),
        }
    }

    #[tokio::test]
    async fn cancels_and_notifies_both_parties() {
        let (store, appointment) = store_with_request().await;
        let handler = CancelByAdminHandler::new(store.clone());

        let result = handler
            .handle(cmd(appointment.id, "Conduta inadequada"))
            .await
            .unwrap();

        assert_eq!(result.appointment.status, AppointmentStatus::CanceladoAdmin);
        let client_notices = store.notifications_for(&client_id());
        let provider_notices = store.notifications_for(&provider_id());
        assert_eq!(client_notices.len(), 1);
        assert_eq!(provider_notices.len(), 1);
        assert_eq!(
            client_notices[0].kind,
            NotificationKind::AgendamentoCanceladoAdmin
        );
        assert!(client_notices[0].message.contains("Conduta inadequada"));
    }

    #[tokio::test]
    async fn cancels_confirmed_appointment() {
        let (store, mut appointment) = store_with_request().await;
        appointment.confirm(None, None).unwrap();
        store.update(&appointment, &[]).await.unwrap();
        let handler = CancelByAdminHandler::new(store);

        let result = handler.handle(cmd(appointment.id, "motivo")).await.unwrap();
        assert_eq!(result.appointment.status, AppointmentStatus::CanceladoAdmin);
    }

    #[tokio::test]
    async fn fails_without_reason() {
        let (store, appointment) = store_with_request().await;
        let handler = CancelByAdminHandler::new(store.clone());

        let result = handler.handle(cmd(appointment.id, "")).await;

        assert!(matches!(
            result,
            Err(AppointmentError::ValidationFailed { ref field, .. }) if field == "reason"
        ));
        let stored = store.find_by_id(&appointment.id).await.unwrap().unwrap();
        assert_eq!(stored.status, AppointmentStatus::Solicitado);
    }

    #[tokio::test]
    async fn cannot_cancel_terminal_appointment() {
        let (store, mut appointment) = store_with_request().await;
        appointment.cancel_by_client().unwrap();
        store.update(&appointment, &[]).await.unwrap();
        let handler = CancelByAdminHandler::new(store.clone());

        let result = handler.handle(cmd(appointment.id, "motivo")).await;

        assert!(matches!(result, Err(AppointmentError::InvalidState { .. })));
        assert!(store.notifications_for(&client_id()).is_empty());
    }

    #[tokio::test]
    async fn fails_for_unknown_appointment() {
        let store = Arc::new(InMemoryAppointmentStore::new());
        let handler = CancelByAdminHandler::new(store);

        let result = handler.handle(cmd(AppointmentId::new(), "motivo")).await;
        assert!(matches!(result, Err(AppointmentError::NotFound(_))));
    }
}
