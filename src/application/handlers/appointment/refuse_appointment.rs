//! RefuseAppointmentHandler - Command handler for refusing requests.

use std::sync::Arc;

use crate::domain::appointment::{Appointment, AppointmentError};
use crate::domain::foundation::{AppointmentId, UserId};
use crate::domain::notification::{Notification, NotificationKind};
use crate::ports::{AppointmentStore, UserDirectory};

use super::format_start;

/// Command to refuse a requested appointment.
#[derive(Debug, Clone)]
pub struct RefuseAppointmentCommand {
    /// The provider performing the refusal.
    pub provider_id: UserId,
    pub appointment_id: AppointmentId,
    /// Required; forwarded to the client in the notification.
    pub reason: String,
}

/// Result of a successful refusal.
#[derive(Debug, Clone)]
pub struct RefuseAppointmentResult {
    pub appointment: Appointment,
}

/// Handler for refusing appointment requests.
pub struct RefuseAppointmentHandler {
    store: Arc<dyn AppointmentStore>,
    directory: Arc<dyn UserDirectory>,
}

impl RefuseAppointmentHandler {
    pub fn new(store: Arc<dyn AppointmentStore>, directory: Arc<dyn UserDirectory>) -> Self {
        Self { store, directory }
    }

    pub async fn handle(
        &self,
        cmd: RefuseAppointmentCommand,
    ) -> Result<RefuseAppointmentResult, AppointmentError> {
        let reason = cmd.reason.trim();
        if reason.is_empty() {
            return Err(AppointmentError::validation(
                "reason",
                "Refusal reason is required",
            ));
        }

        let mut appointment = self
            .store
            .find_by_id(&cmd.appointment_id)
            .await?
            .ok_or_else(|| AppointmentError::not_found(cmd.appointment_id))?;

        if !appointment.is_owned_by_provider(&cmd.provider_id) {
            return Err(AppointmentError::NotOwner);
        }

        appointment.refuse(reason)?;

        let provider_name = self
            .directory
            .find_user(&cmd.provider_id)
            .await?
            .map(|u| u.name)
            .unwrap_or_else(|| cmd.provider_id.to_string());
        let notification = Notification::new(
            appointment.client_id.clone(),
            "Solicitação Recusada",
            format!(
                "Sua solicitação de agendamento com {} para {} foi recusada. Motivo: {}",
                provider_name,
                format_start(&appointment.starts_at),
                reason
            ),
            NotificationKind::AgendamentoCancelado,
            Some("/cliente/meus-agendamentos/".to_string()),
        );

        self.store.update(&appointment, &[notification]).await?;

        tracing::info!(appointment_id = %appointment.id, "appointment refused");

        Ok(RefuseAppointmentResult { appointment })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryAppointmentStore, InMemoryUserDirectory};
    use crate::domain::appointment::{AppointmentStatus, Modality};
    use crate::domain::foundation::{AccountStatus, Timestamp, UserRole, UserSummary};

    fn client_id() -> UserId {
        UserId::new("client-1").unwrap()
    }

    fn provider_id() -> UserId {
        UserId::new("provider-1").unwrap()
    }

    fn directory() -> Arc<InMemoryUserDirectory> {
        let directory = Arc::new(InMemoryUserDirectory::new());
        directory.insert(UserSummary {
            id: provider_id(),
            role: UserRole::Atendente,
            status: AccountStatus::Ativo,
            name: "Dra. Ribeiro".to_string(),
        });
        directory
    }

    async fn store_with_request() -> (Arc<InMemoryAppointmentStore>, Appointment) {
        let store = Arc::new(InMemoryAppointmentStore::new());
        let appointment = Appointment::request(
            client_id(),
            provider_id(),
            Timestamp::now().plus_days(2),
            30,
            None,
            Modality::Presencial,
        )
        .unwrap();
        store.create(&appointment, &[]).await.unwrap();
        (store, appointment)
    }

    fn cmd(appointment_id: AppointmentId, reason: &str) -> RefuseAppointmentCommand {
        RefuseAppointmentCommand {
            provider_id: provider_id(),
            appointment_id,
            reason: reason.to_string(),
        }
    }

    #[tokio::test]
    async fn refuses_and_notifies_client_with_reason() {
        let (store, appointment) = store_with_request().await;
        let handler = RefuseAppointmentHandler::new(store.clone(), directory());

        let result = handler
            .handle(cmd(appointment.id, "Agenda cheia nesta semana"))
            .await
            .unwrap();

        assert_eq!(
            result.appointment.status,
            AppointmentStatus::CanceladoAtendente
        );
        let notifications = store.notifications_for(&client_id());
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].kind, NotificationKind::AgendamentoCancelado);
        assert!(notifications[0].message.contains("Agenda cheia nesta semana"));
    }

    #[tokio::test]
    async fn fails_without_reason_before_loading() {
        let (store, appointment) = store_with_request().await;
        let handler = RefuseAppointmentHandler::new(store.clone(), directory());

        let result = handler.handle(cmd(appointment.id, "   ")).await;

        assert!(matches!(
            result,
            Err(AppointmentError::ValidationFailed { ref field, .. }) if field == "reason"
        ));
        let stored = store.find_by_id(&appointment.id).await.unwrap().unwrap();
        assert_eq!(stored.status, AppointmentStatus::Solicitado);
    }

    #[tokio::test]
    async fn fails_for_other_providers_appointment() {
        let (store, appointment) = store_with_request().await;
        let handler = RefuseAppointmentHandler::new(store, directory());
        let mut command = cmd(appointment.id, "motivo");
        command.provider_id = UserId::new("someone-else").unwrap();

        let result = handler.handle(command).await;
        assert!(matches!(result, Err(AppointmentError::NotOwner)));
    }

    #[tokio::test]
    async fn cannot_refuse_confirmed_appointment() {
        let (store, mut appointment) = store_with_request().await;
        appointment.confirm(None, None).unwrap();
        store.update(&appointment, &[]).await.unwrap();
        let handler = RefuseAppointmentHandler::new(store.clone(), directory());

        let result = handler.handle(cmd(appointment.id, "motivo")).await;

        assert!(matches!(result, Err(AppointmentError::InvalidState { .. })));
        assert!(store.notifications_for(&client_id()).is_empty());
    }
}
