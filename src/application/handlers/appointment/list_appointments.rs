//! ListAppointmentsHandler - Query handler for appointment listings.

use std::sync::Arc;

use crate::domain::appointment::{AppointmentError, AppointmentStatus};
use crate::domain::foundation::{StateMachine, Timestamp, UserId, UserRole};
use crate::ports::{AppointmentReader, AppointmentView, ListScope};

/// Query for the caller's appointments.
#[derive(Debug, Clone)]
pub struct ListAppointmentsQuery {
    pub user_id: UserId,
    pub role: UserRole,
    pub status: Option<AppointmentStatus>,
}

/// Appointments partitioned around the current moment.
///
/// An appointment is "future" while its start has not passed and its
/// status can still move; everything terminal or already started lands
/// in "past". Both halves keep the reader's newest-first order.
#[derive(Debug, Clone)]
pub struct ListAppointmentsResult {
    pub future: Vec<AppointmentView>,
    pub past: Vec<AppointmentView>,
}

/// Handler for appointment listings. Admins see every appointment;
/// clients and providers only their own.
pub struct ListAppointmentsHandler {
    reader: Arc<dyn AppointmentReader>,
}

impl ListAppointmentsHandler {
    pub fn new(reader: Arc<dyn AppointmentReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        query: ListAppointmentsQuery,
    ) -> Result<ListAppointmentsResult, AppointmentError> {
        let scope = match query.role {
            UserRole::Cliente => ListScope::Client(query.user_id),
            UserRole::Atendente => ListScope::Provider(query.user_id),
            UserRole::Admin => ListScope::All,
        };

        let views = self.reader.list(&scope, query.status).await?;

        let now = Timestamp::now();
        let (future, past) = views
            .into_iter()
            .partition(|v| v.starts_at >= now && !v.status.is_terminal());

        Ok(ListAppointmentsResult { future, past })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryAppointmentReader, InMemoryAppointmentStore, InMemoryReviewStore,
        InMemoryUserDirectory,
    };
    use crate::domain::appointment::{Appointment, Modality};
    use crate::domain::foundation::{AccountStatus, UserSummary};
    use crate::ports::AppointmentStore;

    fn client_id() -> UserId {
        UserId::new("client-1").unwrap()
    }

    fn provider_id() -> UserId {
        UserId::new("provider-1").unwrap()
    }

    struct Fixture {
        handler: ListAppointmentsHandler,
        store: Arc<InMemoryAppointmentStore>,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(InMemoryAppointmentStore::new());
        let directory = Arc::new(InMemoryUserDirectory::new());
        directory.insert(UserSummary {
            id: client_id(),
            role: UserRole::Cliente,
            status: AccountStatus::Ativo,
            name: "Cliente Um".to_string(),
        });
        directory.insert(UserSummary {
            id: provider_id(),
            role: UserRole::Atendente,
            status: AccountStatus::Ativo,
            name: "Atendente Um".to_string(),
        });
        let reader = Arc::new(InMemoryAppointmentReader::new(
            store.clone(),
            directory,
            Arc::new(InMemoryReviewStore::new()),
        ));
        Fixture {
            handler: ListAppointmentsHandler::new(reader),
            store,
        }
    }

    fn appointment(days_ahead: i64) -> Appointment {
        Appointment::request(
            client_id(),
            provider_id(),
            Timestamp::now().plus_days(days_ahead),
            30,
            None,
            Modality::Online,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn pending_future_appointment_lands_in_future() {
        let f = fixture();
        f.store.create(&appointment(2), &[]).await.unwrap();

        let result = f
            .handler
            .handle(ListAppointmentsQuery {
                user_id: client_id(),
                role: UserRole::Cliente,
                status: None,
            })
            .await
            .unwrap();

        assert_eq!(result.future.len(), 1);
        assert!(result.past.is_empty());
    }

    #[tokio::test]
    async fn cancelled_appointment_lands_in_past_even_if_upcoming() {
        let f = fixture();
        let mut appt = appointment(2);
        f.store.create(&appt, &[]).await.unwrap();
        appt.cancel_by_client().unwrap();
        f.store.update(&appt, &[]).await.unwrap();

        let result = f
            .handler
            .handle(ListAppointmentsQuery {
                user_id: client_id(),
                role: UserRole::Cliente,
                status: None,
            })
            .await
            .unwrap();

        assert!(result.future.is_empty());
        assert_eq!(result.past.len(), 1);
    }

    #[tokio::test]
    async fn provider_scope_sees_own_appointments() {
        let f = fixture();
        f.store.create(&appointment(1), &[]).await.unwrap();

        let result = f
            .handler
            .handle(ListAppointmentsQuery {
                user_id: provider_id(),
                role: UserRole::Atendente,
                status: None,
            })
            .await
            .unwrap();

        assert_eq!(result.future.len(), 1);
    }

    #[tokio::test]
    async fn other_client_sees_nothing() {
        let f = fixture();
        f.store.create(&appointment(1), &[]).await.unwrap();

        let result = f
            .handler
            .handle(ListAppointmentsQuery {
                user_id: UserId::new("other-client").unwrap(),
                role: UserRole::Cliente,
                status: None,
            })
            .await
            .unwrap();

        assert!(result.future.is_empty());
        assert!(result.past.is_empty());
    }

    #[tokio::test]
    async fn admin_sees_everything_with_status_filter() {
        let f = fixture();
        let mut cancelled = appointment(1);
        f.store.create(&cancelled, &[]).await.unwrap();
        cancelled.cancel_by_client().unwrap();
        f.store.update(&cancelled, &[]).await.unwrap();
        f.store.create(&appointment(2), &[]).await.unwrap();

        let result = f
            .handler
            .handle(ListAppointmentsQuery {
                user_id: UserId::new("admin-1").unwrap(),
                role: UserRole::Admin,
                status: Some(AppointmentStatus::CanceladoCliente),
            })
            .await
            .unwrap();

        assert!(result.future.is_empty());
        assert_eq!(result.past.len(), 1);
        assert_eq!(result.past[0].status, AppointmentStatus::CanceladoCliente);
    }
}
