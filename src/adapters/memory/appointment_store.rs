//! In-memory implementation of AppointmentStore.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Mutex;

use crate::domain::appointment::Appointment;
use crate::domain::availability::OccupiedInterval;
use crate::domain::foundation::{AppointmentId, DomainError, ErrorCode, UserId};
use crate::domain::notification::Notification;
use crate::ports::AppointmentStore;

#[derive(Default)]
struct Inner {
    appointments: Vec<Appointment>,
    notifications: Vec<Notification>,
}

/// In-memory implementation of the AppointmentStore port.
///
/// The single mutex covers both the overlap check and the insert, which
/// gives the per-provider serialization the port contract requires.
#[derive(Default)]
pub struct InMemoryAppointmentStore {
    inner: Mutex<Inner>,
}

impl InMemoryAppointmentStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all appointments, for assertions in tests.
    pub fn appointments(&self) -> Vec<Appointment> {
        self.inner.lock().unwrap().appointments.clone()
    }

    /// Snapshot of all notifications, for assertions in tests.
    pub fn notifications(&self) -> Vec<Notification> {
        self.inner.lock().unwrap().notifications.clone()
    }

    /// Notifications addressed to one recipient.
    pub fn notifications_for(&self, recipient: &UserId) -> Vec<Notification> {
        self.inner
            .lock()
            .unwrap()
            .notifications
            .iter()
            .filter(|n| &n.recipient_id == recipient)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl AppointmentStore for InMemoryAppointmentStore {
    async fn create(
        &self,
        appointment: &Appointment,
        notifications: &[Notification],
    ) -> Result<(), DomainError> {
        let mut inner = self.inner.lock().unwrap();

        let candidate = OccupiedInterval::new(appointment.starts_at, appointment.duration_min);
        let taken = inner.appointments.iter().any(|existing| {
            existing.provider_id == appointment.provider_id
                && existing.status.occupies_slot()
                && candidate.overlaps(
                    *existing.starts_at.as_datetime(),
                    *existing.ends_at().as_datetime(),
                )
        });
        if taken {
            return Err(DomainError::new(
                ErrorCode::SlotUnavailable,
                "Time range overlaps an existing booking",
            ));
        }

        inner.appointments.push(appointment.clone());
        inner.notifications.extend_from_slice(notifications);
        Ok(())
    }

    async fn find_by_id(&self, id: &AppointmentId) -> Result<Option<Appointment>, DomainError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.appointments.iter().find(|a| &a.id == id).cloned())
    }

    async fn update(
        &self,
        appointment: &Appointment,
        notifications: &[Notification],
    ) -> Result<(), DomainError> {
        let mut inner = self.inner.lock().unwrap();
        let slot = inner
            .appointments
            .iter_mut()
            .find(|a| a.id == appointment.id)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::AppointmentNotFound, "Appointment not found")
            })?;
        *slot = appointment.clone();
        inner.notifications.extend_from_slice(notifications);
        Ok(())
    }

    async fn occupied_on(
        &self,
        provider_id: &UserId,
        date: NaiveDate,
    ) -> Result<Vec<OccupiedInterval>, DomainError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .appointments
            .iter()
            .filter(|a| {
                &a.provider_id == provider_id
                    && a.status.occupies_slot()
                    && a.starts_at.date() == date
            })
            .map(|a| OccupiedInterval::new(a.starts_at, a.duration_min))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::appointment::Modality;
    use crate::domain::foundation::Timestamp;
    use crate::domain::notification::NotificationKind;

    fn client() -> UserId {
        UserId::new("client-1").unwrap()
    }

    fn provider() -> UserId {
        UserId::new("provider-1").unwrap()
    }

    fn appointment_at(starts_at: Timestamp) -> Appointment {
        Appointment::request(client(), provider(), starts_at, 30, None, Modality::Online).unwrap()
    }

    fn notice(recipient: UserId) -> Notification {
        Notification::new(
            recipient,
            "Nova Solicitação",
            "mensagem",
            NotificationKind::NovoAgendamentoSolicitado,
            None,
        )
    }

    #[tokio::test]
    async fn create_persists_appointment_and_notification() {
        let store = InMemoryAppointmentStore::new();
        let appt = appointment_at(Timestamp::now().plus_days(1));

        store.create(&appt, &[notice(provider())]).await.unwrap();

        assert_eq!(store.appointments().len(), 1);
        assert_eq!(store.notifications_for(&provider()).len(), 1);
    }

    #[tokio::test]
    async fn create_rejects_overlapping_booking() {
        let store = InMemoryAppointmentStore::new();
        let starts = Timestamp::now().plus_days(1);
        store.create(&appointment_at(starts), &[]).await.unwrap();

        let overlapping = appointment_at(starts.plus_minutes(15));
        let result = store.create(&overlapping, &[]).await;

        assert!(matches!(result, Err(e) if e.code == ErrorCode::SlotUnavailable));
        assert_eq!(store.appointments().len(), 1);
    }

    #[tokio::test]
    async fn create_allows_adjacent_booking() {
        let store = InMemoryAppointmentStore::new();
        let starts = Timestamp::now().plus_days(1);
        store.create(&appointment_at(starts), &[]).await.unwrap();

        let adjacent = appointment_at(starts.plus_minutes(30));
        assert!(store.create(&adjacent, &[]).await.is_ok());
    }

    #[tokio::test]
    async fn cancelled_booking_frees_its_slot() {
        let store = InMemoryAppointmentStore::new();
        let starts = Timestamp::now().plus_days(1);
        let mut appt = appointment_at(starts);
        store.create(&appt, &[]).await.unwrap();

        appt.cancel_by_client().unwrap();
        store.update(&appt, &[]).await.unwrap();

        let rebooked = appointment_at(starts);
        assert!(store.create(&rebooked, &[]).await.is_ok());
    }

    #[tokio::test]
    async fn update_unknown_appointment_fails() {
        let store = InMemoryAppointmentStore::new();
        let appt = appointment_at(Timestamp::now().plus_days(1));

        let result = store.update(&appt, &[]).await;
        assert!(matches!(result, Err(e) if e.code == ErrorCode::AppointmentNotFound));
    }

    #[tokio::test]
    async fn occupied_on_only_counts_active_statuses_on_date() {
        let store = InMemoryAppointmentStore::new();
        let starts = Timestamp::from_datetime(
            chrono::DateTime::parse_from_rfc3339("2030-05-20T09:00:00Z")
                .unwrap()
                .with_timezone(&chrono::Utc),
        );
        let mut cancelled = appointment_at(starts);
        store.create(&cancelled, &[]).await.unwrap();
        cancelled.cancel_by_client().unwrap();
        store.update(&cancelled, &[]).await.unwrap();

        let active = appointment_at(starts.plus_minutes(60));
        store.create(&active, &[]).await.unwrap();

        let occupied = store.occupied_on(&provider(), starts.date()).await.unwrap();
        assert_eq!(occupied.len(), 1);
    }
}
