//! Appointment aggregate entity.
//!
//! An Appointment links one client to one provider for a single time
//! interval. It is created by the client in SOLICITADO and only ever moves
//! forward through the status state machine; rows are never deleted, the
//! terminal status is the record.
//!
//! # Invariants
//!
//! - `duration_min > 0`
//! - `[starts_at, starts_at + duration_min)` does not overlap any other
//!   slot-occupying appointment of the same provider (enforced by the
//!   store at insert time)
//! - Status transitions follow [`AppointmentStatus`] state machine rules

use crate::domain::foundation::{
    AppointmentId, StateMachine, Timestamp, UserId,
};
use serde::{Deserialize, Serialize};

use super::{AppointmentError, AppointmentStatus, Modality};

/// Appointment aggregate - one booked (or requested) time interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    /// Unique identifier for this appointment.
    pub id: AppointmentId,

    /// Client who requested the appointment.
    pub client_id: UserId,

    /// Provider the appointment was requested with.
    pub provider_id: UserId,

    /// Start of the appointment interval.
    pub starts_at: Timestamp,

    /// Length of the interval in minutes.
    pub duration_min: u32,

    /// Optional subject stated by the client.
    pub subject: Option<String>,

    /// Delivery modality.
    pub modality: Modality,

    /// Current lifecycle status.
    pub status: AppointmentStatus,

    /// Meeting link for online appointments, set on confirmation.
    pub meeting_link: Option<String>,

    /// Free-form provider notes; refusals record their reason here.
    pub provider_notes: Option<String>,

    /// When the appointment was created.
    pub created_at: Timestamp,

    /// When the appointment was last updated.
    pub updated_at: Timestamp,
}

impl Appointment {
    /// Create a new appointment request on behalf of a client.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailed` if the duration is zero or the start
    /// is in the past. Overlap with existing bookings is the store's
    /// responsibility at insert time.
    pub fn request(
        client_id: UserId,
        provider_id: UserId,
        starts_at: Timestamp,
        duration_min: u32,
        subject: Option<String>,
        modality: Modality,
    ) -> Result<Self, AppointmentError> {
        if duration_min == 0 {
            return Err(AppointmentError::validation(
                "duration_min",
                "Duration must be positive",
            ));
        }
        let now = Timestamp::now();
        if starts_at.is_before(&now) {
            return Err(AppointmentError::validation(
                "starts_at",
                "Cannot schedule in the past",
            ));
        }

        Ok(Self {
            id: AppointmentId::new(),
            client_id,
            provider_id,
            starts_at,
            duration_min,
            subject,
            modality,
            status: AppointmentStatus::Solicitado,
            meeting_link: None,
            provider_notes: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// End of the appointment interval (half-open).
    pub fn ends_at(&self) -> Timestamp {
        self.starts_at.plus_minutes(self.duration_min as i64)
    }

    /// Returns true if the given client owns this appointment.
    pub fn is_owned_by_client(&self, client_id: &UserId) -> bool {
        &self.client_id == client_id
    }

    /// Returns true if the given provider owns this appointment.
    pub fn is_owned_by_provider(&self, provider_id: &UserId) -> bool {
        &self.provider_id == provider_id
    }

    /// Confirm the request, optionally attaching a meeting link and notes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` unless the appointment is SOLICITADO.
    pub fn confirm(
        &mut self,
        meeting_link: Option<String>,
        provider_notes: Option<String>,
    ) -> Result<(), AppointmentError> {
        self.transition_to(AppointmentStatus::Confirmado, "confirm")?;
        if meeting_link.is_some() {
            self.meeting_link = meeting_link;
        }
        if provider_notes.is_some() {
            self.provider_notes = provider_notes;
        }
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Refuse the request, recording the reason into the provider notes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` unless the appointment is SOLICITADO.
    pub fn refuse(&mut self, reason: &str) -> Result<(), AppointmentError> {
        self.transition_to(AppointmentStatus::CanceladoAtendente, "refuse")?;
        self.provider_notes = Some(format!("Recusado: {}", reason));
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Cancel on behalf of the owning client.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` unless the appointment is SOLICITADO or
    /// CONFIRMADO.
    pub fn cancel_by_client(&mut self) -> Result<(), AppointmentError> {
        self.transition_to(AppointmentStatus::CanceladoCliente, "cancel")?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Force-cancel on behalf of an administrator.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if the appointment is already terminal.
    pub fn cancel_by_admin(&mut self) -> Result<(), AppointmentError> {
        self.transition_to(AppointmentStatus::CanceladoAdmin, "cancel")?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Mark a confirmed appointment as completed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` unless the appointment is CONFIRMADO, and
    /// `NotYetOccurred` if the start time is still in the future.
    pub fn mark_completed(&mut self) -> Result<(), AppointmentError> {
        if self.status != AppointmentStatus::Confirmado {
            return Err(AppointmentError::invalid_state(
                self.status.as_str(),
                "complete",
            ));
        }
        if self.starts_at.is_after(&Timestamp::now()) {
            return Err(AppointmentError::NotYetOccurred(self.id));
        }
        self.status = AppointmentStatus::Realizado;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Replace the provider notes. Allowed in any status.
    pub fn update_notes(&mut self, provider_notes: Option<String>) {
        self.provider_notes = provider_notes;
        self.updated_at = Timestamp::now();
    }

    /// Transition to a new status using the state machine.
    fn transition_to(
        &mut self,
        target: AppointmentStatus,
        attempted: &str,
    ) -> Result<(), AppointmentError> {
        self.status = self.status.transition_to(target).map_err(|_| {
            AppointmentError::invalid_state(self.status.as_str(), attempted)
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_id() -> UserId {
        UserId::new("client-1").unwrap()
    }

    fn provider_id() -> UserId {
        UserId::new("provider-1").unwrap()
    }

    fn future_start() -> Timestamp {
        Timestamp::now().plus_days(2)
    }

    fn requested() -> Appointment {
        Appointment::request(
            client_id(),
            provider_id(),
            future_start(),
            30,
            Some("Primeira consulta".to_string()),
            Modality::Online,
        )
        .unwrap()
    }

    // Construction tests

    #[test]
    fn request_starts_solicitado() {
        let appt = requested();
        assert_eq!(appt.status, AppointmentStatus::Solicitado);
        assert!(appt.meeting_link.is_none());
        assert!(appt.provider_notes.is_none());
    }

    #[test]
    fn request_rejects_zero_duration() {
        let result = Appointment::request(
            client_id(),
            provider_id(),
            future_start(),
            0,
            None,
            Modality::Presencial,
        );
        assert!(matches!(
            result,
            Err(AppointmentError::ValidationFailed { ref field, .. }) if field == "duration_min"
        ));
    }

    #[test]
    fn request_rejects_past_start() {
        let result = Appointment::request(
            client_id(),
            provider_id(),
            Timestamp::now().plus_days(-1),
            30,
            None,
            Modality::Online,
        );
        assert!(matches!(
            result,
            Err(AppointmentError::ValidationFailed { ref field, .. }) if field == "starts_at"
        ));
    }

    #[test]
    fn ends_at_adds_duration() {
        let appt = requested();
        assert_eq!(appt.ends_at(), appt.starts_at.plus_minutes(30));
    }

    // Ownership tests

    #[test]
    fn ownership_checks_match_ids() {
        let appt = requested();
        assert!(appt.is_owned_by_client(&client_id()));
        assert!(appt.is_owned_by_provider(&provider_id()));
        assert!(!appt.is_owned_by_client(&UserId::new("other").unwrap()));
        assert!(!appt.is_owned_by_provider(&UserId::new("other").unwrap()));
    }

    // Lifecycle transition tests

    #[test]
    fn solicitado_can_confirm_with_link() {
        let mut appt = requested();
        let result = appt.confirm(Some("https://meet.example/abc".to_string()), None);
        assert!(result.is_ok());
        assert_eq!(appt.status, AppointmentStatus::Confirmado);
        assert_eq!(appt.meeting_link, Some("https://meet.example/abc".to_string()));
    }

    #[test]
    fn confirm_twice_fails_and_keeps_status() {
        let mut appt = requested();
        appt.confirm(None, None).unwrap();

        let result = appt.confirm(None, None);
        assert!(matches!(result, Err(AppointmentError::InvalidState { .. })));
        assert_eq!(appt.status, AppointmentStatus::Confirmado);
    }

    #[test]
    fn refuse_records_reason_in_notes() {
        let mut appt = requested();
        appt.refuse("Agenda cheia").unwrap();
        assert_eq!(appt.status, AppointmentStatus::CanceladoAtendente);
        assert_eq!(appt.provider_notes, Some("Recusado: Agenda cheia".to_string()));
    }

    #[test]
    fn refuse_after_confirm_fails() {
        let mut appt = requested();
        appt.confirm(None, None).unwrap();

        let result = appt.refuse("tarde demais");
        assert!(matches!(result, Err(AppointmentError::InvalidState { .. })));
        assert_eq!(appt.status, AppointmentStatus::Confirmado);
    }

    #[test]
    fn client_can_cancel_solicitado_and_confirmado() {
        let mut appt = requested();
        assert!(appt.cancel_by_client().is_ok());
        assert_eq!(appt.status, AppointmentStatus::CanceladoCliente);

        let mut appt = requested();
        appt.confirm(None, None).unwrap();
        assert!(appt.cancel_by_client().is_ok());
        assert_eq!(appt.status, AppointmentStatus::CanceladoCliente);
    }

    #[test]
    fn client_cannot_cancel_cancelled() {
        let mut appt = requested();
        appt.cancel_by_client().unwrap();

        let result = appt.cancel_by_client();
        assert!(matches!(result, Err(AppointmentError::InvalidState { .. })));
        assert_eq!(appt.status, AppointmentStatus::CanceladoCliente);
    }

    #[test]
    fn admin_can_cancel_confirmado() {
        let mut appt = requested();
        appt.confirm(None, None).unwrap();
        assert!(appt.cancel_by_admin().is_ok());
        assert_eq!(appt.status, AppointmentStatus::CanceladoAdmin);
    }

    #[test]
    fn admin_cannot_cancel_completed() {
        let mut appt = requested();
        appt.confirm(None, None).unwrap();
        appt.starts_at = Timestamp::now().plus_days(-1);
        appt.mark_completed().unwrap();

        let result = appt.cancel_by_admin();
        assert!(matches!(result, Err(AppointmentError::InvalidState { .. })));
        assert_eq!(appt.status, AppointmentStatus::Realizado);
    }

    #[test]
    fn mark_completed_requires_confirmado() {
        let mut appt = requested();
        let result = appt.mark_completed();
        assert!(matches!(result, Err(AppointmentError::InvalidState { .. })));
    }

    #[test]
    fn mark_completed_rejects_future_appointment() {
        let mut appt = requested();
        appt.confirm(None, None).unwrap();

        let result = appt.mark_completed();
        assert!(matches!(result, Err(AppointmentError::NotYetOccurred(_))));
        assert_eq!(appt.status, AppointmentStatus::Confirmado);
    }

    #[test]
    fn mark_completed_succeeds_after_start() {
        let mut appt = requested();
        appt.confirm(None, None).unwrap();
        appt.starts_at = Timestamp::now().plus_days(-1);

        assert!(appt.mark_completed().is_ok());
        assert_eq!(appt.status, AppointmentStatus::Realizado);
    }

    #[test]
    fn update_notes_replaces_notes_in_any_status() {
        let mut appt = requested();
        appt.update_notes(Some("Trazer exames".to_string()));
        assert_eq!(appt.provider_notes, Some("Trazer exames".to_string()));

        appt.cancel_by_client().unwrap();
        appt.update_notes(None);
        assert!(appt.provider_notes.is_none());
    }
}
