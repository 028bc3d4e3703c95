//! Appointment store port (write side).
//!
//! Defines the contract for persisting Appointment aggregates together
//! with the notification records their transitions produce.
//!
//! # Design
//!
//! - **Atomic side effects**: every mutation persists its notifications in
//!   the same transaction, or nothing persists at all
//! - **Serialized creation**: `create` owns the double-booking check; two
//!   concurrent creations for overlapping ranges on one provider must
//!   never both succeed
//!
//! # Example
//!
//! ```ignore
//! let appointment = Appointment::request(client, provider, starts_at, 30, None, Modality::Online)?;
//! let notice = Notification::new(provider, "Nova Solicitação", msg, kind, link);
//! store.create(&appointment, &[notice]).await?;
//! ```

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::appointment::Appointment;
use crate::domain::availability::OccupiedInterval;
use crate::domain::foundation::{AppointmentId, DomainError, UserId};
use crate::domain::notification::Notification;

/// Store port for Appointment aggregate persistence.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Insert a new appointment and its notifications atomically.
    ///
    /// The overlap check against the provider's slot-occupying
    /// appointments and the insert are serialized per provider, so a
    /// concurrent creation for an overlapping range cannot also succeed.
    ///
    /// # Errors
    ///
    /// - `SlotUnavailable` if the time range overlaps an existing booking
    /// - `DatabaseError` on persistence failure
    async fn create(
        &self,
        appointment: &Appointment,
        notifications: &[Notification],
    ) -> Result<(), DomainError>;

    /// Find an appointment by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &AppointmentId) -> Result<Option<Appointment>, DomainError>;

    /// Persist an updated appointment and its notifications atomically.
    ///
    /// # Errors
    ///
    /// - `AppointmentNotFound` if the appointment doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(
        &self,
        appointment: &Appointment,
        notifications: &[Notification],
    ) -> Result<(), DomainError>;

    /// The provider's slot-occupying intervals on the given date.
    ///
    /// Only SOLICITADO and CONFIRMADO appointments count; terminal
    /// statuses free their slot.
    async fn occupied_on(
        &self,
        provider_id: &UserId,
        date: NaiveDate,
    ) -> Result<Vec<OccupiedInterval>, DomainError>;
}
