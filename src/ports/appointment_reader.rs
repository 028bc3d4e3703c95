//! Appointment reader port (read side).
//!
//! Denormalized listing of appointments with participant names resolved,
//! used by the list endpoint. Write-side operations live on
//! `AppointmentStore`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::appointment::{AppointmentStatus, Modality};
use crate::domain::foundation::{AppointmentId, DomainError, Timestamp, UserId};

/// Whose appointments a listing covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListScope {
    /// Appointments where the user is the client.
    Client(UserId),

    /// Appointments where the user is the provider.
    Provider(UserId),

    /// Every appointment (admin only).
    All,
}

/// Denormalized appointment row for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentView {
    pub id: AppointmentId,
    pub starts_at: Timestamp,
    pub duration_min: u32,
    pub modality: Modality,
    pub status: AppointmentStatus,
    pub subject: Option<String>,
    pub meeting_link: Option<String>,
    pub provider_notes: Option<String>,
    pub client_id: UserId,
    pub client_name: String,
    pub provider_id: UserId,
    pub provider_name: String,
    pub has_review: bool,
}

/// Reader port for appointment listings.
#[async_trait]
pub trait AppointmentReader: Send + Sync {
    /// List appointments within the scope, newest start first.
    ///
    /// An optional status filter restricts the result to one lifecycle
    /// status.
    async fn list(
        &self,
        scope: &ListScope,
        status: Option<AppointmentStatus>,
    ) -> Result<Vec<AppointmentView>, DomainError>;
}
