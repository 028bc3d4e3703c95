//! Request/response DTOs for appointment endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::appointment::{Appointment, AppointmentStatus, Modality};
use crate::domain::foundation::{AppointmentId, Timestamp, UserId};
use crate::ports::AppointmentView;

/// Body for `POST /api/appointments`.
#[derive(Debug, Deserialize)]
pub struct CreateAppointmentRequest {
    pub provider_id: String,
    pub starts_at: DateTime<Utc>,
    pub duration_min: u32,
    pub subject: Option<String>,
    pub modality: Modality,
}

/// Body for `POST /api/appointments/{id}/confirm`.
#[derive(Debug, Deserialize, Default)]
pub struct ConfirmAppointmentRequest {
    pub meeting_link: Option<String>,
    pub provider_notes: Option<String>,
}

/// Body for `POST /api/appointments/{id}/refuse`.
#[derive(Debug, Deserialize)]
pub struct RefuseAppointmentRequest {
    pub reason: String,
}

/// Body for `POST /api/appointments/{id}/cancel-by-admin`.
#[derive(Debug, Deserialize)]
pub struct AdminCancelRequest {
    pub reason: String,
}

/// Body for `PUT /api/appointments/{id}/notes`.
#[derive(Debug, Deserialize)]
pub struct UpdateNotesRequest {
    pub provider_notes: Option<String>,
}

/// Query string for `GET /api/appointments`.
#[derive(Debug, Deserialize, Default)]
pub struct ListAppointmentsParams {
    pub status: Option<AppointmentStatus>,
}

/// One appointment as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentResponse {
    pub id: AppointmentId,
    pub client_id: UserId,
    pub provider_id: UserId,
    pub starts_at: Timestamp,
    pub duration_min: u32,
    pub subject: Option<String>,
    pub modality: Modality,
    pub status: AppointmentStatus,
    pub meeting_link: Option<String>,
    pub provider_notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Appointment> for AppointmentResponse {
    fn from(a: Appointment) -> Self {
        Self {
            id: a.id,
            client_id: a.client_id,
            provider_id: a.provider_id,
            starts_at: a.starts_at,
            duration_min: a.duration_min,
            subject: a.subject,
            modality: a.modality,
            status: a.status,
            meeting_link: a.meeting_link,
            provider_notes: a.provider_notes,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

/// Response for `GET /api/appointments`, partitioned around now.
#[derive(Debug, Serialize)]
pub struct ListAppointmentsResponse {
    pub future: Vec<AppointmentView>,
    pub past: Vec<AppointmentView>,
}
