//! Appointment lifecycle handlers.

mod cancel_by_admin;
mod cancel_by_client;
mod confirm_appointment;
mod list_appointments;
mod mark_completed;
mod refuse_appointment;
mod request_appointment;
mod update_notes;

pub use cancel_by_admin::{CancelByAdminCommand, CancelByAdminHandler, CancelByAdminResult};
pub use cancel_by_client::{
    CancelByClientCommand, CancelByClientHandler, CancelByClientResult,
};
pub use confirm_appointment::{
    ConfirmAppointmentCommand, ConfirmAppointmentHandler, ConfirmAppointmentResult,
};
pub use list_appointments::{
    ListAppointmentsHandler, ListAppointmentsQuery, ListAppointmentsResult,
};
pub use mark_completed::{MarkCompletedCommand, MarkCompletedHandler, MarkCompletedResult};
pub use refuse_appointment::{
    RefuseAppointmentCommand, RefuseAppointmentHandler, RefuseAppointmentResult,
};
pub use request_appointment::{
    RequestAppointmentCommand, RequestAppointmentHandler, RequestAppointmentResult,
};
pub use update_notes::{UpdateNotesCommand, UpdateNotesHandler, UpdateNotesResult};

use crate::domain::foundation::Timestamp;

/// Notification-friendly rendering of an appointment start (dd/mm/yyyy hh:mm).
pub(crate) fn format_start(starts_at: &Timestamp) -> String {
    starts_at.as_datetime().format("%d/%m/%Y %H:%M").to_string()
}
