//! Review-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | AppointmentNotFound | 404 |
//! | NotYourAppointment | 403 |
//! | NotCompleted | 409 |
//! | AlreadyReviewed | 409 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{AppointmentId, DomainError, ErrorCode};

/// Review-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewError {
    /// The referenced appointment does not exist.
    AppointmentNotFound(AppointmentId),

    /// The rater is not the appointment's client.
    NotYourAppointment,

    /// The appointment has not been completed yet.
    NotCompleted {
        current: String,
    },

    /// A review already exists for this appointment.
    AlreadyReviewed(AppointmentId),

    /// Validation failed.
    ValidationFailed {
        field: String,
        message: String,
    },

    /// Infrastructure error.
    Infrastructure(String),
}

impl ReviewError {
    pub fn appointment_not_found(id: AppointmentId) -> Self {
        ReviewError::AppointmentNotFound(id)
    }

    pub fn not_completed(current: impl Into<String>) -> Self {
        ReviewError::NotCompleted {
            current: current.into(),
        }
    }

    pub fn already_reviewed(id: AppointmentId) -> Self {
        ReviewError::AlreadyReviewed(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ReviewError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ReviewError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ReviewError::AppointmentNotFound(_) => ErrorCode::AppointmentNotFound,
            ReviewError::NotYourAppointment => ErrorCode::Forbidden,
            ReviewError::NotCompleted { .. } => ErrorCode::InvalidStateTransition,
            ReviewError::AlreadyReviewed(_) => ErrorCode::AlreadyReviewed,
            ReviewError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ReviewError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            ReviewError::AppointmentNotFound(id) => format!("Appointment not found: {}", id),
            ReviewError::NotYourAppointment => {
                "You can only review your own appointments".to_string()
            }
            ReviewError::NotCompleted { current } => {
                format!("Only completed appointments can be reviewed, status is {}", current)
            }
            ReviewError::AlreadyReviewed(id) => {
                format!("Appointment {} has already been reviewed", id)
            }
            ReviewError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            ReviewError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ReviewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ReviewError {}

impl From<ReviewError> for DomainError {
    fn from(err: ReviewError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
