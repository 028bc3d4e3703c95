//! Appointment-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | ProviderUnavailable | 404 |
//! | NotOwner | 403 |
//! | InvalidState | 409 |
//! | SlotTaken | 409 |
//! | NotYetOccurred | 409 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{AppointmentId, DomainError, ErrorCode, Timestamp, UserId};

/// Appointment-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppointmentError {
    /// Appointment was not found.
    NotFound(AppointmentId),

    /// Target provider does not exist, is not a provider, or is not active.
    ProviderUnavailable(UserId),

    /// The caller does not own this appointment.
    NotOwner,

    /// The appointment is not in a status that allows the operation.
    InvalidState {
        current: String,
        attempted: String,
    },

    /// The requested time range overlaps an existing booking.
    SlotTaken {
        provider_id: UserId,
        starts_at: Timestamp,
    },

    /// The appointment has not started yet, so it cannot be completed.
    NotYetOccurred(AppointmentId),

    /// Validation failed.
    ValidationFailed {
        field: String,
        message: String,
    },

    /// Infrastructure error.
    Infrastructure(String),
}

impl AppointmentError {
    pub fn not_found(id: AppointmentId) -> Self {
        AppointmentError::NotFound(id)
    }

    pub fn provider_unavailable(provider_id: UserId) -> Self {
        AppointmentError::ProviderUnavailable(provider_id)
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        AppointmentError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn slot_taken(provider_id: UserId, starts_at: Timestamp) -> Self {
        AppointmentError::SlotTaken {
            provider_id,
            starts_at,
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppointmentError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        AppointmentError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AppointmentError::NotFound(_) => ErrorCode::AppointmentNotFound,
            AppointmentError::ProviderUnavailable(_) => ErrorCode::ProviderNotFound,
            AppointmentError::NotOwner => ErrorCode::Forbidden,
            AppointmentError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            AppointmentError::SlotTaken { .. } => ErrorCode::SlotUnavailable,
            AppointmentError::NotYetOccurred(_) => ErrorCode::NotYetOccurred,
            AppointmentError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            AppointmentError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            AppointmentError::NotFound(id) => format!("Appointment not found: {}", id),
            AppointmentError::ProviderUnavailable(id) => {
                format!("Provider {} is invalid or not available", id)
            }
            AppointmentError::NotOwner => "This appointment does not belong to you".to_string(),
            AppointmentError::InvalidState { current, attempted } => {
                format!("Cannot {} an appointment in status {}", attempted, current)
            }
            AppointmentError::SlotTaken { provider_id, .. } => {
                format!("The requested time is not available for provider {}", provider_id)
            }
            AppointmentError::NotYetOccurred(_) => {
                "This appointment has not occurred yet".to_string()
            }
            AppointmentError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            AppointmentError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for AppointmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AppointmentError {}

impl From<DomainError> for AppointmentError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => AppointmentError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => AppointmentError::Infrastructure(err.to_string()),
        }
    }
}

impl From<AppointmentError> for DomainError {
    fn from(err: AppointmentError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_appointment_id() -> AppointmentId {
        AppointmentId::new()
    }

    fn test_user_id() -> UserId {
        UserId::new("user-test-123").unwrap()
    }

    #[test]
    fn not_found_carries_appointment_not_found_code() {
        let id = test_appointment_id();
        let err = AppointmentError::not_found(id);
        assert_eq!(err.code(), ErrorCode::AppointmentNotFound);
        assert!(err.message().contains(&id.to_string()));
    }

    #[test]
    fn provider_unavailable_maps_to_provider_not_found() {
        let err = AppointmentError::provider_unavailable(test_user_id());
        assert_eq!(err.code(), ErrorCode::ProviderNotFound);
    }

    #[test]
    fn not_owner_maps_to_forbidden() {
        assert_eq!(AppointmentError::NotOwner.code(), ErrorCode::Forbidden);
    }

    #[test]
    fn invalid_state_message_includes_current_status() {
        let err = AppointmentError::invalid_state("CONFIRMADO", "refuse");
        assert_eq!(err.code(), ErrorCode::InvalidStateTransition);
        assert!(err.message().contains("CONFIRMADO"));
        assert!(err.message().contains("refuse"));
    }

    #[test]
    fn slot_taken_maps_to_slot_unavailable() {
        let err = AppointmentError::slot_taken(test_user_id(), Timestamp::now());
        assert_eq!(err.code(), ErrorCode::SlotUnavailable);
    }

    #[test]
    fn validation_carries_field_and_message() {
        let err = AppointmentError::validation("duration_min", "must be positive");
        let msg = err.message();
        assert!(msg.contains("duration_min"));
        assert!(msg.contains("must be positive"));
    }

    #[test]
    fn display_matches_message() {
        let err = AppointmentError::infrastructure("connection lost");
        assert_eq!(format!("{}", err), err.message());
    }

    #[test]
    fn converts_to_domain_error() {
        let err = AppointmentError::not_found(test_appointment_id());
        let domain_err: DomainError = err.clone().into();
        assert_eq!(domain_err.code, err.code());
    }
}
