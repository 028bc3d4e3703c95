//! HTTP adapter - axum routers, DTOs, and middleware.
//!
//! Exposes the scheduling core as a REST API:
//! - `/api/appointments` - lifecycle operations and listings
//! - `/api/providers/{id}/availability` - public slot computation
//! - `/api/reviews` - post-appointment reviews

pub mod appointment;
pub mod availability;
pub mod middleware;
pub mod review;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};

use crate::domain::appointment::AppointmentError;
use crate::domain::foundation::ErrorCode;
use crate::domain::review::ReviewError;
use crate::ports::{
    AppointmentReader, AppointmentStore, ReviewStore, SessionValidator, UserDirectory,
    WorkingHoursProvider,
};

/// Shared application state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub appointment_store: Arc<dyn AppointmentStore>,
    pub appointment_reader: Arc<dyn AppointmentReader>,
    pub review_store: Arc<dyn ReviewStore>,
    pub user_directory: Arc<dyn UserDirectory>,
    pub working_hours: Arc<dyn WorkingHoursProvider>,
}

/// Builds the complete API router.
///
/// The auth middleware validates bearer tokens for every route and lets
/// anonymous requests through; individual handlers decide whether they
/// require an authenticated caller.
pub fn api_router(state: AppState, validator: Arc<dyn SessionValidator>) -> Router {
    Router::new()
        .nest("/api/appointments", appointment::routes())
        .nest("/api/providers", availability::routes())
        .nest("/api/reviews", review::routes())
        .layer(axum::middleware::from_fn_with_state(
            validator,
            middleware::auth_middleware,
        ))
        .with_state(state)
}

/// Error payload returned by every failing endpoint.
#[derive(Debug)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// 403 with a fixed message, for role gate failures.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// 400 with a field-specific message.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }
}

impl From<AppointmentError> for ApiError {
    fn from(err: AppointmentError) -> Self {
        Self::new(err.code(), err.message())
    }
}

impl From<ReviewError> for ApiError {
    fn from(err: ReviewError) -> Self {
        Self::new(err.code(), err.message())
    }
}

/// Maps domain error codes to HTTP status codes.
fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed
        | ErrorCode::EmptyField
        | ErrorCode::OutOfRange
        | ErrorCode::InvalidFormat => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::AppointmentNotFound
        | ErrorCode::ProviderNotFound
        | ErrorCode::UserNotFound
        | ErrorCode::ReviewNotFound => StatusCode::NOT_FOUND,
        ErrorCode::InvalidStateTransition
        | ErrorCode::SlotUnavailable
        | ErrorCode::AlreadyReviewed
        | ErrorCode::NotYetOccurred => StatusCode::CONFLICT,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(self.code);
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(code = %self.code, message = %self.message, "request failed");
        }
        (
            status,
            Json(serde_json::json!({
                "error": self.message,
                "code": self.code.to_string(),
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{AppointmentId, Timestamp, UserId};

    #[test]
    fn conflict_codes_map_to_409() {
        assert_eq!(status_for(ErrorCode::SlotUnavailable), StatusCode::CONFLICT);
        assert_eq!(status_for(ErrorCode::AlreadyReviewed), StatusCode::CONFLICT);
        assert_eq!(
            status_for(ErrorCode::InvalidStateTransition),
            StatusCode::CONFLICT
        );
        assert_eq!(status_for(ErrorCode::NotYetOccurred), StatusCode::CONFLICT);
    }

    #[test]
    fn not_found_codes_map_to_404() {
        assert_eq!(
            status_for(ErrorCode::AppointmentNotFound),
            StatusCode::NOT_FOUND
        );
        assert_eq!(status_for(ErrorCode::ProviderNotFound), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_codes_map_to_400() {
        assert_eq!(status_for(ErrorCode::ValidationFailed), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorCode::OutOfRange), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn authorization_codes_map_to_401_and_403() {
        assert_eq!(status_for(ErrorCode::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(ErrorCode::Forbidden), StatusCode::FORBIDDEN);
    }

    #[test]
    fn appointment_errors_convert_with_their_code() {
        let err: ApiError = AppointmentError::not_found(AppointmentId::new()).into();
        assert_eq!(err.code, ErrorCode::AppointmentNotFound);

        let err: ApiError = AppointmentError::slot_taken(
            UserId::new("p-1").unwrap(),
            Timestamp::now(),
        )
        .into();
        assert_eq!(err.code, ErrorCode::SlotUnavailable);
    }

    #[test]
    fn review_errors_convert_with_their_code() {
        let err: ApiError = ReviewError::NotYourAppointment.into();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }
}
