//! PostgreSQL adapters.
//!
//! sqlx-backed implementations of the persistence ports, plus the shared
//! enum/id mapping helpers they use.

mod appointment_reader;
mod appointment_store;
mod review_store;
mod user_directory;
mod working_hours;

pub use appointment_reader::PostgresAppointmentReader;
pub use appointment_store::PostgresAppointmentStore;
pub use review_store::PostgresReviewStore;
pub use user_directory::PostgresUserDirectory;
pub use working_hours::PostgresWorkingHours;

use uuid::Uuid;

use crate::domain::appointment::{AppointmentStatus, Modality};
use crate::domain::foundation::{DomainError, ErrorCode, UserId};

pub(crate) fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

/// User ids are UUIDs in the platform database.
pub(crate) fn parse_user_uuid(user_id: &UserId) -> Result<Uuid, DomainError> {
    Uuid::parse_str(user_id.as_str()).map_err(|e| {
        DomainError::new(
            ErrorCode::ValidationFailed,
            format!("User ID must be a valid UUID: {}", e),
        )
    })
}

pub(crate) fn user_id_from_uuid(uuid: Uuid) -> Result<UserId, DomainError> {
    UserId::new(uuid.to_string())
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("Invalid user id: {}", e)))
}

pub(crate) fn parse_status(s: &str) -> Result<AppointmentStatus, DomainError> {
    match s {
        "SOLICITADO" => Ok(AppointmentStatus::Solicitado),
        "CONFIRMADO" => Ok(AppointmentStatus::Confirmado),
        "REALIZADO" => Ok(AppointmentStatus::Realizado),
        "CANCELADO_CLIENTE" => Ok(AppointmentStatus::CanceladoCliente),
        "CANCELADO_ATENDENTE" => Ok(AppointmentStatus::CanceladoAtendente),
        "CANCELADO_ADMIN" => Ok(AppointmentStatus::CanceladoAdmin),
        "NAO_COMPARECEU_CLIENTE" => Ok(AppointmentStatus::NaoCompareceuCliente),
        "NAO_COMPARECEU_ATENDENTE" => Ok(AppointmentStatus::NaoCompareceuAtendente),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid status value: {}", s),
        )),
    }
}

pub(crate) fn parse_modality(s: &str) -> Result<Modality, DomainError> {
    match s {
        "ONLINE" => Ok(Modality::Online),
        "PRESENCIAL" => Ok(Modality::Presencial),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid modality value: {}", s),
        )),
    }
}
