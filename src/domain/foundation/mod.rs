//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the Agendou domain.

mod auth;
mod errors;
mod ids;
mod roles;
mod score;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AppointmentId, NotificationId, ReviewId, UserId};
pub use roles::{AccountStatus, UserRole, UserSummary};
pub use score::Score;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
