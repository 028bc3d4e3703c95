//! Authentication types for the domain layer.
//!
//! These types represent an authenticated caller extracted from a bearer
//! token. They have no provider dependencies - any token backend can
//! populate them via the `SessionValidator` port.

use thiserror::Error;

use super::{UserId, UserRole};

/// Authenticated caller extracted from a validated token.
///
/// Populated by the `SessionValidator` adapter; handlers use the role for
/// coarse gating and the id for ownership checks.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The unique user identifier from the directory.
    pub id: UserId,

    /// The caller's platform role.
    pub role: UserRole,

    /// Display name if the token carried one.
    pub display_name: Option<String>,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId, role: UserRole, display_name: Option<String>) -> Self {
        Self {
            id,
            role,
            display_name,
        }
    }

    /// Returns the display name, or the user id as fallback.
    pub fn display_name_or_id(&self) -> &str {
        self.display_name.as_deref().unwrap_or_else(|| self.id.as_str())
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired (separate from InvalidToken for specific handling).
    #[error("Token expired")]
    TokenExpired,

    /// Token is valid but the user no longer exists in the directory.
    #[error("User not found")]
    UserNotFound,

    /// The authentication service is unavailable (network, config, etc.).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the caller should re-authenticate.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidToken | AuthError::TokenExpired | AuthError::UserNotFound
        )
    }
}
