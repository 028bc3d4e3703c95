//! Session validator port.
//!
//! Validates bearer tokens at the HTTP edge and resolves them to an
//! authenticated user. Token issuance, password hashing, and credential
//! storage belong to the surrounding platform.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Port for bearer token validation.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a token and return the caller it identifies.
    ///
    /// # Errors
    ///
    /// - `InvalidToken` / `TokenExpired` when the token cannot be trusted
    /// - `ServiceUnavailable` when validation infrastructure is down
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
