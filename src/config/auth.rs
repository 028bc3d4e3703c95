//! Authentication configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Authentication configuration (bearer token validation)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret for HS256 token validation
    pub token_secret: String,
}

impl AuthConfig {
    /// Validate authentication configuration
    ///
    /// Production requires a secret of at least 32 bytes.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.token_secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH_TOKEN_SECRET"));
        }
        if *environment == Environment::Production && self.token_secret.len() < 32 {
            return Err(ValidationError::TokenSecretTooShort);
        }
        Ok(())
    }
}
