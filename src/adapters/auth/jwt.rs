//! JWT implementation of SessionValidator.
//!
//! Validates HS256 bearer tokens issued by the platform's auth service.
//! Token issuance and credential storage live outside this service; this
//! adapter only verifies signatures and reads the claims the scheduling
//! core needs.

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId, UserRole};
use crate::ports::SessionValidator;

/// Claims expected in a platform token.
#[derive(Debug, Deserialize)]
struct Claims {
    /// User id.
    sub: String,

    /// Platform role (CLIENTE, ATENDENTE, ADMIN).
    role: UserRole,

    /// Display name, if the issuer includes one.
    name: Option<String>,

    /// Expiry, validated by the jsonwebtoken crate.
    #[allow(dead_code)]
    exp: usize,
}

/// JWT-backed implementation of the SessionValidator port.
pub struct JwtSessionValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtSessionValidator {
    /// Creates a validator for HS256 tokens signed with the given secret.
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            }
        })?;

        let id = UserId::new(data.claims.sub).map_err(|_| AuthError::InvalidToken)?;
        Ok(AuthenticatedUser::new(id, data.claims.role, data.claims.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;

    const SECRET: &str = "test-secret-for-unit-tests";

    #[derive(Serialize)]
    struct TestClaims {
        sub: String,
        role: UserRole,
        name: Option<String>,
        exp: usize,
    }

    fn token_for(sub: &str, role: UserRole, exp_offset_secs: i64) -> String {
        let exp = (chrono::Utc::now().timestamp() + exp_offset_secs) as usize;
        encode(
            &Header::default(),
            &TestClaims {
                sub: sub.to_string(),
                role,
                name: Some("Teste".to_string()),
                exp,
            },
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn valid_token_resolves_user_and_role() {
        let validator = JwtSessionValidator::new(SECRET);
        let token = token_for("user-1", UserRole::Atendente, 3600);

        let user = validator.validate(&token).await.unwrap();
        assert_eq!(user.id.as_str(), "user-1");
        assert_eq!(user.role, UserRole::Atendente);
        assert_eq!(user.display_name, Some("Teste".to_string()));
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let validator = JwtSessionValidator::new(SECRET);
        let token = token_for("user-1", UserRole::Cliente, -3600);

        let result = validator.validate(&token).await;
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[tokio::test]
    async fn wrong_secret_is_rejected() {
        let validator = JwtSessionValidator::new("another-secret");
        let token = token_for("user-1", UserRole::Cliente, 3600);

        let result = validator.validate(&token).await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let validator = JwtSessionValidator::new(SECRET);
        let result = validator.validate("not-a-jwt").await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }
}
