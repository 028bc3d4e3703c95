//! Mock implementation of SessionValidator for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::SessionValidator;

/// Mock implementation of the SessionValidator port.
///
/// Maps literal tokens to users; anything unregistered is invalid.
#[derive(Default)]
pub struct MockSessionValidator {
    users: Mutex<HashMap<String, AuthenticatedUser>>,
}

impl MockSessionValidator {
    /// Creates an empty validator that rejects every token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a token for a user, builder-style.
    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.users.lock().unwrap().insert(token.into(), user);
        self
    }

    /// Registers a token for a user on an existing validator.
    pub fn insert(&self, token: impl Into<String>, user: AuthenticatedUser) {
        self.users.lock().unwrap().insert(token.into(), user);
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        self.users
            .lock()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{UserId, UserRole};

    fn test_user() -> AuthenticatedUser {
        AuthenticatedUser::new(
            UserId::new("user-123").unwrap(),
            UserRole::Cliente,
            Some("Test User".to_string()),
        )
    }

    #[tokio::test]
    async fn registered_token_validates() {
        let validator = MockSessionValidator::new().with_user("valid-token", test_user());

        let user = validator.validate("valid-token").await.unwrap();
        assert_eq!(user.id.as_str(), "user-123");
    }

    #[tokio::test]
    async fn unregistered_token_is_invalid() {
        let validator = MockSessionValidator::new();
        let result = validator.validate("unknown").await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }
}
