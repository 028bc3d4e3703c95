//! User directory port.
//!
//! The user directory (registration, profiles, credentials) is owned by
//! the surrounding platform; the scheduling core only consumes identity,
//! role, and account status through this port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId, UserSummary};

/// Directory port for identity and role lookups.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find a user by id.
    ///
    /// Returns `None` if no such user exists.
    async fn find_user(&self, id: &UserId) -> Result<Option<UserSummary>, DomainError>;

    /// Returns true if the user exists, is an ATENDENTE, and is ATIVO.
    async fn is_active_provider(&self, id: &UserId) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_directory_is_object_safe() {
        fn _accepts_dyn(_directory: &dyn UserDirectory) {}
    }
}
