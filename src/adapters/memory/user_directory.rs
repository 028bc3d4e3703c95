//! In-memory implementation of UserDirectory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::foundation::{DomainError, UserId, UserSummary};
use crate::ports::UserDirectory;

/// In-memory implementation of the UserDirectory port.
#[derive(Default)]
pub struct InMemoryUserDirectory {
    users: Mutex<HashMap<UserId, UserSummary>>,
}

impl InMemoryUserDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces a user.
    pub fn insert(&self, user: UserSummary) {
        self.users.lock().unwrap().insert(user.id.clone(), user);
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_user(&self, id: &UserId) -> Result<Option<UserSummary>, DomainError> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn is_active_provider(&self, id: &UserId) -> Result<bool, DomainError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .get(id)
            .map(|u| u.is_active_provider())
            .unwrap_or(false))
    }
}
