//! Working hours port.
//!
//! Supplies each provider's schedule configuration to the availability
//! calculator. Providers without explicit configuration get the two-shift
//! template through `WorkingHours::default_template()`.

use async_trait::async_trait;

use crate::domain::availability::WorkingHours;
use crate::domain::foundation::{DomainError, UserId};

/// Port for per-provider schedule configuration.
#[async_trait]
pub trait WorkingHoursProvider: Send + Sync {
    /// The schedule configured for a provider.
    ///
    /// Returns `None` when the provider is unknown to the schedule
    /// configuration, which callers surface as NotFound.
    async fn for_provider(&self, provider_id: &UserId)
        -> Result<Option<WorkingHours>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn working_hours_provider_is_object_safe() {
        fn _accepts_dyn(_provider: &dyn WorkingHoursProvider) {}
    }
}
