//! User roles and account statuses, as provided by the user directory.
//!
//! The directory itself is an external collaborator; the scheduling core
//! only consumes these values for authorization decisions. Wire values
//! keep the platform's canonical constants (CLIENTE, ATIVO, ...).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::UserId;

/// Role of a platform user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// End user who books appointments.
    Cliente,

    /// Service professional who accepts appointments.
    Atendente,

    /// Operator with override authority over any appointment.
    Admin,
}

impl UserRole {
    /// Returns true if this role can provide appointments.
    pub fn is_provider(&self) -> bool {
        matches!(self, UserRole::Atendente)
    }

    /// Returns the wire constant for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Cliente => "CLIENTE",
            UserRole::Atendente => "ATENDENTE",
            UserRole::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Account status of a platform user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Ativo,
    PendenteAprovacao,
    Bloqueado,
    Inativo,
}

impl AccountStatus {
    /// Returns true if the account may participate in scheduling.
    pub fn is_active(&self) -> bool {
        matches!(self, AccountStatus::Ativo)
    }

    /// Returns the wire constant for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Ativo => "ATIVO",
            AccountStatus::PendenteAprovacao => "PENDENTE_APROVACAO",
            AccountStatus::Bloqueado => "BLOQUEADO",
            AccountStatus::Inativo => "INATIVO",
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Directory view of a user, as returned by the `UserDirectory` port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub role: UserRole,
    pub status: AccountStatus,
    pub name: String,
}

impl UserSummary {
    /// Returns true if this user is a provider able to accept bookings.
    pub fn is_active_provider(&self) -> bool {
        self.role.is_provider() && self.status.is_active()
    }
}
