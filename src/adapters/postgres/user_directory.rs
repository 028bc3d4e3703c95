//! PostgreSQL implementation of UserDirectory.
//!
//! Reads the platform's user table. Registration and profile management
//! happen elsewhere; this adapter only answers identity, role, and
//! status lookups for the scheduling core.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    AccountStatus, DomainError, ErrorCode, UserId, UserRole, UserSummary,
};
use crate::ports::UserDirectory;

use super::{db_error, parse_user_uuid, user_id_from_uuid};

/// PostgreSQL implementation of the UserDirectory port.
pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    /// Creates a new PostgresUserDirectory with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    role: String,
    status: String,
    name: String,
}

fn parse_role(s: &str) -> Result<UserRole, DomainError> {
    match s {
        "CLIENTE" => Ok(UserRole::Cliente),
        "ATENDENTE" => Ok(UserRole::Atendente),
        "ADMIN" => Ok(UserRole::Admin),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid role value: {}", s),
        )),
    }
}

fn parse_account_status(s: &str) -> Result<AccountStatus, DomainError> {
    match s {
        "ATIVO" => Ok(AccountStatus::Ativo),
        "PENDENTE_APROVACAO" => Ok(AccountStatus::PendenteAprovacao),
        "BLOQUEADO" => Ok(AccountStatus::Bloqueado),
        "INATIVO" => Ok(AccountStatus::Inativo),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid account status value: {}", s),
        )),
    }
}

impl TryFrom<UserRow> for UserSummary {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(UserSummary {
            id: user_id_from_uuid(row.id)?,
            role: parse_role(&row.role)?,
            status: parse_account_status(&row.status)?,
            name: row.name,
        })
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn find_user(&self, id: &UserId) -> Result<Option<UserSummary>, DomainError> {
        let uuid = match parse_user_uuid(id) {
            Ok(uuid) => uuid,
            // A non-UUID id cannot exist in the directory.
            Err(_) => return Ok(None),
        };

        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, role, status, name
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load user", e))?;

        row.map(UserSummary::try_from).transpose()
    }

    async fn is_active_provider(&self, id: &UserId) -> Result<bool, DomainError> {
        Ok(self
            .find_user(id)
            .await?
            .map(|u| u.is_active_provider())
            .unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_values_parse() {
        assert_eq!(parse_role("CLIENTE").unwrap(), UserRole::Cliente);
        assert_eq!(parse_role("ATENDENTE").unwrap(), UserRole::Atendente);
        assert_eq!(parse_role("ADMIN").unwrap(), UserRole::Admin);
        assert!(parse_role("GERENTE").is_err());
    }

    #[test]
    fn account_status_values_parse() {
        assert_eq!(parse_account_status("ATIVO").unwrap(), AccountStatus::Ativo);
        assert_eq!(
            parse_account_status("PENDENTE_APROVACAO").unwrap(),
            AccountStatus::PendenteAprovacao
        );
        assert!(parse_account_status("SUSPENSO").is_err());
    }
}
