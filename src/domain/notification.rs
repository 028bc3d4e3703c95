//! Notification records produced by appointment lifecycle transitions.
//!
//! The core decides what to send and to whom; delivery mechanics belong
//! to the surrounding platform. Records are persisted in the same
//! transaction as the mutation that produced them, so a status change and
//! its notification either both exist or neither does.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::foundation::{NotificationId, Timestamp, UserId};

/// Kind of a lifecycle notification. Wire values keep the platform's
/// canonical constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    NovoAgendamentoSolicitado,
    AgendamentoConfirmado,
    AgendamentoCancelado,
    AgendamentoCanceladoAdmin,
}

impl NotificationKind {
    /// Returns the wire constant for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::NovoAgendamentoSolicitado => "NOVO_AGENDAMENTO_SOLICITADO",
            NotificationKind::AgendamentoConfirmado => "AGENDAMENTO_CONFIRMADO",
            NotificationKind::AgendamentoCancelado => "AGENDAMENTO_CANCELADO",
            NotificationKind::AgendamentoCanceladoAdmin => "AGENDAMENTO_CANCELADO_ADMIN",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A notification addressed to a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub recipient_id: UserId,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub reference_link: Option<String>,
    pub read: bool,
    pub created_at: Timestamp,
}

impl Notification {
    /// Creates a new unread notification.
    pub fn new(
        recipient_id: UserId,
        title: impl Into<String>,
        message: impl Into<String>,
        kind: NotificationKind,
        reference_link: Option<String>,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            recipient_id,
            title: title.into(),
            message: message.into(),
            kind,
            reference_link,
            read: false,
            created_at: Timestamp::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_notification_starts_unread() {
        let n = Notification::new(
            UserId::new("user-1").unwrap(),
            "Agendamento Confirmado!",
            "Seu agendamento foi confirmado.",
            NotificationKind::AgendamentoConfirmado,
            Some("/cliente/meus-agendamentos".to_string()),
        );
        assert!(!n.read);
        assert_eq!(n.kind, NotificationKind::AgendamentoConfirmado);
    }

    #[test]
    fn kinds_serialize_to_wire_constants() {
        assert_eq!(
            serde_json::to_string(&NotificationKind::NovoAgendamentoSolicitado).unwrap(),
            "\"NOVO_AGENDAMENTO_SOLICITADO\""
        );
        assert_eq!(
            serde_json::to_string(&NotificationKind::AgendamentoCanceladoAdmin).unwrap(),
            "\"AGENDAMENTO_CANCELADO_ADMIN\""
        );
    }

    #[test]
    fn notification_ids_are_unique() {
        let recipient = UserId::new("user-1").unwrap();
        let a = Notification::new(
            recipient.clone(),
            "t",
            "m",
            NotificationKind::AgendamentoCancelado,
            None,
        );
        let b = Notification::new(recipient, "t", "m", NotificationKind::AgendamentoCancelado, None);
        assert_ne!(a.id, b.id);
    }
}
