//! Appointment status state machine.
//!
//! Defines all appointment lifecycle states and the valid transitions
//! between them. Wire values keep the platform's canonical constants
//! (SOLICITADO, CONFIRMADO, ...).

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an appointment.
///
/// The happy path is Solicitado -> Confirmado -> Realizado. Every other
/// reachable state is terminal. The two no-show states are reserved for
/// attendance tracking and have no inbound transition yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    /// Requested by the client, awaiting the provider's decision.
    Solicitado,

    /// Accepted by the provider.
    Confirmado,

    /// Took place and was marked completed by the provider.
    Realizado,

    /// Cancelled by the client while still pending or confirmed.
    CanceladoCliente,

    /// Refused by the provider while pending.
    CanceladoAtendente,

    /// Force-cancelled by an administrator.
    CanceladoAdmin,

    /// Client did not show up.
    NaoCompareceuCliente,

    /// Provider did not show up.
    NaoCompareceuAtendente,
}

impl AppointmentStatus {
    /// Returns true if an appointment in this status occupies its time
    /// slot for availability purposes.
    pub fn occupies_slot(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Solicitado | AppointmentStatus::Confirmado
        )
    }

    /// Returns the wire constant for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Solicitado => "SOLICITADO",
            AppointmentStatus::Confirmado => "CONFIRMADO",
            AppointmentStatus::Realizado => "REALIZADO",
            AppointmentStatus::CanceladoCliente => "CANCELADO_CLIENTE",
            AppointmentStatus::CanceladoAtendente => "CANCELADO_ATENDENTE",
            AppointmentStatus::CanceladoAdmin => "CANCELADO_ADMIN",
            AppointmentStatus::NaoCompareceuCliente => "NAO_COMPARECEU_CLIENTE",
            AppointmentStatus::NaoCompareceuAtendente => "NAO_COMPARECEU_ATENDENTE",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl StateMachine for AppointmentStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use AppointmentStatus::*;
        matches!(
            (self, target),
            // From SOLICITADO
            (Solicitado, Confirmado)
                | (Solicitado, CanceladoCliente)
                | (Solicitado, CanceladoAtendente)
                | (Solicitado, CanceladoAdmin)
            // From CONFIRMADO
                | (Confirmado, Realizado)
                | (Confirmado, CanceladoCliente)
                | (Confirmado, CanceladoAdmin)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use AppointmentStatus::*;
        match self {
            Solicitado => vec![
                Confirmado,
                CanceladoCliente,
                CanceladoAtendente,
                CanceladoAdmin,
            ],
            Confirmado => vec![Realizado, CanceladoCliente, CanceladoAdmin],
            Realizado
            | CanceladoCliente
            | CanceladoAtendente
            | CanceladoAdmin
            | NaoCompareceuCliente
            | NaoCompareceuAtendente => vec![],
        }
    }
}
