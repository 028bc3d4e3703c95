//! Appointment modality.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the appointment is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Modality {
    Online,
    Presencial,
}

impl Modality {
    /// Returns the wire constant for this modality.
    pub fn as_str(&self) -> &'static str {
        match self {
            Modality::Online => "ONLINE",
            Modality::Presencial => "PRESENCIAL",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
