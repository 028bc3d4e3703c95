//! Request/response DTOs for availability endpoints.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Query string for `GET /api/providers/{id}/availability`.
#[derive(Debug, Deserialize)]
pub struct AvailabilityParams {
    /// Calendar date, `YYYY-MM-DD`. Parsed by hand so a malformed value
    /// yields a field-specific 400.
    pub date: String,
}

/// Slot list for one provider day, `HH:MM` strings in chronological order.
#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub slots: Vec<String>,
}

impl AvailabilityResponse {
    pub fn from_times(times: Vec<NaiveTime>) -> Self {
        Self {
            slots: times.iter().map(|t| t.format("%H:%M").to_string()).collect(),
        }
    }
}
