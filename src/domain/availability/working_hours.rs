//! Per-provider working hours configuration.
//!
//! Providers without an explicit schedule fall back to the platform's
//! two-shift template: [08:00, 12:00) and [14:00, 18:00).

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Default appointment length in minutes when the provider set none.
pub const FALLBACK_SLOT_MINUTES: u32 = 60;

/// One contiguous working window within a day, half-open `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkShift {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl WorkShift {
    /// Creates a shift, returning error unless `start < end`.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, ValidationError> {
        if start >= end {
            return Err(ValidationError::invalid_format(
                "work_shift",
                format!("Shift start {} must be before end {}", start, end),
            ));
        }
        Ok(Self { start, end })
    }
}

/// A provider's schedule: default slot length plus daily working windows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    default_duration_min: Option<u32>,
    shifts: Vec<WorkShift>,
}

impl WorkingHours {
    /// Creates a schedule from an explicit duration and shift list.
    pub fn new(default_duration_min: Option<u32>, shifts: Vec<WorkShift>) -> Self {
        Self {
            default_duration_min,
            shifts,
        }
    }

    /// The platform's two-shift template with no explicit duration.
    pub fn default_template() -> Self {
        let morning = WorkShift::new(
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        )
        .unwrap();
        let afternoon = WorkShift::new(
            NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        )
        .unwrap();
        Self::new(None, vec![morning, afternoon])
    }

    /// Template schedule with the given default duration.
    pub fn template_with_duration(default_duration_min: u32) -> Self {
        let mut hours = Self::default_template();
        hours.default_duration_min = Some(default_duration_min);
        hours
    }

    /// Slot length in minutes, falling back to 60 when unset or zero.
    pub fn slot_minutes(&self) -> u32 {
        match self.default_duration_min {
            Some(min) if min > 0 => min,
            _ => FALLBACK_SLOT_MINUTES,
        }
    }

    /// The daily working windows, in declaration order.
    pub fn shifts(&self) -> &[WorkShift] {
        &self.shifts
    }
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self::default_template()
    }
}
