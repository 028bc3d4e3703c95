//! Slot computation for a provider's day.
//!
//! Pure functions over working hours and existing bookings; all I/O stays
//! in the availability handler. Times are UTC throughout.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use crate::domain::foundation::Timestamp;

use super::WorkingHours;

/// A booked interval, half-open `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccupiedInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl OccupiedInterval {
    /// Builds the interval from an appointment start and duration.
    pub fn new(starts_at: Timestamp, duration_min: u32) -> Self {
        let start = *starts_at.as_datetime();
        Self {
            start,
            end: start + Duration::minutes(duration_min as i64),
        }
    }

    /// Half-open overlap test against a candidate `[start, end)`.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start.max(start) < self.end.min(end)
    }
}

/// Computes the bookable slot start times for one provider day.
///
/// Walks each working window in steps of the configured slot length; a
/// candidate survives when it fits entirely inside its window, is not in
/// the past (when `date` is today), and overlaps no occupied interval.
/// The result is chronological by construction.
pub fn available_slots(
    hours: &WorkingHours,
    date: NaiveDate,
    now: Timestamp,
    occupied: &[OccupiedInterval],
) -> Vec<NaiveTime> {
    let slot_len = Duration::minutes(hours.slot_minutes() as i64);
    let now = *now.as_datetime();
    let mut slots = Vec::new();

    for shift in hours.shifts() {
        let shift_end = date.and_time(shift.end).and_utc();
        let mut candidate = date.and_time(shift.start).and_utc();

        while candidate + slot_len <= shift_end {
            if candidate < now && date == now.date_naive() {
                candidate += slot_len;
                continue;
            }

            let candidate_end = candidate + slot_len;
            let taken = occupied
                .iter()
                .any(|occ| occ.overlaps(candidate, candidate_end));
            if !taken {
                slots.push(candidate.time());
            }

            candidate += slot_len;
        }
    }

    slots
}
