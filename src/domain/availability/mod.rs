//! Availability module - slot computation from working hours and bookings.

mod calculator;
mod working_hours;

pub use calculator::{available_slots, OccupiedInterval};
pub use working_hours::{WorkShift, WorkingHours};
