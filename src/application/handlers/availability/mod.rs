//! Availability handlers.

mod compute_availability;

pub use compute_availability::{
    ComputeAvailabilityHandler, ComputeAvailabilityQuery, ComputeAvailabilityResult,
};
