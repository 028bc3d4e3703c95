//! Agendou - Appointment scheduling platform.
//!
//! Connects clients (CLIENTE) with service providers (ATENDENTE) under
//! administrator (ADMIN) moderation: availability computation, the
//! appointment lifecycle state machine, and post-appointment reviews.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
