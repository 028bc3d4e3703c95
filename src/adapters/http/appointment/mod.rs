//! HTTP adapter for appointment endpoints.
//!
//! - `POST /api/appointments` - request an appointment (client)
//! - `GET  /api/appointments` - list own appointments (any role)
//! - `POST /api/appointments/{id}/confirm` - confirm (provider)
//! - `POST /api/appointments/{id}/refuse` - refuse with reason (provider)
//! - `POST /api/appointments/{id}/cancel-by-client` - cancel (client)
//! - `POST /api/appointments/{id}/cancel-by-admin` - force-cancel (admin)
//! - `POST /api/appointments/{id}/mark-completed` - complete (provider)
//! - `PUT  /api/appointments/{id}/notes` - update notes (provider)

pub mod dto;
mod routes;

pub use routes::routes;
