//! Axum router and handlers for availability endpoints.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;

use crate::adapters::http::{ApiError, AppState};
use crate::application::handlers::availability::{
    ComputeAvailabilityHandler, ComputeAvailabilityQuery,
};
use crate::domain::foundation::UserId;

use super::dto::{AvailabilityParams, AvailabilityResponse};

/// Create the provider availability router. Public, no authentication.
pub fn routes() -> Router<AppState> {
    Router::new().route("/:id/availability", get(get_availability))
}

async fn get_availability(
    State(state): State<AppState>,
    Path(provider_id): Path<String>,
    Query(params): Query<AvailabilityParams>,
) -> Result<Json<AvailabilityResponse>, ApiError> {
    let date: NaiveDate = params
        .date
        .parse()
        .map_err(|_| ApiError::invalid_input("Invalid date format, use YYYY-MM-DD"))?;
    let provider_id =
        UserId::new(provider_id).map_err(|e| ApiError::invalid_input(e.to_string()))?;

    let handler = ComputeAvailabilityHandler::new(
        state.working_hours.clone(),
        state.appointment_store.clone(),
    );
    let result = handler
        .handle(ComputeAvailabilityQuery { provider_id, date })
        .await?;

    Ok(Json(AvailabilityResponse::from_times(result.slots)))
}
