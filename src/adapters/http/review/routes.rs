//! Axum router and handlers for review endpoints.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};

use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::{ApiError, AppState};
use crate::application::handlers::review::{SubmitReviewCommand, SubmitReviewHandler};
use crate::domain::foundation::UserRole;

use super::dto::{CreateReviewRequest, CreateReviewResponse};

/// Create the review API router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", post(create_review))
}

async fn create_review(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<CreateReviewResponse>), ApiError> {
    if user.role != UserRole::Cliente {
        return Err(ApiError::forbidden(
            "Only clients can review appointments",
        ));
    }

    let handler = SubmitReviewHandler::new(
        state.appointment_store.clone(),
        state.review_store.clone(),
    );
    let result = handler
        .handle(SubmitReviewCommand {
            rater_id: user.id,
            appointment_id: body.appointment_id,
            score: body.score,
            comment: body.comment,
            anonymous: body.anonymous,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateReviewResponse {
            review_id: result.review_id,
        }),
    ))
}
