//! Axum router and handlers for appointment endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::{ApiError, AppState};
use crate::application::handlers::appointment::{
    CancelByAdminCommand, CancelByAdminHandler, CancelByClientCommand, CancelByClientHandler,
    ConfirmAppointmentCommand, ConfirmAppointmentHandler, ListAppointmentsHandler,
    ListAppointmentsQuery, MarkCompletedCommand, MarkCompletedHandler, RefuseAppointmentCommand,
    RefuseAppointmentHandler, RequestAppointmentCommand, RequestAppointmentHandler,
    UpdateNotesCommand, UpdateNotesHandler,
};
use crate::domain::foundation::{AppointmentId, AuthenticatedUser, Timestamp, UserId, UserRole};

use super::dto::{
    AdminCancelRequest, AppointmentResponse, ConfirmAppointmentRequest, CreateAppointmentRequest,
    ListAppointmentsParams, ListAppointmentsResponse, RefuseAppointmentRequest, UpdateNotesRequest,
};

/// Create the appointment API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_appointment).get(list_appointments))
        .route("/:id/confirm", post(confirm_appointment))
        .route("/:id/refuse", post(refuse_appointment))
        .route("/:id/cancel-by-client", post(cancel_by_client))
        .route("/:id/cancel-by-admin", post(cancel_by_admin))
        .route("/:id/mark-completed", post(mark_completed))
        .route("/:id/notes", put(update_notes))
}

/// Role gate: the caller must hold exactly this role.
fn ensure_role(user: &AuthenticatedUser, role: UserRole) -> Result<(), ApiError> {
    if user.role == role {
        Ok(())
    } else {
        Err(ApiError::forbidden(format!(
            "This operation requires the {} role",
            role
        )))
    }
}

async fn create_appointment(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<AppointmentResponse>), ApiError> {
    ensure_role(&user, UserRole::Cliente)?;
    let provider_id =
        UserId::new(body.provider_id).map_err(|e| ApiError::invalid_input(e.to_string()))?;

    let handler = RequestAppointmentHandler::new(
        state.appointment_store.clone(),
        state.user_directory.clone(),
    );
    let result = handler
        .handle(RequestAppointmentCommand {
            client_id: user.id,
            provider_id,
            starts_at: Timestamp::from_datetime(body.starts_at),
            duration_min: body.duration_min,
            subject: body.subject,
            modality: body.modality,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(result.appointment.into())))
}

async fn list_appointments(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<ListAppointmentsParams>,
) -> Result<Json<ListAppointmentsResponse>, ApiError> {
    let handler = ListAppointmentsHandler::new(state.appointment_reader.clone());
    let result = handler
        .handle(ListAppointmentsQuery {
            user_id: user.id,
            role: user.role,
            status: params.status,
        })
        .await?;

    Ok(Json(ListAppointmentsResponse {
        future: result.future,
        past: result.past,
    }))
}

async fn confirm_appointment(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<Uuid>,
    Json(body): Json<ConfirmAppointmentRequest>,
) -> Result<Json<AppointmentResponse>, ApiError> {
    ensure_role(&user, UserRole::Atendente)?;

    let handler = ConfirmAppointmentHandler::new(
        state.appointment_store.clone(),
        state.user_directory.clone(),
    );
    let result = handler
        .handle(ConfirmAppointmentCommand {
            provider_id: user.id,
            appointment_id: AppointmentId::from_uuid(id),
            meeting_link: body.meeting_link,
            provider_notes: body.provider_notes,
        })
        .await?;

    Ok(Json(result.appointment.into()))
}

async fn refuse_appointment(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<Uuid>,
    Json(body): Json<RefuseAppointmentRequest>,
) -> Result<Json<AppointmentResponse>, ApiError> {
    ensure_role(&user, UserRole::Atendente)?;

    let handler = RefuseAppointmentHandler::new(
        state.appointment_store.clone(),
        state.user_directory.clone(),
    );
    let result = handler
        .handle(RefuseAppointmentCommand {
            provider_id: user.id,
            appointment_id: AppointmentId::from_uuid(id),
            reason: body.reason,
        })
        .await?;

    Ok(Json(result.appointment.into()))
}

async fn cancel_by_client(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<Uuid>,
) -> Result<Json<AppointmentResponse>, ApiError> {
    ensure_role(&user, UserRole::Cliente)?;

    let handler = CancelByClientHandler::new(
        state.appointment_store.clone(),
        state.user_directory.clone(),
    );
    let result = handler
        .handle(CancelByClientCommand {
            client_id: user.id,
            appointment_id: AppointmentId::from_uuid(id),
        })
        .await?;

    Ok(Json(result.appointment.into()))
}

async fn cancel_by_admin(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<Uuid>,
    Json(body): Json<AdminCancelRequest>,
) -> Result<Json<AppointmentResponse>, ApiError> {
    ensure_role(&user, UserRole::Admin)?;

    let handler = CancelByAdminHandler::new(state.appointment_store.clone());
    let result = handler
        .handle(CancelByAdminCommand {
            appointment_id: AppointmentId::from_uuid(id),
            reason: body.reason,
        })
        .await?;

    Ok(Json(result.appointment.into()))
}

async fn mark_completed(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<Uuid>,
) -> Result<Json<AppointmentResponse>, ApiError> {
    ensure_role(&user, UserRole::Atendente)?;

    let handler = MarkCompletedHandler::new(state.appointment_store.clone());
    let result = handler
        .handle(MarkCompletedCommand {
            provider_id: user.id,
            appointment_id: AppointmentId::from_uuid(id),
        })
        .await?;

    Ok(Json(result.appointment.into()))
}

async fn update_notes(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateNotesRequest>,
) -> Result<Json<AppointmentResponse>, ApiError> {
    ensure_role(&user, UserRole::Atendente)?;

    let handler = UpdateNotesHandler::new(state.appointment_store.clone());
    let result = handler
        .handle(UpdateNotesCommand {
            provider_id: user.id,
            appointment_id: AppointmentId::from_uuid(id),
            provider_notes: body.provider_notes,
        })
        .await?;

    Ok(Json(result.appointment.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockSessionValidator;
    use crate::adapters::http::api_router;
    use crate::adapters::memory::{
        InMemoryAppointmentReader, InMemoryAppointmentStore, InMemoryReviewStore,
        InMemoryUserDirectory, InMemoryWorkingHours,
    };
    use crate::domain::foundation::{AccountStatus, UserSummary};
    use axum::body::Body;
    use axum::http::{header, Request};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state() -> (AppState, Arc<InMemoryUserDirectory>) {
        let store = Arc::new(InMemoryAppointmentStore::new());
        let directory = Arc::new(InMemoryUserDirectory::new());
        let reviews = Arc::new(InMemoryReviewStore::new());
        let reader = Arc::new(InMemoryAppointmentReader::new(
            store.clone(),
            directory.clone(),
            reviews.clone(),
        ));
        (
            AppState {
                appointment_store: store,
                appointment_reader: reader,
                review_store: reviews,
                user_directory: directory.clone(),
                working_hours: Arc::new(InMemoryWorkingHours::new()),
            },
            directory,
        )
    }

    fn authenticated(role: UserRole, token: &str, id: &str) -> Arc<MockSessionValidator> {
        Arc::new(MockSessionValidator::new().with_user(
            token,
            AuthenticatedUser::new(UserId::new(id).unwrap(), role, None),
        ))
    }

    fn create_body(provider_id: &str) -> String {
        serde_json::json!({
            "provider_id": provider_id,
            "starts_at": "2030-06-03T09:00:00Z",
            "duration_min": 30,
            "modality": "ONLINE"
        })
        .to_string()
    }

    #[tokio::test]
    async fn create_without_token_is_unauthorized() {
        let (state, _) = state();
        let app = api_router(state, Arc::new(MockSessionValidator::new()));

        let response = app
            .oneshot(
                Request::post("/api/appointments")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(create_body("provider-1")))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn create_as_provider_is_forbidden() {
        let (state, _) = state();
        let validator = authenticated(UserRole::Atendente, "token-a", "provider-1");
        let app = api_router(state, validator);

        let response = app
            .oneshot(
                Request::post("/api/appointments")
                    .header(header::AUTHORIZATION, "Bearer token-a")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(create_body("provider-1")))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn client_creates_appointment_and_conflict_on_repeat() {
        let (state, directory) = state();
        directory.insert(UserSummary {
            id: UserId::new("provider-1").unwrap(),
            role: UserRole::Atendente,
            status: AccountStatus::Ativo,
            name: "Dr. Paiva".to_string(),
        });
        let validator = authenticated(UserRole::Cliente, "token-c", "client-1");
        let app = api_router(state, validator);

        let response = app
            .clone()
            .oneshot(
                Request::post("/api/appointments")
                    .header(header::AUTHORIZATION, "Bearer token-c")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(create_body("provider-1")))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(
                Request::post("/api/appointments")
                    .header(header::AUTHORIZATION, "Bearer token-c")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(create_body("provider-1")))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn unknown_provider_is_not_found() {
        let (state, _) = state();
        let validator = authenticated(UserRole::Cliente, "token-c", "client-1");
        let app = api_router(state, validator);

        let response = app
            .oneshot(
                Request::post("/api/appointments")
                    .header(header::AUTHORIZATION, "Bearer token-c")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(create_body("ghost")))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_requires_authentication() {
        let (state, _) = state();
        let app = api_router(state, Arc::new(MockSessionValidator::new()));

        let response = app
            .oneshot(
                Request::get("/api/appointments")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
