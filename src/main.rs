//! Agendou service entry point.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use agendou::adapters::auth::JwtSessionValidator;
use agendou::adapters::http::{api_router, AppState};
use agendou::adapters::postgres::{
    PostgresAppointmentReader, PostgresAppointmentStore, PostgresReviewStore,
    PostgresUserDirectory, PostgresWorkingHours,
};
use agendou::config::AppConfig;
use agendou::ports::SessionValidator;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(&config.server.log_level)
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(environment = ?config.server.environment, "starting agendou");

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("running database migrations");
        sqlx::migrate!().run(&pool).await?;
    }

    let state = AppState {
        appointment_store: Arc::new(PostgresAppointmentStore::new(pool.clone())),
        appointment_reader: Arc::new(PostgresAppointmentReader::new(pool.clone())),
        review_store: Arc::new(PostgresReviewStore::new(pool.clone())),
        user_directory: Arc::new(PostgresUserDirectory::new(pool.clone())),
        working_hours: Arc::new(PostgresWorkingHours::new(pool)),
    };
    let validator: Arc<dyn SessionValidator> =
        Arc::new(JwtSessionValidator::new(&config.auth.token_secret));

    let cors = match config.server.cors_origins_list().as_slice() {
        [] => CorsLayer::permissive(),
        origins => {
            let origins = origins
                .iter()
                .map(|o| o.parse::<HeaderValue>())
                .collect::<Result<Vec<_>, _>>()?;
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    };

    let app = api_router(state, validator)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors);

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
