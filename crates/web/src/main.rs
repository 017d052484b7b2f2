use anyhow::Context;
use axum::Router;
use std::time::Duration;
use storage::Database;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;

use config::Config;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::logs::handlers::create_log,
        features::logs::handlers::list_logs_by_period,
        features::logs::handlers::delete_last_log,
    ),
    components(
        schemas(
            storage::dto::fitness_log::UserId,
            storage::dto::fitness_log::CreateLogRequest,
            storage::dto::fitness_log::PeriodQueryRequest,
            storage::dto::fitness_log::DeleteLastRequest,
            storage::dto::fitness_log::DeleteLastResponse,
            storage::models::FitnessLogEntry,
        )
    ),
    tags(
        (name = "logs", description = "Fitness log endpoints"),
    )
)]
struct ApiDoc;

fn app(db: Database) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .merge(features::logs::routes::routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .with_state(db)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting Fitness Log API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}:{}/{}",
        config.database_host,
        config.database_port,
        config.database_name
    );
    let db = Database::new(&config.database_url())
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", bind_address);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    axum::serve(listener, app(db)).await.context("Server error")?;

    Ok(())
}
