use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use storage::Database;
use storage::repository::assignment::JsonFileStore;
use storage::services::daily_schedule::DailyPuzzleScheduler;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;
mod state;

use config::Config;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::puzzles::handlers::list_puzzles,
        features::puzzles::handlers::get_puzzle,
        features::puzzles::handlers::complete_puzzle,
        features::leaderboard::handlers::get_leaderboard,
        features::daily::handlers::get_daily_puzzle,
        features::daily::handlers::get_daily_completed,
    ),
    components(
        schemas(
            storage::dto::common::PaginationMeta,
            storage::dto::puzzle::PuzzleResponse,
            storage::dto::puzzle::CompletePuzzleRequest,
            storage::dto::puzzle::CompletionResponse,
            storage::dto::leaderboard::ScoredEntry,
            storage::dto::leaderboard::LeaderboardView,
        )
    ),
    tags(
        (name = "puzzles", description = "Public puzzle endpoints"),
        (name = "leaderboard", description = "Per-puzzle ranking endpoints"),
        (name = "daily", description = "Daily puzzle rotation endpoints"),
    )
)]
struct ApiDoc;

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

    tracing::info!("Starting puzzle platform API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let scheduler = Arc::new(DailyPuzzleScheduler::new(JsonFileStore::new(
        &config.daily_grids_file,
    )));
    tracing::info!(
        "Daily puzzle assignments stored at: {}",
        config.daily_grids_file
    );

    let app_state = AppState { db, scheduler };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(features::api_routes())
        .layer(cors)
        .with_state(app_state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .context("Failed to bind server address")?;
    axum::serve(listener, app).await?;

    Ok(())
}
