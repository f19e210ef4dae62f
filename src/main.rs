//! Worship Team Scheduler Backend
//!
//! REST backend with SQLite persistence: a reconciling team roster store and
//! a read-only quarterly schedule viewer.

mod api;
mod config;
mod db;
mod errors;
mod models;
mod roster;
mod schedule;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::MemberRepository;
use roster::RosterStore;
use schedule::ScheduleBook;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub roster: Arc<RwLock<RosterStore>>,
    pub schedule: Arc<ScheduleBook>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Worship Team Scheduler Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Schedule path: {:?}", config.schedule_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Initialize database and the roster store
    let pool = db::init_database(&config.db_path).await?;
    let table = Arc::new(MemberRepository::new(pool));

    let mut store = RosterStore::new(table);
    store.load().await;
    let roster = Arc::new(RwLock::new(store));

    // Load the schedule book; a missing file just means an empty schedule
    let schedule = match ScheduleBook::load_from_file(&config.schedule_path) {
        Ok(book) => {
            tracing::info!("Schedule book loaded with {} quarters", book.quarter_ids().len());
            Arc::new(book)
        }
        Err(e) => {
            tracing::warn!("No schedule data available: {}", e);
            Arc::new(ScheduleBook::default())
        }
    };

    // Create application state
    let state = AppState { roster, schedule };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        // Members
        .route("/members", get(api::list_members))
        .route("/members", post(api::create_member))
        .route("/members/stats", get(api::member_stats))
        .route("/members/{id}", get(api::get_member))
        .route("/members/{id}", put(api::update_member))
        .route("/members/{id}", delete(api::delete_member))
        // Schedule
        .route("/schedule", get(api::get_schedule))
        .route("/schedule/quarters", get(api::list_quarters));

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;
