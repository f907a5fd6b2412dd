//! HTTP API and static front end.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use planner_core::repository::SqliteRepository;
use planner_core::service::TaskService;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::timezone::Clock;

pub mod auth;
pub mod error;
pub mod handlers;

use auth::TokenAuth;

pub struct AppState {
    pub service: TaskService<SqliteRepository>,
    /// `None` when no password is configured.
    pub auth: Option<TokenAuth>,
    pub clock: Clock,
    pub list_limit: u32,
    pub token_ttl_hours: i64,
}

pub type SharedState = Arc<AppState>;

pub fn router(state: SharedState, web_dir: &str) -> Router {
    let protected = Router::new()
        .route(
            "/api/task",
            get(handlers::get_task)
                .post(handlers::add_task)
                .put(handlers::update_task)
                .delete(handlers::delete_task),
        )
        .route("/api/tasks", get(handlers::list_tasks))
        .route("/api/task/done", post(handlers::done_task))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_token));

    Router::new()
        .route("/api/nextdate", get(handlers::next_date))
        .route("/api/signin", post(handlers::sign_in))
        .merge(protected)
        .fallback_service(ServeDir::new(web_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves the API on `0.0.0.0:port` until Ctrl-C.
pub async fn run(state: SharedState, port: u16, web_dir: &str) -> Result<()> {
    let app = router(state, web_dir);
    let address = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("cannot listen on {}", address))?;

    tracing::info!(%address, web_dir, "server is starting");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down");
        })
        .await?;
    Ok(())
}
