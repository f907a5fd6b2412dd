use std::sync::Arc;

use anyhow::Result;
use planner_core::repository::SqliteRepository;
use planner_core::service::TaskService;

use crate::cli::ServeCommand;
use crate::config::Config;
use crate::server::{self, auth::TokenAuth, AppState};
use crate::timezone::Clock;

pub async fn serve(
    service: TaskService<SqliteRepository>,
    command: ServeCommand,
    config: &Config,
    clock: Clock,
) -> Result<()> {
    let auth = config.password().map(|password| {
        let secret = match config.token_secret.as_deref().filter(|s| !s.is_empty()) {
            Some(secret) => secret.as_bytes().to_vec(),
            None => TokenAuth::random_secret(),
        };
        TokenAuth::new(password, &secret, config.token_ttl_hours)
    });
    if auth.is_none() {
        tracing::warn!("no password configured, the API is open to anyone who can reach it");
    }

    let state = Arc::new(AppState {
        service,
        auth,
        clock,
        list_limit: config.list_limit,
        token_ttl_hours: config.token_ttl_hours,
    });

    let port = command.port.unwrap_or(config.port);
    server::run(state, port, &config.web_dir).await
}
