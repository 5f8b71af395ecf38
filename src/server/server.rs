use anyhow::Result;
use std::future::IntoFuture;
use std::time::Duration;

use tower_http::services::ServeDir;
use tracing::info;

use axum::{extract::State, middleware, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use super::metrics::run_metrics_server;
use super::routes::make_api_routes;
use super::{log_requests, state::*, ServerConfig};
use crate::error::RiffResult;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ServerStats {
    pub success: bool,
    pub uptime: String,
    pub version: &'static str,
    pub artists: u64,
    pub albums: u64,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> RiffResult<impl IntoResponse> {
    let counts = state.catalog_manager.counts()?;
    Ok(Json(ServerStats {
        success: true,
        uptime: format_uptime(state.start_time.elapsed()),
        version: env!("CARGO_PKG_VERSION"),
        artists: counts.artists,
        albums: counts.albums,
    }))
}

pub fn make_app(config: ServerConfig, store: GuardedRiffStore) -> Router {
    let state = ServerState::new(config.clone(), store);

    let home_router: Router = match config.frontend_dir_path {
        Some(frontend_path) => {
            let static_files_service =
                ServeDir::new(frontend_path).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new().route("/", get(home)).with_state(state.clone()),
    };

    home_router
        .nest("/v1", make_api_routes(state.clone()))
        .layer(middleware::from_fn_with_state(state, log_requests))
}

/// Serves the API on `config.port` and the Prometheus endpoint on
/// `metrics_port` until either of them fails.
pub async fn run_server(
    config: ServerConfig,
    store: GuardedRiffStore,
    metrics_port: u16,
) -> Result<()> {
    let port = config.port;
    let app = make_app(config, store);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!("Ready to serve at port {}!", port);

    tokio::select! {
        result = axum::serve(listener, app).into_future() => Ok(result?),
        result = run_metrics_server(metrics_port) => result,
    }
}
