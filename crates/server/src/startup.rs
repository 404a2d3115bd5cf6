use std::{future::Future, net::SocketAddr};

use axum::Router;
use configs::AppConfig;
use service::UserService;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Fresh store and state for a configuration.
pub fn build_state(cfg: &AppConfig) -> ServerState {
    ServerState { users: UserService::in_memory(cfg.store.seed) }
}

/// Router wired with CORS and tracing layers.
pub fn build_app(state: ServerState) -> Router {
    routes::build_router(state, build_cors())
}

fn load_bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    let raw = cfg.bind_addr();
    raw.parse::<SocketAddr>()
        .map_err(|e| anyhow::anyhow!("invalid bind address {raw}: {e}"))
}

/// Serve `app` on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C; shutting down");
        return;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, draining connections");
}

/// Public entry: build the app and run the HTTP server until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&cfg);
    let seeded = state.users.list().await.len();
    let app = build_app(state);

    let addr = load_bind_addr(&cfg)?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, seeded, "server listening");
    serve(listener, app, shutdown_signal()).await
}
