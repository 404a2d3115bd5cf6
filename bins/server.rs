use common::utils::logging::{init_logging, LogFormat};
use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn main() -> std::process::ExitCode {
    // .env before config so SERVER_PORT, RUST_LOG and friends apply
    dotenv().ok();

    let config = configs::AppConfig::load_and_validate();
    let format = match &config {
        Ok(cfg) => cfg.logging.format.parse::<LogFormat>().unwrap_or_default(),
        Err(_) => LogFormat::default(),
    };
    init_logging(format);
    info!(service = "users_api", event = "logger_init", ?format, "tracing subscriber initialized");

    let cfg = match config {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "users_api", event = "config_invalid", error = %format!("{e:#}"), "failed to load configuration");
            return std::process::ExitCode::FAILURE;
        }
    };

    // service context for start/stop/panic events, no secrets
    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    // route panics through tracing so they land in the same log stream
    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "users_api",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    // worker threads from config.toml, else TOKIO_WORKER_THREADS, else tokio default
    let worker_threads = cfg.server.worker_threads;
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "users_api", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    // start event
    info!(
        service = "users_api",
        event = "start",
        %service_id,
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        "users_api starting"
    );

    // run until Ctrl+C; server::run drains connections before returning
    match rt.block_on(server::run(cfg)) {
        Ok(()) => {
            info!(service = "users_api", event = "stop", %service_id, pid, "server stopped normally");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "users_api", event = "run_failed", %service_id, error = %format!("{e:#}"), "server::run returned error");
            std::process::ExitCode::FAILURE
        }
    }
}
