use api::routes::app;
use api::state::AppState;
use std::net::SocketAddr;
use tracing::{info, warn};
use tracing_appender::rolling;
use util::config::AppConfig;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = AppConfig::from_env();

    // Load configuration and initialize logging
    let _log_guard = init_logging(&config.log_file, &config.log_level, config.log_to_stdout);

    if !config.has_provider() {
        warn!("DEEPSEEK_API_KEY is not set; essays will be graded heuristically");
    }

    let addr = config.bind_address();
    let project_name = config.project_name.clone();
    let env = config.env.clone();

    let state = AppState::new(config);
    let app = app(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(project = %project_name, env = %env, addr = %addr, "Starting server");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
}

fn init_logging(
    log_file: &str,
    log_level: &str,
    log_to_stdout: bool,
) -> tracing_appender::non_blocking::WorkerGuard {
    use std::fs;
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    fs::create_dir_all("logs").ok();

    let file_appender = rolling::daily("logs", log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    let stdout_layer = log_to_stdout.then(|| {
        fmt::layer()
            .with_writer(std::io::stdout)
            .with_ansi(true)
            .with_target(true)
    });

    let env_filter = EnvFilter::try_new(log_level)
        .unwrap_or_else(|_| EnvFilter::new("api=info,marker=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();

    guard
}
