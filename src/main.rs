use std::io::stderr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use transaction_service::api::create_router;
use transaction_service::config::Settings;
use transaction_service::service::TransactionService;
use transaction_service::storage::TransactionStorage;
use transaction_service::types::{Clock, SystemClock};

#[tokio::main]
async fn main() -> Result<()> {
    //NOTE: Only the log level comes from the command line, everything else is read from TRANSACTION_SERVICE_* variables
    let args: Vec<String> = std::env::args().collect();
    let log_level = args.get(1)
        .map(|s| parse_log_level(s)).unwrap_or(LevelFilter::INFO);

    setup_logging(log_level);

    let settings = Settings::from_env()?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let storage = Arc::new(TransactionStorage::new());

    let service = settings.configure(TransactionService::new(storage, settings.validator(clock.clone()), clock));

    let router = create_router(Arc::new(service));
    let listener = TcpListener::bind(settings.bind_address).await
        .with_context(|| format!("Failed to bind {}", settings.bind_address))?;

    info!("Transaction service listening on {}", settings.bind_address);
    info!("Transactions accepted between {} and {}", settings.window_start, settings.window_end);

    if let Err(error) = axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await {
        error!("Server error: {error}");
        return Err(error.into());
    }

    info!("Transaction service stopped");

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'info'", level);
            LevelFilter::INFO
        }
    }
}

fn setup_logging(level: LevelFilter) {
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

async fn shutdown_signal() {
    if let Err(error) = signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {error}");
    }
}
