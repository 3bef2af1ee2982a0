//! Gold Watch - vendor gold price change notifier
//!
//! Polls vendor price pages on a fixed interval and posts a message to the
//! configured sinks whenever a headline price changes.

mod config;
mod pipeline;
mod scheduler;
#[cfg(test)]
mod testing;

use clap::Parser;
use config::AppConfig;
use goldwatch_engine::ChangeDetector;
use goldwatch_feeds::{HttpFetcher, PriceAggregator};
use pipeline::GoldWatcher;
use scheduler::{IntervalTicker, Scheduler};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Gold Watch CLI
#[derive(Parser, Debug)]
#[command(name = "gold-watch")]
#[command(about = "Notify on gold price changes from Vietnamese vendors", long_about = None)]
struct Args {
    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Run a single cycle and exit
    #[arg(long, default_value_t = false)]
    once: bool,
}

fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn init_logging(level: &str) {
    // RUST_LOG wins over --log-level when set.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(parse_level(level).to_string().to_lowercase()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    init_logging(&args.log_level);

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let fetcher = match HttpFetcher::new(&config.fetcher_config()) {
        Ok(fetcher) => fetcher,
        Err(e) => {
            error!("Failed to create HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let dispatcher = match config.build_dispatcher() {
        Ok(dispatcher) => dispatcher,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Gold Watch starting...");
    info!("  Interval: {} seconds", config.interval.as_secs());
    match config.http_timeout {
        Some(timeout) => info!("  HTTP timeout: {} seconds", timeout.as_secs()),
        None => info!("  HTTP timeout: none"),
    }
    if dispatcher.is_empty() {
        warn!("  Sinks: none configured, changes will only be logged");
    } else {
        info!("  Sinks: {}", dispatcher.sink_names().join(", "));
    }

    let watcher = GoldWatcher::new(
        PriceAggregator::new(Arc::new(fetcher)),
        ChangeDetector::default(),
        dispatcher,
        config.message_options(),
    );
    let mut scheduler = Scheduler::new(watcher);

    if args.once {
        return match scheduler.run_once().await {
            Some(_) => ExitCode::SUCCESS,
            None => ExitCode::FAILURE,
        };
    }

    scheduler.run(&mut IntervalTicker::new(config.interval)).await;
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Level::DEBUG);
        assert_eq!(parse_level("WARN"), Level::WARN);
        assert_eq!(parse_level("verbose"), Level::INFO);
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["gold-watch"]);
        assert_eq!(args.log_level, "info");
        assert!(!args.once);

        let args = Args::parse_from(["gold-watch", "--once", "-l", "debug"]);
        assert!(args.once);
        assert_eq!(args.log_level, "debug");
    }
}
