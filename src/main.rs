//! CloudBox command-line client.
//!
//! Loads configuration, installs logging and dispatches to a subcommand.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use cloudbox_core::config::ClientConfig;
use cloudbox_core::config::logging::LoggingConfig;
use cloudbox_core::error::AppError;

mod commands;
mod output;

use commands::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_configuration(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config.logging);

    if let Err(e) = cli.execute(&config).await {
        std::process::exit(report_failure(&e));
    }
}

/// Print a failed command and pick the exit code. Conflicts and cancelled
/// work left nothing changed, so they are notices and exit cleanly.
fn report_failure(e: &AppError) -> i32 {
    if e.kind.is_notice() {
        output::print_warning(&e.message);
        0
    } else {
        eprintln!("Error: {}", e);
        1
    }
}

/// Load configuration from file and environment
fn load_configuration(config_path: &str) -> Result<ClientConfig, AppError> {
    let env = std::env::var("CLOUDBOX_ENV").unwrap_or_else(|_| "development".to_string());
    ClientConfig::load(config_path, &env)
}

/// Initialize tracing/logging
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    match logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use cloudbox_core::error::ErrorKind;

    use super::*;

    #[test]
    fn test_conflicts_are_notices() {
        let cyclic = AppError::conflict("Cannot move a folder into itself or its descendants");
        assert_eq!(report_failure(&cyclic), 0);
        assert_eq!(
            report_failure(&AppError::new(ErrorKind::Cancelled, "closed")),
            0
        );
    }

    #[test]
    fn test_other_failures_exit_with_error() {
        assert_eq!(report_failure(&AppError::validation("bad name")), 1);
        assert_eq!(report_failure(&AppError::not_found("gone")), 1);
    }
}
