//! Diagnostic logging setup
//!
//! Progress and diagnostics go to stderr so stdout carries only the command's
//! own report.

use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// Map `-q` / `-v` flags to a default level
pub fn level_for(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::WARN;
    }
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber; `RUST_LOG` overrides the flag-derived level
pub fn setup_logging(level: Level) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()));

    let _ = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
