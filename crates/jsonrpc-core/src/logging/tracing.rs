use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::LevelFilter, fmt};

/// Name of the log file created inside the log directory
pub const LOG_FILE_NAME: &str = "jsonrpc.log";

/// Keeps the non-blocking appender alive for the life of the process
static APPENDER_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Initialize the tracing system with log levels from environment variables
///
/// Logs go to `jsonrpc.log` inside `log_dir`, or inside the system temp
/// directory when no directory is given. The level is read from LOG_LEVEL,
/// then RUST_LOG, and defaults to "info".
///
/// Examples of valid LOG_LEVEL values:
/// - "trace" - Show all logs at trace level and above
/// - "info" - Show logs at info level and above (default)
/// - "jsonrpc_core=trace,jsonrpc_cli=debug" - Different levels per crate
///
/// Returns the log file path so it can be displayed to the user. Calling it
/// a second time leaves the first subscriber in place.
pub fn init_tracing(log_dir: Option<&Path>) -> PathBuf {
    let dir = log_dir.map(Path::to_path_buf).unwrap_or_else(std::env::temp_dir);
    let log_file = dir.join(LOG_FILE_NAME);

    let file_appender = RollingFileAppender::new(Rotation::NEVER, &dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    if APPENDER_GUARD.set(guard).is_err() {
        // Already initialized
        return log_file;
    }

    let log_level_str = std::env::var("LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());

    // Directive strings need the full EnvFilter
    let is_complex_directive = log_level_str.contains('=') || log_level_str.contains(',');

    let builder = fmt::Subscriber::builder()
        .with_ansi(false)
        .with_writer(non_blocking)
        .with_file(true)
        .with_line_number(true);

    let result = if is_complex_directive {
        let env_filter = tracing_subscriber::EnvFilter::try_from_env("LOG_LEVEL")
            .or_else(|_| tracing_subscriber::EnvFilter::try_from_env("RUST_LOG"))
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
        builder.with_env_filter(env_filter).try_init()
    } else {
        builder
            .with_max_level(parse_level_filter(&log_level_str))
            .try_init()
    };

    if let Err(e) = result {
        eprintln!("Warning: could not install log subscriber: {}", e);
    }

    log_file
}

fn parse_level_filter(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => LevelFilter::INFO,
    }
}

/// Helper function to get the current log level from the environment variable
pub fn get_log_level() -> Level {
    level_from_str(std::env::var("LOG_LEVEL").ok().as_deref())
}

fn level_from_str(level: Option<&str>) -> Level {
    match level {
        Some("trace") => Level::TRACE,
        Some("debug") => Level::DEBUG,
        Some("info") | None => Level::INFO,
        Some("warn") => Level::WARN,
        Some("error") => Level::ERROR,
        _ => Level::INFO, // Default to INFO if the level is invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level_filter() {
        assert_eq!(parse_level_filter("TRACE"), LevelFilter::TRACE);
        assert_eq!(parse_level_filter("warn"), LevelFilter::WARN);
        assert_eq!(parse_level_filter("bogus"), LevelFilter::INFO);
    }

    #[test]
    fn test_level_from_str() {
        assert_eq!(level_from_str(Some("debug")), Level::DEBUG);
        assert_eq!(level_from_str(Some("error")), Level::ERROR);
        assert_eq!(level_from_str(None), Level::INFO);
        assert_eq!(level_from_str(Some("jsonrpc_core=trace")), Level::INFO);
    }

    #[test]
    fn test_init_tracing_returns_path_in_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = init_tracing(Some(dir.path()));
        assert_eq!(path, dir.path().join(LOG_FILE_NAME));
    }
}
