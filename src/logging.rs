use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming the log file base path.
pub const LOG_PATH_ENV: &str = "REPO_SEARCH_LOG";

/// Filter used when `RUST_LOG` is unset: this crate at `level`, HTTP
/// internals (hyper, reqwest, rustls) at `warn`.
pub fn default_directives(level: &str) -> String {
    format!("warn,{}={}", env!("CARGO_CRATE_NAME"), level)
}

fn env_filter_or(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

/// Initialize tracing with optional file output.
///
/// Logging is disabled by default so the interactive console stays readable.
/// Set `REPO_SEARCH_LOG` to a file path to enable it. Files are created with
/// unique names so concurrent runs don't collide: `{path}.{timestamp}.{pid}`
pub fn init_tracing() {
    let Some(log_path) = std::env::var(LOG_PATH_ENV).ok() else {
        return;
    };

    let unique_path = unique_log_path(&log_path);

    let filter = env_filter_or("info");

    let Ok(file) = std::fs::File::create(&unique_path) else {
        eprintln!("Warning: Failed to create log file: {}", unique_path);
        return;
    };

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        log = %unique_path,
        "repo-search starting"
    );
}

/// Log to stderr (used with `--verbose`).
pub fn init_stderr_tracing() {
    let filter = env_filter_or("debug");

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "repo-search starting");
}

fn unique_log_path(base: &str) -> String {
    let pid = std::process::id();
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("{}.{}.{}", base, timestamp, pid)
}
