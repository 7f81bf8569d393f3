use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming the log file prefix.
pub const LOG_ENV: &str = "FFROUTE_LOG";

/// Initialize tracing with optional file output.
///
/// Logging is disabled by default: stdout and stderr belong to the child
/// ffmpeg, and the calling media server parses them.
/// Set `FFROUTE_LOG` to a file path to enable logging.
///
/// Log files are created with unique names so concurrent transcodes do
/// not interleave: `{path}.{timestamp}.{pid}`
pub fn init_tracing() {
    let Some(log_path) = std::env::var_os(LOG_ENV) else {
        return;
    };

    let unique_path = unique_log_path(&log_path.to_string_lossy());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let Ok(file) = std::fs::File::create(&unique_path) else {
        // Silent: a warning here would land in the child's stderr stream.
        return;
    };

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    // A subscriber may already be installed when embedded in tests.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();
}

fn unique_log_path(prefix: &str) -> String {
    let pid = std::process::id();
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("{}.{}.{}", prefix, timestamp, pid)
}
