use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Env var naming a log file. When unset, logs go to stderr.
pub const LOG_FILE_ENV: &str = "APIDEMO_LOG";

/// Initialize tracing.
///
/// The filter comes from `RUST_LOG` (default `info`). Logs go to stderr so
/// client output on stdout stays clean. If `APIDEMO_LOG` names a path, logs
/// go to `{path}.{timestamp}.{pid}` instead, so concurrent instances never
/// share a file.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(log_path) = std::env::var(LOG_FILE_ENV).ok() {
        let unique_path = unique_log_path(&log_path);
        match std::fs::File::create(&unique_path) {
            Ok(file) => {
                let file_layer = fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .with_target(true)
                    .with_level(true);
                tracing_subscriber::registry()
                    .with(filter)
                    .with(file_layer)
                    .init();
                return;
            }
            Err(e) => eprintln!("Warning: Failed to create log file {}: {}", unique_path, e),
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();
}

fn unique_log_path(base: &str) -> String {
    let pid = std::process::id();
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("{}.{}.{}", base, timestamp, pid)
}
