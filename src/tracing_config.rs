use std::{env, error::Error, io, path::PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter directive variable; falls back to `RUST_LOG`
pub const LOG_ENV: &str = "IMMUADMIN_LOG";
/// Output format variable, `json` or `pretty`
pub const LOG_FORMAT_ENV: &str = "IMMUADMIN_LOG_FORMAT";
/// Directory for the optional rolling log file
pub const LOG_DIR_ENV: &str = "IMMUADMIN_LOG_DIR";

const DEFAULT_FILTER: &str = "warn";
const DAYS_TO_KEEP: usize = 7;

/// Initialize tracing for CLI invocations
///
/// Logs go to standard error so standard output only carries command output.
/// The filter comes from `IMMUADMIN_LOG`, then `RUST_LOG`, then "warn".
/// `IMMUADMIN_LOG_FORMAT=json` switches to JSON lines. When
/// `IMMUADMIN_LOG_DIR` is set, logs are also written to a daily rotated
/// file there; the returned guard must be kept alive until exit so buffered
/// lines are flushed.
///
/// # Errors
/// Returns error if the log directory cannot be used or a global subscriber
/// is already installed
pub fn init_cli_mode() -> Result<Option<WorkerGuard>, Box<dyn Error>> {
    let env_filter = env::var(LOG_ENV)
        .ok()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER));

    let json = env::var(LOG_FORMAT_ENV).is_ok_and(|format| format == "json");

    let console = if json {
        fmt::layer()
            .json()
            .with_target(true)
            .with_level(true)
            .with_writer(io::stderr)
            .boxed()
    } else {
        fmt::layer()
            .compact()
            .with_target(true)
            .with_level(true)
            .with_writer(io::stderr)
            .boxed()
    };

    let (file, guard) = match env::var_os(LOG_DIR_ENV) {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::Builder::new()
                .rotation(tracing_appender::rolling::Rotation::DAILY)
                .max_log_files(DAYS_TO_KEEP)
                .filename_prefix("immuadmin")
                .filename_suffix("log")
                .build(PathBuf::from(dir))?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            let layer = fmt::layer()
                .compact()
                .with_target(true)
                .with_level(true)
                .with_writer(non_blocking)
                .with_ansi(false)
                .boxed();

            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .with(file)
        .try_init()?;

    Ok(guard)
}
