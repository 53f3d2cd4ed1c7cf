use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default filter when `RUST_LOG` is unset. The library and the binary share
/// the `tour_importer` target, so one directive covers both.
pub const DEFAULT_LOG_DIRECTIVE: &str = "tour_importer=info";

pub const LOG_FILE_PREFIX: &str = "tour_importer.log";

/// Filter from `RUST_LOG`, falling back to [`DEFAULT_LOG_DIRECTIVE`].
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE))
}

/// Console output on stderr plus a daily JSON file under `log_dir`.
///
/// The returned guard flushes the file writer when dropped; hold it for the
/// life of the process. Stdout stays free for command output.
pub fn init_logging(log_dir: &Path) -> Option<WorkerGuard> {
    let console_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let (file_layer, guard) = match std::fs::create_dir_all(log_dir) {
        Ok(()) => {
            let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().json().with_writer(writer)), Some(guard))
        }
        Err(e) => {
            eprintln!("File logging disabled, cannot create {}: {}", log_dir.display(), e);
            (None, None)
        }
    };

    tracing_subscriber::registry()
        .with(env_filter())
        .with(file_layer)
        .with(console_layer)
        .init();

    guard
}
