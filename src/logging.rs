use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Keeps the non-blocking file writer alive for the process lifetime.
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// Stdout logging always; a daily-rolling file layer when `ENABLE_FILE_LOGS`
/// is set (directory from `LOG_DIR`, default `./logs`).
pub fn init_tracing(log_level: &str) -> LogGuard {
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_layer = fmt::layer().with_target(true);
    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer);

    let file_logs = std::env::var("ENABLE_FILE_LOGS")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);

    if file_logs {
        let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| "./logs".to_string());
        match std::fs::create_dir_all(&log_dir) {
            Ok(()) => {
                let appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "cardbot.log");
                let (writer, guard) = tracing_appender::non_blocking(appender);
                registry
                    .with(fmt::layer().with_writer(writer).with_ansi(false).with_target(true))
                    .init();
                return LogGuard { _file: Some(guard) };
            }
            Err(err) => eprintln!("failed to create log directory {log_dir}: {err}"),
        }
    }

    registry.init();
    LogGuard { _file: None }
}
