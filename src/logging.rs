use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;

/// Install the global subscriber, teeing into a file when one is given.
/// The returned guard must stay alive for the whole run or buffered lines
/// are dropped on exit.
pub fn init_tracing(log_file: Option<&Path>) -> Result<Option<WorkerGuard>, std::io::Error> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "dashprobe=info".into());

    match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(env_filter).init();
            Ok(None)
        }
    }
}
