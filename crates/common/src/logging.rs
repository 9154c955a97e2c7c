//! Logging and tracing initialization.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::config::LoggingConfig;

/// Initialize the tracing subscriber with the given configuration.
///
/// `RUST_LOG` takes precedence over `config.level`. Calling this twice is
/// harmless; the second subscriber is dropped.
pub fn init_logging(config: &LoggingConfig) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let (writer, file_error) = log_writer(config);

    if config.json {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(writer)
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    } else {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(writer)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .with_ansi(config.file.is_none())
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }

    if let Some(err) = file_error {
        tracing::warn!(
            path = ?config.file,
            error = %err,
            "Failed to open log file, logging to stderr"
        );
    }
}

/// Initialize logging with defaults (useful for tests and quick scripts).
pub fn init_default_logging() {
    init_logging(&LoggingConfig::default());
}

/// Append to `config.file` when set, stderr otherwise (or when the file
/// cannot be opened). Stdout is left to command output.
fn log_writer(config: &LoggingConfig) -> (BoxMakeWriter, Option<std::io::Error>) {
    let Some(path) = &config.file else {
        return (BoxMakeWriter::new(std::io::stderr), None);
    };

    let opened = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map_or(Ok(()), std::fs::create_dir_all)
        .and_then(|()| OpenOptions::new().create(true).append(true).open(path));

    match opened {
        Ok(file) => (BoxMakeWriter::new(Mutex::new(file)), None),
        Err(err) => (BoxMakeWriter::new(std::io::stderr), Some(err)),
    }
}
