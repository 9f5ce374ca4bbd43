use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;

use super::{RegistryError, RegistryResult};

const STDERR_DEFAULT_FILTER: &str = "warn";
const FILE_FILTER: &str = "info,sqlx=warn";

/// Install the global subscriber.
///
/// Human-readable events go to stderr, filtered by `RUST_LOG` (default
/// `warn`). When `log_path` is given, JSON events are appended to it as well.
pub fn init_logging(log_path: Option<&Path>) -> RegistryResult<()> {
    let stderr_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(STDERR_DEFAULT_FILTER));
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_filter(stderr_filter);

    let file_layer = match log_path {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let file = Arc::new(Mutex::new(file));
            let make_writer = BoxMakeWriter::new(move || SharedFile {
                file: Arc::clone(&file),
            });
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_timer(UtcTime::rfc_3339())
                    .with_writer(make_writer)
                    .with_filter(EnvFilter::new(FILE_FILTER)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|err| RegistryError::Logging(err.to_string()))
}

struct SharedFile {
    file: Arc<Mutex<File>>,
}

impl SharedFile {
    fn lock(&self) -> io::Result<std::sync::MutexGuard<'_, File>> {
        self.file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))
    }
}

impl Write for SharedFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock()?.flush()
    }
}
