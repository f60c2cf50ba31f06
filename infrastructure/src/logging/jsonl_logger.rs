//! JSONL dump of the protocol log.
//!
//! Each [`LogRecord`] is serialized as a single JSON line (`type`, `message`,
//! `date`, optional `count`), appended to the file via a buffered writer.
//! [`read_log_file`] loads such a dump back for the `logs` command.

use livechat_application::ports::log_store::LogWriter;
use livechat_domain::LogRecord;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors when reading a log dump
#[derive(Error, Debug)]
pub enum LogStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid record on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Log sink that writes one record per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlLogSink {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlLogSink {
    /// Create a new sink writing to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be created.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create log dump directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match File::create(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not create log dump file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the dump file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogWriter for JsonlLogSink {
    fn append(&self, record: LogRecord) {
        let line = match serde_json::to_string(&record) {
            Ok(line) => line,
            Err(e) => {
                debug!("Skipping unserializable log record: {}", e);
                return;
            }
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlLogSink {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

/// Read a JSONL dump written by [`JsonlLogSink`]. Blank lines are skipped.
pub fn read_log_file(path: impl AsRef<Path>) -> Result<Vec<LogRecord>, LogStoreError> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|source| LogStoreError::Parse {
            line: index + 1,
            source,
        })?;
        records.push(record);
    }

    Ok(records)
}
