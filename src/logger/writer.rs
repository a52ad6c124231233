//! Log writer module
//!
//! Chooses where the subscriber writes: stdout, or a file opened for appending.

use crate::error::StartupError;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Build the writer for the subscriber and whether ANSI colours suit it
pub fn make_writer(log_file: Option<&str>) -> Result<(BoxMakeWriter, bool), StartupError> {
    match log_file {
        Some(path) => {
            let file = open_log_file(path).map_err(|e| {
                StartupError::Logger(format!("cannot open log file '{path}': {e}"))
            })?;
            Ok((BoxMakeWriter::new(Mutex::new(file)), false))
        }
        None => Ok((BoxMakeWriter::new(io::stdout), true)),
    }
}

/// Open or create a log file for appending
fn open_log_file(path: &str) -> io::Result<File> {
    // Create parent directories if they don't exist
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(path)
}
