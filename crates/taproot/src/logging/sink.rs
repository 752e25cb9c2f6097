//! Output sinks and record formatting for logger channels.

use chrono::Local;
use log::Level;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Timestamp layout for rendered records.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// A single output destination attached to a channel.
pub(super) enum Sink {
    /// Append-mode log file held open for the component's lifetime.
    File { path: PathBuf, file: File },
    /// Process standard error.
    Console,
}

impl Sink {
    /// Open an append-mode file sink, creating the file when missing.
    pub(super) fn file(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Sink::File {
            path: path.to_path_buf(),
            file,
        })
    }

    /// Write one rendered record to the destination.
    pub(super) fn write(&mut self, line: &str) {
        match self {
            Sink::File { file, .. } => {
                let _ = writeln!(file, "{line}");
                let _ = file.flush();
            }
            Sink::Console => eprintln!("{line}"),
        }
    }

    /// The file path backing this sink, if any.
    pub(super) fn path(&self) -> Option<&Path> {
        match self {
            Sink::File { path, .. } => Some(path),
            Sink::Console => None,
        }
    }
}

/// Render one record: `<timestamp> - <name> - <LEVEL> -- <message>`.
pub(super) fn format_record(name: &str, level: Level, message: &str) -> String {
    format!(
        "{} - {} - {} -- {}",
        Local::now().format(TIMESTAMP_FORMAT),
        name,
        level,
        message
    )
}
