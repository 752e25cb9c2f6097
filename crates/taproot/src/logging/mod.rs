//! Named logger channels with file and console output.
//!
//! Loggers live in an explicit [`LogContext`] rather than a process-global
//! registry: components built against the same context and service name share
//! one channel, and with it the channel's sink list and level. A context is
//! cheap to clone and safe to hand to several components.

mod sink;

use log::{Level, LevelFilter};
use parking_lot::Mutex;
use sink::Sink;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File name suffix for synthesized log files.
const LOG_FILE_SUFFIX: &str = "log";

/// Log level names accepted on the command line, in decreasing verbosity.
pub const LEVEL_NAMES: [&str; 4] = ["debug", "info", "warn", "error"];

/// Resolve a level name to a filter.
///
/// Unrecognized names fall back to the most restrictive level rather than
/// failing.
pub fn resolve_level(name: &str) -> LevelFilter {
    match name {
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        _ => LevelFilter::Error,
    }
}

/// True when the path already names a log file rather than a directory.
pub fn is_log_file(path: &Path) -> bool {
    path.to_string_lossy()
        .ends_with(&format!(".{LOG_FILE_SUFFIX}"))
}

/// Resolve the log file targeted by a configured log path.
///
/// A path already carrying the log suffix is used verbatim; anything else is
/// treated as a directory receiving `<service_name>.log`.
pub fn resolve_log_file(log_path: &Path, service_name: &str) -> PathBuf {
    if is_log_file(log_path) {
        log_path.to_path_buf()
    } else {
        log_path.join(format!("{service_name}.{LOG_FILE_SUFFIX}"))
    }
}

/// One named output channel: a level plus a list of sinks.
struct Channel {
    name: String,
    level: Mutex<LevelFilter>,
    sinks: Mutex<Vec<Sink>>,
}

impl Channel {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            level: Mutex::new(LevelFilter::Error),
            sinks: Mutex::new(Vec::new()),
        }
    }

    fn log(&self, level: Level, message: &str) {
        if level > *self.level.lock() {
            return;
        }
        let line = sink::format_record(&self.name, level, message);
        for sink in self.sinks.lock().iter_mut() {
            sink.write(&line);
        }
    }
}

/// Registry of named logger channels.
///
/// Cloning shares the registry; a default-constructed context is private to
/// its owner.
#[derive(Clone, Default)]
pub struct LogContext {
    channels: Arc<Mutex<HashMap<String, Arc<Channel>>>>,
}

impl LogContext {
    /// Create a fresh, empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a handle to the named channel, creating it on first use.
    pub fn logger(&self, name: &str) -> Logger {
        let mut channels = self.channels.lock();
        let channel = channels
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Channel::new(name)))
            .clone();
        Logger { channel }
    }
}

/// Handle to a named logger channel.
#[derive(Clone)]
pub struct Logger {
    channel: Arc<Channel>,
}

impl Logger {
    /// Name of the underlying channel.
    pub fn name(&self) -> &str {
        &self.channel.name
    }

    /// Current level of the underlying channel.
    pub fn level(&self) -> LevelFilter {
        *self.channel.level.lock()
    }

    /// Set the channel level, shared by every handle to the channel.
    pub fn set_level(&self, level: LevelFilter) {
        *self.channel.level.lock() = level;
    }

    /// Attach an append-mode file sink; attaching an already attached path
    /// is a no-op.
    pub fn attach_file(&self, path: &Path) -> io::Result<()> {
        let mut sinks = self.channel.sinks.lock();
        if sinks.iter().any(|sink| sink.path() == Some(path)) {
            return Ok(());
        }
        sinks.push(Sink::file(path)?);
        Ok(())
    }

    /// Attach a console (stderr) sink.
    pub fn attach_console(&self) {
        self.channel.sinks.lock().push(Sink::Console);
    }

    /// Emit a record at the given level; records below the channel level are
    /// dropped.
    pub fn log(&self, level: Level, message: impl AsRef<str>) {
        self.channel.log(level, message.as_ref());
    }

    /// Emit a debug record.
    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(Level::Debug, message);
    }

    /// Emit an info record.
    pub fn info(&self, message: impl AsRef<str>) {
        self.log(Level::Info, message);
    }

    /// Emit a warning record.
    pub fn warn(&self, message: impl AsRef<str>) {
        self.log(Level::Warn, message);
    }

    /// Emit an error record.
    pub fn error(&self, message: impl AsRef<str>) {
        self.log(Level::Error, message);
    }

    /// Number of sinks attached to the channel.
    pub(crate) fn sink_count(&self) -> usize {
        self.channel.sinks.lock().len()
    }
}
