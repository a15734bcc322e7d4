use std::path::Path;

use log::warn;

use super::sink::{ConsoleSink, FileSink, LogSink};
use crate::error::ErrorCode;
use crate::params::FlightParams;
use crate::Instant;

/// Record severity, tagged with a single letter in the serialized line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    fn tag(self) -> char {
        match self {
            LogLevel::Debug => 'D',
            LogLevel::Info => 'I',
            LogLevel::Warning => 'W',
            LogLevel::Error => 'E',
        }
    }
}

/// Logger lifecycle. Degraded means the persistent sink is gone for the rest
/// of the session; records still reach the console sink and callers are
/// never failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggerState {
    Uninitialized,
    Ready,
    Degraded,
}

/// Leveled dual-sink append-only event log.
///
/// One persistent target is selected per boot (see [`FileSink::create`])
/// and never rotated mid-session. Records are serialized as
/// `"<L>:<ms>,<message>"`, one line each. Single-threaded, single-writer
/// usage is assumed.
pub struct EventLogger {
    state: LoggerState,
    file: Option<FileSink>,
    console: ConsoleSink,
}

impl Default for EventLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLogger {
    pub fn new() -> Self {
        EventLogger {
            state: LoggerState::Uninitialized,
            file: None,
            console: ConsoleSink,
        }
    }

    /// Prepares the persistent sink under `dir`. Storage trouble is not
    /// fatal: the logger degrades to console-only, keeps serving callers and
    /// reports the failure as a status code.
    pub fn init(&mut self, dir: &Path, params: &FlightParams) -> ErrorCode {
        match FileSink::create(
            dir,
            &params.log_base_name,
            &params.log_extension,
            params.log_probe_cap,
        ) {
            Ok(sink) => {
                self.file = Some(sink);
                self.state = LoggerState::Ready;
                ErrorCode::Ok
            }
            Err(err) => {
                warn!("log storage unavailable, continuing console-only: {err}");
                self.file = None;
                self.state = LoggerState::Degraded;
                ErrorCode::StorageInitFailed
            }
        }
    }

    pub fn state(&self) -> LoggerState {
        self.state
    }

    /// Path of this session's log target, if the persistent sink is up.
    pub fn target_path(&self) -> Option<&Path> {
        self.file.as_ref().map(FileSink::path)
    }

    /// Appends one record to every available sink. A persistent-sink write
    /// failure demotes the logger to Degraded; it is never surfaced to the
    /// caller.
    pub fn log(&mut self, t: Instant, level: LogLevel, message: &str) {
        let line = format!(
            "{}:{},{}",
            level.tag(),
            t.duration_since_epoch().ticks(),
            message
        );

        if let Some(file) = &mut self.file {
            if let Err(err) = file.write_line(&line) {
                warn!("dropping persistent log sink after write failure: {err}");
                self.file = None;
                self.state = LoggerState::Degraded;
            }
        }

        // Best effort: a console write failure drops the record
        let _ = self.console.write_line(&line);
    }

    /// Records a numeric status code through the same path as [`log`](EventLogger::log).
    pub fn log_code(&mut self, t: Instant, code: ErrorCode, level: LogLevel) {
        self.log(t, level, &code.code().to_string());
    }
}
