use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Log storage unavailable")]
    Io(#[from] io::Error),

    #[error("No unused log target within {0} probes")]
    ProbesExhausted(u32),
}

/// Destination for formatted log records.
pub trait LogSink {
    fn write_line(&mut self, line: &str) -> io::Result<()>;
}

/// Persistent append-only sink.
///
/// Every record is an independent open-append-close cycle, so a crash
/// mid-session loses at most the record being written and never leaves the
/// store locked. Single-writer usage is assumed; callers introducing more
/// producers must synchronize externally.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Selects a log target that does not collide with any previous
    /// session: probes `base`, `base0`, `base1`, ... (plus extension) until
    /// an unused name is found, giving up after `probe_cap` candidates. The
    /// chosen name is claimed immediately so the next boot probes past it.
    pub fn create(dir: &Path, base: &str, extension: &str, probe_cap: u32) -> Result<Self, SinkError> {
        let mut candidate = dir.join(format!("{base}{extension}"));

        let mut i = 0;
        while candidate.exists() {
            if i >= probe_cap {
                return Err(SinkError::ProbesExhausted(probe_cap));
            }
            candidate = dir.join(format!("{base}{i}{extension}"));
            i += 1;
        }

        File::options()
            .write(true)
            .create_new(true)
            .open(&candidate)?;

        Ok(FileSink { path: candidate })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSink for FileSink {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        writeln!(file, "{line}")
    }
}

/// Live console sink, best effort: a full or closed stream just drops the
/// record.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{line}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("strato-sink-{}-{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_first_boot_takes_base_name() {
        let dir = scratch_dir("base");

        let sink = FileSink::create(&dir, "flight", ".log", 10).unwrap();

        assert_eq!(sink.path(), dir.join("flight.log"));
        assert!(sink.path().exists());
    }

    #[test]
    fn test_probe_skips_existing_targets() {
        let dir = scratch_dir("probe");

        let first = FileSink::create(&dir, "flight", ".log", 10).unwrap();
        let second = FileSink::create(&dir, "flight", ".log", 10).unwrap();
        let third = FileSink::create(&dir, "flight", ".log", 10).unwrap();

        assert_eq!(first.path(), dir.join("flight.log"));
        assert_eq!(second.path(), dir.join("flight0.log"));
        assert_eq!(third.path(), dir.join("flight1.log"));
    }

    #[test]
    fn test_probe_cap_exhaustion() {
        let dir = scratch_dir("cap");

        for _ in 0..4 {
            FileSink::create(&dir, "flight", ".log", 10).unwrap();
        }

        let result = FileSink::create(&dir, "flight", ".log", 3);
        assert!(matches!(result, Err(SinkError::ProbesExhausted(3))));
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = scratch_dir("gone").join("not_mounted");

        assert!(matches!(
            FileSink::create(&dir, "flight", ".log", 10),
            Err(SinkError::Io(_))
        ));
    }

    #[test]
    fn test_records_append_across_cycles() {
        let dir = scratch_dir("append");

        let mut sink = FileSink::create(&dir, "flight", ".log", 10).unwrap();
        sink.write_line("I:100,boot").unwrap();
        sink.write_line("W:250,low battery").unwrap();

        let contents = fs::read_to_string(sink.path()).unwrap();
        assert_eq!(contents, "I:100,boot\nW:250,low battery\n");
    }
}
