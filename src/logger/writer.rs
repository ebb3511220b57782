//! Log writer module
//!
//! Thread-safe log writing to files or stdout/stderr.

use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, PoisonError};

/// Log output target
enum LogTarget {
    /// Write to stdout
    Stdout,
    /// Write to stderr
    Stderr,
    /// Append to file
    File(Mutex<File>),
    /// Keep lines in memory
    #[cfg(test)]
    Memory(std::sync::Arc<Mutex<Vec<String>>>),
}

/// Thread-safe log writer
pub struct LogWriter {
    /// Access and info target
    access: LogTarget,
    /// Warning and error target
    error: LogTarget,
}

impl LogWriter {
    /// Create a new log writer with optional file paths
    pub fn new(access_log_file: Option<&str>, error_log_file: Option<&str>) -> io::Result<Self> {
        let access = match access_log_file {
            Some(path) => LogTarget::File(Mutex::new(open_log_file(path)?)),
            None => LogTarget::Stdout,
        };

        let error = match error_log_file {
            Some(path) => LogTarget::File(Mutex::new(open_log_file(path)?)),
            None => LogTarget::Stderr,
        };

        Ok(Self { access, error })
    }

    /// Writer that records every line into `lines`
    #[cfg(test)]
    pub fn memory(lines: std::sync::Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            access: LogTarget::Memory(std::sync::Arc::clone(&lines)),
            error: LogTarget::Memory(lines),
        }
    }

    /// Write to access log
    pub fn write_access(&self, message: &str) {
        write_to_target(&self.access, message);
    }

    /// Write to error log
    pub fn write_error(&self, message: &str) {
        write_to_target(&self.error, message);
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

/// Write message to log target, prefixed with the local time
fn write_to_target(target: &LogTarget, message: &str) {
    let stamp = Local::now().format("%Y/%m/%d %H:%M:%S");
    match target {
        LogTarget::Stdout => {
            println!("{stamp} {message}");
        }
        LogTarget::Stderr => {
            eprintln!("{stamp} {message}");
        }
        LogTarget::File(file) => {
            let line = format!("{stamp} {message}");
            if let Err(e) = append_line(file, &line) {
                eprintln!("{stamp} [ERROR] Failed to write log file: {e}");
                eprintln!("{line}");
            }
        }
        #[cfg(test)]
        LogTarget::Memory(lines) => {
            if let Ok(mut lines) = lines.lock() {
                lines.push(message.to_string());
            }
        }
    }
}

/// Append one line to a shared log file
///
/// A mutex poisoned by a panicking writer is still usable for appending.
fn append_line<W: Write>(file: &Mutex<W>, line: &str) -> io::Result<()> {
    let mut f = file.lock().unwrap_or_else(PoisonError::into_inner);
    writeln!(f, "{line}")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("no space left on device"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_append_line_reports_write_errors() {
        let file = Mutex::new(FullDisk);
        let err = append_line(&file, "GET    /          1ms").unwrap_err();
        assert_eq!(err.to_string(), "no space left on device");
    }

    #[test]
    fn test_append_line_survives_poisoned_lock() {
        let file = Mutex::new(Vec::new());
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = file.lock().unwrap();
            panic!("writer panicked");
        }));
        assert!(file.is_poisoned());

        append_line(&file, "[ERROR] after panic").unwrap();
        let written = file.into_inner().unwrap_or_else(PoisonError::into_inner);
        assert_eq!(written, b"[ERROR] after panic\n");
    }

    #[test]
    fn test_file_targets_append_with_timestamp() {
        let dir = std::env::temp_dir().join(format!("latency-server-logs-{}", std::process::id()));
        let access = dir.join("nested/access.log");
        let error = dir.join("error.log");

        let writer = LogWriter::new(access.to_str(), error.to_str()).unwrap();
        writer.write_access("GET    /          1ms");
        writer.write_error("[ERROR] boom");
        drop(writer);

        let access_contents = std::fs::read_to_string(&access).unwrap();
        let error_contents = std::fs::read_to_string(&error).unwrap();
        std::fs::remove_dir_all(&dir).ok();

        assert!(access_contents.ends_with("GET    /          1ms\n"));
        assert!(!access_contents.contains("boom"));
        assert!(error_contents.contains("[ERROR] boom"));
        // "YYYY/MM/DD HH:MM:SS " prefix
        assert_eq!(&error_contents[4..5], "/");
    }
}
