//! Log output for the server process
//!
//! Stdout belongs to the MCP transport, so logs go either to stderr or, with
//! `--log-file`, to a file. `RUST_LOG` overrides the level chosen by the
//! verbosity flags. Command logging adds its own directive on top, so frames
//! are shown whatever the base level.

use crate::command_log::COMMAND_TARGET;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

/// A thread-safe writer that flushes every write to the log file.
///
/// MCP clients usually swallow the server's stderr, so the log file is often
/// the only way to see what happened before a crash. Each write is flushed and
/// synced before the lock is released.
///
/// # Example
///
/// ```no_run
/// use std::io::Write;
/// use std::sync::{Arc, Mutex};
/// use std::fs::File;
/// use github_mcp_cli::logging::FileWriterGuard;
///
/// let file = File::create("mcp.log").unwrap();
/// let mut guard = FileWriterGuard::new(Arc::new(Mutex::new(file)));
/// guard.write_all(b"Log message\n").unwrap();
/// ```
#[derive(Clone)]
pub struct FileWriterGuard {
    file: Arc<Mutex<File>>,
}

impl FileWriterGuard {
    /// Creates a new `FileWriterGuard` wrapping the given file.
    pub fn new(file: Arc<Mutex<File>>) -> Self {
        Self { file }
    }

    fn lock(&self) -> io::Result<std::sync::MutexGuard<'_, File>> {
        self.file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))
    }
}

impl Write for FileWriterGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut file = self.lock()?;
        let written = file.write(buf)?;
        file.flush()?;
        file.sync_all()?;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut file = self.lock()?;
        file.flush()?;
        file.sync_all()
    }
}

/// Filter from `RUST_LOG`, falling back to `level`
pub(crate) fn env_filter(level: Level, command_logging: bool) -> EnvFilter {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    if !command_logging {
        return filter;
    }
    match format!("{COMMAND_TARGET}=info").parse::<Directive>() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Install the global subscriber
///
/// Falls back to stderr, with a warning, when the log file cannot be opened.
pub fn init_logging(level: Level, log_file: Option<&Path>, command_logging: bool) {
    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_env_filter(env_filter(level, command_logging))
            .init();
        return;
    };

    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => {
            let guard = FileWriterGuard::new(Arc::new(Mutex::new(file)));
            tracing_subscriber::fmt()
                .with_writer(move || guard.clone())
                .with_env_filter(env_filter(level, command_logging))
                .with_ansi(false)
                .init();
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_writer(io::stderr)
                .with_env_filter(env_filter(level, command_logging))
                .init();
            tracing::warn!("Failed to open log file {}, using stderr: {}", path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::NamedTempFile;

    #[test]
    fn test_file_writer_guard_writes_through() {
        let temp = NamedTempFile::new().unwrap();
        let file = OpenOptions::new().append(true).open(temp.path()).unwrap();
        let mut guard = FileWriterGuard::new(Arc::new(Mutex::new(file)));

        guard.write_all(b"first line\n").unwrap();
        let mut clone = guard.clone();
        clone.write_all(b"second line\n").unwrap();

        let mut contents = String::new();
        File::open(temp.path())
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "first line\nsecond line\n");
    }

    #[test]
    #[serial_test::serial]
    fn test_env_filter_prefers_rust_log() {
        use tracing_subscriber::filter::LevelFilter;

        std::env::remove_var("RUST_LOG");
        assert_eq!(env_filter(Level::WARN, false).max_level_hint(), Some(LevelFilter::WARN));

        std::env::set_var("RUST_LOG", "github_mcp=trace");
        assert_eq!(env_filter(Level::WARN, false).max_level_hint(), Some(LevelFilter::TRACE));
        std::env::remove_var("RUST_LOG");
    }

    #[test]
    #[serial_test::serial]
    fn test_command_logging_raises_quiet_filter() {
        use tracing_subscriber::filter::LevelFilter;

        std::env::remove_var("RUST_LOG");
        assert_eq!(env_filter(Level::WARN, true).max_level_hint(), Some(LevelFilter::INFO));
        assert!(env_filter(Level::WARN, true).to_string().contains(COMMAND_TARGET));
    }
}
