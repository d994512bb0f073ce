use crate::error::ShellError;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::dispatcher::DefaultGuard;
use tracing::Level;

/// File-backed diagnostic log for one shell session.
///
/// While open, every `tracing` event emitted on the shell's thread is written to
/// the file as plain text with its level and source location. Closing (or
/// dropping) the sink restores the previous subscriber and closes the file.
pub struct LogSink {
    path: PathBuf,
    guard: Option<DefaultGuard>,
}

impl LogSink {
    /// Create (truncating) the log file and start capturing events into it.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ShellError> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|source| ShellError::LogSink {
            path: path.clone(),
            source,
        })?;

        let subscriber = tracing_subscriber::fmt()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_max_level(Level::INFO)
            .with_file(true)
            .with_line_number(true)
            .finish();

        Ok(Self {
            path,
            guard: Some(tracing::subscriber::set_default(subscriber)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stop capturing and close the file.
    pub fn close(&mut self) {
        self.guard.take();
    }
}
