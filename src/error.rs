use crate::command::Status;
use rustyline::error::ReadlineError;
use std::path::PathBuf;
use thiserror::Error;

/// Why a dispatched line did not run to a successful handler result.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The token is neither a command name nor a resolvable alias.
    #[error("command ({token}) not found")]
    NotFound { token: String },

    /// The command's validator rejected the arguments.
    #[error("invalid arguments, {message}")]
    InvalidArguments { command: String, message: String },

    /// The handler itself failed.
    #[error("{source:#}")]
    Execution {
        command: String,
        #[source]
        source: anyhow::Error,
    },
}

impl DispatchError {
    pub fn status(&self) -> Status {
        match self {
            DispatchError::NotFound { .. } => Status::NotFound,
            DispatchError::InvalidArguments { .. } | DispatchError::Execution { .. } => {
                Status::Fail
            }
        }
    }
}

/// Errors raised while building or tearing down the interactive shell.
#[derive(Debug, Error)]
pub enum ShellError {
    /// The line editor could not be created; the shell cannot start.
    #[error("failed to initialise line input: {0}")]
    LineSource(#[from] ReadlineError),

    #[error("failed to open log file {}: {source}", .path.display())]
    LogSink {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Non-line results of reading from a [`LineSource`](crate::line_source::LineSource).
#[derive(Debug, Error)]
pub enum ReadError {
    /// Ctrl-C while reading; the loop just reads again.
    #[error("interrupted")]
    Interrupted,

    /// End of input; the loop stops.
    #[error("end of input")]
    Eof,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<ReadlineError> for ReadError {
    fn from(err: ReadlineError) -> Self {
        match err {
            ReadlineError::Interrupted => ReadError::Interrupted,
            ReadlineError::Eof => ReadError::Eof,
            other => ReadError::Other(anyhow::anyhow!("{other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_dispatch_error_status() {
        let not_found = DispatchError::NotFound {
            token: "nope".to_string(),
        };
        assert_eq!(not_found.status(), Status::NotFound);
        assert_eq!(not_found.to_string(), "command (nope) not found");

        let invalid = DispatchError::InvalidArguments {
            command: "sleep".to_string(),
            message: "invalid number of arguments".to_string(),
        };
        assert_eq!(invalid.status(), Status::Fail);
        assert_eq!(invalid.to_string(), "invalid arguments, invalid number of arguments");
    }

    #[test]
    fn test_execution_error_shows_context_chain() {
        let source = Err::<(), _>(anyhow!("disk on fire"))
            .map_err(|e| e.context("error reading script file"))
            .unwrap_err();
        let err = DispatchError::Execution {
            command: "run".to_string(),
            source,
        };
        assert_eq!(err.status(), Status::Fail);
        assert_eq!(err.to_string(), "error reading script file: disk on fire");
    }

    #[test]
    fn test_readline_errors_map_to_signals() {
        assert!(matches!(
            ReadError::from(ReadlineError::Interrupted),
            ReadError::Interrupted
        ));
        assert!(matches!(ReadError::from(ReadlineError::Eof), ReadError::Eof));
    }
}
