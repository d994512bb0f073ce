use crate::scheduler::PriorityOrder;
use std::path::PathBuf;

pub const SHELL_PROMPT: &str = ">>> ";
pub const HISTORY_FILE: &str = ".shell_history";
pub const LOG_FILE: &str = "shell.log";
pub const WELCOME_MESSAGE: &str = "Debug: Shell started";

/// Settings for a [`Shell`](crate::Shell) and the loop driving it.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub prompt: String,
    /// Persisted line history, also shown by the `history` built-in.
    pub history_file: Option<PathBuf>,
    /// Diagnostic log; `None` leaves logging to the host's subscriber.
    pub log_file: Option<PathBuf>,
    /// Printed once when the loop starts.
    pub welcome: String,
    /// Colourise messages. Ignored when output is not a terminal.
    pub color: bool,
    pub priority_order: PriorityOrder,
    /// How deeply `run` scripts may invoke further scripts.
    pub max_script_depth: usize,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: SHELL_PROMPT.to_string(),
            history_file: Some(PathBuf::from(HISTORY_FILE)),
            log_file: Some(PathBuf::from(LOG_FILE)),
            welcome: WELCOME_MESSAGE.to_string(),
            color: true,
            priority_order: PriorityOrder::default(),
            max_script_depth: 16,
        }
    }
}

impl ShellConfig {
    /// Configuration touching no files: no history, no log, no colour.
    ///
    /// Suited to embedding the shell in tests or non-interactive hosts.
    pub fn ephemeral() -> Self {
        Self {
            history_file: None,
            log_file: None,
            color: false,
            ..Self::default()
        }
    }
}
