use crate::completion::CompletionTable;
use crate::error::{ReadError, ShellError};
use rustyline::completion::Completer;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::FileHistory;
use rustyline::validate::Validator;
use rustyline::{Config, Context, Editor, Helper};
use std::path::{Path, PathBuf};

/// Where the shell gets its input lines from.
pub trait LineSource {
    /// Block until one line is available, or report why none is.
    fn read_line(&mut self, prompt: &str) -> Result<String, ReadError>;

    /// Replace the completion candidates used by subsequent reads.
    fn update_completions(&mut self, _table: CompletionTable) {}

    /// Release whatever the source holds. Called once, when the loop ends.
    fn close(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// rustyline helper completing command names and argument tags.
#[derive(Debug, Default)]
pub struct ShellHelper {
    table: CompletionTable,
}

impl Completer for ShellHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        Ok(self.table.complete(&line[..pos]))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;
}

impl Highlighter for ShellHelper {}

impl Validator for ShellHelper {}

impl Helper for ShellHelper {}

/// Interactive [`LineSource`] backed by a rustyline editor.
///
/// Accepted non-blank lines are appended to the history file as soon as they are
/// read, so the `history` built-in always sees the current session.
pub struct EditorLineSource {
    editor: Editor<ShellHelper, FileHistory>,
    history_file: Option<PathBuf>,
}

impl EditorLineSource {
    pub fn new(history_file: Option<&Path>) -> Result<Self, ShellError> {
        // Every accepted line is persisted, repeats included.
        let config = Config::builder().history_ignore_dups(false)?.build();
        let mut editor = Editor::<ShellHelper, FileHistory>::with_config(config)?;
        editor.set_helper(Some(ShellHelper::default()));

        if let Some(path) = history_file {
            // A missing history file just means a fresh history.
            if let Err(err) = editor.load_history(path) {
                tracing::info!(path = %path.display(), error = %err, "no history loaded");
            }
        }

        Ok(Self {
            editor,
            history_file: history_file.map(Path::to_path_buf),
        })
    }

    fn remember(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        if let Err(err) = self.editor.add_history_entry(line) {
            tracing::warn!(error = %err, "failed to add history entry");
        }
        if let Some(path) = &self.history_file {
            if let Err(err) = self.editor.append_history(path) {
                tracing::warn!(path = %path.display(), error = %err, "failed to persist history");
            }
        }
    }
}

impl LineSource for EditorLineSource {
    fn read_line(&mut self, prompt: &str) -> Result<String, ReadError> {
        let line = self.editor.readline(prompt)?;
        self.remember(&line);
        Ok(line)
    }

    fn update_completions(&mut self, table: CompletionTable) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.table = table;
        }
    }
}
