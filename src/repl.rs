use crate::config::ShellConfig;
use crate::error::{ReadError, ShellError};
use crate::line_source::{EditorLineSource, LineSource};
use crate::log::LogSink;
use crate::shell::{Shell, SHELL_PREFIX};

/// The interactive loop: a [`Shell`] fed from a [`LineSource`].
///
/// Example
/// ```
/// use command_shell::io_adapters::{MemWriter, ScriptedInput};
/// use command_shell::{Repl, Shell, ShellConfig};
///
/// let (out, _) = MemWriter::with_handle();
/// let shell = Shell::new(ShellConfig::ephemeral(), out);
/// let repl = Repl::new(shell, ScriptedInput::new(["help", "exit"]), None);
/// repl.run();
/// ```
pub struct Repl<L: LineSource> {
    shell: Shell,
    input: L,
    log: Option<LogSink>,
}

impl Repl<EditorLineSource> {
    /// An interactive shell on the terminal, configured from `config`.
    ///
    /// Fails when the log file cannot be created or the line editor cannot be
    /// initialised; without a line editor there is nothing to run.
    pub fn interactive(config: ShellConfig) -> Result<Self, ShellError> {
        let log = config.log_file.as_deref().map(LogSink::open).transpose()?;
        let input = EditorLineSource::new(config.history_file.as_deref())?;
        Ok(Self::new(Shell::stdio(config), input, log))
    }
}

impl<L: LineSource> Repl<L> {
    pub fn new(shell: Shell, input: L, log: Option<LogSink>) -> Self {
        Self { shell, input, log }
    }

    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    /// Host access for registering commands and early commands before [`Repl::run`].
    pub fn shell_mut(&mut self) -> &mut Shell {
        &mut self.shell
    }

    /// Read and execute lines until `exit` or end of input, then shut down.
    pub fn run(mut self) {
        if let Err(err) = self.shell.clear_screen() {
            tracing::warn!(error = %format!("{err:#}"), "failed to clear screen");
        }
        let welcome = self.shell.config().welcome.clone();
        self.shell.write(&welcome);
        tracing::info!("shell started");
        self.shell.sort_early_commands();

        loop {
            self.shell.write("\n");
            self.shell.run_early_commands();
            let _ = self.shell.flush();

            self.input.update_completions(self.shell.completions());
            let prompt = self.shell.config().prompt.clone();
            match self.input.read_line(&prompt) {
                Ok(line) => {
                    if self.shell.execute(&line).is_terminal() {
                        break;
                    }
                }
                Err(ReadError::Interrupted) => continue,
                Err(ReadError::Eof) => break,
                Err(ReadError::Other(err)) => {
                    tracing::error!(error = %format!("{err:#}"), "failed to read input");
                    self.shell
                        .error(SHELL_PREFIX, &format!("Error reading input: {err:#}"));
                }
            }
        }

        self.shutdown();
    }

    /// Close the log, the line source and the output, in that order. Each step runs
    /// even if an earlier one failed.
    fn shutdown(&mut self) {
        tracing::info!("shell stopped");
        if let Some(log) = self.log.as_mut() {
            log.close();
        }

        if let Err(err) = self.input.close() {
            self.shell
                .error(SHELL_PREFIX, &format!("Error closing input: {err:#}"));
        }

        if let Err(err) = self.shell.flush() {
            eprintln!("Error flushing output: {err}");
        }
    }
}
