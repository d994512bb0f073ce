use crate::builtin;
use crate::command::{Command, EarlyCommand, Status};
use crate::completion::CompletionTable;
use crate::config::ShellConfig;
use crate::error::DispatchError;
use crate::host::{NoClear, ProcessRunner, ScreenClearer, SystemClear, SystemProcess};
use crate::registry::Registry;
use crate::scheduler::Scheduler;
use crate::suggest::suggest;
use crate::tokenizer::tokenize;
use colored::{Color, Colorize};
use std::io::{self, IsTerminal, Write};

pub const SHELL_PREFIX: &str = "SHELL";
pub const COMMAND_PREFIX: &str = "COMMAND";

/// Longest token echoed back verbatim in a "not found" message.
const MAX_ECHOED_TOKEN: usize = 20;

/// Result of dispatching one line: the status plus, for anything but a clean
/// handler result, the reason.
#[derive(Debug)]
pub struct Outcome {
    pub status: Status,
    pub error: Option<DispatchError>,
}

impl Outcome {
    fn status(status: Status) -> Self {
        Self {
            status,
            error: None,
        }
    }

    fn failed(error: DispatchError) -> Self {
        Self {
            status: error.status(),
            error: Some(error),
        }
    }
}

/// The context every command runs against.
///
/// A shell owns the command [`Registry`], the early-command [`Scheduler`], the
/// output sink and the host capabilities. Handlers receive `&mut Shell`, which is
/// how built-ins such as `alias` and `run` reach back into the registry and the
/// dispatcher.
pub struct Shell {
    config: ShellConfig,
    registry: Registry,
    scheduler: Scheduler,
    out: Box<dyn Write>,
    color: bool,
    processes: Box<dyn ProcessRunner>,
    screen: Box<dyn ScreenClearer>,
    pub(crate) script_depth: usize,
}

impl Shell {
    /// A shell writing to `out`, with the built-in commands registered.
    ///
    /// Output is never colourised and clearing the screen is a no-op; use
    /// [`Shell::stdio`] for an interactive terminal.
    pub fn new(config: ShellConfig, out: impl Write + 'static) -> Self {
        let mut shell = Self::without_builtins(config, out);
        builtin::register_builtins(&mut shell);
        shell
    }

    /// A shell writing to `out` with an empty registry.
    pub fn without_builtins(config: ShellConfig, out: impl Write + 'static) -> Self {
        Self {
            scheduler: Scheduler::new(config.priority_order),
            registry: Registry::new(),
            out: Box::new(out),
            color: false,
            processes: Box::new(SystemProcess),
            screen: Box::new(NoClear),
            script_depth: 0,
            config,
        }
    }

    /// A shell on the process' standard output, colourised when that is a terminal.
    pub fn stdio(config: ShellConfig) -> Self {
        let stdout = io::stdout();
        let interactive = stdout.is_terminal();
        let color = config.color && interactive;
        let mut shell = Self::new(config, stdout);
        shell.color = color;
        if interactive {
            shell.screen = Box::new(SystemClear);
        }
        shell
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn set_process_runner(&mut self, runner: impl ProcessRunner + 'static) {
        self.processes = Box::new(runner);
    }

    pub fn set_screen_clearer(&mut self, screen: impl ScreenClearer + 'static) {
        self.screen = Box::new(screen);
    }

    /// Register `cmd`, warning about every declared alias that was already taken.
    pub fn register(&mut self, cmd: Command) {
        for (alias, previous) in self.registry.register(cmd) {
            self.warn_alias_overridden(&alias, &previous);
        }
    }

    /// Point `alias` at `target`, warning when the alias already existed.
    pub fn create_alias(&mut self, alias: &str, target: &str) {
        if let Some(previous) = self.registry.create_alias(alias, target) {
            self.warn_alias_overridden(alias, &previous);
        }
    }

    fn warn_alias_overridden(&mut self, alias: &str, previous: &str) {
        let warning =
            format!("Alias {alias} already exists for command {previous}, alias overridden.");
        tracing::warn!(alias, previous, "alias overridden");
        self.warn(COMMAND_PREFIX, &warning);
    }

    pub fn register_early(&mut self, cmd: EarlyCommand) {
        self.scheduler.register(cmd);
    }

    pub fn sort_early_commands(&mut self) {
        self.scheduler.sort();
    }

    /// Run every early command once, in scheduler order.
    pub fn run_early_commands(&mut self) {
        for command in self.scheduler.snapshot() {
            if let Err(err) = command.run(self) {
                tracing::warn!(command = %command.name, error = %format!("{err:#}"), "early command failed");
            }
        }
    }

    pub fn completions(&self) -> CompletionTable {
        CompletionTable::from_registry(&self.registry)
    }

    /// Resolve, validate and run one input line.
    ///
    /// Any spelling of `exit` stops the shell before the registry is consulted;
    /// a blank line is a successful no-op.
    pub fn dispatch(&mut self, line: &str) -> Outcome {
        let (token, args) = tokenize(line);

        if token.to_uppercase() == Status::Exit.as_str() {
            return Outcome::status(Status::Exit);
        }

        if token.is_empty() {
            return Outcome::status(Status::Ok);
        }

        let Some(command) = self.registry.resolve(&token) else {
            tracing::error!(command = %token, "command not found");
            return Outcome::failed(DispatchError::NotFound { token });
        };

        if let Err(message) = command.validate(&args) {
            tracing::error!(command = %token, reason = %message, "invalid arguments");
            return Outcome::failed(DispatchError::InvalidArguments {
                command: command.name().to_string(),
                message,
            });
        }

        match command.execute(self, &args) {
            Ok(status) => Outcome::status(status),
            Err(source) => {
                tracing::error!(command = %token, error = %format!("{source:#}"), "command failed");
                Outcome::failed(DispatchError::Execution {
                    command: command.name().to_string(),
                    source,
                })
            }
        }
    }

    /// Dispatch `line` and report anything that went wrong on the output.
    pub fn execute(&mut self, line: &str) -> Status {
        let Outcome { status, error } = self.dispatch(line);
        let (token, _) = tokenize(line);

        match error {
            Some(DispatchError::NotFound { token }) => self.report_not_found(&token),
            Some(DispatchError::InvalidArguments { message, .. }) => {
                self.error(COMMAND_PREFIX, &format!("Invalid arguments, {message}"));
                self.report_usage(&token);
            }
            Some(err @ DispatchError::Execution { .. }) => {
                self.error(COMMAND_PREFIX, &err.to_string());
                self.report_usage(&token);
            }
            None => match status {
                Status::Fail => self.report_usage(&token),
                Status::NotFound => self.report_not_found(&token),
                Status::Ok | Status::Exit => {}
            },
        }

        status
    }

    fn report_usage(&mut self, token: &str) {
        match self.registry.resolve(token) {
            Some(command) => {
                self.error(
                    SHELL_PREFIX,
                    &format!("Command failed, Usage: {}", command.get_usage()),
                );
            }
            None => self.report_not_found(token),
        }
    }

    fn report_not_found(&mut self, token: &str) {
        let mut shown: String = token.chars().take(MAX_ECHOED_TOKEN).collect();
        if shown.len() < token.len() {
            shown.push_str("...");
        }

        let mut message = format!("Command ({shown}) not found, ");
        if let Some(suggestion) = suggest(&self.registry, token) {
            match suggestion.alias {
                Some(alias) => message.push_str(&format!(
                    "did you mean `{alias}` (alias for `{}`)?, ",
                    suggestion.command
                )),
                None => message.push_str(&format!("did you mean `{}`?, ", suggestion.command)),
            }
        }
        message.push_str("type `help` for list of commands");
        self.error(COMMAND_PREFIX, &message);
    }

    pub fn run_process(&mut self, program: &str, args: &[String]) -> anyhow::Result<()> {
        self.processes.run(program, args)
    }

    pub fn clear_screen(&mut self) -> anyhow::Result<()> {
        self.screen.clear()
    }

    pub fn write(&mut self, output: &str) {
        if let Err(err) = self.out.write_all(output.as_bytes()) {
            tracing::warn!(error = %err, "failed to write output");
        }
    }

    pub fn write_colored(&mut self, color: Color, output: &str) {
        if self.color {
            let colored = output.color(color).to_string();
            self.write(&colored);
        } else {
            self.write(output);
        }
    }

    pub fn error(&mut self, prefix: &str, err: &str) {
        self.write_colored(Color::Red, &format!("[{prefix} Error]: {err}\n"));
    }

    pub fn warn(&mut self, prefix: &str, warning: &str) {
        self.write_colored(Color::Yellow, &format!("[{prefix} Warning]: {warning}\n"));
    }

    pub fn info(&mut self, prefix: &str, info: &str) {
        self.write_colored(Color::Blue, &format!("[{prefix} Info]: {info}\n"));
    }

    pub fn success(&mut self, prefix: &str, success: &str) {
        self.write_colored(Color::Green, &format!("[{prefix} Success]: {success}\n"));
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
