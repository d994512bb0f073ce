use crate::shell::Shell;
use anyhow::Result;
use std::fmt;

/// Outcome of dispatching one input line.
///
/// `Exit` is the only value that stops the interactive loop; every other status
/// is a continuation state that may be accompanied by a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Ok,
    Fail,
    Exit,
    NotFound,
}

impl Status {
    /// The canonical upper-case spelling, e.g. `"NOT_FOUND"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::Fail => "FAIL",
            Status::Exit => "EXIT",
            Status::NotFound => "NOT_FOUND",
        }
    }

    /// Whether the interactive loop should stop after this status.
    pub fn is_terminal(self) -> bool {
        self == Status::Exit
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tag value meaning "this argument takes part in no completion".
pub const EMPTY_TAG: &str = "";

/// Description of one positional parameter of a [`Command`].
///
/// Everything here is documentation and completion metadata: the shell never
/// enforces `required` or `arg_type`, and never fills in `default`. Checking the
/// actual values is the job of the command's validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub name: String,
    /// Short token offered by tab completion; [`EMPTY_TAG`] for none.
    pub tag: String,
    pub description: String,
    pub required: bool,
    /// Advisory type name such as `"string"` or `"int"`.
    pub arg_type: String,
    pub default: String,
}

impl Argument {
    /// A required `"string"` argument without tag or default.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: EMPTY_TAG.to_string(),
            description: description.into(),
            required: true,
            arg_type: "string".to_string(),
            default: String::new(),
        }
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn arg_type(mut self, arg_type: impl Into<String>) -> Self {
        self.arg_type = arg_type.into();
        self
    }

    pub fn default_value(mut self, default: impl Into<String>) -> Self {
        self.default = default.into();
        self
    }
}

/// Capability of running a command once its arguments have been accepted.
///
/// Implemented for every `Fn(&mut Shell, &[String]) -> Result<Status>` closure.
/// An `Err` is reported as a failed execution; it never stops the shell.
pub trait Executable {
    fn execute(&self, shell: &mut Shell, args: &[String]) -> Result<Status>;
}

impl<F> Executable for F
where
    F: Fn(&mut Shell, &[String]) -> Result<Status>,
{
    fn execute(&self, shell: &mut Shell, args: &[String]) -> Result<Status> {
        self(shell, args)
    }
}

/// Capability of accepting or rejecting an argument list before execution.
///
/// `Err` carries the diagnostic shown to the user next to the usage string.
pub trait Validatable {
    fn validate(&self, args: &[String]) -> std::result::Result<(), String>;
}

impl<F> Validatable for F
where
    F: Fn(&[String]) -> std::result::Result<(), String>,
{
    fn validate(&self, args: &[String]) -> std::result::Result<(), String> {
        self(args)
    }
}

/// A named, registered unit of shell functionality.
///
/// Built with [`Command::new`] and the chained setters:
///
/// ```
/// use command_shell::command::{exact_args, Argument, Command, Status};
///
/// let greet = Command::new("greet")
///     .description("Say hello")
///     .usage("greet <name>")
///     .argument(Argument::new("Name", "Who to greet"))
///     .alias("g")
///     .validator(exact_args(1))
///     .handler(|shell, args| {
///         shell.write(&format!("hello {}\n", args[0]));
///         Ok(Status::Ok)
///     });
/// assert_eq!(greet.name(), "greet");
/// ```
pub struct Command {
    name: String,
    description: String,
    usage: String,
    arguments: Vec<Argument>,
    aliases: Vec<String>,
    handler: Box<dyn Executable>,
    validator: Box<dyn Validatable>,
}

impl Command {
    /// A command that accepts any arguments and does nothing but succeed.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            usage: name.clone(),
            name,
            description: String::new(),
            arguments: Vec::new(),
            aliases: Vec::new(),
            handler: Box::new(succeed),
            validator: Box::new(any_args),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    pub fn argument(mut self, argument: Argument) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut Shell, &[String]) -> Result<Status> + 'static,
    {
        self.handler = Box::new(handler);
        self
    }

    /// Like [`Command::handler`] but for types implementing [`Executable`] directly.
    pub fn executable(mut self, executable: impl Executable + 'static) -> Self {
        self.handler = Box::new(executable);
        self
    }

    pub fn validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&[String]) -> std::result::Result<(), String> + 'static,
    {
        self.validator = Box::new(validator);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get_description(&self) -> &str {
        &self.description
    }

    pub fn get_usage(&self) -> &str {
        &self.usage
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// Aliases declared on the command itself; runtime aliases live in the registry.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn validate(&self, args: &[String]) -> std::result::Result<(), String> {
        self.validator.validate(args)
    }

    pub fn execute(&self, shell: &mut Shell, args: &[String]) -> Result<Status> {
        self.handler.execute(shell, args)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("usage", &self.usage)
            .field("arguments", &self.arguments)
            .field("aliases", &self.aliases)
            .finish_non_exhaustive()
    }
}

/// A host callback run once per loop iteration, before input is read.
pub struct EarlyCommand {
    pub name: String,
    pub description: String,
    pub usage: String,
    /// Position in the run order, interpreted by the scheduler's
    /// [`PriorityOrder`](crate::scheduler::PriorityOrder).
    pub priority: i32,
    handler: Box<dyn Fn(&mut Shell) -> Result<()>>,
}

impl EarlyCommand {
    pub fn new<F>(name: impl Into<String>, priority: i32, handler: F) -> Self
    where
        F: Fn(&mut Shell) -> Result<()> + 'static,
    {
        let name = name.into();
        Self {
            usage: name.clone(),
            name,
            description: String::new(),
            priority,
            handler: Box::new(handler),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    pub fn run(&self, shell: &mut Shell) -> Result<()> {
        (self.handler)(shell)
    }
}

impl fmt::Debug for EarlyCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EarlyCommand")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

fn succeed(_shell: &mut Shell, _args: &[String]) -> Result<Status> {
    Ok(Status::Ok)
}

/// Validator accepting every argument list.
pub fn any_args(_args: &[String]) -> std::result::Result<(), String> {
    Ok(())
}

/// Validator requiring exactly `count` arguments.
pub fn exact_args(count: usize) -> impl Fn(&[String]) -> std::result::Result<(), String> {
    move |args| {
        if args.len() == count {
            Ok(())
        } else {
            Err("invalid number of arguments".to_string())
        }
    }
}

/// Validator requiring at least `count` arguments.
pub fn min_args(count: usize) -> impl Fn(&[String]) -> std::result::Result<(), String> {
    move |args| {
        if args.len() >= count {
            Ok(())
        } else {
            Err(format!("expected at least {count} argument(s), got {}", args.len()))
        }
    }
}
