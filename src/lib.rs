//! An embeddable, line-oriented command shell.
//!
//! A host application registers its own [`Command`]s (next to a small set of
//! built-ins: `exit`, `help`, `clear`, `history`, `alias`, `exec`, `run`, `sleep`)
//! and hands the [`Shell`] to a [`Repl`]. Every input line is tokenized, resolved
//! to a command or alias, validated and executed, and the outcome is reported as a
//! [`Status`]. Unknown commands get a "did you mean" hint based on edit distance.
//!
//! The modules [`command`], [`registry`] and [`shell`] are the core; [`line_source`],
//! [`host`] and [`log`] are the swappable edges towards the terminal, the operating
//! system and the diagnostic log.

mod builtin;
pub mod command;
pub mod completion;
pub mod config;
pub mod distance;
pub mod error;
pub mod host;
pub mod io_adapters;
pub mod line_source;
pub mod log;
pub mod registry;
pub mod repl;
pub mod scheduler;
pub mod shell;
pub mod suggest;
pub mod tokenizer;

pub use command::{Argument, Command, EarlyCommand, Status};
pub use config::ShellConfig;
pub use error::{DispatchError, ReadError, ShellError};
pub use registry::Registry;
pub use repl::Repl;
pub use shell::{Outcome, Shell};
