use argh::FromArgs;
use command_shell::command::{min_args, Argument, Command, Status};
use command_shell::{Repl, ShellConfig};
use std::path::PathBuf;

#[derive(FromArgs)]
/// Interactive command shell.
struct Args {
    #[argh(option, default = "String::from(command_shell::config::SHELL_PROMPT)")]
    /// prompt shown before every line
    prompt: String,

    #[argh(option, default = "PathBuf::from(command_shell::config::HISTORY_FILE)")]
    /// file the line history is persisted to
    history_file: PathBuf,

    #[argh(option, default = "PathBuf::from(command_shell::config::LOG_FILE)")]
    /// file diagnostics are logged to
    log_file: PathBuf,

    #[argh(switch)]
    /// never colourise output
    no_color: bool,
}

fn main() -> anyhow::Result<()> {
    let args: Args = argh::from_env();
    let config = ShellConfig {
        prompt: args.prompt,
        history_file: Some(args.history_file),
        log_file: Some(args.log_file),
        color: !args.no_color,
        ..ShellConfig::default()
    };

    let mut repl = Repl::interactive(config)?;
    repl.shell_mut().register(
        Command::new("echo")
            .description("Print the arguments")
            .usage("echo <text...>")
            .argument(Argument::new("Text", "Words to print"))
            .validator(min_args(1))
            .handler(|shell, args| {
                shell.write(&format!("{}\n", args.join(" ")));
                Ok(Status::Ok)
            }),
    );
    repl.run();
    Ok(())
}
