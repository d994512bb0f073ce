//! The starter set of commands every shell is created with.

use crate::command::{any_args, exact_args, Argument, Command, Status};
use crate::shell::Shell;
use anyhow::{anyhow, bail, Context, Result};
use colored::Color;
use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

/// First line rustyline writes into its history files.
const HISTORY_HEADER: &str = "#V2";

pub(crate) fn register_builtins(shell: &mut Shell) {
    for command in [exit(), help(), clear(), history(), alias(), exec(), run(), sleep()] {
        shell.register(command);
    }
}

fn exit() -> Command {
    Command::new("exit")
        .description("Exit the shell")
        .usage("exit")
        .validator(any_args)
        .handler(|_, _| Ok(Status::Exit))
}

/// Lists every command, sorted by name, with its aliases and usage.
fn help() -> Command {
    Command::new("help")
        .description("List all available commands")
        .usage("help")
        .validator(any_args)
        .handler(|shell, _| {
            for cmd in shell.registry().sorted() {
                let aliases = shell.registry().aliases_of(cmd.name()).join(", ");

                shell.write_colored(Color::Yellow, &format!("{}: ", cmd.name()));
                shell.write(&format!("{}\n", cmd.get_description()));
                shell.write("    Aliases: ");
                if aliases.is_empty() {
                    shell.write("No aliases found.\n");
                } else {
                    shell.write(&format!("{aliases}\n"));
                }
                shell.write_colored(Color::Cyan, &format!("    Usage: {}\n\n", cmd.get_usage()));
            }
            Ok(Status::Ok)
        })
}

fn clear() -> Command {
    Command::new("clear")
        .description("Clear the screen")
        .usage("clear")
        .alias("cls")
        .validator(any_args)
        .handler(|shell, _| {
            shell.clear_screen()?;
            Ok(Status::Ok)
        })
}

fn history() -> Command {
    Command::new("history")
        .description("Display the shell history")
        .usage("history")
        .alias("hist")
        .validator(any_args)
        .handler(|shell, _| {
            let path = shell
                .config()
                .history_file
                .clone()
                .ok_or_else(|| anyhow!("no history file configured"))?;
            let contents = fs::read_to_string(&path).with_context(|| {
                format!("error reading history file {}", path.display())
            })?;

            for line in contents.lines().filter(|line| *line != HISTORY_HEADER) {
                shell.write(&format!("{line}\n"));
            }
            Ok(Status::Ok)
        })
}

/// `alias <alias> <command>`; the target may itself be an alias.
fn alias() -> Command {
    Command::new("alias")
        .description("Create an alias for a command")
        .usage("alias <alias> <command>")
        .argument(Argument::new("Alias", "The alias to create"))
        .argument(Argument::new("Command", "The command to create an alias for"))
        .validator(exact_args(2))
        .handler(|shell, args| {
            let target = shell
                .registry()
                .resolve(&args[1])
                .ok_or_else(|| anyhow!("command or alias not found: {}", args[1]))?;
            shell.create_alias(&args[0], target.name());
            Ok(Status::Ok)
        })
}

fn exec() -> Command {
    Command::new("exec")
        .description("Execute an external command")
        .usage("exec <command>")
        .argument(Argument::new("Execute command", "The command to execute"))
        .validator(|args| {
            if args.is_empty() {
                Err("no command provided".to_string())
            } else {
                Ok(())
            }
        })
        .handler(|shell, args| {
            let argv = join_quoted(args);
            let Some((program, rest)) = argv.split_first() else {
                bail!("no command provided");
            };
            shell
                .run_process(program, rest)
                .context("error executing command")?;
            Ok(Status::Ok)
        })
}

/// Re-join tokens wrapped in double quotes, e.g. `"a`, `b"` becomes `a b`.
///
/// An opening quote without a closing one swallows the rest of the line.
fn join_quoted(args: &[String]) -> Vec<String> {
    let mut argv = Vec::new();
    let mut tokens = args.iter();

    while let Some(token) = tokens.next() {
        let Some(rest) = token.strip_prefix('"') else {
            argv.push(token.clone());
            continue;
        };
        if let Some(word) = rest.strip_suffix('"') {
            argv.push(word.to_string());
            continue;
        }

        let mut word = rest.to_string();
        for next in tokens.by_ref() {
            word.push(' ');
            match next.strip_suffix('"') {
                Some(last) => {
                    word.push_str(last);
                    break;
                }
                None => word.push_str(next),
            }
        }
        argv.push(word);
    }

    argv
}

/// `run <path>`: executes every line of a file as if typed at the prompt.
fn run() -> Command {
    Command::new("run")
        .description("Run a script")
        .usage("run <script_path>")
        .argument(Argument::new("Script Path", "The path to the script to run"))
        .validator(|args| {
            let [path] = args else {
                return Err("invalid number of arguments".to_string());
            };
            let path = Path::new(path);
            if !path.exists() {
                return Err("file not found".to_string());
            }
            if !path.is_file() {
                return Err("invalid file type".to_string());
            }
            Ok(())
        })
        .handler(|shell, args| {
            let max_depth = shell.config().max_script_depth;
            if shell.script_depth >= max_depth {
                bail!("scripts nested deeper than {max_depth} levels");
            }

            let script = fs::read_to_string(&args[0])
                .with_context(|| format!("error reading script file {}", args[0]))?;

            shell.script_depth += 1;
            for line in script.lines() {
                shell.execute(line);
            }
            shell.script_depth -= 1;

            Ok(Status::Ok)
        })
}

fn sleep() -> Command {
    Command::new("sleep")
        .description("Idle the shell for a specified time")
        .usage("sleep <seconds>")
        .argument(Argument::new("Seconds", "The number of seconds to idle").arg_type("int"))
        .validator(|args| {
            let [seconds] = args else {
                return Err("invalid number of arguments".to_string());
            };
            parse_seconds(seconds).map(|_| ())
        })
        .handler(|_, args| {
            let seconds = parse_seconds(&args[0]).map_err(|err| anyhow!(err))?;
            thread::sleep(Duration::from_secs(seconds));
            Ok(Status::Ok)
        })
}

fn parse_seconds(raw: &str) -> std::result::Result<u64, String> {
    let seconds: i64 = raw
        .parse()
        .map_err(|err| format!("invalid number of seconds: {err}"))?;
    u64::try_from(seconds).map_err(|_| "number of seconds must not be negative".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShellConfig;
    use crate::error::DispatchError;
    use crate::host::{ProcessRunner, ScreenClearer};
    use crate::io_adapters::{captured, MemWriter};
    use std::cell::RefCell;
    use std::io::Write;
    use std::rc::Rc;

    fn test_shell(config: ShellConfig) -> (Shell, Rc<RefCell<Vec<u8>>>) {
        let (out, handle) = MemWriter::with_handle();
        (Shell::new(config, out), handle)
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[derive(Clone, Default)]
    struct RecordingRunner {
        calls: Rc<RefCell<Vec<Vec<String>>>>,
        fail: bool,
    }

    impl ProcessRunner for RecordingRunner {
        fn run(&mut self, program: &str, args: &[String]) -> Result<()> {
            let mut call = vec![program.to_string()];
            call.extend_from_slice(args);
            self.calls.borrow_mut().push(call);
            if self.fail {
                bail!("{program} exited with code 1");
            }
            Ok(())
        }
    }

    struct CountingClear(Rc<RefCell<usize>>);

    impl ScreenClearer for CountingClear {
        fn clear(&mut self) -> Result<()> {
            *self.0.borrow_mut() += 1;
            Ok(())
        }
    }

    #[test]
    fn test_builtins_registered() {
        let (shell, _) = test_shell(ShellConfig::ephemeral());
        for name in ["exit", "help", "clear", "history", "alias", "exec", "run", "sleep"] {
            assert!(shell.registry().resolve(name).is_some(), "{name}");
        }
        assert_eq!(shell.registry().resolve("cls").unwrap().name(), "clear");
        assert_eq!(shell.registry().resolve("hist").unwrap().name(), "history");
    }

    #[test]
    fn test_exit_command() {
        let (mut shell, _) = test_shell(ShellConfig::ephemeral());
        shell.create_alias("quit", "exit");
        assert_eq!(shell.dispatch("quit").status, Status::Exit);
    }

    #[test]
    fn test_help_lists_sorted_commands_with_aliases() {
        let (mut shell, out) = test_shell(ShellConfig::ephemeral());
        assert_eq!(shell.dispatch("help").status, Status::Ok);

        let text = captured(&out);
        let alias_pos = text.find("alias: Create an alias").unwrap();
        let sleep_pos = text.find("sleep: Idle the shell").unwrap();
        assert!(alias_pos < sleep_pos);
        assert!(text.contains("clear: Clear the screen\n    Aliases: cls\n    Usage: clear\n\n"));
        assert!(text.contains("exit: Exit the shell\n    Aliases: No aliases found.\n"));
        assert!(text.contains("    Usage: alias <alias> <command>\n"));
    }

    #[test]
    fn test_clear_delegates_to_host() {
        let (mut shell, _) = test_shell(ShellConfig::ephemeral());
        let count = Rc::new(RefCell::new(0));
        shell.set_screen_clearer(CountingClear(Rc::clone(&count)));

        assert_eq!(shell.dispatch("cls").status, Status::Ok);
        assert_eq!(shell.dispatch("clear").status, Status::Ok);
        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn test_history_prints_file_without_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history");
        fs::write(&path, "#V2\nhelp\nsleep 1\n").unwrap();

        let config = ShellConfig {
            history_file: Some(path),
            ..ShellConfig::ephemeral()
        };
        let (mut shell, out) = test_shell(config);
        assert_eq!(shell.dispatch("hist").status, Status::Ok);
        assert_eq!(captured(&out), "help\nsleep 1\n");
    }

    #[test]
    fn test_history_fails_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = ShellConfig {
            history_file: Some(dir.path().join("missing")),
            ..ShellConfig::ephemeral()
        };
        let (mut shell, _) = test_shell(config);
        assert_eq!(shell.dispatch("history").status, Status::Fail);

        let (mut shell, _) = test_shell(ShellConfig::ephemeral());
        let outcome = shell.dispatch("history");
        assert_eq!(outcome.status, Status::Fail);
        assert_eq!(
            outcome.error.unwrap().to_string(),
            "no history file configured"
        );
    }

    #[test]
    fn test_alias_command() {
        let (mut shell, _) = test_shell(ShellConfig::ephemeral());

        assert_eq!(shell.dispatch("alias h help").status, Status::Ok);
        assert_eq!(shell.registry().resolve("h").unwrap().name(), "help");

        // aliasing an alias stores the underlying command
        assert_eq!(shell.dispatch("alias hh h").status, Status::Ok);
        assert_eq!(shell.registry().alias_target("hh"), Some("help"));
    }

    #[test]
    fn test_alias_command_rejects_bad_input() {
        let (mut shell, _) = test_shell(ShellConfig::ephemeral());

        let outcome = shell.dispatch("alias h");
        assert!(matches!(outcome.error, Some(DispatchError::InvalidArguments { .. })));

        let outcome = shell.dispatch("alias x nothing");
        assert_eq!(outcome.status, Status::Fail);
        assert!(shell.registry().alias_target("x").is_none());
    }

    #[test]
    fn test_alias_command_warns_on_overwrite() {
        let (mut shell, out) = test_shell(ShellConfig::ephemeral());
        shell.dispatch("alias h help");
        shell.dispatch("alias h history");
        assert!(captured(&out).contains("Alias h already exists for command help"));
        assert_eq!(shell.registry().resolve("h").unwrap().name(), "history");
    }

    #[test]
    fn test_exec_passes_rejoined_arguments() {
        let (mut shell, _) = test_shell(ShellConfig::ephemeral());
        let runner = RecordingRunner::default();
        shell.set_process_runner(runner.clone());

        let status = shell.dispatch(r#"exec git commit -m "first try" --quiet"#).status;
        assert_eq!(status, Status::Ok);
        assert_eq!(
            *runner.calls.borrow(),
            vec![strings(&["git", "commit", "-m", "first try", "--quiet"])]
        );
    }

    #[test]
    fn test_exec_failures() {
        let (mut shell, out) = test_shell(ShellConfig::ephemeral());
        shell.set_process_runner(RecordingRunner {
            fail: true,
            ..Default::default()
        });

        assert_eq!(shell.dispatch("exec").status, Status::Fail);
        assert_eq!(shell.execute("exec false"), Status::Fail);
        assert!(captured(&out).contains("error executing command: false exited with code 1"));
    }

    #[test]
    fn test_join_quoted() {
        assert_eq!(join_quoted(&strings(&["a", "b"])), strings(&["a", "b"]));
        assert_eq!(join_quoted(&strings(&["\"one\""])), strings(&["one"]));
        assert_eq!(
            join_quoted(&strings(&["\"a", "b", "c\"", "d"])),
            strings(&["a b c", "d"])
        );
        assert_eq!(join_quoted(&strings(&["\"open", "end"])), strings(&["open end"]));
    }

    #[test]
    fn test_run_dispatches_each_line() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("setup.shell");
        let mut file = fs::File::create(&script).unwrap();
        writeln!(file, "alias g greet").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "nonsense").unwrap();
        writeln!(file, "g world").unwrap();
        drop(file);

        let (mut shell, out) = test_shell(ShellConfig::ephemeral());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let calls = Rc::clone(&seen);
        shell.register(Command::new("greet").handler(move |_, args| {
            calls.borrow_mut().push(args.to_vec());
            Ok(Status::Ok)
        }));

        let status = shell.dispatch(&format!("run {}", script.display())).status;
        assert_eq!(status, Status::Ok);
        assert_eq!(*seen.borrow(), vec![strings(&["world"])]);
        assert!(captured(&out).contains("Command (nonsense) not found"));
        assert_eq!(shell.script_depth, 0);
    }

    #[test]
    fn test_run_rejects_missing_and_directories() {
        let dir = tempfile::tempdir().unwrap();
        let (mut shell, _) = test_shell(ShellConfig::ephemeral());

        let missing = shell.dispatch(&format!("run {}", dir.path().join("nope").display()));
        match missing.error {
            Some(DispatchError::InvalidArguments { message, .. }) => {
                assert_eq!(message, "file not found")
            }
            other => panic!("unexpected: {other:?}"),
        }

        let directory = shell.dispatch(&format!("run {}", dir.path().display()));
        assert_eq!(directory.status, Status::Fail);
        assert_eq!(shell.dispatch("run").status, Status::Fail);
    }

    #[test]
    fn test_run_stops_runaway_recursion() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("loop.shell");
        fs::write(&script, format!("run {}\n", script.display())).unwrap();

        let config = ShellConfig {
            max_script_depth: 3,
            ..ShellConfig::ephemeral()
        };
        let (mut shell, out) = test_shell(config);
        assert_eq!(shell.execute(&format!("run {}", script.display())), Status::Ok);
        assert!(captured(&out).contains("scripts nested deeper than 3 levels"));
        assert_eq!(shell.script_depth, 0);
    }

    #[test]
    fn test_sleep_validation() {
        let (mut shell, _) = test_shell(ShellConfig::ephemeral());

        assert_eq!(shell.dispatch("sleep 0").status, Status::Ok);
        for line in ["sleep", "sleep 1 2", "sleep soon", "sleep -1"] {
            let outcome = shell.dispatch(line);
            assert_eq!(outcome.status, Status::Fail, "{line}");
        }
        match shell.dispatch("sleep -3").error {
            Some(DispatchError::InvalidArguments { message, .. }) => {
                assert_eq!(message, "number of seconds must not be negative")
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
