//! Capabilities the shell borrows from the host operating system.
//!
//! Built-ins never spawn processes or touch the terminal directly; they go
//! through these traits so tests and embedding hosts can swap them out.

use anyhow::{bail, Context, Result};
use std::process::{Command, ExitStatus, Stdio};

/// Runs an external program to completion, sharing the shell's standard streams.
pub trait ProcessRunner {
    fn run(&mut self, program: &str, args: &[String]) -> Result<()>;
}

/// Clears the user's screen.
pub trait ScreenClearer {
    fn clear(&mut self) -> Result<()>;
}

/// [`ProcessRunner`] spawning real OS processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcess;

impl ProcessRunner for SystemProcess {
    fn run(&mut self, program: &str, args: &[String]) -> Result<()> {
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .with_context(|| format!("failed to start {program}"))?;

        if !status.success() {
            bail!("{program} exited with code {}", exit_code(status));
        }
        Ok(())
    }
}

fn exit_code(status: ExitStatus) -> i32 {
    match status.code() {
        Some(code) => code,
        None => terminated_by_signal(status),
    }
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else if ExitStatusExt::core_dumped(&exit_status) {
        255
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> i32 {
    -1
}

/// [`ScreenClearer`] delegating to the platform's `clear` / `cls` program.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClear;

impl ScreenClearer for SystemClear {
    fn clear(&mut self) -> Result<()> {
        let mut cmd = if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.args(["/c", "cls"]);
            cmd
        } else {
            Command::new("clear")
        };
        cmd.stdout(Stdio::inherit())
            .status()
            .context("failed to clear the screen")?;
        Ok(())
    }
}

/// [`ScreenClearer`] that does nothing, for non-interactive output.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoClear;

impl ScreenClearer for NoClear {
    fn clear(&mut self) -> Result<()> {
        Ok(())
    }
}
