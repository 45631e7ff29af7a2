//! Bootstrap command execution for Trellis.
//! After pruning, a fixed sequence of commands installs dependencies and
//! normalizes formatting inside the generated project. Output streams to the
//! invoking terminal as it is produced; the first non-zero exit aborts the
//! sequence and the child's status becomes the process exit code. Nothing is
//! rolled back on failure.

use crate::answers::Answers;
use crate::error::{Error, Result};
use std::fmt;
use std::io::{Read, Write};
use std::path::Path;
use std::process::{Command, Stdio};

/// One external command of the bootstrap sequence.
#[derive(Debug, Clone)]
pub struct BootstrapCommand {
    program: String,
    args: Vec<String>,
}

impl BootstrapCommand {
    pub fn new<S: Into<String>>(program: S, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
        }
    }
}

impl fmt::Display for BootstrapCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// The bootstrap sequence for an answers record. Order is fixed; the
/// lockfile step only exists when pinned requirements files were selected.
pub fn commands(answers: &Answers) -> Vec<BootstrapCommand> {
    let mut commands = vec![BootstrapCommand::new("make", &["all"])];
    if answers.include_requirements_files {
        commands.push(BootstrapCommand::new("make", &["dependencies"]));
    }
    commands.push(BootstrapCommand::new("make", &["pretty"]));
    commands
}

/// Runs one command in the project directory, draining its stdout to ours
/// incrementally while it runs. Stderr is inherited and interleaves live.
///
/// # Errors
/// * `Error::BootstrapFailed` carrying the child's exit code on non-zero exit
/// * `Error::IoError` if the command cannot be spawned
pub fn run_command(project_dir: &Path, command: &BootstrapCommand) -> Result<()> {
    println!("Running '{}'", command);

    let mut child = Command::new(&command.program)
        .args(&command.args)
        .current_dir(project_dir)
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(Error::IoError)?;

    if let Some(mut child_stdout) = child.stdout.take() {
        let mut stdout = std::io::stdout();
        let mut buffer = [0u8; 1024];
        loop {
            let read = child_stdout.read(&mut buffer).map_err(Error::IoError)?;
            if read == 0 {
                break;
            }
            stdout.write_all(&buffer[..read]).map_err(Error::IoError)?;
            stdout.flush().map_err(Error::IoError)?;
        }
    }

    let status = child.wait().map_err(Error::IoError)?;
    if !status.success() {
        return Err(Error::BootstrapFailed {
            command: command.to_string(),
            code: status.code().unwrap_or(1),
        });
    }

    Ok(())
}

/// Runs the whole bootstrap sequence, stopping at the first failure.
pub fn run(project_dir: &Path, commands: &[BootstrapCommand]) -> Result<()> {
    for command in commands {
        run_command(project_dir, command)?;
    }
    Ok(())
}
