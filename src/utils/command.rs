//! Command execution utilities
//!
//! Provides helpers for running external commands (git, the compiler) with
//! consistent output capture. Commands run on tokio so that stdin can be fed
//! from a separate task while stdout is drained.

use std::path::Path;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

/// Result of a command execution
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code of the command (-1 when killed by a signal)
    pub exit_code: i32,
    /// Standard output (stdout), untrimmed
    pub stdout: String,
    /// Standard error (stderr), trimmed
    pub stderr: String,
}

impl CommandResult {
    /// Check if the command succeeded (exit code 0)
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Execute a command and capture its output
///
/// # Arguments
/// * `program` - The program to execute
/// * `args` - Arguments to pass to the program
/// * `working_dir` - Optional working directory
///
/// # Returns
/// * `Ok(CommandResult)` - The command result with exit code, stdout, and stderr
/// * `Err(std::io::Error)` - If the command failed to start
pub async fn execute_command<S: AsRef<str>>(
    program: &str,
    args: &[S],
    working_dir: Option<&Path>,
) -> std::io::Result<CommandResult> {
    execute_command_with_input(program, args, working_dir, None).await
}

/// Execute a command, writing `input` to its stdin, and capture its output
pub async fn execute_command_with_input<S: AsRef<str>>(
    program: &str,
    args: &[S],
    working_dir: Option<&Path>,
    input: Option<Vec<u8>>,
) -> std::io::Result<CommandResult> {
    let mut cmd = Command::new(program);
    cmd.args(args.iter().map(AsRef::as_ref))
        .stdin(if input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    if let Some(dir) = working_dir {
        cmd.current_dir(dir);
    }

    debug!(program, "Spawning command");
    let mut child = cmd.spawn()?;

    let writer = match (input, child.stdin.take()) {
        (Some(bytes), Some(mut stdin)) => Some(tokio::spawn(async move {
            let result = stdin.write_all(&bytes).await;
            drop(stdin);
            result
        })),
        _ => None,
    };

    let output = child.wait_with_output().await?;

    if let Some(writer) = writer {
        match writer.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(program, error = %e, "Failed to write command stdin"),
            Err(e) => warn!(program, error = %e, "Stdin writer task failed"),
        }
    }

    Ok(CommandResult {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    })
}

/// Execute a command and return stdout if successful, error otherwise
///
/// # Returns
/// * `Ok(String)` - stdout if exit code is 0
/// * `Err(String)` - Error message with stderr if command failed
pub async fn execute_command_checked<S: AsRef<str>>(
    program: &str,
    args: &[S],
    working_dir: Option<&Path>,
    input: Option<Vec<u8>>,
) -> Result<String, String> {
    let result = execute_command_with_input(program, args, working_dir, input)
        .await
        .map_err(|e| format!("Failed to execute '{}': {}", program, e))?;

    if result.success() {
        Ok(result.stdout)
    } else {
        Err(format!(
            "'{}' failed with exit code {}: {}",
            program, result.exit_code, result.stderr
        ))
    }
}
