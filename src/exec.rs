//! External command execution
//!
//! Every git/gh invocation goes through [`Cmd`]: output is captured, and a
//! nonzero exit produces a [`Error::CommandFailed`] after a diagnostic
//! block is written to stderr so the operator sees the full subprocess
//! context. Calls are awaited to completion; there is no timeout.

use crate::error::{Error, Result};
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// Captured output of a finished command
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
    /// Process exit code (-1 if terminated by signal)
    pub exit_code: i32,
}

impl CommandOutput {
    /// Whether the process exited zero
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Builder for one external process invocation
#[derive(Debug, Clone)]
pub struct Cmd {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    input: Option<String>,
    envs: Vec<(String, String)>,
    check: bool,
}

impl Cmd {
    /// Start building an invocation of `program`
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            input: None,
            envs: Vec::new(),
            check: true,
        }
    }

    /// Append arguments
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run the process in `dir` instead of the current directory
    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Pipe `input` to the process on stdin
    #[must_use]
    pub fn input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }

    /// Set an environment variable for the process
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Return the captured output even on nonzero exit instead of failing
    #[must_use]
    pub const fn unchecked(mut self) -> Self {
        self.check = false;
        self
    }

    /// Rendered command line, for diagnostics
    fn render(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }

    fn cwd_display(&self) -> String {
        self.cwd.as_ref().map_or_else(
            || {
                std::env::current_dir()
                    .map_or_else(|_| ".".to_string(), |dir| dir.display().to_string())
            },
            |dir| dir.display().to_string(),
        )
    }

    /// Spawn the process and wait for it to finish.
    ///
    /// With checking enabled (the default), a nonzero exit writes the
    /// diagnostic block to stderr and fails with [`Error::CommandFailed`].
    pub async fn run(self) -> Result<CommandOutput> {
        debug!(command = %self.render(), cwd = %self.cwd_display(), "spawning");

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command.stdin(if self.input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        });
        if let Some(dir) = &self.cwd {
            command.current_dir(dir);
        }
        for (key, value) in &self.envs {
            command.env(key, value);
        }

        let mut child = command.spawn()?;
        if let Some(text) = self.input.as_deref() {
            if let Some(mut stdin) = child.stdin.take() {
                stdin.write_all(text.as_bytes()).await?;
            }
            // stdin handle dropped here, closing the pipe
        }
        let output = child.wait_with_output().await?;

        let captured = CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code().unwrap_or(-1),
        };

        if self.check && !captured.success() {
            let command = self.render();
            let cwd = self.cwd_display();
            eprintln!("[exec] command failed");
            eprintln!("[exec] cwd: {cwd}");
            eprintln!("[exec] cmd: {command}");
            eprintln!("[exec] exit_code: {}", captured.exit_code);
            eprintln!("[exec] --- stdout ---");
            eprintln!("{}", captured.stdout);
            eprintln!("[exec] --- stderr ---");
            eprintln!("{}", captured.stderr);
            eprintln!("[exec] ---------------");
            return Err(Error::CommandFailed {
                command,
                cwd,
                exit_code: captured.exit_code,
                stdout: captured.stdout,
                stderr: captured.stderr,
            });
        }

        Ok(captured)
    }
}
