use crate::ports::outbound::{CommandOutput, CommandRunner};
use crate::shared::error::SbomError;
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use std::fs::File;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// Lines of stderr kept in a failure report
const STDERR_TAIL_LINES: usize = 20;

/// SystemCommandRunner adapter spawning programs with tokio::process
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }

    fn describe(program: &str, args: &[&str]) -> String {
        std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn stderr_tail(stderr: &[u8]) -> String {
        let text = String::from_utf8_lossy(stderr);
        let lines: Vec<&str> = text.lines().collect();
        let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
        lines[start..].join("\n")
    }

    fn failure(program: &str, args: &[&str], status: std::process::ExitStatus, stderr: &[u8]) -> SbomError {
        let tail = Self::stderr_tail(stderr);
        let details = if tail.is_empty() {
            format!("exited with {}", status)
        } else {
            format!("exited with {}\n{}", status, tail)
        };
        SbomError::ProcessFailed {
            command: Self::describe(program, args),
            details,
        }
    }
}

impl Default for SystemCommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    fn is_installed(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }

    async fn capture(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let out = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .with_context(|| format!("Failed to run {}", Self::describe(program, args)))?;

        Ok(CommandOutput {
            success: out.status.success(),
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
        })
    }

    async fn run_checked(&self, program: &str, args: &[&str]) -> Result<()> {
        let out = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .output()
            .await
            .with_context(|| format!("Failed to run {}", Self::describe(program, args)))?;

        if !out.status.success() {
            return Err(Self::failure(program, args, out.status, &out.stderr).into());
        }
        Ok(())
    }

    async fn run_to_file(&self, program: &str, args: &[&str], output: &Path) -> Result<()> {
        let file = File::create(output).map_err(|e| SbomError::FileWriteError {
            path: output.to_path_buf(),
            details: e.to_string(),
        })?;

        let out = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(file))
            .stderr(Stdio::piped())
            .output()
            .await
            .with_context(|| format!("Failed to run {}", Self::describe(program, args)))?;

        if !out.status.success() {
            return Err(Self::failure(program, args, out.status, &out.stderr).into());
        }
        Ok(())
    }
}
