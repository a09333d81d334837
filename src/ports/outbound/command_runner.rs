use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;

/// Captured result of a finished external program
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// CommandRunner port for invoking external programs
///
/// Programs are resolved through `PATH`. Arguments are passed as a list;
/// nothing is interpreted by a shell.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Whether `program` can be found on `PATH`
    fn is_installed(&self, program: &str) -> bool;

    /// Runs a program to completion and captures its output
    ///
    /// A non-zero exit status is reported through `CommandOutput::success`,
    /// not as an error.
    ///
    /// # Errors
    /// Returns an error if the program cannot be started.
    async fn capture(&self, program: &str, args: &[&str]) -> Result<CommandOutput>;

    /// Runs a program and fails unless it exits successfully
    ///
    /// # Errors
    /// Returns `SbomError::ProcessFailed` carrying the program's stderr.
    async fn run_checked(&self, program: &str, args: &[&str]) -> Result<()>;

    /// Runs a program with its standard output redirected into `output`
    ///
    /// # Errors
    /// Returns an error if the output file cannot be created or the
    /// program exits unsuccessfully.
    async fn run_to_file(&self, program: &str, args: &[&str], output: &Path) -> Result<()>;
}

#[async_trait]
impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn is_installed(&self, program: &str) -> bool {
        (**self).is_installed(program)
    }

    async fn capture(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        (**self).capture(program, args).await
    }

    async fn run_checked(&self, program: &str, args: &[&str]) -> Result<()> {
        (**self).run_checked(program, args).await
    }

    async fn run_to_file(&self, program: &str, args: &[&str], output: &Path) -> Result<()> {
        (**self).run_to_file(program, args, output).await
    }
}
