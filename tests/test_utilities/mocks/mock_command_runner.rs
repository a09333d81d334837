use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, Mutex};
use toolchain_sbom::prelude::*;
use toolchain_sbom::ports::outbound::CommandOutput;

/// Mock CommandRunner recording invocations instead of starting processes
///
/// `run_to_file` writes the scripted stdout of the program into the target
/// file. `capture` of the scanner writes the scripted report into the path
/// following `-o`, mimicking cve-bin-tool.
#[derive(Default, Clone)]
pub struct MockCommandRunner {
    pub installed: HashSet<String>,
    pub stdout: HashMap<String, String>,
    pub written_by_flag: HashMap<String, String>,
    pub exit_success: Vec<(String, bool)>,
    pub invocations: Arc<Mutex<Vec<String>>>,
}

impl MockCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_installed(mut self, programs: &[&str]) -> Self {
        self.installed
            .extend(programs.iter().map(|p| p.to_string()));
        self
    }

    /// Scripts what `program` prints on stdout
    pub fn with_stdout(mut self, program: &str, stdout: &str) -> Self {
        self.stdout.insert(program.to_string(), stdout.to_string());
        self
    }

    /// Scripts the content `program` writes to the file named after `-o`
    pub fn with_report(mut self, program: &str, content: &str) -> Self {
        self.written_by_flag
            .insert(program.to_string(), content.to_string());
        self
    }

    /// Scripts the exit status of every invocation whose command line starts with `prefix`
    pub fn with_exit_success(mut self, prefix: &str, success: bool) -> Self {
        self.exit_success.push((prefix.to_string(), success));
        self
    }

    pub fn get_invocations(&self) -> Vec<String> {
        self.invocations.lock().unwrap().clone()
    }

    /// Records the invocation and returns its scripted exit status
    fn record(&self, program: &str, args: &[&str]) -> bool {
        let mut line = program.to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        let success = self
            .exit_success
            .iter()
            .find(|(prefix, _)| line.starts_with(prefix.as_str()))
            .map(|(_, success)| *success)
            .unwrap_or(true);
        self.invocations.lock().unwrap().push(line);
        success
    }
}

#[async_trait]
impl CommandRunner for MockCommandRunner {
    fn is_installed(&self, program: &str) -> bool {
        self.installed.contains(program)
    }

    async fn capture(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let success = self.record(program, args);

        if let Some(content) = self.written_by_flag.get(program) {
            if let Some(position) = args.iter().position(|a| *a == "-o") {
                if let Some(path) = args.get(position + 1) {
                    std::fs::write(path, content)?;
                }
            }
        }

        Ok(CommandOutput {
            success,
            stdout: self.stdout.get(program).cloned().unwrap_or_default(),
            stderr: String::new(),
        })
    }

    async fn run_checked(&self, program: &str, args: &[&str]) -> Result<()> {
        if !self.record(program, args) {
            anyhow::bail!("{} exited unsuccessfully", program);
        }
        Ok(())
    }

    async fn run_to_file(&self, program: &str, args: &[&str], output: &Path) -> Result<()> {
        if !self.record(program, args) {
            anyhow::bail!("{} exited unsuccessfully", program);
        }
        std::fs::write(output, self.stdout.get(program).cloned().unwrap_or_default())?;
        Ok(())
    }
}
