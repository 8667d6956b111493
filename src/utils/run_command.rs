use log::debug;
use std::io::Write;
use std::process::Command;
use std::time::Instant;

use crate::runtime::Error;

const SHELL: &str = "sh";
const SHELL_ARG_COMMAND: &str = "-c";

/// Executes one fully-formed shell command line and returns its standard output.
pub trait CommandRunner {
    fn run(&mut self, cmd: &str) -> Result<String, Error>;
}

/// Runs commands through `sh -c` so redirections in the command line work.
#[derive(Debug, Default)]
pub struct ShellRunner {}

impl ShellRunner {
    pub fn new() -> Self {
        Self {}
    }
}

impl CommandRunner for ShellRunner {
    fn run(&mut self, cmd: &str) -> Result<String, Error> {
        let utility = utility_name(cmd);
        debug!("Executing: {}", cmd);

        let start = Instant::now();
        let output = Command::new(SHELL)
            .arg(SHELL_ARG_COMMAND)
            .arg(cmd)
            .output()
            .map_err(|_| Error::utility_not_executable(SHELL))?;
        debug!(
            "{} finished in {:.2?} with {}",
            utility,
            start.elapsed(),
            output.status
        );

        if !output.status.success() {
            eprintln!("Error running command: {}", cmd);
            let _ = std::io::stderr().write_all(&output.stderr);
            return Err(Error::utility_execution_error(
                utility,
                cmd,
                Some(output.status.to_string()),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// First word of a command line, used to name the tool in errors
pub fn utility_name(cmd: &str) -> &str {
    cmd.split_whitespace().next().unwrap_or(cmd)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utility_name() {
        assert_eq!(utility_name("bwa mem ref.fasta reads.fastq"), "bwa");
        assert_eq!(utility_name("  samtools  sort x.bam"), "samtools");
        assert_eq!(utility_name(""), "");
    }

    #[test]
    fn test_success_returns_stdout() {
        let mut runner = ShellRunner::new();
        let out = runner.run("echo hello").unwrap();
        assert_eq!(out, "hello\n");
    }

    #[test]
    fn test_stdout_and_stderr_are_separated() {
        let mut runner = ShellRunner::new();
        let out = runner.run("echo kept; echo dropped >&2").unwrap();
        assert_eq!(out, "kept\n");
    }

    #[test]
    fn test_redirection_goes_through_shell() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aligned.sam");
        let mut runner = ShellRunner::new();
        let out = runner
            .run(&format!("echo '@HD' > {}", path.display()))
            .unwrap();
        assert!(out.is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "@HD\n");
    }

    #[test]
    fn test_nonzero_exit_is_an_error() {
        let mut runner = ShellRunner::new();
        let err = runner.run("false").unwrap_err();
        match err {
            Error::UtilityExecutionError { utility, cmd, msg } => {
                assert_eq!(utility, "false");
                assert_eq!(cmd, "false");
                assert!(msg.is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
