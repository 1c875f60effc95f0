//! Running external programs.
//!
//! Everything that spawns a process goes through [`ProcessRunner`], so a
//! scripted runner can stand in for git and cargo in tests.

use std::fmt;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{Result, GENERAL_ERROR};
use crate::output::Output;

/// A finished process with both streams captured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

pub trait ProcessRunner: Send + Sync {
    /// Resolves a program name against `PATH`.
    fn locate(&self, program: &str) -> Option<PathBuf>;

    /// Runs `program` to completion and captures its output.
    fn run(&self, program: &Path, args: &[String], directory: Option<&Path>)
        -> Result<ProcessOutput>;

    /// Runs `program`, forwarding its stdout line by line into `output`.
    /// Returns the exit code.
    fn stream(&self, program: &Path, args: &[String], output: &mut Output) -> Result<i32>;
}

impl fmt::Debug for dyn ProcessRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ProcessRunner")
    }
}

/// Spawns real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

fn exit_code(status: std::process::ExitStatus) -> i32 {
    // Killed by a signal.
    status.code().unwrap_or(GENERAL_ERROR)
}

impl ProcessRunner for SystemRunner {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }

    fn run(
        &self,
        program: &Path,
        args: &[String],
        directory: Option<&Path>,
    ) -> Result<ProcessOutput> {
        let mut command = Command::new(program);
        command.args(args).env("GIT_TERMINAL_PROMPT", "0");
        if let Some(dir) = directory {
            command.current_dir(dir);
        }
        debug!(program = %program.display(), ?args, "running");
        let output = command.output()?;
        Ok(ProcessOutput {
            code: exit_code(output.status),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn stream(&self, program: &Path, args: &[String], output: &mut Output) -> Result<i32> {
        debug!(program = %program.display(), ?args, "streaming");
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()?;
        let forwarded = match child.stdout.take() {
            Some(stdout) => forward_lines(stdout, output),
            None => Ok(()),
        };
        // Reap the child even when reading failed.
        let status = child.wait()?;
        forwarded?;
        Ok(exit_code(status))
    }
}

/// Copies `stream` into `output` line by line, decoding lossily.
fn forward_lines(stream: impl Read, output: &mut Output) -> io::Result<()> {
    let mut reader = BufReader::new(stream);
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            return Ok(());
        }
        if line.last() == Some(&b'\n') {
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
        }
        output.print(String::from_utf8_lossy(&line));
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::locale::Locale;

    #[test]
    fn runs_and_streams() {
        let runner = SystemRunner;
        let sh = runner.locate("sh").expect("sh on PATH");
        let args = vec!["-c".to_string(), "echo one; echo two; exit 3".to_string()];
        let finished = runner.run(&sh, &args, None).unwrap();
        assert_eq!(finished.code, 3);
        assert_eq!(finished.stdout, "one\ntwo\n");
        assert!(!finished.success());

        let mut output = Output::capturing(Locale::English);
        assert_eq!(runner.stream(&sh, &args, &mut output).unwrap(), 3);
        assert_eq!(output.captured(), "one\ntwo\n");
    }

    #[test]
    fn streaming_survives_invalid_utf8() {
        let runner = SystemRunner;
        let sh = runner.locate("sh").expect("sh on PATH");
        let args = vec![
            "-c".to_string(),
            "printf 'caf\\351\\n'; echo after; exit 0".to_string(),
        ];
        let mut output = Output::capturing(Locale::English);
        assert_eq!(runner.stream(&sh, &args, &mut output).unwrap(), 0);
        assert_eq!(output.captured(), "caf\u{FFFD}\nafter\n");
    }

    #[test]
    fn unterminated_last_line_is_kept() {
        let mut output = Output::capturing(Locale::English);
        forward_lines(&b"first\r\nsecond"[..], &mut output).unwrap();
        assert_eq!(output.captured(), "first\nsecond\n");
    }
}
