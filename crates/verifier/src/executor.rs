//! Command executors for external release tooling.

use async_trait::async_trait;
use shipcheck_common::{Error, Result};
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Captured output of one external command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Stdout followed by stderr.
    pub fn combined(&self) -> String {
        format!("{}{}", self.stdout, self.stderr)
    }
}

/// Trait for command execution.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Run `program` with `args` and capture its output.
    ///
    /// A non-zero exit is not an error; failing to start the program or
    /// exceeding the timeout is.
    async fn execute(&self, program: &str, args: &[String]) -> Result<CommandOutput>;
}

/// Runs commands on the local machine without a shell.
pub struct LocalExecutor {
    working_dir: PathBuf,
    timeout: Duration,
}

impl LocalExecutor {
    pub fn new(working_dir: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            working_dir: working_dir.into(),
            timeout,
        }
    }
}

#[async_trait]
impl Executor for LocalExecutor {
    async fn execute(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        let cmdline = display_command(program, args);
        debug!("Local exec: {}", cmdline);

        let child = Command::new(program)
            .args(args)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::CommandExecution {
                cmd: cmdline.clone(),
                reason: e.to_string(),
            })?;

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|e| Error::CommandExecution {
                cmd: cmdline.clone(),
                reason: e.to_string(),
            })?,
            Err(_) => return Err(Error::CommandTimeout { cmd: cmdline }),
        };

        Ok(CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Human-readable rendering of a command line, for logs and error details.
pub fn display_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn executor() -> LocalExecutor {
        LocalExecutor::new(std::env::temp_dir(), Duration::from_secs(10))
    }

    #[test]
    fn test_display_command() {
        let args = vec!["tag".to_string(), "-l".to_string(), "v1.2.0".to_string()];
        assert_eq!(display_command("git", &args), "git tag -l v1.2.0");
    }

    #[test]
    fn test_combined_output() {
        let output = CommandOutput {
            status: Some(3),
            stdout: "out\n".to_string(),
            stderr: "err\n".to_string(),
        };
        assert!(!output.success());
        assert_eq!(output.combined(), "out\nerr\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_captures_stdout_and_status() {
        let args = vec!["-c".to_string(), "echo hello; echo oops >&2; exit 4".to_string()];
        let output = executor().execute("sh", &args).await.unwrap();
        assert_eq!(output.status, Some(4));
        assert_eq!(output.stdout, "hello\n");
        assert_eq!(output.stderr, "oops\n");
    }

    #[tokio::test]
    async fn test_missing_binary_is_error() {
        let err = executor()
            .execute("shipcheck-no-such-binary", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::CommandExecution { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout() {
        let executor = LocalExecutor::new(std::env::temp_dir(), Duration::from_millis(100));
        let args = vec!["5".to_string()];
        let err = executor.execute("sleep", &args).await.unwrap_err();
        assert!(matches!(err, Error::CommandTimeout { .. }));
    }
}
