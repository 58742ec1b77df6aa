//! Toolchain subprocess.
//!
//! Programs run as `<toolchain> run <file>` through the host shell. Both
//! output pipes are drained on their own threads while we wait, so a chatty
//! program can never fill a pipe and stall.

use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, warn};
use wait_timeout::ChildExt;

use crate::error::ExecError;

/// Toolchain used when none is configured.
pub const DEFAULT_TOOLCHAIN: &str = "go";

/// Runs generated programs with an external toolchain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Runner {
    toolchain: String,
    timeout: Option<Duration>,
}

impl Runner {
    /// `toolchain` is inserted into the shell command line as-is, so it may
    /// carry extra arguments.
    pub fn new(toolchain: impl Into<String>) -> Self {
        Self {
            toolchain: toolchain.into(),
            timeout: None,
        }
    }

    /// Kill the program if it runs longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// The shell command line that runs `path`.
    pub fn command_line(&self, path: &Path) -> String {
        format!("{} run {}", self.toolchain, shell_quote(path))
    }

    /// Run the program at `path`, returning its trimmed standard output.
    pub fn run(&self, path: &Path) -> Result<String, ExecError> {
        let line = self.command_line(path);
        info!("running: {}", line);

        let mut command = shell_command(&line);
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            // Own process group, so a timeout also reaches the compiled program.
            command.process_group(0);
        }

        let mut child = command.spawn().map_err(|e| ExecError::Execution {
            message: e.to_string().trim().to_string(),
        })?;

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = match self.timeout {
            Some(limit) => match child.wait_timeout(limit) {
                Ok(Some(status)) => Ok(status),
                Ok(None) => {
                    warn!("program exceeded {:?}, killing it", limit);
                    kill(&mut child);
                    // A descendant outside the group may still hold the pipes
                    // open; leave the readers detached instead of joining them.
                    drop(stdout);
                    drop(stderr);
                    return Err(ExecError::Timeout { after: limit });
                }
                Err(e) => {
                    kill(&mut child);
                    Err(e)
                }
            },
            None => child.wait(),
        };

        let stdout = collect(stdout);
        let stderr = collect(stderr);

        match status {
            Ok(status) if status.success() => {
                debug!("program exited successfully");
                Ok(String::from_utf8_lossy(&stdout).trim().to_string())
            }
            Ok(status) => Err(failure(describe_status(status), &stderr)),
            Err(e) => Err(failure(e.to_string(), &stderr)),
        }
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new(DEFAULT_TOOLCHAIN)
    }
}

#[cfg(windows)]
fn shell_command(line: &str) -> Command {
    let mut command = Command::new("cmd");
    command.arg("/C").arg(line);
    command
}

#[cfg(not(windows))]
fn shell_command(line: &str) -> Command {
    let mut command = Command::new("sh");
    command.arg("-c").arg(line);
    command
}

#[cfg(windows)]
fn shell_quote(path: &Path) -> String {
    format!("\"{}\"", path.display())
}

#[cfg(not(windows))]
fn shell_quote(path: &Path) -> String {
    format!("'{}'", path.display().to_string().replace('\'', "'\\''"))
}

fn drain<R>(pipe: Option<R>) -> Option<JoinHandle<Vec<u8>>>
where
    R: Read + Send + 'static,
{
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buffer = Vec::new();
            let _ = pipe.read_to_end(&mut buffer);
            buffer
        })
    })
}

fn collect(reader: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    reader
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}

fn kill(child: &mut Child) {
    #[cfg(unix)]
    {
        if let Ok(pid) = libc::pid_t::try_from(child.id()) {
            // Negative pid: signal the whole group.
            unsafe {
                libc::kill(-pid, libc::SIGKILL);
            }
        }
    }

    let _ = child.kill();
    let _ = child.wait();
}

fn describe_status(status: ExitStatus) -> String {
    if let Some(code) = status.code() {
        return format!("exit status {}", code);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return format!("terminated by signal {}", signal);
        }
    }

    status.to_string()
}

/// The exit or launch error, followed by whatever the program wrote to stderr.
fn failure(message: String, stderr: &[u8]) -> ExecError {
    let stderr = String::from_utf8_lossy(stderr);
    let message = if stderr.trim().is_empty() {
        message
    } else {
        format!("{}\n{}", message, stderr)
    };

    ExecError::Execution {
        message: message.trim().to_string(),
    }
}
