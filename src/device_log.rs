//! Best-effort capture of on-device log output.

use crate::error::{FeedbackClientError, FeedbackClientResult};
use std::{fmt, process::Command};

/// The platform command used to dump recent log output.
#[derive(Debug, Clone)]
pub struct LogDumpCommand {
    name: String,
    args: Vec<String>,
}

impl LogDumpCommand {
    pub fn new(name: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

impl Default for LogDumpCommand {
    fn default() -> Self {
        Self::new("logcat", vec!["-d".to_string()])
    }
}

impl fmt::Display for LogDumpCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Runs the log dump command and returns its captured output,
/// or an empty string if anything goes wrong. Diagnostic collection
/// is best-effort, so failures are swallowed here.
pub fn read_recent_log(command: &LogDumpCommand) -> String {
    match try_read_recent_log(command) {
        Ok(log_text) => log_text,
        Err(err) => {
            log::debug!("failed to read device log: {err}");
            String::new()
        }
    }
}

/// Like `read_recent_log`, but surfaces the failure kind.
pub fn try_read_recent_log(command: &LogDumpCommand) -> FeedbackClientResult<String> {
    let output = Command::new(&command.name)
        .args(&command.args)
        .output()
        .map_err(|e| FeedbackClientError::LogCommand(command.to_string(), e))?;

    // the dump command's exit status is deliberately ignored,
    // whatever made it to stdout is still useful
    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut log_text = String::new();
    for line in stdout.lines() {
        log_text.push_str(line);
        log_text.push('\n');
    }
    Ok(log_text)
}
