//! External Process Driver
//!
//! Blocking calls to the source-control client, the package manager, and
//! the editor CLI. The pipeline only inspects success/failure; captured
//! output is logged at debug level.
//!
//! Clone/install failures are governed by [`FailurePolicy`]: the historical
//! setup tool kept going after a failed clone or install, so the default
//! policy reproduces that, with `report-and-abort` available for stricter
//! runs.

use std::fmt;
use std::path::Path;
use std::process::Stdio;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tracing::debug;

use crate::types::{ForgeError, Result};

// =============================================================================
// Failure Policy
// =============================================================================

/// Policy applied when a clone or install collaborator fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Warn and keep going (matches the observed behavior of the original
    /// setup tool)
    #[default]
    ReportAndContinue,
    /// Treat the failure as fatal and stop before rendering
    ReportAndAbort,
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReportAndContinue => write!(f, "report-and-continue"),
            Self::ReportAndAbort => write!(f, "report-and-abort"),
        }
    }
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "report-and-continue" | "continue" => Ok(Self::ReportAndContinue),
            "report-and-abort" | "abort" => Ok(Self::ReportAndAbort),
            _ => Err(format!(
                "Unknown failure policy '{}'. Valid values: report-and-continue, report-and-abort",
                s
            )),
        }
    }
}

// =============================================================================
// Driver
// =============================================================================

/// Exit information captured from a collaborator process.
#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    pub success: bool,
    pub exit_code: Option<i32>,
    pub stderr: String,
}

impl ProcessOutcome {
    /// One-line failure description for warnings and errors
    pub fn describe(&self) -> String {
        let code = self
            .exit_code
            .map(|c| c.to_string())
            .unwrap_or_else(|| "signal".to_string());
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            format!("exit status {code}")
        } else {
            format!("exit status {code}: {stderr}")
        }
    }
}

/// Collaborator operations invoked by the pipeline. Abstracted behind a
/// trait so orchestration tests can use a recording mock instead of
/// spawning real processes.
#[async_trait]
pub trait ProcessDriver {
    /// Probe whether the editor CLI is present
    async fn editor_available(&self) -> bool;

    /// Clone the template repository into the destination path
    async fn clone_template(&self, url: &str, dest: &Path) -> Result<ProcessOutcome>;

    /// Install package dependencies inside the destination
    async fn install_dependencies(&self, dest: &Path) -> Result<ProcessOutcome>;

    /// Open the destination in the editor
    async fn launch_editor(&self, dest: &Path) -> Result<ProcessOutcome>;
}

/// Driver backed by real `git`, `npm`, and editor CLI processes.
pub struct CommandDriver {
    editor_command: String,
    editor_new_window: bool,
}

impl CommandDriver {
    pub fn new(editor_command: impl Into<String>, editor_new_window: bool) -> Self {
        Self {
            editor_command: editor_command.into(),
            editor_new_window,
        }
    }

    async fn run(&self, operation: &str, cmd: &mut Command) -> Result<ProcessOutcome> {
        let output = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| ForgeError::process(operation, format!("failed to spawn: {e}")))?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        debug!(
            "{} finished (success={}, code={:?})",
            operation,
            output.status.success(),
            output.status.code()
        );

        Ok(ProcessOutcome {
            success: output.status.success(),
            exit_code: output.status.code(),
            stderr,
        })
    }
}

#[async_trait]
impl ProcessDriver for CommandDriver {
    /// Checks that the editor CLI is on PATH and responds to --version
    async fn editor_available(&self) -> bool {
        Command::new(&self.editor_command)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|status| status.success())
            .unwrap_or(false)
    }

    async fn clone_template(&self, url: &str, dest: &Path) -> Result<ProcessOutcome> {
        let mut cmd = Command::new("git");
        cmd.arg("clone").arg(url).arg(dest);
        self.run("git clone", &mut cmd).await
    }

    async fn install_dependencies(&self, dest: &Path) -> Result<ProcessOutcome> {
        let mut cmd = Command::new("npm");
        cmd.arg("install").current_dir(dest);
        self.run("npm install", &mut cmd).await
    }

    async fn launch_editor(&self, dest: &Path) -> Result<ProcessOutcome> {
        let mut cmd = Command::new(&self.editor_command);
        if self.editor_new_window {
            cmd.arg("-n");
        }
        cmd.arg(dest);
        let operation = format!("{} launch", self.editor_command);
        self.run(&operation, &mut cmd).await
    }
}
