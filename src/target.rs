//! Target Resolver
//!
//! Combines the base directory and project name into the clone destination
//! and decides whether an existing target must be purged or the run
//! aborted. The destructive purge is an explicit two-step protocol:
//! callers confirm, [`decide`] resolves the action, and only
//! [`purge`] touches the filesystem. The purge always happens strictly
//! before the clone step, so later stages never observe a partial
//! overwrite.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::types::{ForgeError, Result};

/// Observed state of the destination directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetState {
    /// Does not exist; will be created by the clone
    Missing,
    /// Exists but contains no entries
    Empty,
    /// Exists and contains files
    NonEmpty,
    /// Exists and is already a git repository (contains .git)
    GitRepo,
}

/// Resolved action for the destination directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetAction {
    Proceed,
    PurgeAndProceed,
    Abort,
}

/// Compute the destination path for the generated project.
pub fn resolve_target(project_dir: &Path, project_name: &str) -> PathBuf {
    project_dir.join(project_name)
}

/// Inspect the destination directory.
pub fn inspect(target: &Path) -> Result<TargetState> {
    if !target.exists() {
        return Ok(TargetState::Missing);
    }
    if target.join(".git").exists() {
        return Ok(TargetState::GitRepo);
    }
    let mut entries = fs::read_dir(target)?;
    if entries.next().is_none() {
        Ok(TargetState::Empty)
    } else {
        Ok(TargetState::NonEmpty)
    }
}

/// Resolve the action for an observed state. A non-empty target requires
/// operator confirmation; anything short of that aborts the run before
/// clone, install, or rendering execute.
pub fn decide(state: TargetState, overwrite_confirmed: bool) -> TargetAction {
    match state {
        TargetState::Missing | TargetState::Empty => TargetAction::Proceed,
        TargetState::NonEmpty | TargetState::GitRepo => {
            if overwrite_confirmed {
                TargetAction::PurgeAndProceed
            } else {
                TargetAction::Abort
            }
        }
    }
}

/// Recursively remove the existing target directory. Refuses the workspace
/// root itself: an empty project name resolves the target to the base
/// directory, and a confirmed overwrite must never delete the whole
/// workspace.
pub fn purge(target: &Path, workspace_root: &Path) -> Result<()> {
    if target.components().eq(workspace_root.components()) {
        return Err(ForgeError::TargetConflict(target.to_path_buf()));
    }
    debug!("Purging existing target: {}", target.display());
    fs::remove_dir_all(target)?;
    Ok(())
}
