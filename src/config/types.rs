//! Configuration Types
//!
//! All configuration structures with sensible defaults. A bootstrap run
//! can work with no config file at all; the global file and environment
//! only override the built-in defaults.

use std::path::PathBuf;

use directories::UserDirs;
use serde::{Deserialize, Serialize};

use crate::constants::{editor, template, workspace};
use crate::process::FailurePolicy;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Template repository settings
    pub template: TemplateConfig,

    /// Workspace (base directory) settings
    pub workspace: WorkspaceConfig,

    /// Editor launch settings
    pub editor: EditorConfig,

    /// External process settings
    pub process: ProcessConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            template: TemplateConfig::default(),
            workspace: WorkspaceConfig::default(),
            editor: EditorConfig::default(),
            process: ProcessConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    /// Returns `ForgeError::Config` on validation failure.
    pub fn validate(&self) -> crate::types::Result<()> {
        if self.template.url.trim().is_empty() {
            return Err(crate::types::ForgeError::Config(
                "template.url must not be empty".to_string(),
            ));
        }
        if self.editor.command.trim().is_empty() {
            return Err(crate::types::ForgeError::Config(
                "editor.command must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Base directory offered when the operator leaves the project
    /// directory prompt blank. Falls back to a relative path only when the
    /// home directory cannot be determined.
    pub fn workspace_dir(&self) -> PathBuf {
        if let Some(dir) = &self.workspace.dir {
            return dir.clone();
        }
        UserDirs::new()
            .map(|dirs| dirs.home_dir().join(workspace::DEFAULT_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from(workspace::DEFAULT_DIR_NAME))
    }
}

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Git URL of the template repository cloned for every new project
    pub url: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            url: template::REPO_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Base directory for new projects (default: <home>/javascript)
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Editor CLI probed before the run and launched at the end
    pub command: String,

    /// Open the project in a new editor window
    pub new_window: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            command: editor::DEFAULT_COMMAND.to_string(),
            new_window: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProcessConfig {
    /// Policy applied when a clone or install collaborator fails
    pub failure: FailurePolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.version, "1.0");
        assert!(config.template.url.ends_with("js-ai-dev-environment.git"));
        assert_eq!(config.editor.command, "code");
        assert!(config.editor.new_window);
        assert_eq!(config.process.failure, FailurePolicy::ReportAndContinue);
        assert!(config.workspace.dir.is_none());
    }

    #[test]
    fn test_workspace_dir_override_wins() {
        let mut config = Config::default();
        config.workspace.dir = Some(PathBuf::from("/srv/projects"));
        assert_eq!(config.workspace_dir(), PathBuf::from("/srv/projects"));
    }

    #[test]
    fn test_workspace_dir_default_ends_with_javascript() {
        let config = Config::default();
        assert!(config.workspace_dir().ends_with("javascript"));
    }

    #[test]
    fn test_validate_rejects_empty_template_url() {
        let mut config = Config::default();
        config.template.url = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_editor_command() {
        let mut config = Config::default();
        config.editor.command = String::new();
        assert!(config.validate().is_err());
    }
}
