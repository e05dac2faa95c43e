//! Global Constants
//!
//! Centralized defaults for the bootstrap pipeline.
//! All magic strings should be defined here with documentation.

/// Template repository constants
pub mod template {
    /// Git repository cloned as the starting point for every widget project
    pub const REPO_URL: &str = "https://github.com/Nuosis/js-ai-dev-environment.git";
}

/// Workspace constants
pub mod workspace {
    /// Directory under the operator's home used when no base directory is given
    pub const DEFAULT_DIR_NAME: &str = "javascript";
}

/// Prompt defaults and sentinel display forms
pub mod defaults {
    /// Internal value for the FileMaker file name when none is given
    pub const FILE_NAME: &str = "unknown";

    /// FileMaker script dispatched by the service stub when none is given
    pub const SCRIPT_NAME: &str = "JS * fetch";

    /// Display form for the server when the FileMaker path is left blank
    pub const SERVER_DISPLAY: &str = "(use repo default)";

    /// Display form for the file name when the FileMaker path is left blank
    pub const FILE_DISPLAY: &str = "(default)";
}

/// Rendered artifact locations, relative to the target directory
pub mod artifacts {
    /// Module configuration consumed by the template's upload tooling
    pub const WIDGET_CONFIG: &str = "widget.config.cjs";

    /// Service stub bridging the widget to FileMaker script execution
    pub const SERVICE_STUB: &str = "src/services/FileMakerService.js";

    /// Structured prompt document handed to a downstream coding agent
    pub const PROMPT_DOC: &str = "coding_prompts/llm_prompt.md";
}

/// Editor launch constants
pub mod editor {
    /// Editor CLI probed before the run starts
    pub const DEFAULT_COMMAND: &str = "code";
}
