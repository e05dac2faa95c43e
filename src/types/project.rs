//! Project Configuration Record
//!
//! The immutable record of all operator answers and derived defaults,
//! produced once per run by the collector. Every later stage (target
//! resolution, rendering, process driver arguments) only reads from it.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::constants::defaults;

// =============================================================================
// Tech Stack
// =============================================================================

/// Recognized template tech stacks, keyed by the numeric prompt codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TechStack {
    CommonJs,
    React,
    NextJs,
}

impl TechStack {
    /// Map a numeric choice token to a stack. Unknown tokens yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(Self::CommonJs),
            "2" => Some(Self::React),
            "3" => Some(Self::NextJs),
            _ => None,
        }
    }

    /// Human-readable stack name used in rendered artifacts
    pub fn name(&self) -> &'static str {
        match self {
            Self::CommonJs => "CommonJS",
            Self::React => "React",
            Self::NextJs => "Next.js",
        }
    }
}

impl fmt::Display for TechStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// =============================================================================
// Sentinel-backed fields
// =============================================================================

/// FileMaker server location: an explicit path/URL, or the template default.
///
/// A blank answer at the path prompt resolves to `UseDefault`, which also
/// forces the file and script names to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ServerPath {
    Explicit(String),
    UseDefault,
}

impl ServerPath {
    pub fn is_default(&self) -> bool {
        matches!(self, Self::UseDefault)
    }

    /// Form written into rendered artifacts
    pub fn display_form(&self) -> &str {
        match self {
            Self::Explicit(path) => path,
            Self::UseDefault => defaults::SERVER_DISPLAY,
        }
    }
}

/// State management choice. Declining the prompt (or leaving the library
/// name blank) resolves to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum StateLibrary {
    Named(String),
    None,
}

impl StateLibrary {
    /// Form written into rendered artifacts
    pub fn display_form(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::None => "none",
        }
    }
}

// =============================================================================
// Project Configuration
// =============================================================================

/// All operator answers and derived defaults for one bootstrap run.
///
/// Built once by [`crate::collector::Collector`] and never mutated after.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectConfig {
    /// Name of the widget project; also the final path segment of the target
    pub project_name: String,

    /// FileMaker file path or URL, or the repo default
    pub server_path: ServerPath,

    /// FileMaker database file name (defaults to "unknown")
    pub file_name: String,

    /// FileMaker upload script name (defaults to "JS * fetch")
    pub script_name: String,

    /// Operator's description of the widget's purpose
    pub widget_intention: String,

    /// Paths or URLs to style images / example CSS, possibly empty
    pub style_paths: Vec<String>,

    /// Base directory under which the project is created
    pub project_dir: PathBuf,

    /// Selected stacks, first-occurrence order, deduplicated
    pub tech_stack: Vec<TechStack>,

    /// Whether TypeScript support is requested
    pub use_typescript: bool,

    /// State management library, if any
    pub state_library: StateLibrary,
}

impl ProjectConfig {
    /// Destination directory for the generated project
    pub fn target_path(&self) -> PathBuf {
        self.project_dir.join(&self.project_name)
    }

    /// File name as written into rendered artifacts. When the server path
    /// is the sentinel, the display form is the "(default)" placeholder.
    pub fn file_display(&self) -> &str {
        if self.server_path.is_default() {
            defaults::FILE_DISPLAY
        } else {
            &self.file_name
        }
    }

    /// Tech-stack names joined by comma for rendered artifacts
    pub fn tech_stack_names(&self) -> String {
        self.tech_stack
            .iter()
            .map(TechStack::name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// TypeScript flag as written into the prompt document
    pub fn typescript_status(&self) -> &'static str {
        if self.use_typescript { "enabled" } else { "disabled" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProjectConfig {
        ProjectConfig {
            project_name: "demo".to_string(),
            server_path: ServerPath::UseDefault,
            file_name: defaults::FILE_NAME.to_string(),
            script_name: defaults::SCRIPT_NAME.to_string(),
            widget_intention: "A date range picker".to_string(),
            style_paths: vec![],
            project_dir: PathBuf::from("/home/dev/javascript"),
            tech_stack: vec![TechStack::React],
            use_typescript: false,
            state_library: StateLibrary::None,
        }
    }

    #[test]
    fn test_target_path_joins_dir_and_name() {
        assert_eq!(
            sample().target_path(),
            PathBuf::from("/home/dev/javascript/demo")
        );
    }

    #[test]
    fn test_sentinel_server_forces_default_file_display() {
        let config = sample();
        assert_eq!(config.server_path.display_form(), "(use repo default)");
        assert_eq!(config.file_display(), "(default)");
        assert_eq!(config.file_name, "unknown");
        assert_eq!(config.script_name, "JS * fetch");
    }

    #[test]
    fn test_explicit_server_uses_given_file_name() {
        let mut config = sample();
        config.server_path = ServerPath::Explicit("fmp://$/jsDev".to_string());
        config.file_name = "jsDev.fmp12".to_string();
        assert_eq!(config.server_path.display_form(), "fmp://$/jsDev");
        assert_eq!(config.file_display(), "jsDev.fmp12");
    }

    #[test]
    fn test_tech_stack_names_joined_in_order() {
        let mut config = sample();
        config.tech_stack = vec![TechStack::React, TechStack::CommonJs];
        assert_eq!(config.tech_stack_names(), "React, CommonJS");
    }

    #[test]
    fn test_tech_stack_codes() {
        assert_eq!(TechStack::from_code("1"), Some(TechStack::CommonJs));
        assert_eq!(TechStack::from_code("2"), Some(TechStack::React));
        assert_eq!(TechStack::from_code("3"), Some(TechStack::NextJs));
        assert_eq!(TechStack::from_code("4"), None);
        assert_eq!(TechStack::from_code(""), None);
    }

    #[test]
    fn test_state_library_display() {
        assert_eq!(StateLibrary::None.display_form(), "none");
        assert_eq!(
            StateLibrary::Named("Zustand".to_string()).display_form(),
            "Zustand"
        );
    }
}
