//! Artifact Renderer
//!
//! Deterministic rendering of the three build outputs derived from the
//! project configuration: the module configuration file, the service stub
//! (idempotent-create), and the prompt document. Filesystem failures here
//! are fatal; no partial-artifact recovery is attempted.

use std::fs;
use std::path::{Path, PathBuf};

pub mod prompt_doc;
pub mod service_stub;
pub mod widget_config;

pub use prompt_doc::{embed_style_paths, render_prompt_doc};
pub use service_stub::{SERVICE_STUB, ensure_service_stub};
pub use widget_config::render_widget_config;

use crate::constants::artifacts;
use crate::types::{ForgeError, ProjectConfig, Result};

/// What a rendering pass wrote, for the end-of-run summary.
#[derive(Debug, Clone)]
pub struct ArtifactReport {
    pub widget_config: PathBuf,
    pub service_stub: PathBuf,
    /// False when the stub was already present and left untouched
    pub stub_created: bool,
    pub prompt_doc: PathBuf,
}

/// Render all three artifacts into the target directory.
///
/// The module configuration and the prompt document are overwritten
/// unconditionally; the service stub is created only if absent.
pub fn write_artifacts(config: &ProjectConfig, target: &Path) -> Result<ArtifactReport> {
    let widget_config = target.join(artifacts::WIDGET_CONFIG);
    fs::create_dir_all(target).map_err(|e| ForgeError::render(artifacts::WIDGET_CONFIG, e))?;
    fs::write(&widget_config, render_widget_config(config))
        .map_err(|e| ForgeError::render(artifacts::WIDGET_CONFIG, e))?;

    let (service_stub, stub_created) = ensure_service_stub(target)?;

    let prompt_doc = target.join(artifacts::PROMPT_DOC);
    if let Some(parent) = prompt_doc.parent() {
        fs::create_dir_all(parent).map_err(|e| ForgeError::render(artifacts::PROMPT_DOC, e))?;
    }
    let styles = embed_style_paths(&config.style_paths);
    fs::write(&prompt_doc, render_prompt_doc(config, &styles))
        .map_err(|e| ForgeError::render(artifacts::PROMPT_DOC, e))?;

    Ok(ArtifactReport {
        widget_config,
        service_stub,
        stub_created,
        prompt_doc,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ServerPath, StateLibrary, TechStack};
    use tempfile::TempDir;

    fn sample(dir: &Path) -> ProjectConfig {
        ProjectConfig {
            project_name: "Widgets".to_string(),
            server_path: ServerPath::UseDefault,
            file_name: "unknown".to_string(),
            script_name: "JS * fetch".to_string(),
            widget_intention: "a chart".to_string(),
            style_paths: vec![],
            project_dir: dir.to_path_buf(),
            tech_stack: vec![TechStack::React],
            use_typescript: false,
            state_library: StateLibrary::None,
        }
    }

    #[test]
    fn test_writes_all_three_artifacts() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("Widgets");
        let config = sample(tmp.path());

        let report = write_artifacts(&config, &target).unwrap();

        assert!(report.widget_config.exists());
        assert!(report.service_stub.exists());
        assert!(report.prompt_doc.exists());
        assert!(report.stub_created);
        assert!(report.prompt_doc.ends_with("coding_prompts/llm_prompt.md"));
    }

    #[test]
    fn test_second_pass_overwrites_config_and_doc_but_not_stub() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("Widgets");
        let config = sample(tmp.path());

        let first = write_artifacts(&config, &target).unwrap();
        let config_bytes = fs::read(&first.widget_config).unwrap();
        let doc_bytes = fs::read(&first.prompt_doc).unwrap();

        // Developer customizes the stub between runs
        fs::write(&first.service_stub, "// custom").unwrap();

        let second = write_artifacts(&config, &target).unwrap();

        assert!(!second.stub_created);
        assert_eq!(fs::read_to_string(&second.service_stub).unwrap(), "// custom");
        // Re-rendered outputs are byte-identical
        assert_eq!(fs::read(&second.widget_config).unwrap(), config_bytes);
        assert_eq!(fs::read(&second.prompt_doc).unwrap(), doc_bytes);
    }
}
