//! Module Configuration Rendering
//!
//! `widget.config.cjs` carries exactly four keys consumed by the
//! template's upload tooling. Rendered fresh on every run.

use crate::types::ProjectConfig;

/// Render the module configuration file. Pure and deterministic: the same
/// configuration always yields byte-identical output.
pub fn render_widget_config(config: &ProjectConfig) -> String {
    format!(
        "module.exports = {{\n  widgetName: \"{}\",\n  server: \"{}\",\n  file: \"{}\",\n  uploadScript: \"{}\",\n}};\n",
        config.project_name,
        config.server_path.display_form(),
        config.file_display(),
        config.script_name,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ServerPath, StateLibrary, TechStack};
    use std::path::PathBuf;

    fn sample() -> ProjectConfig {
        ProjectConfig {
            project_name: "Widgets".to_string(),
            server_path: ServerPath::UseDefault,
            file_name: "unknown".to_string(),
            script_name: "JS * fetch".to_string(),
            widget_intention: "a chart".to_string(),
            style_paths: vec![],
            project_dir: PathBuf::from("/tmp"),
            tech_stack: vec![TechStack::React],
            use_typescript: false,
            state_library: StateLibrary::None,
        }
    }

    #[test]
    fn test_sentinel_display_forms() {
        let rendered = render_widget_config(&sample());
        assert!(rendered.contains("widgetName: \"Widgets\""));
        assert!(rendered.contains("server: \"(use repo default)\""));
        assert!(rendered.contains("file: \"(default)\""));
        assert!(rendered.contains("uploadScript: \"JS * fetch\""));
    }

    #[test]
    fn test_explicit_values_pass_through() {
        let mut config = sample();
        config.server_path = ServerPath::Explicit("fmp://$/jsDev".to_string());
        config.file_name = "jsDev.fmp12".to_string();
        config.script_name = "UploadToHTML".to_string();

        let rendered = render_widget_config(&config);
        assert!(rendered.contains("server: \"fmp://$/jsDev\""));
        assert!(rendered.contains("file: \"jsDev.fmp12\""));
        assert!(rendered.contains("uploadScript: \"UploadToHTML\""));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let config = sample();
        assert_eq!(render_widget_config(&config), render_widget_config(&config));
    }

    #[test]
    fn test_exactly_four_keys() {
        let rendered = render_widget_config(&sample());
        let keys: Vec<_> = rendered
            .lines()
            .filter(|line| line.contains(':'))
            .collect();
        assert_eq!(keys.len(), 4);
    }
}
