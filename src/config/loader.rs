//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/widgetforge/config.toml)
//! 3. Environment variables (WIDGETFORGE_* prefix)

use std::env;
use std::fs;
use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use tracing::{debug, info};

use super::types::Config;
use crate::types::{ForgeError, Result};

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with the full resolution chain:
    /// defaults → global → env vars
    pub fn load() -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        // Double underscore separates nesting so underscore-bearing keys
        // survive, e.g. WIDGETFORGE_EDITOR__NEW_WINDOW -> editor.new_window
        figment = figment.merge(Env::prefixed("WIDGETFORGE_").split("__").lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| ForgeError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to the global config directory (~/.config/widgetforge/)
    pub fn global_dir() -> Option<PathBuf> {
        env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                env::var("HOME")
                    .ok()
                    .map(|home| PathBuf::from(home).join(".config"))
            })
            .map(|p| p.join("widgetforge"))
    }

    /// Get path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join("config.toml"))
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Show config file path
    pub fn show_path() {
        println!("Configuration paths:");
        println!();

        if let Some(global) = Self::global_config_path() {
            let exists = if global.exists() { "✓" } else { "✗" };
            println!("  Global: {} {}", exists, global.display());
        } else {
            println!("  Global: (not available)");
        }
    }

    /// Show current effective configuration
    pub fn show_config(as_json: bool) -> Result<()> {
        let config = Self::load()?;

        if as_json {
            println!("{}", serde_json::to_string_pretty(&config)?);
        } else {
            println!(
                "{}",
                toml::to_string_pretty(&config).map_err(|e| ForgeError::Config(e.to_string()))?
            );
        }

        Ok(())
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Initialize the global configuration file
    pub fn init_global(force: bool) -> Result<PathBuf> {
        let global_dir = Self::global_dir().ok_or_else(|| {
            ForgeError::Config("Cannot determine global config directory".to_string())
        })?;

        fs::create_dir_all(&global_dir)?;

        let config_path = global_dir.join("config.toml");
        if !config_path.exists() || force {
            fs::write(&config_path, Self::default_global_config())?;
            info!("Created global config: {}", config_path.display());
        } else {
            info!("Global config exists: {}", config_path.display());
        }

        Ok(config_path)
    }

    // =========================================================================
    // Internal
    // =========================================================================

    /// Generate default global config content (TOML)
    fn default_global_config() -> String {
        r#"# WidgetForge Global Configuration
# User-wide defaults for new widget projects.

version = "1.0"

# Template repository cloned for every new project
[template]
url = "https://github.com/Nuosis/js-ai-dev-environment.git"

# Base directory for new projects (default: ~/javascript)
[workspace]
# dir = "/Users/me/javascript"

# Editor launched after the project is generated
[editor]
command = "code"
new_window = true

# Policy when git clone or npm install fails:
# "report-and-continue" (default) or "report-and-abort"
[process]
failure = "report-and-continue"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::FailurePolicy;
    use tempfile::TempDir;

    #[test]
    fn test_load_default_config() {
        let config = ConfigLoader::load().unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.process.failure, FailurePolicy::ReportAndContinue);
    }

    #[test]
    fn test_init_global_writes_parseable_defaults() {
        let temp_dir = TempDir::new().unwrap();
        // SAFETY: Tests that touch XDG_CONFIG_HOME do not run concurrently
        // with other env-dependent tests in this module.
        unsafe {
            std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
        }

        let config_path = ConfigLoader::init_global(false).unwrap();
        assert!(config_path.exists());

        let parsed: Config = toml::from_str(&fs::read_to_string(&config_path).unwrap()).unwrap();
        assert_eq!(parsed.editor.command, "code");
        assert_eq!(parsed.process.failure, FailurePolicy::ReportAndContinue);

        unsafe {
            std::env::remove_var("XDG_CONFIG_HOME");
        }
    }

    #[test]
    fn test_env_override() {
        // SAFETY: This test runs in isolation
        unsafe {
            std::env::set_var("WIDGETFORGE_EDITOR__COMMAND", "subl");
            std::env::set_var("WIDGETFORGE_EDITOR__NEW_WINDOW", "false");
        }
        let config = ConfigLoader::load().unwrap();
        assert_eq!(config.editor.command, "subl");
        assert!(!config.editor.new_window);
        unsafe {
            std::env::remove_var("WIDGETFORGE_EDITOR__COMMAND");
            std::env::remove_var("WIDGETFORGE_EDITOR__NEW_WINDOW");
        }
    }
}
