//! WidgetForge - FileMaker Widget Project Bootstrapper
//!
//! An interactive CLI that materializes a new FileMaker webviewer widget
//! project: it collects answers from the operator, clones the JS template
//! repository, installs dependencies, renders derived configuration and
//! prompt artifacts, and launches an editor.
//!
//! ## Pipeline
//!
//! ```text
//! collect answers → resolve target → clone + install → render artifacts → launch editor
//! ```
//!
//! ## Modules
//!
//! - [`collector`]: ordered prompt sequence and tech-stack selection
//! - [`target`]: destination path resolution and overwrite decisions
//! - [`render`]: deterministic artifact rendering
//! - [`process`]: external git/npm/editor process driver
//! - [`config`]: layered configuration (defaults → global file → env)

pub mod cli;
pub mod collector;
pub mod config;
pub mod constants;
pub mod process;
pub mod render;
pub mod target;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader};

// Error Types
pub use types::error::{ForgeError, Result};

// Project Configuration Record
pub use types::project::{ProjectConfig, ServerPath, StateLibrary, TechStack};

// =============================================================================
// Pipeline Re-exports
// =============================================================================

pub use collector::{Collector, StackSelection, parse_stack};
pub use process::{CommandDriver, FailurePolicy, ProcessDriver, ProcessOutcome};
pub use render::{ArtifactReport, write_artifacts};
pub use target::{TargetAction, TargetState};
