pub mod error;
pub mod project;

pub use error::{ForgeError, Result};
pub use project::{ProjectConfig, ServerPath, StateLibrary, TechStack};
