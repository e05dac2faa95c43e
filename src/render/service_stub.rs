//! Service Stub Rendering
//!
//! `src/services/FileMakerService.js` is a fixed template with no
//! branching on the project configuration: it is rendered identically
//! every time it is created, and never touched once present
//! (idempotent-create).

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::constants::artifacts;
use crate::types::{ForgeError, Result};

/// The emitted service exposes one operation, `executeScript`: non-string
/// params are stringified before dispatch; method "async" goes through the
/// FMGofer bridge and returns a promise, anything else goes through the
/// synchronous `FileMaker.PerformScript` call and returns nothing.
pub const SERVICE_STUB: &str = r#"import FMGofer from 'fm-gofer';

/**
 * FileMaker Service for executing FileMaker scripts
 *
 * This service provides a method to execute FileMaker scripts either synchronously
 * or asynchronously based on the method parameter.
 */
const FileMakerService = {
  /**
   * Execute a FileMaker script
   *
   * @param {Object} props - Properties for script execution
   * @param {string} props.method - Method type ('async' or any other value for sync)
   * @param {string} props.script - Name of the FileMaker script to execute
   * @param {string|Object} props.params - Parameters to pass to the FileMaker script (will be stringified if object)
   * @returns {Promise<string>|void} - Returns a promise if method is async, otherwise void
   */
  executeScript({ method, script = "JS * fetch", params }) {
    // Convert params to string if it's an object
    const paramString = typeof params !== 'string' ? JSON.stringify(params) : params;

    // Check if method is async
    if (method === 'async') {
      return FMGofer.PerformScript(script, paramString);
    } else {
      // Use synchronous method
      return FileMaker.PerformScript(script, paramString);
    }
  }
};

export default FileMakerService;
"#;

/// Create the service stub at the target if it is absent. Returns the stub
/// path and whether a file was created on this run.
pub fn ensure_service_stub(target: &Path) -> Result<(PathBuf, bool)> {
    let stub_path = target.join(artifacts::SERVICE_STUB);

    if stub_path.exists() {
        debug!("Service stub already present: {}", stub_path.display());
        return Ok((stub_path, false));
    }

    if let Some(parent) = stub_path.parent() {
        fs::create_dir_all(parent).map_err(|e| ForgeError::render(artifacts::SERVICE_STUB, e))?;
    }
    fs::write(&stub_path, SERVICE_STUB).map_err(|e| ForgeError::render(artifacts::SERVICE_STUB, e))?;

    Ok((stub_path, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_stub_when_absent() {
        let tmp = TempDir::new().unwrap();
        let (path, created) = ensure_service_stub(tmp.path()).unwrap();

        assert!(created);
        assert!(path.ends_with("src/services/FileMakerService.js"));
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("executeScript"));
        assert!(content.contains("FMGofer.PerformScript"));
        assert!(content.contains("FileMaker.PerformScript"));
        assert!(content.contains("JS * fetch"));
    }

    #[test]
    fn test_never_modifies_existing_stub() {
        let tmp = TempDir::new().unwrap();
        let stub_path = tmp.path().join(artifacts::SERVICE_STUB);
        fs::create_dir_all(stub_path.parent().unwrap()).unwrap();
        fs::write(&stub_path, "// customized by the developer\n").unwrap();

        let (path, created) = ensure_service_stub(tmp.path()).unwrap();

        assert!(!created);
        assert_eq!(path, stub_path);
        assert_eq!(
            fs::read_to_string(&stub_path).unwrap(),
            "// customized by the developer\n"
        );
    }

    #[test]
    fn test_repeated_create_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let (path, first) = ensure_service_stub(tmp.path()).unwrap();
        let original = fs::read_to_string(&path).unwrap();

        let (_, second) = ensure_service_stub(tmp.path()).unwrap();

        assert!(first);
        assert!(!second);
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }
}
