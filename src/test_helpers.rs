//! Shared test utilities.
//!
//! Provides temporary project fixtures and a shared [`Renderer`] so each test
//! does not pay for loading syntect's syntax and theme dumps.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = project_with_readme("# Hello\n");
//! add_output_dir(&tmp, "<html>jupyterlite</html>");
//! let report = build(tmp.path(), &config(), renderer(), BuildOptions::default()).unwrap();
//! ```

use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tempfile::TempDir;

use crate::config::LandingConfig;
use crate::render::Renderer;

// =========================================================================
// Fixture setup
// =========================================================================

/// The renderer with the stock theme, built once per test binary.
pub fn renderer() -> &'static Renderer {
    static RENDERER: OnceLock<Renderer> = OnceLock::new();
    RENDERER.get_or_init(|| Renderer::new(&config().highlight.theme).unwrap())
}

pub fn config() -> LandingConfig {
    LandingConfig::default()
}

/// A temp project root containing `README.md` with the given markdown.
pub fn project_with_readme(markdown: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("README.md"), markdown).unwrap();
    tmp
}

/// Create `dist/` with a stand-in for the JupyterLite entry file.
pub fn add_output_dir(project: &TempDir, entry_html: &str) {
    let dist = project.path().join("dist");
    fs::create_dir_all(&dist).unwrap();
    fs::write(dist.join("index.html"), entry_html).unwrap();
}

// =========================================================================
// Assertions helpers
// =========================================================================

/// Read a file to a string. Panics with the path on failure.
pub fn read(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();
    fs::read_to_string(path).unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()))
}

/// Hex SHA-256 of a file's contents.
pub fn sha256_file(path: &Path) -> String {
    let bytes = fs::read(path).unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));
    format!("{:x}", Sha256::digest(&bytes))
}
