//! Landing page configuration.
//!
//! Handles loading, validating, and merging `landing.toml`. The file is
//! optional: every key has a stock default matching the workshop's published
//! site, so running with no config file at all produces the canonical page.
//!
//! ## Config File Location
//!
//! Place `landing.toml` in the project root, next to `README.md`:
//!
//! ```text
//! project/
//! ├── landing.toml         # Optional overrides
//! ├── README.md            # Rendered into the home page
//! ├── home.html            # Generated (redirect mode)
//! └── dist/                # JupyterLite build output
//!     ├── home.html        # Generated
//!     └── index.html       # Redirect (redirect mode only)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! [site]
//! title = "Spring Workshop"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the optional config file in the project root.
pub const CONFIG_FILE: &str = "landing.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Landing page configuration loaded from `landing.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LandingConfig {
    /// README path, relative to the project root.
    pub readme: String,
    /// JupyterLite output directory, relative to the project root.
    pub output_dir: String,
    /// File name of the generated landing page.
    pub home_file: String,
    /// Default entry document of the output directory.
    pub entry_file: String,
    /// Text shown around the rendered README.
    pub site: SiteSettings,
    /// Code highlighting settings.
    pub highlight: HighlightConfig,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            readme: "README.md".to_string(),
            output_dir: "dist".to_string(),
            home_file: "home.html".to_string(),
            entry_file: "index.html".to_string(),
            site: SiteSettings::default(),
            highlight: HighlightConfig::default(),
        }
    }
}

impl LandingConfig {
    /// Validate that file names and display text are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("home_file", &self.home_file),
            ("entry_file", &self.entry_file),
        ] {
            if value.is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
            if value.contains('/') || value.contains('\\') {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a bare file name, got {value:?}"
                )));
            }
        }
        if self.home_file == self.entry_file {
            return Err(ConfigError::Validation(
                "home_file and entry_file must differ".into(),
            ));
        }
        if self.readme.is_empty() {
            return Err(ConfigError::Validation("readme must not be empty".into()));
        }
        if self.output_dir.is_empty() {
            return Err(ConfigError::Validation(
                "output_dir must not be empty".into(),
            ));
        }
        if self.site.title.trim().is_empty() {
            return Err(ConfigError::Validation("site.title must not be empty".into()));
        }
        if self.site.repository_url.is_empty() || self.site.docs_url.is_empty() {
            return Err(ConfigError::Validation(
                "site.repository_url and site.docs_url must not be empty".into(),
            ));
        }
        if self.highlight.theme.is_empty() {
            return Err(ConfigError::Validation(
                "highlight.theme must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Display text for the page shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSettings {
    /// Workshop name. Also used in the fallback content and the redirect page.
    pub title: String,
    /// Contents of the home page `<title>` element.
    pub page_title: String,
    /// Heading above the launch buttons.
    pub launch_title: String,
    /// First footer line.
    pub tagline: String,
    pub repository_url: String,
    pub docs_url: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            title: "Bermuda CLRS Workshop 2025".to_string(),
            page_title: "Bermuda CLRS Workshop 2025 - JupyterLite".to_string(),
            launch_title: "JupyterLite Environment".to_string(),
            tagline: "🏝️ Bermuda CLRS Workshop 2025 | Powered by JupyterLite & Pyodide"
                .to_string(),
            repository_url: "https://github.com/LedgerInvesting/bermuda-clrs-workshop-2025"
                .to_string(),
            docs_url: "https://jupyterlite.readthedocs.io".to_string(),
        }
    }
}

/// Code highlighting settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HighlightConfig {
    /// Name of a bundled syntect theme, e.g. `InspiredGitHub` or `base16-ocean.light`.
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "InspiredGitHub".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(LandingConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `landing.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<LandingConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: LandingConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `landing.toml` in the given project root.
pub fn load_config(root: &Path) -> Result<LandingConfig, ConfigError> {
    resolve_config(load_raw_config(root)?)
}

/// Returns a fully-commented stock `landing.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Workshop Landing Configuration
# ==============================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# README rendered into the home page (relative to the project root).
# When missing, a short welcome message is used instead.
readme = "README.md"

# JupyterLite build output directory.
output_dir = "dist"

# Generated landing page file name.
home_file = "home.html"

# The output directory's default document. In redirect mode it is
# overwritten with a page that forwards visitors to home_file.
entry_file = "index.html"

# ---------------------------------------------------------------------------
# Page text
# ---------------------------------------------------------------------------
[site]
title = "Bermuda CLRS Workshop 2025"
page_title = "Bermuda CLRS Workshop 2025 - JupyterLite"
launch_title = "JupyterLite Environment"
tagline = "🏝️ Bermuda CLRS Workshop 2025 | Powered by JupyterLite & Pyodide"
repository_url = "https://github.com/LedgerInvesting/bermuda-clrs-workshop-2025"
docs_url = "https://jupyterlite.readthedocs.io"

# ---------------------------------------------------------------------------
# Code highlighting
# ---------------------------------------------------------------------------
[highlight]
# Bundled themes: InspiredGitHub, Solarized (light), Solarized (dark),
# base16-ocean.light, base16-ocean.dark, base16-eighties.dark, base16-mocha.dark
theme = "InspiredGitHub"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_matches_published_site() {
        let config = LandingConfig::default();
        assert_eq!(config.readme, "README.md");
        assert_eq!(config.output_dir, "dist");
        assert_eq!(config.home_file, "home.html");
        assert_eq!(config.entry_file, "index.html");
        assert_eq!(config.site.title, "Bermuda CLRS Workshop 2025");
        assert_eq!(config.highlight.theme, "InspiredGitHub");
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[site]
title = "Spring Workshop"
"##;
        let config: LandingConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.site.title, "Spring Workshop");
        // Default values preserved
        assert_eq!(config.site.launch_title, "JupyterLite Environment");
        assert_eq!(config.home_file, "home.html");
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, LandingConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r##"
output_dir = "_output"

[highlight]
theme = "base16-ocean.light"
"##,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.output_dir, "_output");
        assert_eq!(config.highlight.theme, "base16-ocean.light");
        assert_eq!(config.readme, "README.md");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "this is not valid toml [[[").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected_via_load_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "home_fiel = \"x.html\"\n").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_nested_key_rejected() {
        let toml = r##"
[site]
colour = "blue"
"##;
        let result: Result<LandingConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("b = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("a").unwrap().as_integer(), Some(1));
        assert_eq!(merged.get("b").unwrap().as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_preserves_nested_base_keys() {
        let base = stock_defaults_value();
        let overlay: toml::Value = toml::from_str("[site]\ntagline = \"hi\"").unwrap();
        let merged = merge_toml(base, overlay);
        let site = merged.get("site").unwrap();
        assert_eq!(site.get("tagline").unwrap().as_str(), Some("hi"));
        assert_eq!(
            site.get("title").unwrap().as_str(),
            Some("Bermuda CLRS Workshop 2025")
        );
    }

    #[test]
    fn validate_default_config_passes() {
        assert!(LandingConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_path_in_home_file() {
        let config = LandingConfig {
            home_file: "sub/home.html".to_string(),
            ..LandingConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_rejects_home_equal_to_entry() {
        let config = LandingConfig {
            home_file: "index.html".to_string(),
            ..LandingConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_rejects_empty_theme() {
        let mut config = LandingConfig::default();
        config.highlight.theme.clear();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn resolve_config_rejects_invalid_values() {
        let overlay: toml::Value = toml::from_str("entry_file = \"\"").unwrap();
        let result = resolve_config(Some(overlay));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: LandingConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, LandingConfig::default());
    }
}
