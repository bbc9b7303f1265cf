//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects. Diagnostics that are not part
//! of the command's result go through `tracing` instead.
//!
//! # Output Format
//!
//! ## Build (redirect mode)
//!
//! ```text
//! Source: README.md
//! Home → home.html (9f2c41d07a1b)
//! Home → dist/home.html (9f2c41d07a1b)
//! Entry → dist/index.html redirects to home.html
//!
//! Landing page built
//!     Preview: python -m http.server 8000 --directory dist
//! ```
//!
//! ## Build (non-destructive mode, no output directory)
//!
//! ```text
//! Source: README.md
//! Output: dist/ not found
//!
//! Failed to create landing page
//! ```
//!
//! ## Install
//!
//! ```text
//! Fetched 2 package requests
//! ```

use crate::config::LandingConfig;
use crate::install::InstallOutcome;
use crate::landing::{BuildOptions, BuildReport, WrittenFile};
use std::path::Path;

/// Number of digest characters shown next to written files.
const DIGEST_CHARS: usize = 12;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Display a path relative to the project root when possible.
fn relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

fn written_line(label: &str, file: &WrittenFile, root: &Path) -> String {
    let digest = file.sha256.get(..DIGEST_CHARS).unwrap_or(&file.sha256);
    format!("{} → {} ({})", label, relative(&file.path, root), digest)
}

// ============================================================================
// Build
// ============================================================================

pub fn format_build_output(
    report: &BuildReport,
    root: &Path,
    config: &LandingConfig,
    options: BuildOptions,
) -> Vec<String> {
    let mut lines = Vec::new();

    if report.readme_found {
        lines.push(format!("Source: {}", config.readme));
    } else {
        lines.push(format!(
            "Source: default welcome text ({} not found)",
            config.readme
        ));
    }

    for home in &report.home_pages {
        lines.push(written_line("Home", home, root));
    }
    if let Some(entry) = &report.redirect {
        lines.push(format!(
            "Entry → {} redirects to {}",
            relative(&entry.path, root),
            config.home_file
        ));
    }
    if !report.output_dir_found {
        lines.push(format!("Output: {}/ not found", config.output_dir));
    }

    lines.push(String::new());
    if !report.succeeded() {
        lines.push("Failed to create landing page".to_string());
    } else if options.redirect {
        lines.push("Landing page built".to_string());
        lines.push(format!(
            "{}Preview: python -m http.server 8000 --directory {}",
            indent(1),
            config.output_dir
        ));
    } else {
        lines.push(format!("Landing page: /{}", config.home_file));
        lines.push(format!(
            "{}JupyterLite default preserved at /",
            indent(1)
        ));
    }

    lines
}

pub fn print_build_output(
    report: &BuildReport,
    root: &Path,
    config: &LandingConfig,
    options: BuildOptions,
) {
    for line in format_build_output(report, root, config, options) {
        println!("{}", line);
    }
}

// ============================================================================
// Install
// ============================================================================

pub fn format_install_outcome(outcome: &InstallOutcome) -> Vec<String> {
    match outcome {
        InstallOutcome::Fetched { requests } => {
            vec![format!("Fetched {} package requests", requests)]
        }
        InstallOutcome::AlreadyAvailable => {
            vec!["Dependencies already available".to_string()]
        }
        InstallOutcome::ManualInstallRequired { instruction } => vec![instruction.clone()],
    }
}

pub fn print_install_outcome(outcome: &InstallOutcome) {
    for line in format_install_outcome(outcome) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn written(path: &str) -> WrittenFile {
        WrittenFile {
            path: PathBuf::from("/project").join(path),
            bytes: 10,
            sha256: "9f2c41d07a1b0000000000000000000000000000000000000000000000000000"
                .to_string(),
        }
    }

    fn root() -> &'static Path {
        Path::new("/project")
    }

    #[test]
    fn redirect_build_lists_every_write() {
        let report = BuildReport {
            readme_found: true,
            output_dir_found: true,
            home_pages: vec![written("home.html"), written("dist/home.html")],
            redirect: Some(written("dist/index.html")),
        };
        let lines = format_build_output(
            &report,
            root(),
            &LandingConfig::default(),
            BuildOptions::default(),
        );

        assert_eq!(lines[0], "Source: README.md");
        assert_eq!(lines[1], "Home → home.html (9f2c41d07a1b)");
        assert_eq!(lines[2], "Home → dist/home.html (9f2c41d07a1b)");
        assert_eq!(lines[3], "Entry → dist/index.html redirects to home.html");
        assert_eq!(lines[5], "Landing page built");
        assert!(lines[6].contains("--directory dist"));
    }

    #[test]
    fn missing_readme_is_reported() {
        let report = BuildReport {
            readme_found: false,
            output_dir_found: false,
            home_pages: vec![written("home.html")],
            redirect: None,
        };
        let lines = format_build_output(
            &report,
            root(),
            &LandingConfig::default(),
            BuildOptions::default(),
        );
        assert_eq!(lines[0], "Source: default welcome text (README.md not found)");
        assert!(lines.contains(&"Output: dist/ not found".to_string()));
    }

    #[test]
    fn non_destructive_failure() {
        let report = BuildReport {
            readme_found: true,
            output_dir_found: false,
            home_pages: vec![],
            redirect: None,
        };
        let lines = format_build_output(
            &report,
            root(),
            &LandingConfig::default(),
            BuildOptions { redirect: false },
        );
        assert_eq!(lines.last().unwrap(), "Failed to create landing page");
    }

    #[test]
    fn non_destructive_success_mentions_preserved_root() {
        let report = BuildReport {
            readme_found: true,
            output_dir_found: true,
            home_pages: vec![written("dist/home.html")],
            redirect: None,
        };
        let lines = format_build_output(
            &report,
            root(),
            &LandingConfig::default(),
            BuildOptions { redirect: false },
        );
        assert!(lines.contains(&"Landing page: /home.html".to_string()));
        assert!(lines.last().unwrap().contains("preserved"));
    }

    #[test]
    fn install_outcomes() {
        assert_eq!(
            format_install_outcome(&InstallOutcome::Fetched { requests: 2 }),
            vec!["Fetched 2 package requests"]
        );
        assert_eq!(
            format_install_outcome(&InstallOutcome::ManualInstallRequired {
                instruction: "Run: !pip install bermuda-ledger".to_string()
            }),
            vec!["Run: !pip install bermuda-ledger"]
        );
    }

    #[test]
    fn short_digest_is_tolerated() {
        let file = WrittenFile {
            path: PathBuf::from("/project/home.html"),
            bytes: 1,
            sha256: "abc".to_string(),
        };
        assert_eq!(written_line("Home", &file, root()), "Home → home.html (abc)");
    }
}
