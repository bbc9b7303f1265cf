//! Landing page builder.
//!
//! Reads the README, renders it, embeds it in the home page shell, and writes
//! the result. Two modes share everything but the write set:
//!
//! | Mode | Writes |
//! |------|--------|
//! | redirect (default) | `home.html` at the project root; if `dist/` exists, `dist/home.html` and a redirect in `dist/index.html` |
//! | non-destructive | only `dist/home.html`, and only if `dist/` exists |
//!
//! Redirect mode exists because the JupyterLite build claims `dist/index.html`
//! for its own launcher page; pointing it at the home page is the only way to
//! make the landing page the site root.
//!
//! ## Idempotence
//!
//! Every write is a whole-file overwrite and the output depends only on the
//! README, the config, and the highlight theme, so rebuilding with the same
//! inputs yields byte-identical files. Two builds must not run against the
//! same output directory at the same time; nothing locks it.

use crate::config::{LandingConfig, SiteSettings};
use crate::page;
use crate::render::{RenderError, Renderer};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

impl BuildError {
    fn io(path: &Path, source: io::Error) -> Self {
        BuildError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Build mode switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Write the root home page and replace the output entry file with a redirect.
    pub redirect: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self { redirect: true }
    }
}

/// A file written by the builder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub bytes: usize,
    /// Hex SHA-256 of the written contents.
    pub sha256: String,
}

/// What a build did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildReport {
    /// False when the fallback welcome text was rendered instead.
    pub readme_found: bool,
    pub output_dir_found: bool,
    /// Home pages, in write order.
    pub home_pages: Vec<WrittenFile>,
    /// The overwritten entry file, in redirect mode with an output directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<WrittenFile>,
}

impl BuildReport {
    /// True when at least one home page was written.
    pub fn succeeded(&self) -> bool {
        !self.home_pages.is_empty()
    }
}

/// Markdown used when the README is missing.
pub fn fallback_markdown(site: &SiteSettings) -> String {
    format!(
        "# {}\n\nWelcome to the JupyterLite environment!",
        site.title
    )
}

/// Read the README, returning `None` when it does not exist.
pub fn read_readme(path: &Path) -> Result<Option<String>, BuildError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(BuildError::io(path, err)),
    }
}

/// Render markdown into a complete home page document.
pub fn render_home(
    config: &LandingConfig,
    renderer: &Renderer,
    markdown: &str,
) -> Result<String, BuildError> {
    let content = renderer.render(markdown)?;
    Ok(page::home_page(&config.site, renderer.stylesheet(), &content).into_string())
}

/// Build the landing page for the project at `root`.
pub fn build(
    root: &Path,
    config: &LandingConfig,
    renderer: &Renderer,
    options: BuildOptions,
) -> Result<BuildReport, BuildError> {
    let readme_path = root.join(&config.readme);
    let readme = read_readme(&readme_path)?;
    let readme_found = readme.is_some();
    let markdown = match readme {
        Some(content) => content,
        None => {
            warn!(path = %readme_path.display(), "README not found, using default content");
            fallback_markdown(&config.site)
        }
    };

    let home_html = render_home(config, renderer, &markdown)?;
    let output_dir = root.join(&config.output_dir);
    let output_dir_found = output_dir.is_dir();
    if !output_dir_found {
        debug!(path = %output_dir.display(), "output directory not present");
    }

    let mut report = BuildReport {
        readme_found,
        output_dir_found,
        home_pages: Vec::new(),
        redirect: None,
    };

    if options.redirect {
        report
            .home_pages
            .push(write_file(&root.join(&config.home_file), &home_html)?);
    }

    if output_dir_found {
        report
            .home_pages
            .push(write_file(&output_dir.join(&config.home_file), &home_html)?);

        if options.redirect {
            let redirect_html = page::redirect_page(&config.site, &config.home_file).into_string();
            let entry_path = output_dir.join(&config.entry_file);
            report.redirect = Some(write_file(&entry_path, &redirect_html)?);
            info!(
                entry = %entry_path.display(),
                target = %config.home_file,
                "entry file now redirects to the home page"
            );
        }
    } else if !options.redirect {
        warn!(
            path = %output_dir.display(),
            "output directory missing, nothing written"
        );
    }

    Ok(report)
}

fn write_file(path: &Path, contents: &str) -> Result<WrittenFile, BuildError> {
    fs::write(path, contents).map_err(|err| BuildError::io(path, err))?;
    info!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(WrittenFile {
        path: path.to_path_buf(),
        bytes: contents.len(),
        sha256: format!("{:x}", Sha256::digest(contents.as_bytes())),
    })
}
