//! # Workshop Landing
//!
//! Site tooling for the workshop's JupyterLite deployment. The JupyterLite
//! build produces a notebook environment under `dist/`; this crate adds a
//! landing page in front of it and helps notebooks get their dependencies.
//!
//! # Pipeline
//!
//! ```text
//! README.md  →  render  →  page shell  →  home.html (+ dist/home.html)
//!                                      ↘  dist/index.html (redirect, optional)
//! ```
//!
//! Every run is read → transform → write with whole-file overwrites, so
//! rebuilding is always safe.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`landing`] | The builder: reads the README, renders, writes home page and optional redirect |
//! | [`render`] | Markdown → HTML with tables, footnotes, heading anchors, `[TOC]`, highlighted code |
//! | [`page`] | Maud page shells: home page with launch buttons, redirect page |
//! | [`install`] | Notebook dependency installer with an explicit runtime strategy |
//! | [`config`] | Optional `landing.toml` loading, merging, and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One Builder, Two Modes
//!
//! JupyterLite owns `dist/index.html`. The default (redirect) mode overwrites it
//! with a page that forwards to `home.html`; the non-destructive mode writes
//! only `dist/home.html` and leaves JupyterLite's launcher at the site root.
//! Both share every step except the final write set, see [`landing::BuildOptions`].
//!
//! ## Maud With One Slot
//!
//! The page shell is a Maud template. Settings text is escaped; the rendered
//! README is inserted into exactly one place as pre-escaped HTML.
//!
//! ## Explicit Initialization
//!
//! Loading syntax definitions and the highlight theme happens once, in
//! [`render::Renderer::new`], and its failure is an ordinary error returned to
//! the entry point.
//!
//! ## Runtime As A Parameter
//!
//! The installer never sniffs its environment. Callers choose
//! [`install::Runtime::Browser`] (with a package fetcher) or
//! [`install::Runtime::Native`] (with a module importer), so both paths are
//! testable without a browser.

pub mod config;
pub mod install;
pub mod landing;
pub mod output;
pub mod page;
pub mod render;

#[cfg(test)]
pub(crate) mod test_helpers;
