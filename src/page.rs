//! HTML page shells.
//!
//! Two documents are produced:
//!
//! - **Home page**: launch buttons for the three JupyterLite interfaces, the
//!   rendered README in a single content slot, and a footer.
//! - **Redirect page**: replaces the output directory's entry file and sends
//!   visitors straight to the home page.
//!
//! Both are built with [maud](https://maud.lambda.xyz/). Settings text is
//! escaped by maud; the README fragment is inserted as-is.

use crate::config::SiteSettings;
use maud::{DOCTYPE, Markup, PreEscaped, html};

const LANDING_CSS: &str = include_str!("../static/landing.css");

/// A JupyterLite interface linked from the launch section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchTarget {
    pub label: &'static str,
    pub icon: &'static str,
    /// Route relative to the site root.
    pub href: &'static str,
    /// Primary buttons are drawn filled; the rest use the secondary style.
    pub primary: bool,
}

/// The three interfaces a JupyterLite build serves.
pub const LAUNCH_TARGETS: [LaunchTarget; 3] = [
    LaunchTarget {
        label: "JupyterLab",
        icon: "🔬",
        href: "lab/index.html",
        primary: true,
    },
    LaunchTarget {
        label: "Classic Notebooks",
        icon: "📓",
        href: "notebooks/index.html",
        primary: false,
    },
    LaunchTarget {
        label: "Python Console",
        icon: "💻",
        href: "consoles/index.html",
        primary: false,
    },
];

/// The launch button row. Identical on every build.
pub fn launch_buttons() -> Markup {
    html! {
        div.launch-buttons {
            @for target in &LAUNCH_TARGETS {
                @let secondary = !target.primary;
                a.launch-button.secondary[secondary] href=(target.href) {
                    span.icon { (target.icon) }
                    (target.label)
                }
            }
        }
    }
}

fn launch_section(site: &SiteSettings) -> Markup {
    html! {
        div.launch-section {
            h1.launch-title { (site.launch_title) }
            (launch_buttons())
        }
    }
}

fn footer(site: &SiteSettings) -> Markup {
    html! {
        div.footer {
            p { (site.tagline) }
            p {
                a href=(site.repository_url) { "GitHub Repository" }
                " | "
                a href=(site.docs_url) { "JupyterLite Docs" }
            }
        }
    }
}

/// Renders the home page around an already-rendered README fragment.
///
/// `highlight_css` is appended after the base styles so code blocks pick up
/// the configured theme.
pub fn home_page(site: &SiteSettings, highlight_css: &str, content_html: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (site.page_title) }
                style {
                    (PreEscaped(LANDING_CSS))
                    (PreEscaped(highlight_css))
                }
            }
            body {
                (launch_section(site))
                div.readme-content {
                    (PreEscaped(content_html))
                }
                (footer(site))
            }
        }
    }
}

/// Renders a page that immediately forwards to `./{home_file}`.
///
/// Uses both a script assignment and a meta refresh; some embedding contexts
/// disable one or the other.
pub fn redirect_page(site: &SiteSettings, home_file: &str) -> Markup {
    let target = format!("./{home_file}");
    let script = format!(
        "window.location.href = {};",
        serde_json::to_string(&target).unwrap_or_else(|_| format!("'{target}'"))
    );

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Redirecting to " (site.title) "..." }
                script { (PreEscaped(script)) }
                meta http-equiv="refresh" content={ "0;url=" (target) };
            }
            body {
                div style="text-align: center; margin-top: 100px; font-family: Arial, sans-serif;" {
                    h1 { (site.title) }
                    p { "Redirecting to workshop home..." }
                    p {
                        a href=(target) { "Click here if not redirected automatically" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_buttons_link_all_interfaces() {
        let html = launch_buttons().into_string();
        assert!(html.contains(r#"href="lab/index.html""#));
        assert!(html.contains(r#"href="notebooks/index.html""#));
        assert!(html.contains(r#"href="consoles/index.html""#));
        assert!(html.contains("JupyterLab"));
        assert!(html.contains("Classic Notebooks"));
        assert!(html.contains("Python Console"));
    }

    #[test]
    fn only_first_button_is_primary() {
        let html = launch_buttons().into_string();
        assert_eq!(html.matches("secondary").count(), 2);
        let lab = html.split("lab/index.html").next().unwrap();
        assert!(!lab.contains("secondary"));
    }

    #[test]
    fn home_page_includes_doctype_and_title() {
        let site = SiteSettings::default();
        let html = home_page(&site, "", "<p>x</p>").into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Bermuda CLRS Workshop 2025 - JupyterLite</title>"));
    }

    #[test]
    fn home_page_inserts_content_unescaped() {
        let site = SiteSettings::default();
        let html = home_page(&site, "", "<h2 id=\"x\">Agenda</h2>").into_string();
        assert!(html.contains(r#"<div class="readme-content"><h2 id="x">Agenda</h2></div>"#));
    }

    #[test]
    fn home_page_keeps_css_quotes_intact() {
        let site = SiteSettings::default();
        let html = home_page(&site, ".hl-string { color: #183691; }", "").into_string();
        assert!(html.contains(r#""Segoe UI""#));
        assert!(html.contains(".hl-string"));
    }

    #[test]
    fn home_page_footer_links() {
        let site = SiteSettings::default();
        let html = home_page(&site, "", "").into_string();
        assert!(html.contains(
            r#"<a href="https://github.com/LedgerInvesting/bermuda-clrs-workshop-2025">GitHub Repository</a>"#
        ));
        assert!(html.contains(r#"<a href="https://jupyterlite.readthedocs.io">JupyterLite Docs</a>"#));
    }

    #[test]
    fn settings_text_is_escaped() {
        let site = SiteSettings {
            launch_title: "<b>Lab</b>".to_string(),
            ..SiteSettings::default()
        };
        let html = home_page(&site, "", "").into_string();
        assert!(html.contains("&lt;b&gt;Lab&lt;/b&gt;"));
    }

    #[test]
    fn redirect_page_uses_script_and_meta_refresh() {
        let site = SiteSettings::default();
        let html = redirect_page(&site, "home.html").into_string();
        assert!(html.contains(r#"window.location.href = "./home.html";"#));
        assert!(html.contains(r#"<meta http-equiv="refresh" content="0;url=./home.html">"#));
        assert!(html.contains(r#"<a href="./home.html">"#));
    }
}
