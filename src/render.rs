//! Markdown to HTML conversion for the README.
//!
//! The README is rendered with [pulldown-cmark] plus three post-processing
//! passes over the event stream:
//!
//! - **Heading anchors**: every heading gets a slug `id` so the page can be
//!   deep-linked. Explicit `{#id}` attributes win; repeated slugs get `_1`,
//!   `_2`, … suffixes.
//! - **Table of contents**: a paragraph containing only `[TOC]` is replaced by a
//!   nested `<div class="toc">` list of every heading in the document.
//! - **Code highlighting**: fenced code blocks are highlighted with syntect's
//!   class-based generator and wrapped in `<div class="codehilite">`. The
//!   matching stylesheet comes from [`Renderer::stylesheet`].
//!
//! Raw HTML in the README passes through untouched. The README is authored by
//! the workshop maintainers, so nothing is sanitized.
//!
//! [pulldown-cmark]: https://docs.rs/pulldown-cmark

use maud::{Markup, PreEscaped, html};
use pulldown_cmark::{CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd, html as md_html};
use std::collections::HashSet;
use syntect::highlighting::ThemeSet;
use syntect::html::{ClassStyle, ClassedHTMLGenerator, css_for_theme_with_class_style};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;
use thiserror::Error;

/// Prefix applied to every highlight class so they cannot collide with the page CSS.
const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "hl-" };

/// The paragraph text that is replaced by the table of contents.
const TOC_MARKER: &str = "[TOC]";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("unknown highlight theme {name:?} (available: {available})")]
    UnknownTheme { name: String, available: String },
    #[error("failed to build highlight stylesheet: {0}")]
    Stylesheet(String),
    #[error("failed to highlight {language} code block: {message}")]
    Highlighting { language: String, message: String },
}

/// Markdown renderer with syntax definitions and theme CSS loaded up front.
///
/// Construction is the expensive part (syntect deserializes its bundled
/// syntax and theme dumps), so the entry point builds one renderer and passes
/// it to the builder.
pub struct Renderer {
    options: Options,
    syntax_set: SyntaxSet,
    stylesheet: String,
}

impl Renderer {
    /// Load syntaxes and the named highlight theme.
    pub fn new(theme_name: &str) -> Result<Self, RenderError> {
        let syntax_set = SyntaxSet::load_defaults_newlines();
        let themes = ThemeSet::load_defaults();
        let theme = themes.themes.get(theme_name).ok_or_else(|| {
            let mut names: Vec<&str> = themes.themes.keys().map(String::as_str).collect();
            names.sort_unstable();
            RenderError::UnknownTheme {
                name: theme_name.to_string(),
                available: names.join(", "),
            }
        })?;
        let stylesheet = css_for_theme_with_class_style(theme, CLASS_STYLE)
            .map_err(|err| RenderError::Stylesheet(err.to_string()))?;

        Ok(Self {
            options: extended_options(),
            syntax_set,
            stylesheet,
        })
    }

    /// CSS rules for the highlight classes emitted by [`Renderer::render`].
    pub fn stylesheet(&self) -> &str {
        &self.stylesheet
    }

    /// Convert markdown to an HTML fragment.
    pub fn render(&self, markdown: &str) -> Result<String, RenderError> {
        let mut events: Vec<Event> = Parser::new_ext(markdown, self.options).collect();
        let toc = assign_heading_ids(&mut events);

        let mut rewritten = Vec::with_capacity(events.len());
        let mut iter = events.into_iter();
        while let Some(event) = iter.next() {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let language = match &kind {
                        CodeBlockKind::Fenced(info) => info
                            .split_whitespace()
                            .next()
                            .map(str::to_string),
                        CodeBlockKind::Indented => None,
                    };
                    let mut code = String::new();
                    for inner in iter.by_ref() {
                        match inner {
                            Event::End(TagEnd::CodeBlock) => break,
                            Event::Text(text) => code.push_str(&text),
                            _ => {}
                        }
                    }
                    let block = self.highlight(language.as_deref(), &code)?;
                    rewritten.push(Event::Html(block.into()));
                }
                Event::Start(Tag::Paragraph) => {
                    let mut inner = Vec::new();
                    for next in iter.by_ref() {
                        if matches!(next, Event::End(TagEnd::Paragraph)) {
                            break;
                        }
                        inner.push(next);
                    }
                    if is_toc_marker(&inner) {
                        rewritten.push(Event::Html(toc_html(&toc).into_string().into()));
                    } else {
                        rewritten.push(Event::Start(Tag::Paragraph));
                        rewritten.extend(inner);
                        rewritten.push(Event::End(TagEnd::Paragraph));
                    }
                }
                other => rewritten.push(other),
            }
        }

        let mut body = String::new();
        md_html::push_html(&mut body, rewritten.into_iter());
        Ok(body)
    }

    fn highlight(&self, language: Option<&str>, code: &str) -> Result<String, RenderError> {
        let token = language.unwrap_or("text");
        let syntax = self
            .find_syntax(token)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let mut code = code.to_string();
        if !code.ends_with('\n') {
            code.push('\n');
        }

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntax_set, CLASS_STYLE);
        for line in LinesWithEndings::from(code.as_str()) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .map_err(|err| RenderError::Highlighting {
                    language: token.to_string(),
                    message: err.to_string(),
                })?;
        }

        let lang_class = token.to_ascii_lowercase();
        let block = html! {
            div.codehilite {
                pre {
                    code class={ "language-" (lang_class) } {
                        (PreEscaped(generator.finalize()))
                    }
                }
            }
        };
        Ok(format!("{}\n", block.into_string()))
    }

    fn find_syntax(&self, token: &str) -> Option<&SyntaxReference> {
        let lowercase = token.to_ascii_lowercase();
        self.syntax_set
            .find_syntax_by_token(&lowercase)
            .or_else(|| self.syntax_set.find_syntax_by_name(token))
            .or_else(|| self.syntax_set.find_syntax_by_extension(&lowercase))
    }
}

/// Markdown extensions matching the "extra" feature set README authors expect.
fn extended_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_HEADING_ATTRIBUTES
        | Options::ENABLE_DEFINITION_LIST
}

// ============================================================================
// Table of contents
// ============================================================================

/// A heading collected for the table of contents.
#[derive(Debug, Clone, PartialEq)]
pub struct TocEntry {
    /// Heading level, 1 through 6.
    pub level: usize,
    /// Anchor id written to the heading element.
    pub id: String,
    /// Plain heading text.
    pub text: String,
}

struct TocNode<'a> {
    entry: &'a TocEntry,
    children: Vec<TocNode<'a>>,
}

/// Give every heading an `id`, returning the headings in document order.
fn assign_heading_ids(events: &mut [Event]) -> Vec<TocEntry> {
    // Explicit ids are reserved up front so an earlier auto slug cannot claim one.
    let mut used: HashSet<String> = events
        .iter()
        .filter_map(|event| match event {
            Event::Start(Tag::Heading { id: Some(id), .. }) => Some(id.to_string()),
            _ => None,
        })
        .collect();
    let mut entries = Vec::new();

    let mut idx = 0;
    while idx < events.len() {
        let (level, explicit_id) = match &events[idx] {
            Event::Start(Tag::Heading { level, id, .. }) => {
                (*level as usize, id.as_ref().map(|id| id.to_string()))
            }
            _ => {
                idx += 1;
                continue;
            }
        };

        let mut text = String::new();
        let mut end = idx + 1;
        while end < events.len() {
            match &events[end] {
                Event::End(TagEnd::Heading(_)) => break,
                Event::Text(t) | Event::Code(t) => text.push_str(t),
                _ => {}
            }
            end += 1;
        }

        let id = match explicit_id {
            Some(id) => id,
            None => {
                let id = unique_id(&slugify_heading(&text), &used);
                used.insert(id.clone());
                if let Event::Start(Tag::Heading { id: slot, .. }) = &mut events[idx] {
                    *slot = Some(CowStr::from(id.clone()));
                }
                id
            }
        };

        entries.push(TocEntry {
            level,
            id,
            text: text.trim().to_string(),
        });
        idx = end + 1;
    }

    entries
}

/// Slug a heading, keeping underscores as word characters (`snake_case` stays `snake_case`).
fn slugify_heading(text: &str) -> String {
    let slug = text
        .split('_')
        .map(slug::slugify)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_");
    if slug.is_empty() {
        "section".to_string()
    } else {
        slug
    }
}

/// `intro`, `intro_1`, `intro_2`, …
fn unique_id(base: &str, used: &HashSet<String>) -> String {
    if !used.contains(base) {
        return base.to_string();
    }
    (1..)
        .map(|n| format!("{base}_{n}"))
        .find(|candidate| !used.contains(candidate))
        .unwrap_or_else(|| base.to_string())
}

fn is_toc_marker(inner: &[Event]) -> bool {
    let mut text = String::new();
    for event in inner {
        match event {
            Event::Text(t) => text.push_str(t),
            _ => return false,
        }
    }
    text.trim() == TOC_MARKER
}

/// Nest a flat heading list: each entry owns the following entries with a deeper level.
fn nest(entries: &[TocEntry]) -> Vec<TocNode<'_>> {
    let mut nodes = Vec::new();
    let mut idx = 0;
    while idx < entries.len() {
        let level = entries[idx].level;
        let end = entries[idx + 1..]
            .iter()
            .position(|e| e.level <= level)
            .map_or(entries.len(), |p| idx + 1 + p);
        nodes.push(TocNode {
            entry: &entries[idx],
            children: nest(&entries[idx + 1..end]),
        });
        idx = end;
    }
    nodes
}

fn toc_html(entries: &[TocEntry]) -> Markup {
    html! {
        div.toc {
            @if !entries.is_empty() {
                (toc_list(&nest(entries)))
            }
        }
    }
}

fn toc_list(nodes: &[TocNode]) -> Markup {
    html! {
        ul {
            @for node in nodes {
                li {
                    a href={ "#" (node.entry.id) } { (node.entry.text) }
                    @if !node.children.is_empty() {
                        (toc_list(&node.children))
                    }
                }
            }
        }
    }
}
