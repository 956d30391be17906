//! Markdown rendering for article bodies
//!
//! Converts Markdown to HTML with tables, footnotes and strikethrough
//! enabled, assigns anchor ids to headings and collects them into a table of
//! contents, and wraps code blocks in a `codehilite` container so a
//! class-based highlighter can style them.

use pulldown_cmark::{html, Event, Options, Parser, Tag, TagEnd};
use serde::Serialize;
use std::collections::HashMap;

/// Table-of-contents entry collected while rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    /// Heading depth, 1 through 6
    pub level: u8,
    /// Plain text of the heading
    pub title: String,
    /// `id` attribute assigned to the heading element
    pub anchor: String,
}

/// Rendered article body
#[derive(Debug, Clone)]
pub struct RenderedMarkdown {
    pub html: String,
    pub toc: Vec<TocEntry>,
}

/// Render an article body to HTML plus its table of contents.
pub fn render(source: &str) -> RenderedMarkdown {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let events: Vec<Event> = Parser::new_ext(source, options).collect();

    let mut out: Vec<Event> = Vec::with_capacity(events.len() + 8);
    let mut toc = Vec::new();
    let mut anchors = AnchorSet::new();

    for (idx, event) in events.iter().enumerate() {
        match event {
            Event::Start(Tag::Heading {
                level,
                classes,
                attrs,
                ..
            }) => {
                let title = heading_text(&events[idx + 1..]);
                let anchor = anchors.assign(&title);
                toc.push(TocEntry {
                    level: *level as u8,
                    title,
                    anchor: anchor.clone(),
                });
                out.push(Event::Start(Tag::Heading {
                    level: *level,
                    id: Some(anchor.into()),
                    classes: classes.clone(),
                    attrs: attrs.clone(),
                }));
            }
            Event::Start(Tag::CodeBlock(kind)) => {
                out.push(Event::Html("<div class=\"codehilite\">".into()));
                out.push(Event::Start(Tag::CodeBlock(kind.clone())));
            }
            Event::End(TagEnd::CodeBlock) => {
                out.push(Event::End(TagEnd::CodeBlock));
                out.push(Event::Html("</div>".into()));
            }
            other => out.push(other.clone()),
        }
    }

    let mut html_out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut html_out, out.into_iter());

    RenderedMarkdown {
        html: html_out,
        toc,
    }
}

/// Concatenated text content of a heading, up to its end tag.
fn heading_text(events: &[Event]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            _ => {}
        }
    }
    text
}

/// Assigns unique anchor ids to headings within one document.
struct AnchorSet {
    seen: HashMap<String, usize>,
}

impl AnchorSet {
    fn new() -> Self {
        AnchorSet {
            seen: HashMap::new(),
        }
    }

    fn assign(&mut self, title: &str) -> String {
        let base = slugify(title);
        let count = self.seen.entry(base.clone()).or_insert(0);
        let anchor = if *count == 0 {
            base.clone()
        } else {
            format!("{}-{}", base, count)
        };
        *count += 1;
        anchor
    }
}

/// Lowercased heading text with runs of non-alphanumeric characters collapsed
/// into single hyphens. Headings with no usable characters fall back to
/// "section".
fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            slug.extend(ch.to_lowercase());
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        "section".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let rendered = render("hello **world**");
        assert!(rendered.html.contains("<strong>world</strong>"));
        assert!(rendered.toc.is_empty());
    }

    #[test]
    fn test_tables_enabled() {
        let rendered = render("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(rendered.html.contains("<table>"));
    }

    #[test]
    fn test_strikethrough_enabled() {
        let rendered = render("~~obsolete~~");
        assert!(rendered.html.contains("<del>obsolete</del>"));
    }

    #[test]
    fn test_footnotes_enabled() {
        let rendered = render("claim[^1]\n\n[^1]: source");
        assert!(rendered.html.contains("footnote-reference"));
    }

    #[test]
    fn test_headings_get_anchor_ids() {
        let rendered = render("# Intro\n\n## Getting Started");
        assert!(rendered.html.contains("<h1 id=\"intro\">"));
        assert!(rendered.html.contains("<h2 id=\"getting-started\">"));
        assert_eq!(
            rendered.toc,
            vec![
                TocEntry {
                    level: 1,
                    title: "Intro".to_string(),
                    anchor: "intro".to_string(),
                },
                TocEntry {
                    level: 2,
                    title: "Getting Started".to_string(),
                    anchor: "getting-started".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_duplicate_headings_get_unique_anchors() {
        let rendered = render("# Setup\n\n# Setup\n\n# Setup");
        let anchors: Vec<&str> = rendered.toc.iter().map(|e| e.anchor.as_str()).collect();
        assert_eq!(anchors, vec!["setup", "setup-1", "setup-2"]);
    }

    #[test]
    fn test_symbol_only_heading_falls_back() {
        let rendered = render("# !!!");
        assert_eq!(rendered.toc[0].anchor, "section");
    }

    #[test]
    fn test_heading_with_code_span() {
        let rendered = render("## Using `serde` here");
        assert_eq!(rendered.toc[0].title, "Using serde here");
        assert_eq!(rendered.toc[0].anchor, "using-serde-here");
    }

    #[test]
    fn test_code_blocks_wrapped_for_highlighting() {
        let rendered = render("```rust\nfn main() {}\n```");
        assert!(rendered.html.contains("<div class=\"codehilite\">"));
        assert!(rendered.html.contains("<code class=\"language-rust\">"));
        assert!(rendered.html.contains("</div>"));
    }

    #[test]
    fn test_indented_code_blocks_also_wrapped() {
        let rendered = render("para\n\n    let x = 1;\n");
        assert!(rendered.html.contains("<div class=\"codehilite\">"));
        assert!(rendered.html.contains("<pre><code>"));
    }

    #[test]
    fn test_unicode_headings_keep_their_characters() {
        let rendered = render("# 文章 Title");
        assert_eq!(rendered.toc[0].anchor, "文章-title");
    }
}
