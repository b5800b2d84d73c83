//! Blog articles.
//!
//! Metadata lives in `data/articles.json` and each body is a Markdown file
//! under `content/articles/`. Both are compiled into the binary and parsed
//! once into typed blocks, so no raw HTML ever reaches a response.

use std::collections::HashSet;

use chrono::NaiveDate;
use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};
use serde::Serialize;

use crate::{
    core::data::is_url_safe,
    error::FolioError,
    types::{ArticleMeta, Author},
};

const EMBEDDED_ARTICLES: &str = include_str!("../../data/articles.json");

const EMBEDDED_BODIES: [(&str, &str); 4] = [
    (
        "building-performant-flutter-apps",
        include_str!("../../content/articles/building-performant-flutter-apps.md"),
    ),
    (
        "state-management-flutter",
        include_str!("../../content/articles/state-management-flutter.md"),
    ),
    (
        "custom-animations-flutter",
        include_str!("../../content/articles/custom-animations-flutter.md"),
    ),
    (
        "flutter-architecture-best-practices",
        include_str!("../../content/articles/flutter-architecture-best-practices.md"),
    ),
];

/// Served for any slug that matches no article.
pub const DEFAULT_ARTICLE: &str = "flutter-architecture-best-practices";

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Span {
    Text { text: String },
    Strong { text: String },
    Emphasis { text: String },
    Code { text: String },
    Link { text: String, href: String },
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Paragraph {
        spans: Vec<Span>,
    },
    Heading {
        level: u8,
        spans: Vec<Span>,
    },
    List {
        ordered: bool,
        items: Vec<Vec<Span>>,
    },
    CodeBlock {
        language: Option<String>,
        code: String,
    },
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSummary {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub image: String,
    pub date: NaiveDate,
    pub display_date: String,
    pub read_time: String,
    pub tags: Vec<String>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub author: Author,
    pub date: NaiveDate,
    pub display_date: String,
    pub read_time: String,
    pub image: String,
    pub tags: Vec<String>,
    pub content: Vec<Block>,
    pub related: Vec<ArticleSummary>,
}

impl Article {
    pub fn summary(&self) -> ArticleSummary {
        ArticleSummary {
            slug: self.slug.clone(),
            title: self.title.clone(),
            excerpt: self.excerpt.clone(),
            image: self.image.clone(),
            date: self.date,
            display_date: self.display_date.clone(),
            read_time: self.read_time.clone(),
            tags: self.tags.clone(),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

pub struct Resolved<'a> {
    pub article: &'a Article,
    pub fallback: bool,
}

#[derive(Debug, Clone)]
pub struct Library {
    articles: Vec<Article>,
    default_index: usize,
}

impl Library {
    pub fn embedded() -> Result<Self, FolioError> {
        let metas = serde_json::from_str::<Vec<ArticleMeta>>(EMBEDDED_ARTICLES)?;
        Library::from_sources(metas, &EMBEDDED_BODIES, DEFAULT_ARTICLE)
    }

    pub fn from_sources(
        metas: Vec<ArticleMeta>,
        bodies: &[(&str, &str)],
        default_slug: &str,
    ) -> Result<Self, FolioError> {
        let mut seen = HashSet::new();
        for meta in &metas {
            if !is_url_safe(&meta.slug) || !seen.insert(meta.slug.as_str()) {
                return Err(FolioError::InvalidContent(format!(
                    "article slug \"{}\" is invalid or repeated",
                    meta.slug
                )));
            }
            if let Some(missing) = meta.related.iter().find(|slug| !seen_in(&metas, slug)) {
                return Err(FolioError::InvalidContent(format!(
                    "article \"{}\" relates to unknown article \"{}\"",
                    meta.slug, missing
                )));
            }
        }

        let mut articles = Vec::with_capacity(metas.len());
        for meta in &metas {
            let body = bodies
                .iter()
                .find(|(slug, _)| *slug == meta.slug)
                .map(|(_, body)| *body)
                .ok_or_else(|| {
                    FolioError::InvalidContent(format!("article \"{}\" has no body", meta.slug))
                })?;
            articles.push(Article {
                slug: meta.slug.clone(),
                title: meta.title.clone(),
                excerpt: meta.excerpt.clone(),
                author: meta.author.clone(),
                date: meta.date,
                display_date: display_date(meta.date),
                read_time: meta.read_time.clone(),
                image: meta.image.clone(),
                tags: meta.tags.clone(),
                content: parse_markdown(body),
                related: Vec::new(),
            });
        }

        let summaries: Vec<ArticleSummary> = articles.iter().map(Article::summary).collect();
        for (article, meta) in articles.iter_mut().zip(&metas) {
            article.related = meta
                .related
                .iter()
                .filter_map(|slug| summaries.iter().find(|s| &s.slug == slug).cloned())
                .collect();
        }

        let default_index = articles
            .iter()
            .position(|article| article.slug == default_slug)
            .ok_or_else(|| {
                FolioError::InvalidContent(format!("default article \"{}\" is missing", default_slug))
            })?;

        Ok(Library {
            articles,
            default_index,
        })
    }

    pub fn find(&self, slug: &str) -> Option<&Article> {
        self.articles.iter().find(|article| article.slug == slug)
    }

    /// Unknown slugs fall back to the default article instead of failing.
    pub fn resolve(&self, slug: &str) -> Resolved<'_> {
        match self.find(slug) {
            Some(article) => Resolved {
                article,
                fallback: false,
            },
            None => Resolved {
                article: &self.articles[self.default_index],
                fallback: true,
            },
        }
    }

    /// Newest first, optionally restricted to one tag.
    pub fn summaries(&self, tag: Option<&str>) -> Vec<ArticleSummary> {
        let mut summaries: Vec<ArticleSummary> = self
            .articles
            .iter()
            .filter(|article| tag.map_or(true, |tag| article.has_tag(tag)))
            .map(Article::summary)
            .collect();
        summaries.sort_by(|a, b| b.date.cmp(&a.date));
        summaries
    }
}

fn seen_in(metas: &[ArticleMeta], slug: &str) -> bool {
    metas.iter().any(|meta| meta.slug == slug)
}

pub fn display_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Style {
    Strong,
    Emphasis,
}

#[derive(Default)]
struct BlockBuilder {
    blocks: Vec<Block>,
    spans: Vec<Span>,
    styles: Vec<Style>,
    heading: Option<u8>,
    link: Option<(String, String)>,
    list: Option<(bool, Vec<Vec<Span>>)>,
    list_depth: usize,
    paragraph_gap: bool,
    code: Option<(Option<String>, String)>,
}

impl BlockBuilder {
    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => self.heading = Some(level as u8),
            Event::End(TagEnd::Heading(_)) => {
                let spans = std::mem::take(&mut self.spans);
                if let Some(level) = self.heading.take() {
                    self.blocks.push(Block::Heading { level, spans });
                }
            }
            Event::End(TagEnd::Paragraph) => {
                if self.list.is_some() {
                    // loose item: the next paragraph joins after a space
                    self.paragraph_gap = true;
                } else if !self.spans.is_empty() {
                    let spans = std::mem::take(&mut self.spans);
                    self.blocks.push(Block::Paragraph { spans });
                }
            }
            Event::Start(Tag::List(start)) => {
                self.list_depth += 1;
                if self.list_depth == 1 {
                    self.list = Some((start.is_some(), Vec::new()));
                } else {
                    // nested lists are flattened into the outer one
                    self.finish_item();
                }
            }
            Event::End(TagEnd::List(_)) => {
                self.list_depth = self.list_depth.saturating_sub(1);
                if self.list_depth == 0 {
                    if let Some((ordered, items)) = self.list.take() {
                        if !items.is_empty() {
                            self.blocks.push(Block::List { ordered, items });
                        }
                    }
                }
            }
            Event::End(TagEnd::Item) => self.finish_item(),
            Event::Start(Tag::CodeBlock(kind)) => {
                self.split_list();
                let language = match kind {
                    CodeBlockKind::Fenced(info) if !info.trim().is_empty() => {
                        Some(info.trim().to_string())
                    }
                    _ => None,
                };
                self.code = Some((language, String::new()));
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some((language, code)) = self.code.take() {
                    self.blocks.push(Block::CodeBlock {
                        language,
                        code: code.trim_end_matches('\n').to_string(),
                    });
                }
            }
            Event::Start(Tag::Strong) => self.styles.push(Style::Strong),
            Event::Start(Tag::Emphasis) => self.styles.push(Style::Emphasis),
            Event::End(TagEnd::Strong) | Event::End(TagEnd::Emphasis) => {
                self.styles.pop();
            }
            Event::Start(Tag::Link { dest_url, .. }) => {
                self.link = Some((dest_url.to_string(), String::new()));
            }
            Event::End(TagEnd::Link) => {
                if let Some((href, text)) = self.link.take() {
                    self.separate_paragraphs();
                    self.spans.push(Span::Link { text, href });
                }
            }
            Event::Text(text) => self.push_text(&text),
            Event::Code(code) => {
                if let Some((_, text)) = self.link.as_mut() {
                    text.push_str(&code);
                } else {
                    self.separate_paragraphs();
                    self.spans.push(Span::Code {
                        text: code.to_string(),
                    });
                }
            }
            Event::SoftBreak | Event::HardBreak => self.push_text(" "),
            // raw HTML, rules, footnotes and the like are dropped
            _ => {}
        }
    }

    fn finish_item(&mut self) {
        self.paragraph_gap = false;
        if self.spans.is_empty() {
            return;
        }
        let spans = std::mem::take(&mut self.spans);
        if let Some((_, items)) = self.list.as_mut() {
            items.push(spans);
        }
    }

    /// Emits the items collected so far so a code block inside a list lands
    /// between them and the items that follow it.
    fn split_list(&mut self) {
        if self.list.is_none() {
            return;
        }
        self.finish_item();
        if let Some((ordered, items)) = self.list.as_mut() {
            if !items.is_empty() {
                let items = std::mem::take(items);
                self.blocks.push(Block::List {
                    ordered: *ordered,
                    items,
                });
            }
        }
    }

    fn separate_paragraphs(&mut self) {
        if std::mem::take(&mut self.paragraph_gap) && !self.spans.is_empty() {
            self.append_text(" ", None);
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some((_, code)) = self.code.as_mut() {
            code.push_str(text);
            return;
        }
        if let Some((_, link_text)) = self.link.as_mut() {
            link_text.push_str(text);
            return;
        }
        self.separate_paragraphs();
        let style = self.styles.last().copied();
        self.append_text(text, style);
    }

    fn append_text(&mut self, text: &str, style: Option<Style>) {
        match (self.spans.last_mut(), style) {
            (Some(Span::Text { text: last }), None)
            | (Some(Span::Strong { text: last }), Some(Style::Strong))
            | (Some(Span::Emphasis { text: last }), Some(Style::Emphasis)) => {
                last.push_str(text);
            }
            _ => {
                let text = text.to_string();
                self.spans.push(match style {
                    None => Span::Text { text },
                    Some(Style::Strong) => Span::Strong { text },
                    Some(Style::Emphasis) => Span::Emphasis { text },
                });
            }
        }
    }
}

/// Parses a Markdown body into typed blocks. Raw HTML is discarded.
pub fn parse_markdown(source: &str) -> Vec<Block> {
    let mut builder = BlockBuilder::default();
    for event in Parser::new(source) {
        builder.handle(event);
    }
    builder.blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Span {
        Span::Text {
            text: value.to_string(),
        }
    }

    #[test]
    fn parses_headings_paragraphs_and_inline_styles() {
        let blocks = parse_markdown(
            "## Title\n\nPlain **bold** and *soft* with `code` and [a link](https://x.dev).\n",
        );
        assert_eq!(
            blocks,
            vec![
                Block::Heading {
                    level: 2,
                    spans: vec![text("Title")],
                },
                Block::Paragraph {
                    spans: vec![
                        text("Plain "),
                        Span::Strong {
                            text: "bold".to_string()
                        },
                        text(" and "),
                        Span::Emphasis {
                            text: "soft".to_string()
                        },
                        text(" with "),
                        Span::Code {
                            text: "code".to_string()
                        },
                        text(" and "),
                        Span::Link {
                            text: "a link".to_string(),
                            href: "https://x.dev".to_string()
                        },
                        text("."),
                    ],
                },
            ]
        );
    }

    #[test]
    fn parses_lists_and_code_blocks() {
        let blocks = parse_markdown("1. one\n2. **two**\n\n```dart\nvoid main() {}\n```\n\n- a\n- b\n");
        assert_eq!(
            blocks,
            vec![
                Block::List {
                    ordered: true,
                    items: vec![
                        vec![text("one")],
                        vec![Span::Strong {
                            text: "two".to_string()
                        }],
                    ],
                },
                Block::CodeBlock {
                    language: Some("dart".to_string()),
                    code: "void main() {}".to_string(),
                },
                Block::List {
                    ordered: false,
                    items: vec![vec![text("a")], vec![text("b")]],
                },
            ]
        );
    }

    #[test]
    fn raw_html_never_survives() {
        let blocks = parse_markdown("<script>alert(1)</script>\n\nSafe <b>text</b> here\n");
        let json = serde_json::to_string(&blocks).unwrap();
        assert!(!json.contains("<script>"));
        assert!(!json.contains("<b>"));
        assert!(json.contains("Safe "));
    }

    #[test]
    fn nested_lists_are_flattened() {
        let blocks = parse_markdown("- outer\n  - inner\n- last\n");
        assert_eq!(
            blocks,
            vec![Block::List {
                ordered: false,
                items: vec![vec![text("outer")], vec![text("inner")], vec![text("last")]],
            }]
        );
    }

    #[test]
    fn loose_item_paragraphs_are_joined_with_a_space() {
        let blocks = parse_markdown("- first para\n\n  second para\n\n- next\n");
        assert_eq!(
            blocks,
            vec![Block::List {
                ordered: false,
                items: vec![vec![text("first para second para")], vec![text("next")]],
            }]
        );
    }

    #[test]
    fn code_inside_a_list_keeps_document_order() {
        let blocks = parse_markdown("1. step\n\n   ```dart\n   x();\n   ```\n2. two\n");
        assert_eq!(
            blocks,
            vec![
                Block::List {
                    ordered: true,
                    items: vec![vec![text("step")]],
                },
                Block::CodeBlock {
                    language: Some("dart".to_string()),
                    code: "x();".to_string(),
                },
                Block::List {
                    ordered: true,
                    items: vec![vec![text("two")]],
                },
            ]
        );
    }

    #[test]
    fn builtin_library_resolves_related_articles() {
        let library = Library::embedded().unwrap();
        let article = library.find("building-performant-flutter-apps").unwrap();
        assert_eq!(article.display_date, "May 15, 2023");
        assert_eq!(article.related.len(), 2);
        assert_eq!(article.related[0].slug, "state-management-flutter");
        assert!(matches!(article.content[0], Block::Paragraph { .. }));
    }

    #[test]
    fn unknown_slug_falls_back_to_default() {
        let library = Library::embedded().unwrap();
        let resolved = library.resolve("no-such-post");
        assert!(resolved.fallback);
        assert_eq!(resolved.article.slug, DEFAULT_ARTICLE);

        let exact = library.resolve("state-management-flutter");
        assert!(!exact.fallback);
        assert_eq!(exact.article.slug, "state-management-flutter");
    }

    #[test]
    fn summaries_are_newest_first_and_filter_by_tag() {
        let library = Library::embedded().unwrap();
        let all = library.summaries(None);
        assert_eq!(all.len(), 4);
        assert!(all.windows(2).all(|pair| pair[0].date >= pair[1].date));
        assert_eq!(all[0].slug, "state-management-flutter");

        let animations = library.summaries(Some("animations"));
        assert_eq!(animations.len(), 1);
        assert_eq!(animations[0].slug, "custom-animations-flutter");
    }

    #[test]
    fn missing_body_is_rejected() {
        let metas = serde_json::from_str::<Vec<ArticleMeta>>(EMBEDDED_ARTICLES).unwrap();
        let result = Library::from_sources(metas, &EMBEDDED_BODIES[..2], DEFAULT_ARTICLE);
        assert!(matches!(result, Err(FolioError::InvalidContent(_))));
    }
}
