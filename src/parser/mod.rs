//! Markdown page parser shared by every site extractor.
//!
//! Captured pages arrive as markdown. The parser never interprets site
//! semantics: it classifies lines into [`blocks::Block`]s and clusters them into
//! [`sections::Section`]s keyed by heading, so extractors can ask for
//! "the `Key: Value` fields under this heading" or "the table under that one".

pub mod blocks;
pub mod sections;

use blocks::Block;
use sections::{Section, TextTable};

#[derive(Debug, Clone)]
pub struct ParsedPage {
    pub sections: Vec<Section>,
}

/// Two-pass parse: markdown → blocks → sections.
pub fn parse_page(markdown: &str) -> ParsedPage {
    let blocks = blocks::classify_lines(markdown);
    let sections = sections::cluster_sections(&blocks);
    ParsedPage { sections }
}

impl ParsedPage {
    /// Text of the first level-1 heading.
    pub fn title(&self) -> Option<&str> {
        self.headings(1).next()
    }

    pub fn headings(&self, level: u8) -> impl Iterator<Item = &str> {
        self.sections.iter().flat_map(move |s| {
            let own = s.title.as_deref().filter(|_| s.level == level);
            let inner = s.blocks.iter().filter_map(move |b| match b {
                Block::Heading { level: l, text } if *l == level => Some(text.as_str()),
                _ => None,
            });
            own.into_iter().chain(inner)
        })
    }

    pub fn section(&self, kind: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    /// First value for `key` anywhere on the page.
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.sections.iter().find_map(|s| s.meta(key))
    }

    /// All `Key: Value` fields in page order.
    pub fn meta_fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.sections.iter().flat_map(|s| s.meta_fields())
    }

    pub fn tables(&self) -> Vec<TextTable> {
        self.sections.iter().flat_map(|s| s.tables()).collect()
    }

    pub fn has_content(&self) -> bool {
        self.sections
            .iter()
            .flat_map(|s| &s.blocks)
            .any(|b| !matches!(b, Block::Empty))
            || self.sections.iter().any(|s| s.title.is_some())
    }
}
