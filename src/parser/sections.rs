use serde::{Deserialize, Serialize};

use super::blocks::Block;

#[derive(Debug, Clone)]
pub struct Section {
    pub kind: String,
    pub title: Option<String>,
    /// Heading level that opened the section, 0 for the page header.
    pub level: u8,
    pub blocks: Vec<Block>,
}

/// Rows of a markdown table, first row taken as the header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TextTable {
    /// Cell of `row` under `header` (case-insensitive). Empty cells count as absent.
    pub fn cell<'a>(&'a self, row: &'a [String], header: &str) -> Option<&'a str> {
        let idx = self
            .headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(header))?;
        row.get(idx).map(|c| c.as_str()).filter(|c| !c.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Section {
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.blocks.iter().find_map(|b| match b {
            Block::MetaField { key: k, value } if k.eq_ignore_ascii_case(key) => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn meta_fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.blocks.iter().filter_map(|b| match b {
            Block::MetaField { key, value } => Some((key.as_str(), value.as_str())),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Text(t) => Some(t.as_str()),
            _ => None,
        })
    }

    /// Group consecutive table rows into tables.
    pub fn tables(&self) -> Vec<TextTable> {
        let mut tables = Vec::new();
        let mut current: Vec<Vec<String>> = Vec::new();

        for block in &self.blocks {
            match block {
                Block::TableRow(cells) => current.push(cells.clone()),
                _ if !current.is_empty() => tables.push(to_table(std::mem::take(&mut current))),
                _ => {}
            }
        }
        if !current.is_empty() {
            tables.push(to_table(current));
        }

        tables
    }
}

fn to_table(mut rows: Vec<Vec<String>>) -> TextTable {
    let headers = rows.remove(0);
    TextTable { headers, rows }
}

/// Cluster a flat Vec<Block> into named sections. Level 2+ headings open a new
/// section; the page title (level 1) stays in "header".
pub fn cluster_sections(blocks: &[Block]) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    let mut current_blocks: Vec<Block> = Vec::new();
    let mut current_kind = "header".to_string();
    let mut current_title: Option<String> = None;
    let mut current_level = 0;

    for block in blocks {
        if let Some((new_kind, title, level)) = detect_transition(block) {
            if !current_blocks.is_empty() || current_title.is_some() {
                sections.push(Section {
                    kind: current_kind,
                    title: current_title.take(),
                    level: current_level,
                    blocks: std::mem::take(&mut current_blocks),
                });
            }
            current_kind = new_kind;
            current_title = Some(title);
            current_level = level;
            continue;
        }
        current_blocks.push(block.clone());
    }

    if !current_blocks.is_empty() || current_title.is_some() {
        sections.push(Section {
            kind: current_kind,
            title: current_title,
            level: current_level,
            blocks: current_blocks,
        });
    }

    sections
}

fn detect_transition(block: &Block) -> Option<(String, String, u8)> {
    match block {
        Block::Heading { level, text } if *level >= 2 => {
            Some((section_kind(text), text.clone(), *level))
        }
        _ => None,
    }
}

/// "Household members" → "household_members"
pub fn section_kind(title: &str) -> String {
    let mut kind = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            kind.push(c.to_ascii_lowercase());
        } else if !kind.ends_with('_') && !kind.is_empty() {
            kind.push('_');
        }
    }
    kind.trim_end_matches('_').to_string()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::blocks::classify_lines;

    fn section_kinds(md: &str) -> Vec<String> {
        let blocks = classify_lines(md);
        cluster_sections(&blocks).iter().map(|s| s.kind.clone()).collect()
    }

    #[test]
    fn headings_open_sections() {
        let md = "# Charles Pavey\n## England Census 1901\nAge: 14\n### Household members\n| Name |\n| --- |\n| Charles |";
        assert_eq!(
            section_kinds(md),
            vec!["header", "england_census_1901", "household_members"]
        );
    }

    #[test]
    fn title_heading_stays_in_header() {
        let blocks = classify_lines("# Alexander Gow (1858 - 1925)\nWikiTree ID: Gow-822");
        let sections = cluster_sections(&blocks);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].kind, "header");
        assert_eq!(sections[0].meta("wikitree id"), Some("Gow-822"));
    }

    #[test]
    fn section_title_kept() {
        let blocks = classify_lines("## Biography\nBorn in Perth.");
        let sections = cluster_sections(&blocks);
        assert_eq!(sections[0].title.as_deref(), Some("Biography"));
        assert_eq!(sections[0].texts().collect::<Vec<_>>(), vec!["Born in Perth."]);
    }

    #[test]
    fn tables_grouped_with_header() {
        let md = "## Household members\n| First name(s) | Age |\n| --- | --- |\n| William | 45 |\n| Charles | 14 |";
        let sections = cluster_sections(&classify_lines(md));
        let tables = sections[0].tables();
        assert_eq!(tables.len(), 1);
        let t = &tables[0];
        assert_eq!(t.rows.len(), 2);
        assert_eq!(t.cell(&t.rows[1], "age"), Some("14"));
        assert_eq!(t.cell(&t.rows[1], "occupation"), None);
    }

    #[test]
    fn section_kind_slug() {
        assert_eq!(section_kind("England, Wales & Scotland Census 1901"), "england_wales_scotland_census_1901");
        assert_eq!(section_kind("  Household members "), "household_members");
    }

    #[test]
    fn unknown_content_not_lost() {
        let blocks = classify_lines("Random paragraph\nthat matches nothing");
        let sections = cluster_sections(&blocks);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].blocks.len(), 2);
    }
}
