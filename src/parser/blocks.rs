use std::sync::LazyLock;

use regex::Regex;

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap());
static SINGLE_LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\[([^\]]*)\]\(([^)]+)\)$").unwrap());
static INLINE_LINKS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\(([^)]+)\)").unwrap());
static CLOSE_LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\]\(([^)]+)\)(.*)$").unwrap());
static META_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z][A-Za-z0-9 ()'/&.\-]{0,40}?):(?:\s+(.*)|)$").unwrap());
static SEPARATOR_CELL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^:?-{3,}:?$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, text: String },
    Link { text: String, url: String },
    MetaField { key: String, value: String },
    TableRow(Vec<String>),
    ListItem(String),
    Text(String),
    Empty,
}

pub fn classify_lines(markdown: &str) -> Vec<Block> {
    if markdown.trim().is_empty() {
        return vec![Block::Empty];
    }

    let lines: Vec<&str> = markdown.lines().collect();
    let mut blocks = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].trim();

        if line.is_empty() {
            blocks.push(Block::Empty);
            i += 1;
            continue;
        }

        // ── Table row: | a | b | c | (separator rows carry no data) ──
        if line.starts_with('|') {
            let cells = split_table_row(line);
            if !cells.iter().all(|c| SEPARATOR_CELL_RE.is_match(c)) {
                blocks.push(Block::TableRow(cells));
            }
            i += 1;
            continue;
        }

        // ── Multi-line link: "[" on its own line, text lines, then ](url) ──
        if line == "[" {
            i = consume_multiline_link(&lines, i, &mut blocks);
            continue;
        }

        // ── Stray ](url) left over from a broken link ──
        if line.starts_with("](") {
            if let Some(caps) = CLOSE_LINK_RE.captures(line) {
                emit_link("", &caps[1], &mut blocks);
                if caps[2].trim() == "[" {
                    i = consume_multiline_link(&lines, i + 1, &mut blocks);
                    continue;
                }
            }
            i += 1;
            continue;
        }

        // ── Heading: ### text ──
        if let Some(caps) = HEADING_RE.captures(line) {
            blocks.push(Block::Heading {
                level: caps[1].len() as u8,
                text: caps[2].trim().to_string(),
            });
            i += 1;
            continue;
        }

        // ── Single link on the line: [text](url) ──
        if let Some(caps) = SINGLE_LINK_RE.captures(line) {
            emit_link(&caps[1], &caps[2], &mut blocks);
            i += 1;
            continue;
        }

        // ── Meta field: Key: Value or Key: (empty value). Links stay in the value ──
        if let Some(caps) = META_RE.captures(line) {
            blocks.push(Block::MetaField {
                key: caps[1].trim().to_string(),
                value: caps.get(2).map(|m| m.as_str().trim()).unwrap_or("").to_string(),
            });
            i += 1;
            continue;
        }

        // ── List item ──
        if let Some(rest) = line.strip_prefix("* ").or_else(|| line.strip_prefix("- ")) {
            blocks.push(Block::ListItem(rest.trim().to_string()));
            i += 1;
            continue;
        }

        // ── Line with several inline links ──
        if line.contains("](") && line.contains('[') && !INLINE_LINKS_RE.replace_all(line, "").trim().is_empty() {
            blocks.push(Block::Text(strip_links(line)));
            i += 1;
            continue;
        }
        if line.contains("](") && line.contains('[') {
            for caps in INLINE_LINKS_RE.captures_iter(line) {
                emit_link(&caps[1], &caps[2], &mut blocks);
            }
            i += 1;
            continue;
        }

        // ── Plain text ──
        blocks.push(Block::Text(line.to_string()));
        i += 1;
    }

    blocks
}

/// Replace every inline `[text](url)` with its text.
pub fn strip_links(value: &str) -> String {
    INLINE_LINKS_RE.replace_all(value, "$1").trim().to_string()
}

fn split_table_row(line: &str) -> Vec<String> {
    let inner = line.trim().trim_start_matches('|').trim_end_matches('|');
    inner.split('|').map(|c| c.trim().to_string()).collect()
}

/// Consume a multi-line link starting at `start` (a "[" line or the line after a
/// trailing "["). Reads text lines until ](url). Returns the next line to process.
fn consume_multiline_link(lines: &[&str], start: usize, blocks: &mut Vec<Block>) -> usize {
    let mut text_parts = Vec::new();
    let mut j = start;

    if j < lines.len() && lines[j].trim() == "[" {
        j += 1;
    }

    while j < lines.len() {
        let l = lines[j].trim();
        if let Some(url_part) = l.strip_prefix("](") {
            let url = match url_part.find(')') {
                Some(end) => &url_part[..end],
                None => url_part.trim_end_matches(')'),
            };
            emit_link(&text_parts.join(" "), url, blocks);
            return j + 1;
        }
        text_parts.push(l);
        j += 1;
    }

    // Never found the closing part, keep the text
    for part in text_parts {
        blocks.push(Block::Text(part.to_string()));
    }
    j
}

fn emit_link(text: &str, url: &str, blocks: &mut Vec<Block>) {
    blocks.push(Block::Link {
        text: text.trim().to_string(),
        url: url.trim().to_string(),
    });
}
