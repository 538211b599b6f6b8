use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;
use url::Url;

use crate::error::ExtractFailure;
use crate::page::RawPageRecord;
use crate::parser::blocks::strip_links;
use crate::parser::parse_page;
use crate::sites::IntermediateRecord;
use crate::text::clean_value;

use super::{NpRecord, SITE};

static SITE_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[-|]\s*Newspapers\.com.*$").unwrap());
static PAPER_LOCATION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.*?)\s*\(([^()]+)\)$").unwrap());
static PAGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^page\s+(\S+)$").unwrap());
static CLIPPED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^clipped by\s+(.+)$").unwrap());

fn is_article(url: &Url) -> bool {
    let path = url.path();
    path.starts_with("/article/") || path.starts_with("/clip/")
}

pub fn extract(page: &RawPageRecord) -> Result<IntermediateRecord, ExtractFailure> {
    let url = Url::parse(&page.url).map_err(|_| SITE.extract_failure())?;
    if !is_article(&url) {
        return Err(SITE.extract_failure());
    }
    let parsed = parse_page(&page.content);
    if !parsed.has_content() {
        return Err(SITE.extract_failure());
    }

    let mut record = NpRecord {
        url: page.url.clone(),
        captured: page.captured,
        title: parsed
            .title()
            .map(|t| SITE_SUFFIX_RE.replace(t, "").into_owned())
            .and_then(|t| clean_value(&t)),
        newspaper: None,
        location: None,
        date: None,
        page: None,
        clipped_by: parsed.meta("Clipped by").and_then(clean_value),
    };

    let texts = parsed.sections.iter().flat_map(|s| s.texts());
    for text in texts {
        if let Some(caps) = CLIPPED_RE.captures(text) {
            record.clipped_by = record.clipped_by.or_else(|| clean_value(&caps[1]));
        } else if text.contains('·') && record.newspaper.is_none() {
            publication_line(&mut record, text);
        }
    }

    let field = |key: &str| parsed.meta(key).map(strip_links).and_then(|v| clean_value(&v));
    record.newspaper = record.newspaper.or_else(|| field("Newspaper"));
    record.location = record.location.or_else(|| field("Location"));
    record.date = record.date.or_else(|| field("Date"));
    record.page = record.page.or_else(|| field("Page"));

    debug!(url = %record.url, newspaper = ?record.newspaper, date = ?record.date, "np article extracted");
    Ok(IntermediateRecord::Np(record))
}

/// "The Guardian (London, England) · Fri, Jan 16, 1914 · Page 5"
fn publication_line(record: &mut NpRecord, line: &str) {
    let mut parts = line.split('·').map(str::trim).filter(|p| !p.is_empty());
    if let Some(paper) = parts.next() {
        match PAPER_LOCATION_RE.captures(paper) {
            Some(caps) => {
                record.newspaper = clean_value(&caps[1]);
                record.location = clean_value(&caps[2]);
            }
            None => record.newspaper = clean_value(paper),
        }
    }
    for part in parts {
        match PAGE_RE.captures(part) {
            Some(caps) => record.page = clean_value(&caps[1]),
            None => record.date = clean_value(part),
        }
    }
}
