//! FindMyPast: transcript pages, image pages and family-tree person pages.

mod citation;
mod extract;
mod generalize;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::parser::sections::TextTable;

use super::{host_is, Site};

pub use citation::build_citation;
pub use extract::extract;
pub use generalize::generalize;

pub static SITE: Site = Site {
    id: "fmp",
    name: "FindMyPast",
    extract_failed_message: "It looks like a FindMyPast page but not a transcript, image or person page.",
    generalize_failed_message: "It looks like a FindMyPast page but does not contain the required data.",
    data_style_key: "citation_fmp_dataStyle",
    matches_url,
    extract,
    generalize,
    build_citation,
};

const DOMAINS: [&str; 4] = ["findmypast.co.uk", "findmypast.com", "findmypast.ie", "findmypast.com.au"];

fn matches_url(url: &Url) -> bool {
    DOMAINS.iter().any(|d| host_is(url, d))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FmpPageType {
    Transcript,
    Image,
    Person,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FmpRecord {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured: Option<NaiveDate>,
    pub page_type: FmpPageType,
    /// Transcript id from the url, e.g. `GBC/1901/0005222325`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_title: Option<String>,
    /// Transcript fields in page order.
    pub record_data: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub household: Option<TextTable>,
}

impl FmpRecord {
    /// First non-empty value among `keys` (case-insensitive).
    pub fn field(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| {
            self.record_data
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v.trim())
                .filter(|v| !v.is_empty())
        })
    }
}
