//! Newspapers.com article clippings.

mod citation;
mod extract;
mod generalize;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use url::Url;

use super::{host_is, Site};

pub use citation::build_citation;
pub use extract::extract;
pub use generalize::generalize;

pub static SITE: Site = Site {
    id: "np",
    name: "Newspapers.com",
    extract_failed_message: "It looks like a Newspapers.com page but not an article page.",
    generalize_failed_message: "It looks like a Newspapers.com page but does not contain the required data.",
    data_style_key: "citation_np_dataStyle",
    matches_url,
    extract,
    generalize,
    build_citation,
};

fn matches_url(url: &Url) -> bool {
    host_is(url, "newspapers.com")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpRecord {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub newspaper: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Publication date as printed, e.g. "Fri, Jan 16, 1914".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clipped_by: Option<String>,
}
