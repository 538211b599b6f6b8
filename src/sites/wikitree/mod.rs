//! WikiTree person profiles: read pages (including the private and logged-out
//! views) and the profile edit page.

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
    id: "wikitree",
    name: "WikiTree",
    extract_failed_message: "It looks like a WikiTree page but not a person profile page.",
    generalize_failed_message: "It looks like a WikiTree page but does not contain the required data.",
    data_style_key: "citation_wikitree_dataStyle",
    matches_url,
    extract,
    generalize,
    build_citation,
};

fn matches_url(url: &Url) -> bool {
    host_is(url, "wikitree.com")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WikiTreeView {
    Read,
    Private,
    LoggedOut,
    Edit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WikiTreeSpouse {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marriage_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marriage_location: Option<String>,
}

/// Profile fields as shown on the page. Dates and places stay as text until
/// generalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WikiTreeRecord {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured: Option<NaiveDate>,
    pub view: WikiTreeView,
    pub wikitree_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name_at_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mother: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub spouses: Vec<WikiTreeSpouse>,
}
