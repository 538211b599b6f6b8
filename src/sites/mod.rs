//! Site registry.
//!
//! Each supported site is a capability set: URL matcher, extractor,
//! generalizer and citation builder, plus the messages shown when a page of
//! that site cannot be used. Sites are found by id or by page URL.

pub mod fmp;
pub mod np;
pub mod wikitree;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::cite::{Citation, CitationInput};
use crate::error::{ExtractFailure, GeneralizeFailure};
use crate::model::GeneralizedData;
use crate::options::REGISTRY;
use crate::page::RawPageRecord;

/// The extractor's output, one variant per site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "site", rename_all = "snake_case")]
pub enum IntermediateRecord {
    Fmp(fmp::FmpRecord),
    Wikitree(wikitree::WikiTreeRecord),
    Np(np::NpRecord),
}

impl IntermediateRecord {
    pub fn site_id(&self) -> &'static str {
        match self {
            Self::Fmp(_) => fmp::SITE.id,
            Self::Wikitree(_) => wikitree::SITE.id,
            Self::Np(_) => np::SITE.id,
        }
    }
}

pub struct Site {
    pub id: &'static str,
    pub name: &'static str,
    pub extract_failed_message: &'static str,
    pub generalize_failed_message: &'static str,
    pub data_style_key: &'static str,
    pub matches_url: fn(&Url) -> bool,
    pub extract: fn(&RawPageRecord) -> Result<IntermediateRecord, ExtractFailure>,
    pub generalize: fn(&IntermediateRecord) -> Result<GeneralizedData, GeneralizeFailure>,
    pub build_citation: fn(&CitationInput) -> Citation,
}

impl Site {
    pub fn extract_failure(&self) -> ExtractFailure {
        ExtractFailure::new(self.id, self.extract_failed_message)
    }

    pub fn generalize_failure(&self) -> GeneralizeFailure {
        GeneralizeFailure::new(self.id, self.generalize_failed_message)
    }

    /// Option keys this site's builders read.
    pub fn option_keys(&self) -> Vec<&'static str> {
        REGISTRY
            .iter()
            .map(|def| def.key)
            .filter(|key| {
                key.starts_with("citation_general_")
                    || key.starts_with("narrative_")
                    || *key == self.data_style_key
            })
            .collect()
    }
}

impl std::fmt::Debug for Site {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Site").field("id", &self.id).finish()
    }
}

pub static SITES: &[&Site] = &[&fmp::SITE, &wikitree::SITE, &np::SITE];

pub fn lookup(id: &str) -> Option<&'static Site> {
    SITES.iter().copied().find(|site| site.id == id)
}

pub fn for_url(url: &str) -> Option<&'static Site> {
    let parsed = Url::parse(url).ok()?;
    SITES.iter().copied().find(|site| (site.matches_url)(&parsed))
}

/// True when `host` is `domain` or one of its subdomains.
pub(crate) fn host_is(url: &Url, domain: &str) -> bool {
    url.host_str().is_some_and(|host| {
        host == domain || host.strip_suffix(domain).is_some_and(|rest| rest.ends_with('.'))
    })
}

/// Value of the query parameter `name`, percent-decoded.
pub(crate) fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}
