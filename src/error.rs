use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The page belongs to a known site but is not a page type the site can read.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{reason}")]
pub struct ExtractFailure {
    pub site: String,
    pub reason: String,
}

impl ExtractFailure {
    pub fn new(site: &str, reason: impl Into<String>) -> Self {
        Self {
            site: site.to_string(),
            reason: reason.into(),
        }
    }
}

/// Required canonical fields could not be obtained from the extracted record.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{reason}")]
pub struct GeneralizeFailure {
    pub site: String,
    pub reason: String,
}

impl GeneralizeFailure {
    pub fn new(site: &str, reason: impl Into<String>) -> Self {
        Self {
            site: site.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionValidationFailure {
    #[error("option '{key}' does not accept '{value}' (allowed: {allowed})")]
    InvalidValue {
        key: String,
        value: String,
        allowed: String,
    },
}

/// Non-fatal: the household table is still built, with no row flagged as head.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableBuildAmbiguity {
    #[error("no row is marked as head of household")]
    NoHead,
    #[error("{0} rows are marked as head of household")]
    MultipleHeads(usize),
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot has no front matter block")]
    MissingFrontMatter,
    #[error("snapshot front matter has no url")]
    MissingUrl,
    #[error("malformed front matter line: {0}")]
    MalformedLine(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no registered site recognizes '{url}'")]
    UnrecognizedSite { url: String },
    #[error("unknown site id '{0}'")]
    UnknownSite(String),
    #[error(transparent)]
    Extract(#[from] ExtractFailure),
    #[error(transparent)]
    Generalize(#[from] GeneralizeFailure),
    #[error(transparent)]
    Options(#[from] OptionValidationFailure),
}
