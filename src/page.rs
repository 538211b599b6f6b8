use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;

/// A captured source page: url, capture date, markdown content and any page
/// variables the capturing collaborator read from the live page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPageRecord {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured: Option<NaiveDate>,
    pub content: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, String>,
}

impl RawPageRecord {
    pub fn new(url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            captured: None,
            content: content.into(),
            variables: BTreeMap::new(),
        }
    }

    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables
            .get(name)
            .map(|v| v.as_str())
            .filter(|v| !v.trim().is_empty())
    }

    /// Parse a snapshot: a `---` delimited front matter of `key: value` lines
    /// (`url`, `captured`, `var.<name>`) followed by the markdown body.
    pub fn from_snapshot(text: &str) -> Result<Self, SnapshotError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut lines = text.lines();
        if lines.next().map(str::trim) != Some("---") {
            return Err(SnapshotError::MissingFrontMatter);
        }

        let mut url = None;
        let mut captured = None;
        let mut variables = BTreeMap::new();
        let mut closed = false;

        for line in lines.by_ref() {
            let line = line.trim();
            if line == "---" {
                closed = true;
                break;
            }
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, value) = line
                .split_once(':')
                .ok_or_else(|| SnapshotError::MalformedLine(line.to_string()))?;
            let (key, value) = (key.trim(), value.trim());
            match key {
                "url" => url = Some(value.to_string()),
                "captured" => {
                    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
                        .map_err(|_| SnapshotError::MalformedLine(line.to_string()))?;
                    captured = Some(date);
                }
                _ => match key.strip_prefix("var.") {
                    Some(name) if !name.is_empty() => {
                        variables.insert(name.to_string(), value.to_string());
                    }
                    _ => return Err(SnapshotError::MalformedLine(line.to_string())),
                },
            }
        }

        if !closed {
            return Err(SnapshotError::MissingFrontMatter);
        }
        let url = url.filter(|u| !u.is_empty()).ok_or(SnapshotError::MissingUrl)?;
        let content = lines.collect::<Vec<_>>().join("\n");

        Ok(Self {
            url,
            captured,
            content,
            variables,
        })
    }

    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_snapshot(&text)
    }
}
