use serde::{Deserialize, Serialize};

use crate::text::{clean_value, normalize_name_case};

/// A person's name. At least one of the two parts is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forenames: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl PersonName {
    pub fn new(forenames: Option<&str>, last_name: Option<&str>) -> Option<Self> {
        let forenames = forenames.and_then(clean_value).map(|s| normalize_name_case(&s));
        let last_name = last_name.and_then(clean_value).map(|s| normalize_name_case(&s));
        if forenames.is_none() && last_name.is_none() {
            return None;
        }
        Some(Self { forenames, last_name })
    }

    /// "Charles William Pavey": the last word is the surname. A single word is
    /// taken as a forename.
    pub fn from_full(full: &str) -> Option<Self> {
        let full = clean_value(full)?;
        match full.rsplit_once(' ') {
            Some((forenames, last)) => Self::new(Some(forenames), Some(last)),
            None => Self::new(Some(&full), None),
        }
    }

    pub fn full(&self) -> String {
        [self.forenames.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// First forename, or the surname when no forenames were recorded.
    pub fn first_name(&self) -> String {
        self.forenames
            .as_deref()
            .and_then(|f| f.split_whitespace().next())
            .or(self.last_name.as_deref())
            .unwrap_or_default()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitals_normalized() {
        let name = PersonName::new(Some("CHARLES"), Some("PAVEY")).unwrap();
        assert_eq!(name.full(), "Charles Pavey");
    }

    #[test]
    fn from_full_splits_last_word() {
        let name = PersonName::from_full("Charles  William Pavey").unwrap();
        assert_eq!(name.forenames.as_deref(), Some("Charles William"));
        assert_eq!(name.last_name.as_deref(), Some("Pavey"));
        assert_eq!(name.first_name(), "Charles");
    }

    #[test]
    fn placeholders_are_absent() {
        assert_eq!(PersonName::new(Some("-"), Some("")), None);
        assert_eq!(PersonName::from_full("  "), None);
        let surname_only = PersonName::new(None, Some("Gow")).unwrap();
        assert_eq!(surname_only.first_name(), "Gow");
    }
}
