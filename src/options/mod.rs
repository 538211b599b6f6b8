//! Option-driven formatting engine.
//!
//! Every option is a named key with a closed string domain and a default. A
//! [`CitationOptions`] is the flat key → value map after validation: overrides
//! are checked against the registry when the set is built, so the typed views
//! handed to the builders ([`CitationStyle`], [`NarrativeOptions`]) can never
//! see an out-of-domain value.

mod registry;
mod values;

use std::collections::BTreeMap;

use tracing::debug;

pub use registry::{lookup, OptionDef, REGISTRY};
pub use values::*;

use crate::error::OptionValidationFailure;

/// An enumerated option value.
pub trait OptionValue: Sized + Copy + Default {
    const DOMAIN: &'static [&'static str];
    fn parse(value: &str) -> Option<Self>;
    fn as_str(self) -> &'static str;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationOptions {
    values: BTreeMap<&'static str, &'static str>,
}

impl Default for CitationOptions {
    fn default() -> Self {
        Self {
            values: REGISTRY.iter().map(|def| (def.key, def.default)).collect(),
        }
    }
}

impl CitationOptions {
    /// Defaults with `overrides` layered on top.
    pub fn resolve<K, V>(
        overrides: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self, OptionValidationFailure>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Self::default().with_overrides(overrides)
    }

    /// Layer `overrides` on this set. Unknown keys are ignored; a known key with a
    /// value outside its domain fails the whole set.
    pub fn with_overrides<K, V>(
        mut self,
        overrides: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self, OptionValidationFailure>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in overrides {
            let (key, value) = (key.as_ref(), value.as_ref());
            let Some(def) = registry::lookup(key) else {
                debug!(key, "ignoring unknown option key");
                continue;
            };
            let Some(accepted) = def.domain.iter().find(|d| **d == value) else {
                return Err(OptionValidationFailure::InvalidValue {
                    key: def.key.to_string(),
                    value: value.to_string(),
                    allowed: def.domain.join(", "),
                });
            };
            self.values.insert(def.key, accepted);
        }
        Ok(self)
    }

    pub fn value(&self, key: &str) -> Option<&'static str> {
        self.values.get(key).copied()
    }

    pub fn get<T: OptionValue>(&self, key: &str) -> T {
        self.value(key).and_then(T::parse).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }
}

/// Citation layout switches for one site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CitationStyle {
    pub data_style: DataStyle,
    pub add_breaks: bool,
    pub accessed_date: AccessedDate,
}

impl CitationStyle {
    pub fn for_site(options: &CitationOptions, data_style_key: &str) -> Self {
        Self {
            data_style: options.get(data_style_key),
            add_breaks: options.get::<YesNo>("citation_general_addBreaksWithinBody") == YesNo::Yes,
            accessed_date: options.get("citation_general_addAccessedDate"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CensusNarrativeOptions {
    pub sentence_start: SentenceStart,
    pub was_part: WasPartFormat,
    pub age_format: AgeFormat,
    pub include_age: IncludePart,
    pub include_occupation: OccupationPart,
    pub include_household: IncludePart,
    pub household_part: HouseholdPartFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarriageNarrativeOptions {
    pub age_format: AgeFormat,
    pub include_age: IncludePart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NarrativeOptions {
    pub name_or_pronoun: NameOrPronoun,
    pub occupation_format: OccupationFormat,
    pub date_format: DateFormat,
    pub census: CensusNarrativeOptions,
    pub marriage: MarriageNarrativeOptions,
}

impl From<&CitationOptions> for NarrativeOptions {
    fn from(options: &CitationOptions) -> Self {
        Self {
            name_or_pronoun: options.get("narrative_general_nameOrPronoun"),
            occupation_format: options.get("narrative_general_occupationFormat"),
            date_format: options.get("narrative_general_dateFormat"),
            census: CensusNarrativeOptions {
                sentence_start: options.get("narrative_census_sentenceStart"),
                was_part: options.get("narrative_census_wasPartFormat"),
                age_format: options.get("narrative_census_ageFormat"),
                include_age: options.get("narrative_census_includeAge"),
                include_occupation: options.get("narrative_census_includeOccupation"),
                include_household: options.get("narrative_census_includeHousehold"),
                household_part: options.get("narrative_census_householdPartFormat"),
            },
            marriage: MarriageNarrativeOptions {
                age_format: options.get("narrative_marriage_ageFormat"),
                include_age: options.get("narrative_marriage_includeAge"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_registry() {
        let options = CitationOptions::default();
        for def in REGISTRY {
            assert_eq!(options.value(def.key), Some(def.default));
        }
    }

    #[test]
    fn override_replaces_default() {
        let options =
            CitationOptions::resolve([("narrative_census_includeOccupation", "inSeparateSentence")])
                .unwrap();
        let narrative = NarrativeOptions::from(&options);
        assert_eq!(narrative.census.include_occupation, OccupationPart::InSeparateSentence);
        assert_eq!(narrative.census.include_household, IncludePart::InMainSentence);
    }

    #[test]
    fn out_of_domain_value_fails() {
        let err = CitationOptions::resolve([("narrative_census_includeOccupation", "maybe")])
            .unwrap_err();
        let OptionValidationFailure::InvalidValue { key, value, allowed } = err;
        assert_eq!(key, "narrative_census_includeOccupation");
        assert_eq!(value, "maybe");
        assert!(allowed.contains("inSeparateSentenceHead"));
    }

    #[test]
    fn unknown_key_is_ignored() {
        let options = CitationOptions::resolve([("narrative_future_option", "whatever")]).unwrap();
        assert_eq!(options, CitationOptions::default());
    }

    #[test]
    fn later_override_wins() {
        let options = CitationOptions::resolve([
            ("citation_fmp_dataStyle", "list"),
            ("citation_fmp_dataStyle", "table"),
        ])
        .unwrap();
        let style = CitationStyle::for_site(&options, "citation_fmp_dataStyle");
        assert_eq!(style.data_style, DataStyle::Table);
        assert!(style.add_breaks);
        assert_eq!(style.accessed_date, AccessedDate::ParenAfterLink);
    }

    #[test]
    fn invalid_value_after_valid_ones_still_fails() {
        let result = CitationOptions::resolve([
            ("citation_fmp_dataStyle", "list"),
            ("narrative_marriage_ageFormat", "inBrackets"),
        ]);
        assert!(result.is_err());
    }
}
