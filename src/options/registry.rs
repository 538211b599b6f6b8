use super::values::*;
use super::OptionValue;

#[derive(Debug, Clone, Copy)]
pub struct OptionDef {
    pub key: &'static str,
    pub domain: &'static [&'static str],
    pub default: &'static str,
    pub description: &'static str,
}

const fn def<T: OptionValue>(
    key: &'static str,
    default: &'static str,
    description: &'static str,
) -> OptionDef {
    OptionDef {
        key,
        domain: T::DOMAIN,
        default,
        description,
    }
}

pub static REGISTRY: &[OptionDef] = &[
    def::<YesNo>(
        "citation_general_addBreaksWithinBody",
        YesNo::Yes.as_str(),
        "Put a line break between the source title and the rest of the citation",
    ),
    def::<AccessedDate>(
        "citation_general_addAccessedDate",
        AccessedDate::ParenAfterLink.as_str(),
        "Where to put the date the page was accessed",
    ),
    def::<DataStyle>(
        "citation_fmp_dataStyle",
        DataStyle::Text.as_str(),
        "FindMyPast: how record data is included",
    ),
    def::<DataStyle>(
        "citation_wikitree_dataStyle",
        DataStyle::Text.as_str(),
        "WikiTree: how profile data is included",
    ),
    def::<DataStyle>(
        "citation_np_dataStyle",
        DataStyle::Text.as_str(),
        "Newspapers.com: how article data is included",
    ),
    def::<NameOrPronoun>(
        "narrative_general_nameOrPronoun",
        NameOrPronoun::FirstName.as_str(),
        "How the person is named at the start of a narrative",
    ),
    def::<OccupationFormat>(
        "narrative_general_occupationFormat",
        OccupationFormat::AsIs.as_str(),
        "Capitalization of occupations in narratives",
    ),
    def::<DateFormat>(
        "narrative_general_dateFormat",
        DateFormat::Long.as_str(),
        "Month names in narrative dates",
    ),
    def::<SentenceStart>(
        "narrative_census_sentenceStart",
        SentenceStart::InTheCensus.as_str(),
        "Opening words of a census narrative",
    ),
    def::<WasPartFormat>(
        "narrative_census_wasPartFormat",
        WasPartFormat::WasLiving.as_str(),
        "Verb phrase of a census narrative",
    ),
    def::<AgeFormat>(
        "narrative_census_ageFormat",
        AgeFormat::ParensAge.as_str(),
        "How the age follows the name in a census narrative",
    ),
    def::<IncludePart>(
        "narrative_census_includeAge",
        IncludePart::InMainSentence.as_str(),
        "Whether and where a census narrative states the age",
    ),
    def::<OccupationPart>(
        "narrative_census_includeOccupation",
        OccupationPart::InMainSentence.as_str(),
        "Whether and where a census narrative states the occupation",
    ),
    def::<IncludePart>(
        "narrative_census_includeHousehold",
        IncludePart::InMainSentence.as_str(),
        "Whether and where a census narrative describes the household",
    ),
    def::<HouseholdPartFormat>(
        "narrative_census_householdPartFormat",
        HouseholdPartFormat::Relationship.as_str(),
        "Describe the household by relationship to the head or as family",
    ),
    def::<AgeFormat>(
        "narrative_marriage_ageFormat",
        AgeFormat::ParensAge.as_str(),
        "How the age follows the name in a marriage narrative",
    ),
    def::<IncludePart>(
        "narrative_marriage_includeAge",
        IncludePart::InMainSentence.as_str(),
        "Whether and where a marriage narrative states the age",
    ),
];

pub fn lookup(key: &str) -> Option<&'static OptionDef> {
    REGISTRY.iter().find(|def| def.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn defaults_are_in_domain() {
        for def in REGISTRY {
            assert!(def.domain.contains(&def.default), "{} default not in domain", def.key);
        }
    }

    #[test]
    fn keys_are_unique() {
        let keys: HashSet<_> = REGISTRY.iter().map(|d| d.key).collect();
        assert_eq!(keys.len(), REGISTRY.len());
    }

    #[test]
    fn lookup_known_and_unknown() {
        assert!(lookup("citation_np_dataStyle").is_some());
        assert!(lookup("citation_np_datastyle").is_none());
    }
}
