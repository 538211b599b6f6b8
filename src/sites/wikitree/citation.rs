use crate::cite::data::{describe_record, record_fields};
use crate::cite::{assemble, Citation, CitationInput, CitationParts};
use crate::model::GeneralizedData;

use super::SITE;

/// "Margaret Gow (1852-1931)"
fn profile_title(data: &GeneralizedData) -> String {
    let name = data.full_name().unwrap_or_else(|| "Unknown".to_string());
    let birth = data.person.birth.as_ref().and_then(|e| e.year());
    let death = data.person.death.as_ref().and_then(|e| e.year());
    match (birth, death) {
        (None, None) => name,
        (birth, death) => format!(
            "{} ({}-{})",
            name,
            birth.map(|y| y.to_string()).unwrap_or_default(),
            death.map(|y| y.to_string()).unwrap_or_default()
        ),
    }
}

pub fn build_citation(input: &CitationInput) -> Citation {
    let data = input.data;
    let link_text = data
        .collection
        .as_ref()
        .and_then(|c| c.id.clone())
        .unwrap_or_else(|| "profile".to_string());
    let parts = CitationParts {
        title: profile_title(data),
        website: SITE.name,
        link_text,
        data_string: describe_record(data),
        data_fields: record_fields(data),
        source_reference: None,
    };
    assemble(input, SITE.data_style_key, parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cite::CitationType;
    use crate::model::{Collection, Event, EventDate, PersonName, RecordType, SourceType};
    use crate::options::CitationOptions;

    #[test]
    fn profile_citation() {
        let mut data = GeneralizedData::new(
            "wikitree",
            "https://www.wikitree.com/wiki/Pavey-451",
            SourceType::Profile,
            RecordType::PersonProfile,
        );
        data.person.name = PersonName::from_full("Mary Pavey");
        data.person.birth = Event::new(EventDate::parse("1851"), None);
        data.collection = Some(Collection {
            title: "WikiTree".into(),
            year: None,
            id: Some("Pavey-451".into()),
        });
        let options = CitationOptions::resolve([("citation_wikitree_dataStyle", "none")]).unwrap();
        let citation = build_citation(&CitationInput {
            data: &data,
            options: &options,
            table: None,
            citation_type: CitationType::Inline,
        });
        assert_eq!(
            citation.text,
            "<ref>'''Mary Pavey (1851-)'''<br/> ''WikiTree'' [https://www.wikitree.com/wiki/Pavey-451 Pavey-451]</ref>"
        );
    }
}
