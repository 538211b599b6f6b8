use crate::cite::data::{describe_record, record_fields};
use crate::cite::{assemble, Citation, CitationInput, CitationParts};
use crate::model::{GeneralizedData, SourceType};

use super::SITE;

pub fn build_citation(input: &CitationInput) -> Citation {
    let data = input.data;
    let title = match data.source_type {
        SourceType::Profile => "FindMyPast Family Tree".to_string(),
        _ => data
            .collection
            .as_ref()
            .map(|c| c.title.clone())
            .unwrap_or_else(|| SITE.name.to_string()),
    };
    let link_text = match data.source_type {
        SourceType::Image => "image",
        SourceType::Profile => "profile",
        _ => "transcription",
    };

    let parts = CitationParts {
        title,
        website: SITE.name,
        link_text: link_text.to_string(),
        data_string: describe_record(data).or_else(|| describe_image(data)),
        data_fields: record_fields(data),
        source_reference: data.source_reference.clone(),
    };
    assemble(input, SITE.data_style_key, parts)
}

/// Image pages name no person: describe the page by year and place.
fn describe_image(data: &GeneralizedData) -> Option<String> {
    if data.source_type != SourceType::Image {
        return None;
    }
    let year = data.event_year().map(|y| y.to_string());
    let place = data.event_place().map(|p| p.to_string());
    match (year, place) {
        (Some(year), Some(place)) => Some(format!("{} {} image, {}", year, data.record_type, place)),
        (Some(year), None) => Some(format!("{} {} image", year, data.record_type)),
        (None, Some(place)) => Some(format!("image, {}", place)),
        (None, None) => None,
    }
}
