use indexmap::IndexMap;
use tracing::debug;
use url::Url;

use crate::error::ExtractFailure;
use crate::page::RawPageRecord;
use crate::parser::blocks::strip_links;
use crate::parser::parse_page;
use crate::sites::{query_param, IntermediateRecord};
use crate::text::clean_value;

use super::{FmpPageType, FmpRecord, SITE};

/// Image page variables without which the image cannot be cited.
const REQUIRED_IMAGE_VARIABLES: [&str; 1] = ["collection"];

pub fn extract(page: &RawPageRecord) -> Result<IntermediateRecord, ExtractFailure> {
    let url = Url::parse(&page.url).map_err(|_| SITE.extract_failure())?;
    let page_type = page_type(&url).ok_or_else(|| SITE.extract_failure())?;
    debug!(url = %page.url, ?page_type, "fmp page type");

    let record = match page_type {
        FmpPageType::Transcript => transcript(page, &url)?,
        FmpPageType::Image => image(page, &url)?,
        FmpPageType::Person => person(page)?,
    };
    Ok(IntermediateRecord::Fmp(record))
}

fn page_type(url: &Url) -> Option<FmpPageType> {
    let host = url.host_str()?;
    if host.starts_with("tree.") {
        let on_profile = url.path().contains("/profile") || url.fragment().is_some_and(|f| f.contains("/profile"));
        return on_profile.then_some(FmpPageType::Person);
    }

    query_param(url, "id")?;
    let path = url.path();
    if path.starts_with("/transcript") {
        Some(FmpPageType::Transcript)
    } else if path.starts_with("/record") {
        match query_param(url, "parentid") {
            Some(_) => Some(FmpPageType::Image),
            None => Some(FmpPageType::Transcript),
        }
    } else {
        None
    }
}

fn new_record(page: &RawPageRecord, page_type: FmpPageType, record_id: Option<String>) -> FmpRecord {
    FmpRecord {
        url: page.url.clone(),
        captured: page.captured,
        page_type,
        record_id,
        heading: None,
        collection_title: None,
        record_data: IndexMap::new(),
        household: None,
    }
}

fn transcript(page: &RawPageRecord, url: &Url) -> Result<FmpRecord, ExtractFailure> {
    let parsed = parse_page(&page.content);
    let mut record = new_record(page, FmpPageType::Transcript, query_param(url, "id"));
    record.heading = parsed.title().and_then(clean_value);
    record.collection_title = parsed.headings(2).next().and_then(clean_value);

    for section in parsed.sections.iter().filter(|s| s.kind != "household_members") {
        for (key, value) in section.meta_fields() {
            record
                .record_data
                .entry(key.to_string())
                .or_insert_with(|| strip_links(value));
        }
    }
    record.household = parsed
        .section("household_members")
        .and_then(|s| s.tables().into_iter().next())
        .filter(|t| !t.is_empty());

    if record.collection_title.is_none() || record.record_data.is_empty() {
        return Err(SITE.extract_failure());
    }
    debug!(
        fields = record.record_data.len(),
        household = record.household.as_ref().map_or(0, |t| t.rows.len()),
        "fmp transcript extracted"
    );
    Ok(record)
}

fn image(page: &RawPageRecord, url: &Url) -> Result<FmpRecord, ExtractFailure> {
    let missing: Vec<&str> = REQUIRED_IMAGE_VARIABLES
        .into_iter()
        .filter(|name| page.variable(name).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(ExtractFailure::new(
            SITE.id,
            format!(
                "It looks like a FindMyPast image page but its page variables were not captured (missing: {}).",
                missing.join(", ")
            ),
        ));
    }

    let mut record = new_record(page, FmpPageType::Image, query_param(url, "parentid"));
    record.heading = parse_page(&page.content).title().and_then(clean_value);
    record.collection_title = page.variable("collection").and_then(clean_value);
    for (name, value) in &page.variables {
        if name == "collection" {
            continue;
        }
        if let Some(value) = clean_value(value) {
            record.record_data.insert(name.clone(), value);
        }
    }
    Ok(record)
}

fn person(page: &RawPageRecord) -> Result<FmpRecord, ExtractFailure> {
    let parsed = parse_page(&page.content);
    let mut record = new_record(page, FmpPageType::Person, None);
    record.heading = parsed.title().and_then(clean_value);
    for (key, value) in parsed.meta_fields() {
        record
            .record_data
            .entry(key.to_string())
            .or_insert_with(|| strip_links(value));
    }
    if record.heading.is_none() {
        return Err(SITE.extract_failure());
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmp(record: IntermediateRecord) -> FmpRecord {
        match record {
            IntermediateRecord::Fmp(r) => r,
            other => panic!("expected fmp record, got {:?}", other),
        }
    }

    #[test]
    fn page_types_from_url() {
        let kind = |u: &str| page_type(&Url::parse(u).unwrap());
        assert_eq!(kind("https://www.findmypast.co.uk/transcript?id=GBC/1901/0005222325"), Some(FmpPageType::Transcript));
        assert_eq!(kind("https://search.findmypast.co.uk/record?id=GBPRS/B/871892573/1"), Some(FmpPageType::Transcript));
        assert_eq!(
            kind("https://search.findmypast.co.uk/record?id=GBC%2F1921%2FRG15&parentid=GBC%2F1921%2FRG15%2F01"),
            Some(FmpPageType::Image)
        );
        assert_eq!(
            kind("https://tree.findmypast.co.uk/#/trees/918c5b61/1181964933/profile"),
            Some(FmpPageType::Person)
        );
        assert_eq!(kind("https://www.findmypast.co.uk/search/results?lastname=pavey"), None);
        assert_eq!(kind("https://www.findmypast.co.uk/transcript"), None);
    }

    #[test]
    fn transcript_fields_and_household() {
        let page = RawPageRecord::new(
            "https://www.findmypast.co.uk/transcript?id=GBC/1901/0005222325",
            "# Charles Pavey\n## 1901 England, Wales & Scotland Census\n### Transcription\nFirst name(s): Charles\nLast name: Pavey\nAge: 14\n### Household members\n| First name(s) | Last name | Relationship |\n| --- | --- | --- |\n| William | Pavey | Head |\n| Charles | Pavey | Son |",
        );
        let record = fmp(extract(&page).unwrap());
        assert_eq!(record.page_type, FmpPageType::Transcript);
        assert_eq!(record.record_id.as_deref(), Some("GBC/1901/0005222325"));
        assert_eq!(record.collection_title.as_deref(), Some("1901 England, Wales & Scotland Census"));
        assert_eq!(record.field(&["first name(s)"]), Some("Charles"));
        assert_eq!(record.record_data.keys().collect::<Vec<_>>(), ["First name(s)", "Last name", "Age"]);
        assert_eq!(record.household.unwrap().rows.len(), 2);
    }

    #[test]
    fn transcript_without_fields_is_wrong_page() {
        let page = RawPageRecord::new("https://www.findmypast.co.uk/transcript?id=X", "# Search results\nNothing here");
        let err = extract(&page).unwrap_err();
        assert_eq!(err.reason, SITE.extract_failed_message);
    }

    #[test]
    fn image_needs_page_variables() {
        let url = "https://search.findmypast.co.uk/record?id=A&parentid=B";
        let err = extract(&RawPageRecord::new(url, "")).unwrap_err();
        assert!(err.reason.contains("collection"));

        let mut page = RawPageRecord::new(url, "");
        page.variables.insert("collection".into(), "1921 Census of England & Wales".into());
        page.variables.insert("year".into(), "1921".into());
        let record = fmp(extract(&page).unwrap());
        assert_eq!(record.page_type, FmpPageType::Image);
        assert_eq!(record.field(&["Year"]), Some("1921"));
        assert_eq!(record.record_id.as_deref(), Some("B"));
    }
}
