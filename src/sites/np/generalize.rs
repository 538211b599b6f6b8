use tracing::debug;

use crate::error::GeneralizeFailure;
use crate::model::{Article, Collection, Event, EventDate, GeneralizedData, Place, RecordType, SourceType};
use crate::sites::IntermediateRecord;

use super::SITE;

pub fn generalize(record: &IntermediateRecord) -> Result<GeneralizedData, GeneralizeFailure> {
    let IntermediateRecord::Np(record) = record else {
        return Err(SITE.generalize_failure());
    };
    let newspaper = record.newspaper.clone().ok_or_else(|| SITE.generalize_failure())?;
    let published = record
        .date
        .as_deref()
        .and_then(EventDate::parse)
        .ok_or_else(|| SITE.generalize_failure())?;
    let location = record.location.as_deref().and_then(Place::normalize);

    let mut data = GeneralizedData::new(SITE.id, &record.url, SourceType::Article, RecordType::Newspaper);
    data.accessed = record.captured;
    data.collection = Some(Collection {
        title: newspaper.clone(),
        year: Some(published.year()),
        id: None,
    });
    data.event = Event::new(Some(published), location.clone());
    data.article = Some(Article {
        newspaper,
        title: record.title.clone(),
        page: record.page.clone(),
        location,
        published,
    });
    debug!(url = %data.url, "np article generalized");
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sites::np::NpRecord;

    fn record() -> NpRecord {
        NpRecord {
            url: "https://www.newspapers.com/article/the-guardian-pavey-wedding/12345678/".into(),
            captured: None,
            title: Some("Pavey wedding".into()),
            newspaper: Some("The Guardian".into()),
            location: Some("London, Greater London, England".into()),
            date: Some("Fri, Jan 16, 1914".into()),
            page: Some("5".into()),
            clipped_by: None,
        }
    }

    #[test]
    fn article_fields() {
        let data = generalize(&IntermediateRecord::Np(record())).unwrap();
        let article = data.article.as_ref().unwrap();
        assert_eq!(article.published.to_string(), "16 January 1914");
        assert_eq!(data.record_type, RecordType::Newspaper);
        assert_eq!(data.event_year(), Some(1914));
    }

    #[test]
    fn missing_date_fails() {
        let mut rec = record();
        rec.date = None;
        let err = generalize(&IntermediateRecord::Np(rec)).unwrap_err();
        assert_eq!(err.reason, "It looks like a Newspapers.com page but does not contain the required data.");

        let mut rec = record();
        rec.date = Some("sometime".into());
        assert!(generalize(&IntermediateRecord::Np(rec)).is_err());
    }
}
