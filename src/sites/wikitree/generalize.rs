use tracing::debug;

use crate::error::GeneralizeFailure;
use crate::model::{
    Collection, Event, EventDate, GeneralizedData, Parents, Person, PersonName, Place, RecordType, Sex,
    SourceType, Spouse,
};
use crate::sites::IntermediateRecord;

use super::{WikiTreeRecord, SITE};

fn event(date: Option<&str>, place: Option<&str>) -> Option<Event> {
    Event::new(date.and_then(EventDate::parse), place.and_then(Place::normalize))
}

fn forenames(record: &WikiTreeRecord) -> Option<String> {
    let parts: Vec<&str> = [record.first_name.as_deref(), record.middle_name.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    (!parts.is_empty()).then(|| parts.join(" "))
}

pub fn generalize(record: &IntermediateRecord) -> Result<GeneralizedData, GeneralizeFailure> {
    let IntermediateRecord::Wikitree(record) = record else {
        return Err(SITE.generalize_failure());
    };

    let name = PersonName::new(
        forenames(record).as_deref(),
        record
            .last_name_at_birth
            .as_deref()
            .or(record.current_last_name.as_deref()),
    )
    .ok_or_else(|| SITE.generalize_failure())?;

    let mut data = GeneralizedData::new(SITE.id, &record.url, SourceType::Profile, RecordType::PersonProfile);
    data.accessed = record.captured;
    data.collection = Some(Collection {
        title: SITE.name.to_string(),
        year: None,
        id: Some(record.wikitree_id.clone()),
    });
    data.person = Person {
        name: Some(name),
        sex: record.gender.as_deref().and_then(Sex::parse),
        birth: event(record.birth_date.as_deref(), record.birth_location.as_deref()),
        death: event(record.death_date.as_deref(), record.death_location.as_deref()),
        ..Person::default()
    };
    data.parents = Parents {
        father: record.father.as_deref().and_then(PersonName::from_full),
        mother: record.mother.as_deref().and_then(PersonName::from_full),
    };
    data.spouses = record
        .spouses
        .iter()
        .map(|s| Spouse {
            name: PersonName::from_full(&s.name),
            age: None,
            marriage: event(s.marriage_date.as_deref(), s.marriage_location.as_deref()),
        })
        .collect();

    debug!(id = %record.wikitree_id, view = ?record.view, "wikitree profile generalized");
    Ok(data)
}
