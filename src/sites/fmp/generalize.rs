use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use tracing::debug;

use crate::error::GeneralizeFailure;
use crate::model::{
    Age, Collection, Event, EventDate, GeneralizedData, HouseholdMember, MaritalStatus, Parents, Person,
    PersonName, Place, RecordType, Relationship, Sex, SourceType, Spouse,
};
use crate::parser::sections::TextTable;
use crate::sites::IntermediateRecord;
use crate::text::clean_value;

use super::{FmpPageType, FmpRecord, SITE};

static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(1[0-9]{3}|20[0-9]{2})\b").unwrap());

/// Census nights for the UK censuses. Other censuses are dated by year.
const UK_CENSUS_NIGHTS: [(i32, u32, u32); 9] = [
    (1841, 6, 6),
    (1851, 3, 30),
    (1861, 4, 7),
    (1871, 4, 2),
    (1881, 4, 3),
    (1891, 4, 5),
    (1901, 3, 31),
    (1911, 4, 2),
    (1921, 6, 19),
];

const REGISTER_NIGHT: (i32, u32, u32) = (1939, 9, 29);

/// Collection-title keywords, checked in order. The first whole-word hit wins.
const TITLE_KEYWORDS: &[(&str, RecordType)] = &[
    ("1939 register", RecordType::Register),
    ("census", RecordType::Census),
    ("baptism", RecordType::Baptism),
    ("christening", RecordType::Baptism),
    ("burial", RecordType::Burial),
    ("memorial", RecordType::Memorial),
    ("monumental", RecordType::Memorial),
    ("probate", RecordType::Probate),
    ("calendar", RecordType::Probate),
    ("will", RecordType::Will),
    ("divorce", RecordType::Divorce),
    ("electoral", RecordType::ElectoralRegister),
    ("voter", RecordType::ElectoralRegister),
    ("teacher", RecordType::Employment),
    ("employment", RecordType::Employment),
    ("marriage", RecordType::Marriage),
    ("banns", RecordType::Marriage),
    ("birth", RecordType::Birth),
    ("death", RecordType::Death),
];

static TITLE_KEYWORD_RES: LazyLock<Vec<(Regex, RecordType)>> = LazyLock::new(|| {
    TITLE_KEYWORDS
        .iter()
        .map(|(keyword, record_type)| {
            let pattern = format!(r"(?i)\b{}(?:s|es)?\b", regex::escape(keyword));
            (Regex::new(&pattern).unwrap(), *record_type)
        })
        .collect()
});

/// Archive reference fields in citation order.
const REFERENCE_FIELDS: [&str; 10] = [
    "Reference",
    "Series",
    "Piece",
    "Folio",
    "Volume",
    "Page",
    "Schedule",
    "Enumeration district",
    "Entry number",
    "Registration number",
];

pub fn generalize(record: &IntermediateRecord) -> Result<GeneralizedData, GeneralizeFailure> {
    let IntermediateRecord::Fmp(record) = record else {
        return Err(SITE.generalize_failure());
    };
    let data = match record.page_type {
        FmpPageType::Person => person_profile(record)?,
        FmpPageType::Transcript | FmpPageType::Image => record_page(record)?,
    };
    debug!(url = %data.url, record_type = %data.record_type, "fmp record generalized");
    Ok(data)
}

fn record_page(record: &FmpRecord) -> Result<GeneralizedData, GeneralizeFailure> {
    let title = record.collection_title.clone().ok_or_else(|| SITE.generalize_failure())?;
    let record_type = record_type(&title, record);
    let source_type = match record.page_type {
        FmpPageType::Image => SourceType::Image,
        _ => SourceType::Record,
    };

    let mut data = GeneralizedData::new(SITE.id, &record.url, source_type, record_type);
    data.accessed = record.captured;
    data.collection = Some(Collection {
        year: collection_year(&title, record, record_type),
        id: record
            .record_id
            .as_deref()
            .and_then(|id| id.split('/').next())
            .and_then(clean_value),
        title,
    });
    data.relationship_to_head = record
        .field(&["Relationship", "Relationship to head", "Relation"])
        .and_then(Relationship::parse);
    data.person = person(record, record_type, data.relationship_to_head.as_ref());
    data.event = event(record, record_type, data.collection.as_ref());
    data.registration_district = record
        .field(&["Registration district", "District"])
        .and_then(clean_value);
    data.parents = parents(record);
    data.spouses = spouse(record).into_iter().collect();
    if let Some(table) = &record.household {
        data.household = household(table, &data.person);
    }
    data.source_reference = source_reference(record);

    if data.person.name.is_none() && source_type != SourceType::Image {
        return Err(SITE.generalize_failure());
    }
    Ok(data)
}

fn person_profile(record: &FmpRecord) -> Result<GeneralizedData, GeneralizeFailure> {
    let name = record
        .heading
        .as_deref()
        .and_then(PersonName::from_full)
        .ok_or_else(|| SITE.generalize_failure())?;

    let mut data = GeneralizedData::new(SITE.id, &record.url, SourceType::Profile, RecordType::PersonProfile);
    data.accessed = record.captured;
    data.collection = Some(Collection {
        title: "FindMyPast Family Tree".to_string(),
        year: None,
        id: None,
    });
    data.person = Person {
        name: Some(name),
        sex: record.field(&["Gender", "Sex"]).and_then(Sex::parse),
        occupation: record.field(&["Occupation"]).and_then(clean_value),
        birth: record.field(&["Birth", "Born"]).and_then(Event::parse),
        death: record.field(&["Death", "Died"]).and_then(Event::parse),
        ..Person::default()
    };
    data.parents = Parents {
        father: record.field(&["Father"]).and_then(PersonName::from_full),
        mother: record.field(&["Mother"]).and_then(PersonName::from_full),
    };
    if let Some(name) = record.field(&["Spouse"]).and_then(PersonName::from_full) {
        data.spouses.push(Spouse {
            name: Some(name),
            age: None,
            marriage: record.field(&["Marriage"]).and_then(Event::parse),
        });
    }
    Ok(data)
}

fn record_type(title: &str, record: &FmpRecord) -> RecordType {
    let lower = title.to_lowercase();
    let by_title = TITLE_KEYWORD_RES
        .iter()
        .find(|(re, _)| re.is_match(title))
        .map(|(_, record_type)| *record_type);

    let indexed = record.field(&["Quarter"]).is_some()
        || record.field(&["Registration district", "District"]).is_some()
        || lower.contains("index");
    match by_title {
        Some(RecordType::Birth) if indexed => RecordType::BirthRegistration,
        Some(RecordType::Death) if indexed => RecordType::DeathRegistration,
        Some(found) => found,
        None => record_type_from_fields(record),
    }
}

fn record_type_from_fields(record: &FmpRecord) -> RecordType {
    if record.field(&["Baptism date", "Christening date"]).is_some() {
        RecordType::Baptism
    } else if record.field(&["Burial date"]).is_some() {
        RecordType::Burial
    } else if record.field(&["Marriage date"]).is_some() {
        RecordType::Marriage
    } else if record.field(&["Death date", "Date of death"]).is_some() {
        RecordType::Death
    } else if record.field(&["Birth date", "Date of birth"]).is_some() {
        RecordType::Birth
    } else {
        RecordType::Unclassified
    }
}

fn parse_year(text: &str) -> Option<i32> {
    YEAR_RE.captures(text).and_then(|c| c[1].parse().ok())
}

fn collection_year(title: &str, record: &FmpRecord, record_type: RecordType) -> Option<i32> {
    let from_field = record.field(&["Year"]).and_then(parse_year);
    match record_type {
        RecordType::Census | RecordType::Register => parse_year(title).or(from_field),
        _ => from_field,
    }
}

fn is_us_census(title: &str, record: &FmpRecord) -> bool {
    let lower = title.to_lowercase();
    lower.contains("united states")
        || lower.contains("us census")
        || lower.contains("u.s.")
        || record
            .field(&["Country"])
            .is_some_and(|c| matches!(c.to_lowercase().as_str(), "united states" | "usa" | "us"))
}

fn census_date(year: i32, us: bool) -> Option<EventDate> {
    if !us {
        if let Some(&(_, month, day)) = UK_CENSUS_NIGHTS.iter().find(|(y, _, _)| *y == year) {
            return NaiveDate::from_ymd_opt(year, month, day).map(EventDate::from_date);
        }
    }
    EventDate::from_year(year)
}

fn quarter_number(text: &str) -> Option<u32> {
    let text = text.trim().to_lowercase();
    if let Ok(q) = text.trim_start_matches('q').parse::<u32>() {
        return (1..=4).contains(&q).then_some(q);
    }
    const QUARTERS: [(&str, u32); 8] = [
        ("jan", 1),
        ("mar", 1),
        ("apr", 2),
        ("jun", 2),
        ("jul", 3),
        ("sep", 3),
        ("oct", 4),
        ("dec", 4),
    ];
    QUARTERS.iter().find(|(m, _)| text.starts_with(m)).map(|(_, q)| *q)
}

fn date_keys(record_type: RecordType) -> &'static [&'static str] {
    match record_type {
        RecordType::Birth => &["Birth date", "Date of birth", "Birth year"],
        RecordType::BirthRegistration => &["Registration date", "Birth date", "Year"],
        RecordType::Baptism => &["Baptism date", "Christening date", "Baptism year"],
        RecordType::Marriage => &["Marriage date", "Banns date", "Marriage year"],
        RecordType::Death => &["Death date", "Date of death", "Death year"],
        RecordType::DeathRegistration => &["Registration date", "Death date", "Year"],
        RecordType::Burial => &["Burial date", "Burial year"],
        RecordType::Memorial => &["Death date", "Memorial date"],
        RecordType::Probate => &["Probate date", "Grant date", "Date of probate"],
        RecordType::Will => &["Will date", "Probate date"],
        _ => &[],
    }
}

fn place_keys(record_type: RecordType) -> &'static [&'static str] {
    match record_type {
        RecordType::Census => &["Parish", "Civil parish", "Town", "Place"],
        RecordType::Register => &["Town", "Borough", "Place"],
        RecordType::Birth => &["Birth place", "Place of birth", "Place"],
        RecordType::Baptism => &["Baptism place", "Church", "Parish", "Place"],
        RecordType::Marriage => &["Marriage place", "Church", "Parish", "Place"],
        RecordType::Death => &["Death place", "Place of death", "Place"],
        RecordType::Burial => &["Burial place", "Cemetery", "Parish", "Place"],
        RecordType::Probate | RecordType::Will => &["Registry", "Probate registry", "Place"],
        _ => &["Place", "Parish", "Town", "Residence"],
    }
}

fn event(record: &FmpRecord, record_type: RecordType, collection: Option<&Collection>) -> Option<Event> {
    let title = collection.map(|c| c.title.as_str()).unwrap_or_default();
    let year = collection.and_then(|c| c.year);

    let date = match record_type {
        RecordType::Census => year.and_then(|y| census_date(y, is_us_census(title, record))),
        RecordType::Register => {
            let (y, m, d) = REGISTER_NIGHT;
            NaiveDate::from_ymd_opt(y, m, d).map(EventDate::from_date)
        }
        RecordType::BirthRegistration | RecordType::DeathRegistration | RecordType::Marriage => {
            let quarter = record
                .field(&["Quarter"])
                .and_then(quarter_number)
                .zip(record.field(&["Year"]).and_then(parse_year))
                .and_then(|(q, y)| EventDate::from_quarter(y, q));
            quarter.or_else(|| record.field(date_keys(record_type)).and_then(EventDate::parse))
        }
        _ => record
            .field(date_keys(record_type))
            .or_else(|| record.field(&["Event date", "Date", "Year"]))
            .and_then(EventDate::parse),
    };

    let county = record.field(&["County"]);
    let state = record.field(&["State"]);
    let country = record.field(&["Country"]);
    let place = match record_type {
        // a district with no county is left to registration_district
        RecordType::BirthRegistration | RecordType::DeathRegistration => county.and_then(|county| {
            let district = record.field(&["Registration district", "District"])?;
            let parts: Vec<&str> = [Some(district), Some(county), country].into_iter().flatten().collect();
            Place::from_parts(&parts)
        }),
        _ => {
            let parts: Vec<&str> = [record.field(place_keys(record_type)), county, state, country]
                .into_iter()
                .flatten()
                .collect();
            Place::from_parts(&parts)
        }
    };

    Event::new(date, place)
}

fn person(record: &FmpRecord, record_type: RecordType, relationship: Option<&Relationship>) -> Person {
    let name = PersonName::new(
        record.field(&["First name(s)", "First name", "Forenames", "Given names"]),
        record.field(&["Last name", "Surname", "Family name"]),
    )
    // an image page's heading is the collection title
    .or_else(|| match record.page_type {
        FmpPageType::Image => None,
        _ => record.heading.as_deref().and_then(PersonName::from_full),
    });

    let age_keys: &[&str] = match record_type {
        RecordType::Death | RecordType::DeathRegistration | RecordType::Burial => &["Age at death", "Age"],
        RecordType::Marriage => &["Age at marriage", "Age"],
        _ => &["Age"],
    };

    let birth_place = record
        .field(&["Birth place", "Place of birth", "Birthplace"])
        .and_then(Place::normalize)
        .or_else(|| {
            let parts: Vec<&str> = ["Birth town", "Birth county", "Birth country"]
                .into_iter()
                .filter_map(|key| record.field(&[key]))
                .collect();
            Place::from_parts(&parts)
        });
    let birth_date = match record_type {
        RecordType::Birth => None,
        _ => record
            .field(&["Birth date", "Date of birth", "Birth year"])
            .and_then(EventDate::parse),
    };
    let death_date = match record_type {
        RecordType::Death | RecordType::DeathRegistration => None,
        _ => record.field(&["Death date", "Date of death"]).and_then(EventDate::parse),
    };

    Person {
        name,
        sex: record
            .field(&["Sex", "Gender"])
            .and_then(Sex::parse)
            .or_else(|| relationship.and_then(Sex::from_relationship)),
        age: record.field(age_keys).and_then(Age::parse),
        occupation: record.field(&["Occupation"]).and_then(clean_value),
        marital_status: record
            .field(&["Marital status", "Condition"])
            .and_then(MaritalStatus::parse),
        birth: Event::new(birth_date, birth_place),
        death: Event::new(death_date, None),
    }
}

fn parent_name(record: &FmpRecord, prefix: &str) -> Option<PersonName> {
    let first = format!("{prefix}'s first name(s)");
    let first_single = format!("{prefix}'s first name");
    let last = format!("{prefix}'s last name");
    let full = format!("{prefix}'s name");

    PersonName::new(
        record.field(&[first.as_str(), first_single.as_str()]),
        record.field(&[last.as_str()]),
    )
    .or_else(|| record.field(&[full.as_str(), prefix]).and_then(PersonName::from_full))
}

fn parents(record: &FmpRecord) -> Parents {
    Parents {
        father: parent_name(record, "Father"),
        mother: parent_name(record, "Mother"),
    }
}

fn spouse(record: &FmpRecord) -> Option<Spouse> {
    let name = parent_name(record, "Spouse").or_else(|| {
        PersonName::new(
            record.field(&["Spouse first name(s)", "Spouse first name"]),
            record.field(&["Spouse last name"]),
        )
    })?;
    Some(Spouse {
        name: Some(name),
        age: record.field(&["Spouse's age", "Spouse age"]).and_then(Age::parse),
        marriage: None,
    })
}

fn household(table: &TextTable, person: &Person) -> Vec<HouseholdMember> {
    let mut selected = false;
    table
        .rows
        .iter()
        .map(|row| {
            let cell = |headers: &[&str]| headers.iter().find_map(|h| table.cell(row, h));
            let relationship = cell(&["Relationship", "Relation"]).and_then(Relationship::parse);
            let mut member = HouseholdMember {
                name: PersonName::new(cell(&["First name(s)", "First name", "Forenames"]), cell(&["Last name", "Surname"]))
                    .or_else(|| cell(&["Name"]).and_then(PersonName::from_full)),
                marital_status: cell(&["Marital status", "Condition"]).and_then(MaritalStatus::parse),
                sex: cell(&["Sex", "Gender"])
                    .and_then(Sex::parse)
                    .or_else(|| relationship.as_ref().and_then(Sex::from_relationship)),
                age: cell(&["Age"]).and_then(Age::parse),
                occupation: cell(&["Occupation"]).and_then(clean_value),
                birth_place: cell(&["Birth place", "Birthplace"]).and_then(Place::normalize),
                relationship,
                is_selected: false,
            };
            if !selected && is_same_person(&member, person) {
                member.is_selected = true;
                selected = true;
            }
            member
        })
        .collect()
}

fn is_same_person(member: &HouseholdMember, person: &Person) -> bool {
    let same_name = match (&member.name, &person.name) {
        (Some(a), Some(b)) => a.full().eq_ignore_ascii_case(&b.full()),
        _ => false,
    };
    let same_age = match (member.age, person.age) {
        (Some(a), Some(b)) => a == b,
        _ => true,
    };
    same_name && same_age
}

fn source_reference(record: &FmpRecord) -> Option<String> {
    let parts: Vec<String> = REFERENCE_FIELDS
        .iter()
        .filter_map(|key| record.field(&[key]).map(|value| format!("{key} {value}")))
        .collect();
    (!parts.is_empty()).then(|| parts.join(", "))
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::*;
    use crate::model::{Country, DateValue};

    fn record(title: &str, fields: &[(&str, &str)]) -> FmpRecord {
        FmpRecord {
            url: "https://www.findmypast.co.uk/transcript?id=GBC/1901/0005222325".into(),
            captured: NaiveDate::from_ymd_opt(2024, 3, 2),
            page_type: FmpPageType::Transcript,
            record_id: Some("GBC/1901/0005222325".into()),
            heading: None,
            collection_title: Some(title.into()),
            record_data: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<IndexMap<_, _>>(),
            household: None,
        }
    }

    fn run(record: FmpRecord) -> GeneralizedData {
        generalize(&IntermediateRecord::Fmp(record)).unwrap()
    }

    #[test]
    fn census_uses_census_night() {
        let data = run(record(
            "1901 England, Wales & Scotland Census",
            &[
                ("First name(s)", "Charles"),
                ("Last name", "PAVEY"),
                ("Relationship", "Son"),
                ("Age", "14"),
                ("Parish", "Bideford"),
                ("County", "Devon"),
                ("Series", "RG13"),
                ("Piece", "2154"),
            ],
        ));
        assert_eq!(data.record_type, RecordType::Census);
        assert_eq!(data.event_date().unwrap().to_string(), "31 March 1901");
        assert_eq!(data.event_place().unwrap().to_string(), "Bideford, Devon, England");
        assert_eq!(data.full_name().as_deref(), Some("Charles Pavey"));
        assert_eq!(data.person.sex, Some(Sex::Male));
        assert_eq!(data.collection.as_ref().unwrap().id.as_deref(), Some("GBC"));
        assert_eq!(data.collection.as_ref().unwrap().year, Some(1901));
        assert_eq!(data.source_reference.as_deref(), Some("Series RG13, Piece 2154"));
        assert_eq!(data.accessed, NaiveDate::from_ymd_opt(2024, 3, 2));
    }

    #[test]
    fn birth_index_uses_quarter() {
        let data = run(record(
            "England & Wales Births 1837-2006",
            &[
                ("First name(s)", "Charles"),
                ("Last name", "Pavey"),
                ("Year", "1887"),
                ("Quarter", "Jan-Feb-Mar"),
                ("District", "Bideford"),
                ("Volume", "5b"),
                ("Page", "407"),
            ],
        ));
        assert_eq!(data.record_type, RecordType::BirthRegistration);
        assert_eq!(data.event_date().unwrap().value, DateValue::Quarter { year: 1887, quarter: 1 });
        assert_eq!(data.event_place(), None);
        assert_eq!(data.registration_district.as_deref(), Some("Bideford"));
        assert_eq!(data.source_reference.as_deref(), Some("Volume 5b, Page 407"));
    }

    #[test]
    fn scottish_baptism_place() {
        let data = run(record(
            "Scotland Births & Baptisms 1564-1950",
            &[
                ("First name(s)", "Margaret"),
                ("Last name", "Gow"),
                ("Baptism date", "24 Jul 1852"),
                ("Parish", "Dundee"),
                ("County", "Forfarshire"),
                ("Father's first name(s)", "James"),
                ("Father's last name", "Gow"),
            ],
        ));
        assert_eq!(data.record_type, RecordType::Baptism);
        let place = data.event_place().unwrap();
        assert!(place.is_in(Country::Scotland));
        assert_eq!(place.to_string(), "Dundee, Angus, Scotland");
        assert_eq!(data.parents.father.as_ref().unwrap().full(), "James Gow");
    }

    #[test]
    fn household_selects_the_record_person() {
        let mut rec = record(
            "1901 England, Wales & Scotland Census",
            &[("First name(s)", "Charles"), ("Last name", "Pavey"), ("Age", "14")],
        );
        rec.household = Some(TextTable {
            headers: vec![
                "First name(s)".into(),
                "Last name".into(),
                "Relationship".into(),
                "Sex".into(),
                "Age".into(),
            ],
            rows: vec![
                vec!["Mary".into(), "Pavey".into(), "Head".into(), "Female".into(), "45".into()],
                vec!["Charles".into(), "Pavey".into(), "Son".into(), "Male".into(), "14".into()],
            ],
        });
        let data = run(rec);
        assert_eq!(data.household.len(), 2);
        assert!(!data.household[0].is_selected);
        assert!(data.household[1].is_selected);
        assert_eq!(data.household[0].sex, Some(Sex::Female));
        assert_eq!(data.household[1].sex, Some(Sex::Male));
    }

    #[test]
    fn household_head_sex_comes_only_from_a_sex_column() {
        let mut rec = record(
            "1901 England, Wales & Scotland Census",
            &[("First name(s)", "Charles"), ("Last name", "Pavey"), ("Age", "14")],
        );
        rec.household = Some(TextTable {
            headers: vec!["First name(s)".into(), "Last name".into(), "Relationship".into(), "Age".into()],
            rows: vec![
                vec!["William".into(), "Pavey".into(), "Head".into(), "45".into()],
                vec!["Charles".into(), "Pavey".into(), "Son".into(), "14".into()],
            ],
        });
        let data = run(rec);
        assert_eq!(data.household[0].sex, None);
        assert_eq!(data.household[1].sex, Some(Sex::Male));
    }

    #[test]
    fn title_keywords_match_whole_words() {
        let rt = |title: &str| record_type(title, &record(title, &[]));
        assert_eq!(rt("Williamson Family Papers"), RecordType::Unclassified);
        assert_eq!(rt("Willesden Parish Baptisms"), RecordType::Baptism);
        assert_eq!(rt("Cheshire Wills 1492-1940"), RecordType::Will);
        assert_eq!(rt("England & Wales Government Probate Death Index 1858-2019"), RecordType::Probate);
        assert_eq!(rt("Leicestershire Marriages"), RecordType::Marriage);
        assert_eq!(rt("England & Wales Births 1837-2006"), RecordType::Birth);
    }

    #[test]
    fn us_census_is_dated_by_year_and_keeps_the_state() {
        let data = run(record(
            "United States Census 1860",
            &[
                ("First name(s)", "Betsey"),
                ("Last name", "Gardener"),
                ("Town", "Bangor"),
                ("County", "Penobscot"),
                ("State", "Maine"),
                ("Country", "United States"),
            ],
        ));
        assert_eq!(data.event_date().unwrap().value, DateValue::Year { year: 1860 });
        let place = data.event_place().unwrap();
        assert_eq!(place.text, "Bangor, Penobscot, Maine, United States");
        assert_eq!(place.county.as_deref(), Some("Maine"));
    }

    #[test]
    fn transcript_without_name_fails() {
        let err = generalize(&IntermediateRecord::Fmp(record("1901 Census", &[("Age", "14")]))).unwrap_err();
        assert_eq!(err.reason, SITE.generalize_failed_message);
    }

    #[test]
    fn image_needs_no_name() {
        let mut rec = record("1921 Census of England & Wales", &[("year", "1921"), ("county", "Yorkshire")]);
        rec.page_type = FmpPageType::Image;
        rec.heading = Some("1921 Census of England & Wales".into());
        let data = run(rec);
        assert_eq!(data.source_type, SourceType::Image);
        assert_eq!(data.person.name, None);
        assert_eq!(data.event_date().unwrap().to_string(), "19 June 1921");
        assert_eq!(data.event_place().unwrap().to_string(), "Yorkshire, England");
    }

    #[test]
    fn quarters() {
        assert_eq!(quarter_number("Q3"), Some(3));
        assert_eq!(quarter_number("Oct-Nov-Dec"), Some(4));
        assert_eq!(quarter_number("5"), None);
    }
}
