//! Narrative sentences: "In the 1901 census Charles (14) was living in the
//! household of his father William Pavey in Bideford, Devon, England."
//!
//! Census narratives are assembled from fragments (age, occupation, household)
//! and each fragment is placed in the main sentence, in its own sentence, or
//! left out according to the narrative options.

use crate::model::{Age, GeneralizedData, RecordType, Relationship, Sex};
use crate::options::{
    AgeFormat, HouseholdPartFormat, IncludePart, NameOrPronoun, NarrativeOptions, OccupationFormat,
    OccupationPart, SentenceStart, WasPartFormat,
};
use crate::table::{build_table, HouseholdTable};
use crate::text::{capitalize_first, indefinite_article, join_and, possessive, title_case};

/// How the narrative refers to its person.
struct Subject {
    name: String,
    sex: Option<Sex>,
}

impl Subject {
    fn new(data: &GeneralizedData, options: &NarrativeOptions) -> Self {
        let name = data
            .person
            .name
            .as_ref()
            .map(|n| match options.name_or_pronoun {
                NameOrPronoun::FirstName => n.first_name(),
                NameOrPronoun::FullName => n.full(),
            })
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "This person".to_string());
        let sex = data
            .person
            .sex
            .or_else(|| data.relationship_to_head.as_ref().and_then(Sex::from_relationship));
        Self { name, sex }
    }

    /// "He" / "She", or the name when the sex is unknown.
    fn he(&self) -> String {
        match self.sex {
            Some(Sex::Male) => "He".into(),
            Some(Sex::Female) => "She".into(),
            None => self.name.clone(),
        }
    }

    fn his(&self) -> String {
        match self.sex {
            Some(Sex::Male) => "his".into(),
            Some(Sex::Female) => "her".into(),
            None => possessive(&self.name),
        }
    }
}

pub fn build(data: &GeneralizedData, options: &NarrativeOptions, table: Option<&HouseholdTable>) -> String {
    let subject = Subject::new(data, options);
    match data.record_type {
        RecordType::Census | RecordType::Register => census(data, options, table, &subject),
        RecordType::Marriage => marriage(data, options, &subject),
        _ => event(data, options, &subject),
    }
}

fn with_age(name: &str, age: Age, format: AgeFormat) -> String {
    match format {
        AgeFormat::ParensAge => format!("{} ({})", name, age),
        AgeFormat::CommasAge => format!("{}, age {},", name, age),
        AgeFormat::PlainAge => format!("{} age {}", name, age),
        AgeFormat::PlainAged => format!("{} aged {}", name, age),
    }
}

fn age_sentence(subject: &Subject, age: Age) -> String {
    match age {
        Age::Years(1) => format!("{} was 1 year old.", subject.he()),
        Age::Years(years) => format!("{} was {} years old.", subject.he(), years),
        Age::Months(_) => format!("{} was {} old.", subject.he(), age),
    }
}

fn format_occupation(occupation: &str, format: OccupationFormat) -> String {
    match format {
        OccupationFormat::AsIs => occupation.to_string(),
        OccupationFormat::LowerCase => occupation.to_lowercase(),
        OccupationFormat::TitleCase => title_case(occupation),
    }
}

fn census(
    data: &GeneralizedData,
    options: &NarrativeOptions,
    table: Option<&HouseholdTable>,
    subject: &Subject,
) -> String {
    let c = &options.census;
    let built;
    let table = match table {
        Some(table) => table,
        None => {
            built = build_table(std::slice::from_ref(data), data.record_type);
            &built
        }
    };

    let label = if data.record_type == RecordType::Register { "register" } else { "census" };
    let start = match (c.sentence_start, data.event_year()) {
        (SentenceStart::InTheCensus, Some(year)) => format!("In the {} {}", year, label),
        (SentenceStart::InYear, Some(year)) => format!("In {}", year),
        (_, None) => format!("In the {}", label),
    };

    let relationship = data
        .relationship_to_head
        .clone()
        .or_else(|| table.selected_row().and_then(|r| r.member.relationship.clone()));
    let has_household = table.rows.len() > 1;
    let is_head = relationship.as_ref().is_some_and(Relationship::is_head);
    let household = has_household
        .then(|| household_phrase(table, relationship.as_ref(), is_head, c.household_part, subject))
        .flatten();

    let occupation = data
        .person
        .occupation
        .as_deref()
        .map(|o| format_occupation(o, options.occupation_format));
    let occupation_placement = match c.include_occupation {
        OccupationPart::InMainSentence => IncludePart::InMainSentence,
        OccupationPart::InSeparateSentence => IncludePart::InSeparateSentence,
        OccupationPart::InSeparateSentenceHead if is_head || !has_household => IncludePart::InSeparateSentence,
        OccupationPart::InSeparateSentenceHead | OccupationPart::No => IncludePart::No,
    };

    let mut person = subject.name.clone();
    if let (IncludePart::InMainSentence, Some(age)) = (c.include_age, data.person.age) {
        person = with_age(&person, age, c.age_format);
    }
    if let (IncludePart::InMainSentence, Some(occupation)) = (occupation_placement, &occupation) {
        let sep = if person.ends_with(',') { " " } else { ", " };
        person = format!("{}{}{} {},", person, sep, indefinite_article(occupation), occupation);
    }

    let place = data.event_place().map(|p| format!("in {}", p));
    let main_household = household.as_ref().filter(|_| c.include_household == IncludePart::InMainSentence);
    let verb = match c.was_part {
        WasPartFormat::WasLiving if main_household.is_some() || place.is_some() => "was living",
        _ => "was enumerated",
    };

    let mut sentence = format!("{} {} {}", start, person, verb);
    for part in [main_household.cloned(), place].into_iter().flatten() {
        sentence.push(' ');
        sentence.push_str(&part);
    }
    sentence.push('.');

    let mut sentences = vec![sentence];
    if let (IncludePart::InSeparateSentence, Some(age)) = (c.include_age, data.person.age) {
        sentences.push(age_sentence(subject, age));
    }
    if let (IncludePart::InSeparateSentence, Some(household)) = (c.include_household, &household) {
        sentences.push(format!("{} was living {}.", subject.he(), household));
    }
    if let (IncludePart::InSeparateSentence, Some(occupation)) = (occupation_placement, &occupation) {
        sentences.push(format!("{} occupation was {}.", capitalize_first(&subject.his()), occupation));
    }
    sentences.join(" ")
}

fn household_phrase(
    table: &HouseholdTable,
    relationship: Option<&Relationship>,
    is_head: bool,
    format: HouseholdPartFormat,
    subject: &Subject,
) -> Option<String> {
    if format == HouseholdPartFormat::WithFamily {
        return Some(format!("with {} family", subject.his()));
    }
    if is_head {
        return Some("as head of the household".to_string());
    }
    let head_row = table.head_row()?;
    let head = head_row.member.name.as_ref()?.full();
    let phrase = match relationship {
        Some(rel) => match Relationship::Head.relative_to(head_row.member.sex, rel) {
            Some(word) => format!("in the household of {} {} {}", subject.his(), word, head),
            None if matches!(rel, Relationship::Son | Relationship::Daughter) => {
                format!("in the household of {}", head)
            }
            None => {
                let label = rel.label();
                format!("as {} {} in the household of {}", indefinite_article(label), label, head)
            }
        },
        None => format!("in the household of {}", head),
    };
    Some(phrase)
}

fn marriage(data: &GeneralizedData, options: &NarrativeOptions, subject: &Subject) -> String {
    let m = &options.marriage;
    let age_main = m.include_age == IncludePart::InMainSentence;

    let mut person = subject.name.clone();
    if let (true, Some(age)) = (age_main, data.person.age) {
        person = with_age(&person, age, m.age_format);
    }

    let spouse = data.spouses.first();
    let mut sentence = match spouse.and_then(|s| s.name.as_ref()) {
        Some(name) => {
            let mut spouse_part = name.full();
            if let (true, Some(age)) = (age_main, spouse.and_then(|s| s.age)) {
                spouse_part = with_age(&spouse_part, age, m.age_format);
            }
            format!("{} married {}", person, spouse_part)
        }
        None => format!("{} was married", person),
    };

    let marriage_event = spouse.and_then(|s| s.marriage.as_ref()).or(data.event.as_ref());
    if let Some(date) = marriage_event.and_then(|e| e.date.as_ref()) {
        sentence.push(' ');
        sentence.push_str(&date.phrase(options.date_format));
    }
    if let Some(place) = marriage_event.and_then(|e| e.place.as_ref()) {
        sentence.push_str(&format!(" in {}", place));
    }
    let mut sentence = sentence.trim_end_matches(',').to_string();
    sentence.push('.');

    if let (IncludePart::InSeparateSentence, Some(age)) = (m.include_age, data.person.age) {
        sentence.push(' ');
        sentence.push_str(&age_sentence(subject, age));
    }
    sentence
}

/// Single-event records: births, baptisms, deaths, burials, probate...
fn event(data: &GeneralizedData, options: &NarrativeOptions, subject: &Subject) -> String {
    let name = &subject.name;
    let date = data.event_date().map(|d| d.phrase(options.date_format));
    let place = data
        .event_place()
        .map(|p| format!("in {}", p))
        .or_else(|| data.registration_district.as_ref().map(|d| format!("in the {} district", d)));

    let opening = match data.record_type {
        RecordType::Birth => format!("{} was born", name),
        RecordType::BirthRegistration => format!("{} birth was registered", possessive(name)),
        RecordType::Baptism => format!("{} was baptised", name),
        RecordType::Death => format!("{} died", name),
        RecordType::DeathRegistration => format!("{} death was registered", possessive(name)),
        RecordType::Burial => format!("{} was buried", name),
        RecordType::Memorial => format!("{} was commemorated on a memorial", name),
        RecordType::Probate => format!("Probate was granted for {}", name),
        RecordType::Will => format!("{} will was proved", possessive(name)),
        RecordType::Divorce => format!("{} was divorced", name),
        RecordType::ElectoralRegister => format!("{} was on the electoral register", name),
        RecordType::Employment => match &data.person.occupation {
            Some(occupation) => {
                let occupation = format_occupation(occupation, options.occupation_format);
                format!("{} was employed as {} {}", name, indefinite_article(&occupation), occupation)
            }
            None => format!("{} was employed", name),
        },
        RecordType::Newspaper => return newspaper(data, options),
        RecordType::PersonProfile => return profile(data, options, subject),
        _ => {
            let title = data.collection.as_ref().map(|c| c.title.as_str()).unwrap_or("a record");
            format!("{} was recorded in {}", name, title)
        }
    };

    let mut sentence = opening;
    for part in [date, place].into_iter().flatten() {
        sentence.push(' ');
        sentence.push_str(&part);
    }
    sentence.push('.');

    let parents: Vec<String> = [&data.parents.father, &data.parents.mother]
        .into_iter()
        .flatten()
        .map(|n| n.full())
        .collect();
    if matches!(data.record_type, RecordType::Birth | RecordType::Baptism) && !parents.is_empty() {
        let noun = if parents.len() == 1 { "parent was" } else { "parents were" };
        sentence.push_str(&format!(
            " {} {} {}.",
            capitalize_first(&subject.his()),
            noun,
            join_and(&parents)
        ));
    }
    sentence
}

fn newspaper(data: &GeneralizedData, options: &NarrativeOptions) -> String {
    let Some(article) = &data.article else {
        return "An article was published.".to_string();
    };
    let mut sentence = match &article.title {
        Some(title) => format!("An article titled \"{}\" was published in {}", title, article.newspaper),
        None => format!("An article was published in {}", article.newspaper),
    };
    sentence.push(' ');
    sentence.push_str(&article.published.phrase(options.date_format));
    sentence.push('.');
    sentence
}

fn profile(data: &GeneralizedData, options: &NarrativeOptions, subject: &Subject) -> String {
    let describe = |verb: &str, event: &crate::model::Event| {
        let mut part = verb.to_string();
        if let Some(date) = &event.date {
            part.push(' ');
            part.push_str(&date.phrase(options.date_format));
        }
        if let Some(place) = &event.place {
            part.push_str(&format!(" in {}", place));
        }
        part
    };
    let parts: Vec<String> = [
        data.person.birth.as_ref().map(|e| describe("was born", e)),
        data.person.death.as_ref().map(|e| describe("died", e)),
    ]
    .into_iter()
    .flatten()
    .collect();

    if parts.is_empty() {
        format!("{} has a profile.", subject.name)
    } else {
        format!("{} {}.", subject.name, parts.join(" and "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Event, EventDate, HouseholdMember, PersonName, Place, SourceType, Spouse};
    use crate::options::CitationOptions;

    fn options(overrides: &[(&str, &str)]) -> NarrativeOptions {
        let resolved = CitationOptions::resolve(overrides.iter().copied()).unwrap();
        NarrativeOptions::from(&resolved)
    }

    fn member(name: &str, rel: Relationship, selected: bool) -> HouseholdMember {
        HouseholdMember {
            name: PersonName::from_full(name),
            relationship: Some(rel),
            is_selected: selected,
            ..Default::default()
        }
    }

    fn charles_1901() -> GeneralizedData {
        let mut data = GeneralizedData::new("fmp", "u", SourceType::Record, RecordType::Census);
        data.person.name = PersonName::from_full("Charles Pavey");
        data.person.sex = Some(Sex::Male);
        data.person.age = Some(Age::Years(14));
        data.person.occupation = Some("Grocer's Assistant".into());
        data.relationship_to_head = Some(Relationship::Son);
        data.event = Event::new(EventDate::parse("1901-03-31"), Place::normalize("Bideford, Devon"));
        data.household = vec![
            member("William Pavey", Relationship::Head, false),
            member("Zillah Pavey", Relationship::Wife, false),
            member("Charles Pavey", Relationship::Son, true),
        ];
        data.household[0].sex = Some(Sex::Male);
        data
    }

    #[test]
    fn census_defaults() {
        let text = build(&charles_1901(), &options(&[]), None);
        assert_eq!(
            text,
            "In the 1901 census Charles (14), a Grocer's Assistant, was living in the household \
             of his father William Pavey in Bideford, Devon, England."
        );
    }

    #[test]
    fn census_separate_sentences() {
        let text = build(
            &charles_1901(),
            &options(&[
                ("narrative_census_includeHousehold", "inSeparateSentence"),
                ("narrative_census_includeAge", "inSeparateSentence"),
                ("narrative_census_includeOccupation", "inSeparateSentence"),
                ("narrative_census_householdPartFormat", "withFamily"),
            ]),
            None,
        );
        assert_eq!(
            text,
            "In the 1901 census Charles was living in Bideford, Devon, England. He was 14 years old. \
             He was living with his family. His occupation was Grocer's Assistant."
        );
    }

    #[test]
    fn occupation_only_for_head() {
        let opts = options(&[("narrative_census_includeOccupation", "inSeparateSentenceHead")]);
        let son = build(&charles_1901(), &opts, None);
        assert!(!son.contains("occupation"));

        let mut head = charles_1901();
        head.relationship_to_head = Some(Relationship::Head);
        head.household[0].is_selected = true;
        head.household[2].is_selected = false;
        let text = build(&head, &opts, None);
        assert!(text.contains("as head of the household"));
        assert!(text.ends_with("His occupation was Grocer's Assistant."));
    }

    #[test]
    fn age_formats_and_occupation_case() {
        let text = build(
            &charles_1901(),
            &options(&[
                ("narrative_census_ageFormat", "commasAge"),
                ("narrative_general_occupationFormat", "lowerCase"),
                ("narrative_census_wasPartFormat", "wasEnumerated"),
                ("narrative_census_sentenceStart", "inYear"),
                ("narrative_census_includeHousehold", "no"),
            ]),
            None,
        );
        assert_eq!(
            text,
            "In 1901 Charles, age 14, a grocer's assistant, was enumerated in Bideford, Devon, England."
        );
    }

    #[test]
    fn female_head_is_mother() {
        let mut data = charles_1901();
        data.household[0] = member("Mary Pavey", Relationship::Head, false);
        data.household[0].sex = Some(Sex::Female);
        data.household.remove(1);
        let text = build(&data, &options(&[("narrative_census_includeOccupation", "no")]), None);
        assert_eq!(
            text,
            "In the 1901 census Charles (14) was living in the household of his mother Mary Pavey \
             in Bideford, Devon, England."
        );
    }

    #[test]
    fn head_of_unknown_sex_has_no_parent_word() {
        let mut data = charles_1901();
        data.household[0].sex = None;
        let text = build(&data, &options(&[("narrative_census_includeOccupation", "no")]), None);
        assert_eq!(
            text,
            "In the 1901 census Charles (14) was living in the household of William Pavey \
             in Bideford, Devon, England."
        );
    }

    #[test]
    fn servant_in_household() {
        let mut data = charles_1901();
        data.relationship_to_head = Some(Relationship::Servant);
        data.household[2].relationship = Some(Relationship::Servant);
        let text = build(&data, &options(&[("narrative_census_includeOccupation", "no")]), None);
        assert_eq!(
            text,
            "In the 1901 census Charles (14) was living as a servant in the household of \
             William Pavey in Bideford, Devon, England."
        );
    }

    #[test]
    fn marriage_age_formats() {
        let mut data = GeneralizedData::new("fmp", "u", SourceType::Record, RecordType::Marriage);
        data.person.name = PersonName::from_full("Jane Cox");
        data.person.sex = Some(Sex::Female);
        data.person.age = Some(Age::Years(21));
        data.event = Event::new(EventDate::parse("3 Jun 1844"), Place::normalize("Leicester, Leics"));
        data.spouses.push(Spouse {
            name: PersonName::from_full("John Smith"),
            age: Some(Age::Years(24)),
            marriage: None,
        });

        assert_eq!(
            build(&data, &options(&[]), None),
            "Jane (21) married John Smith (24) on 3 June 1844 in Leicester, Leicestershire, England."
        );
        assert_eq!(
            build(&data, &options(&[("narrative_marriage_ageFormat", "commasAge")]), None),
            "Jane, age 21, married John Smith, age 24, on 3 June 1844 in Leicester, Leicestershire, England."
        );
        assert_eq!(
            build(&data, &options(&[("narrative_marriage_ageFormat", "plainAged")]), None),
            "Jane aged 21 married John Smith aged 24 on 3 June 1844 in Leicester, Leicestershire, England."
        );
        assert_eq!(
            build(&data, &options(&[("narrative_marriage_includeAge", "inSeparateSentence")]), None),
            "Jane married John Smith on 3 June 1844 in Leicester, Leicestershire, England. She was 21 years old."
        );
    }

    #[test]
    fn marriage_without_date_or_place_ends_cleanly() {
        let mut data = GeneralizedData::new("fmp", "u", SourceType::Record, RecordType::Marriage);
        data.person.name = PersonName::from_full("Jane Cox");
        data.person.age = Some(Age::Years(21));
        data.spouses.push(Spouse {
            name: PersonName::from_full("John Smith"),
            age: Some(Age::Years(24)),
            marriage: None,
        });
        let opts = options(&[("narrative_marriage_ageFormat", "commasAge")]);
        assert_eq!(build(&data, &opts, None), "Jane, age 21, married John Smith, age 24.");

        data.spouses.clear();
        assert_eq!(build(&data, &opts, None), "Jane, age 21, was married.");
    }

    #[test]
    fn baptism_with_parents() {
        let mut data = GeneralizedData::new("fmp", "u", SourceType::Record, RecordType::Baptism);
        data.person.name = PersonName::from_full("William More");
        data.person.sex = Some(Sex::Male);
        data.event = Event::new(EventDate::parse("3 Jun 1823"), None);
        data.parents.father = PersonName::from_full("John More");
        assert_eq!(
            build(&data, &options(&[("narrative_general_dateFormat", "short")]), None),
            "William was baptised on 3 Jun 1823. His parent was John More."
        );
    }

    #[test]
    fn registration_uses_district() {
        let mut data = GeneralizedData::new("fmp", "u", SourceType::Record, RecordType::DeathRegistration);
        data.person.name = PersonName::from_full("Charles Pavey");
        data.event = Event::new(EventDate::from_quarter(1914, 1), None);
        data.registration_district = Some("Barnstaple".into());
        assert_eq!(
            build(&data, &options(&[("narrative_general_nameOrPronoun", "fullName")]), None),
            "Charles Pavey's death was registered in the Jan-Feb-Mar quarter of 1914 in the Barnstaple district."
        );
    }
}
