//! Supplemental record data: the one-line description, field lists and tables.

use crate::model::{GeneralizedData, RecordType};
use crate::options::{DataStyle, DateFormat};
use crate::table::{build_table, HouseholdTable};
use crate::text::join_and;

use super::{CitationInput, CitationParts, DataFragment, WikiTable};

pub fn fragment(style: DataStyle, input: &CitationInput, parts: &CitationParts) -> Option<DataFragment> {
    match style {
        DataStyle::Omit => None,
        DataStyle::Text => parts.data_string.clone().map(DataFragment::Text),
        DataStyle::List => (!parts.data_fields.is_empty()).then(|| {
            DataFragment::List(
                parts
                    .data_fields
                    .iter()
                    .map(|(label, value)| format!("{}: {}", label, value))
                    .collect(),
            )
        }),
        DataStyle::Table => household_table(input)
            .or_else(|| field_table(&parts.data_fields))
            .map(DataFragment::Table),
    }
}

fn household_table(input: &CitationInput) -> Option<WikiTable> {
    let data = input.data;
    if !data.record_type.is_household_type() {
        return None;
    }
    let built;
    let table = match input.table {
        Some(table) => table,
        None => {
            built = build_table(std::slice::from_ref(data), data.record_type);
            &built
        }
    };
    (table.rows.len() > 1).then(|| household_wikitable(table))
}

/// The household as a table; the selected person's name is bold.
pub fn household_wikitable(table: &HouseholdTable) -> WikiTable {
    let columns = table.columns();
    WikiTable {
        headers: columns.iter().map(|c| c.header().to_string()).collect(),
        rows: table
            .rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|c| {
                        let cell = row.cell(*c).unwrap_or_default();
                        if row.member.is_selected && *c == crate::table::Column::Name {
                            format!("'''{}'''", cell)
                        } else {
                            cell
                        }
                    })
                    .collect()
            })
            .collect(),
    }
}

fn field_table(fields: &[(String, String)]) -> Option<WikiTable> {
    (!fields.is_empty()).then(|| WikiTable {
        headers: Vec::new(),
        rows: fields.iter().map(|(k, v)| vec![k.clone(), v.clone()]).collect(),
    })
}

/// One-line description used by the `string` data style:
/// "Charles Pavey (14), son, in household of William Pavey in Bideford, Devon, England".
pub fn describe_record(data: &GeneralizedData) -> Option<String> {
    let name = data.full_name()?;
    let mut out = name.clone();
    if let Some(age) = data.person.age {
        out.push_str(&format!(" ({})", age));
    }

    let date = data.event_date().map(|d| d.phrase(DateFormat::Long));
    let place = data.event_place().map(|p| format!("in {}", p));

    match data.record_type {
        RecordType::Census | RecordType::Register => {
            let head = data
                .household
                .iter()
                .find(|m| m.relationship.as_ref().is_some_and(|r| r.is_head()))
                .and_then(|m| m.name.as_ref())
                .map(|n| n.full())
                .filter(|head| *head != name);
            match (&data.relationship_to_head, head) {
                (Some(rel), _) if rel.is_head() => out.push_str(", head of household"),
                (Some(rel), Some(head)) => out.push_str(&format!(", {}, in household of {}", rel, head)),
                (None, Some(head)) => out.push_str(&format!(" in household of {}", head)),
                (Some(rel), None) => out.push_str(&format!(", {}", rel)),
                (None, None) => {}
            }
            push_words(&mut out, [place]);
        }
        RecordType::Marriage => {
            let spouse = data
                .spouses
                .first()
                .and_then(|s| s.name.as_ref())
                .map(|n| format!("marriage to {}", n.full()));
            push_words(&mut out, [spouse, date, place]);
        }
        RecordType::PersonProfile => {
            let life = [("born", &data.person.birth), ("died", &data.person.death)]
                .into_iter()
                .filter_map(|(verb, event)| {
                    let event = event.as_ref()?;
                    let mut words = vec![verb.to_string()];
                    words.extend(event.date.map(|d| d.phrase(DateFormat::Long)));
                    words.extend(event.place.as_ref().map(|p| format!("in {}", p)));
                    Some(words.join(" "))
                })
                .collect::<Vec<_>>();
            if !life.is_empty() {
                out.push_str(", ");
                out.push_str(&life.join(", "));
            }
        }
        record_type => {
            let verb = event_verb(record_type).map(str::to_string);
            let district = data
                .registration_district
                .as_ref()
                .filter(|_| place.is_none())
                .map(|d| format!("in {} district", d));
            push_words(&mut out, [verb, date, place, district]);
            let parents: Vec<String> = [&data.parents.father, &data.parents.mother]
                .into_iter()
                .flatten()
                .map(|n| n.full())
                .collect();
            if !parents.is_empty() {
                out.push_str(&format!(", child of {}", join_and(&parents)));
            }
        }
    }

    Some(out)
}

fn push_words<const N: usize>(out: &mut String, words: [Option<String>; N]) {
    for word in words.into_iter().flatten() {
        out.push(' ');
        out.push_str(&word);
    }
}

fn event_verb(record_type: RecordType) -> Option<&'static str> {
    Some(match record_type {
        RecordType::BirthRegistration => "birth registered",
        RecordType::Birth => "born",
        RecordType::Baptism => "baptised",
        RecordType::DeathRegistration => "death registered",
        RecordType::Death => "died",
        RecordType::Burial => "buried",
        RecordType::Memorial => "memorial",
        RecordType::Probate => "probate",
        RecordType::Will => "will",
        RecordType::Divorce => "divorce",
        RecordType::ElectoralRegister => "on electoral roll",
        RecordType::Employment => "employment",
        _ => return None,
    })
}

/// Labelled fields for the `list` and `table` styles, in a fixed order.
pub fn record_fields(data: &GeneralizedData) -> Vec<(String, String)> {
    let mut fields: Vec<(String, String)> = Vec::new();
    let mut push = |label: &str, value: Option<String>| {
        if let Some(value) = value {
            fields.push((label.to_string(), value));
        }
    };

    let person = &data.person;
    push("Name", data.full_name());
    push("Relationship to head", data.relationship_to_head.as_ref().map(|r| r.to_string()));
    push("Marital status", person.marital_status.map(|s| s.label().to_string()));
    push("Age", person.age.map(|a| a.to_string()));
    push("Occupation", person.occupation.clone());
    push("Birth date", person.birth.as_ref().and_then(|b| b.date).map(|d| d.to_string()));
    push("Birth place", person.birth.as_ref().and_then(|b| b.place.as_ref()).map(|p| p.to_string()));
    push("Death date", person.death.as_ref().and_then(|d| d.date).map(|d| d.to_string()));
    push("Death place", person.death.as_ref().and_then(|d| d.place.as_ref()).map(|p| p.to_string()));
    push("Event date", data.event_date().map(|d| d.to_string()));
    push("Event place", data.event_place().map(|p| p.to_string()));
    push("Registration district", data.registration_district.clone());
    push("Father", data.parents.father.as_ref().map(|n| n.full()));
    push("Mother", data.parents.mother.as_ref().map(|n| n.full()));
    for spouse in &data.spouses {
        push("Spouse", spouse.name.as_ref().map(|n| n.full()));
    }
    fields
}
