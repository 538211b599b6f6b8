//! Household table builder.
//!
//! Multi-person record types (census, 1939 register) cite the whole household.
//! The builder gathers the person rows from one or more generalized records,
//! keeps them in enumeration order and flags the head when exactly one row
//! claims that role.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::TableBuildAmbiguity;
use crate::model::{GeneralizedData, HouseholdMember, RecordType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseholdRow {
    #[serde(flatten)]
    pub member: HouseholdMember,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_label: Option<String>,
    #[serde(default)]
    pub is_head: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseholdTable {
    pub record_type: RecordType,
    pub rows: Vec<HouseholdRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ambiguity: Option<TableBuildAmbiguity>,
}

/// Table columns, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Name,
    Relationship,
    MaritalStatus,
    Age,
    Occupation,
    BirthPlace,
}

impl Column {
    pub fn header(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Relationship => "Relationship",
            Self::MaritalStatus => "Marital status",
            Self::Age => "Age",
            Self::Occupation => "Occupation",
            Self::BirthPlace => "Birthplace",
        }
    }

    const ALL: [Column; 6] = [
        Self::Name,
        Self::Relationship,
        Self::MaritalStatus,
        Self::Age,
        Self::Occupation,
        Self::BirthPlace,
    ];
}

impl HouseholdRow {
    pub fn cell(&self, column: Column) -> Option<String> {
        let m = &self.member;
        match column {
            Column::Name => m.name.as_ref().map(|n| n.full()),
            Column::Relationship => self.relationship_label.clone(),
            Column::MaritalStatus => m.marital_status.map(|s| s.label().to_string()),
            Column::Age => m.age.map(|a| a.to_string()),
            Column::Occupation => m.occupation.clone(),
            Column::BirthPlace => m.birth_place.as_ref().map(|p| p.text.clone()),
        }
    }
}

impl HouseholdTable {
    pub fn head_row(&self) -> Option<&HouseholdRow> {
        self.head.and_then(|i| self.rows.get(i))
    }

    pub fn selected_row(&self) -> Option<&HouseholdRow> {
        self.rows.iter().find(|r| r.member.is_selected)
    }

    /// Columns with at least one filled cell.
    pub fn columns(&self) -> Vec<Column> {
        Column::ALL
            .into_iter()
            .filter(|c| self.rows.iter().any(|r| r.cell(*c).is_some()))
            .collect()
    }
}

/// Build the household table for `records`. Embedded household rows are used
/// as they are; a record without them contributes a single row for its own
/// person. Never fails: an unclear head is reported in `ambiguity`.
pub fn build_table(records: &[GeneralizedData], record_type: RecordType) -> HouseholdTable {
    let mut members: Vec<HouseholdMember> = Vec::new();
    for record in records {
        if record.household.is_empty() {
            members.push(person_row(record));
        } else {
            members.extend(record.household.iter().cloned());
        }
    }

    let head_rows: Vec<usize> = members
        .iter()
        .enumerate()
        .filter(|(_, m)| m.relationship.as_ref().is_some_and(|r| r.is_head()))
        .map(|(i, _)| i)
        .collect();

    let (head, ambiguity) = match head_rows.as_slice() {
        [only] => (Some(*only), None),
        [] if members.len() <= 1 => (None, None),
        [] => (None, Some(TableBuildAmbiguity::NoHead)),
        many => (None, Some(TableBuildAmbiguity::MultipleHeads(many.len()))),
    };
    if let Some(ambiguity) = &ambiguity {
        warn!(%record_type, rows = members.len(), %ambiguity, "household head unclear");
    }

    let rows: Vec<HouseholdRow> = members
        .into_iter()
        .enumerate()
        .map(|(i, member)| HouseholdRow {
            relationship_label: member.relationship.as_ref().map(|r| r.label().to_string()),
            is_head: head == Some(i),
            member,
        })
        .collect();

    debug!(%record_type, rows = rows.len(), head = ?head, "built household table");
    HouseholdTable {
        record_type,
        rows,
        head,
        ambiguity,
    }
}

fn person_row(record: &GeneralizedData) -> HouseholdMember {
    let person = &record.person;
    HouseholdMember {
        name: person.name.clone(),
        relationship: record.relationship_to_head.clone(),
        marital_status: person.marital_status,
        sex: person.sex,
        age: person.age,
        occupation: person.occupation.clone(),
        birth_place: person.birth.as_ref().and_then(|b| b.place.clone()),
        is_selected: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PersonName, Relationship, SourceType};

    fn member(name: &str, rel: Option<Relationship>) -> HouseholdMember {
        HouseholdMember {
            name: PersonName::from_full(name),
            relationship: rel,
            ..Default::default()
        }
    }

    fn census(household: Vec<HouseholdMember>) -> GeneralizedData {
        let mut data = GeneralizedData::new("fmp", "u", SourceType::Record, RecordType::Census);
        data.household = household;
        data
    }

    #[test]
    fn keeps_enumeration_order_and_flags_head() {
        let data = census(vec![
            member("William Pavey", Some(Relationship::Head)),
            member("Zillah Pavey", Some(Relationship::Wife)),
            member("Charles Pavey", Some(Relationship::Son)),
            member("Ada Pavey", Some(Relationship::Daughter)),
        ]);
        let table = build_table(&[data], RecordType::Census);
        let names: Vec<_> = table.rows.iter().map(|r| r.cell(Column::Name).unwrap()).collect();
        assert_eq!(names, ["William Pavey", "Zillah Pavey", "Charles Pavey", "Ada Pavey"]);
        assert_eq!(table.head, Some(0));
        assert!(table.rows[0].is_head);
        assert_eq!(table.rows.iter().filter(|r| r.is_head).count(), 1);
        assert_eq!(table.ambiguity, None);
        assert_eq!(table.rows[2].relationship_label.as_deref(), Some("son"));
    }

    #[test]
    fn single_person_record_gives_one_row() {
        let mut data = GeneralizedData::new("fmp", "u", SourceType::Record, RecordType::Baptism);
        data.person.name = PersonName::from_full("William More");
        let table = build_table(&[data], RecordType::Baptism);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.head, None);
        assert_eq!(table.ambiguity, None);
        assert!(table.rows[0].member.is_selected);
    }

    #[test]
    fn missing_head_is_ambiguous_not_fatal() {
        let data = census(vec![
            member("Mary Forster", Some(Relationship::Servant)),
            member("Jane Smith", None),
        ]);
        let table = build_table(&[data], RecordType::Census);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.head, None);
        assert_eq!(table.ambiguity, Some(TableBuildAmbiguity::NoHead));
    }

    #[test]
    fn two_heads_flag_none() {
        let data = census(vec![
            member("A B", Some(Relationship::Head)),
            member("C D", Some(Relationship::Head)),
        ]);
        let table = build_table(&[data], RecordType::Census);
        assert_eq!(table.head, None);
        assert!(table.rows.iter().all(|r| !r.is_head));
        assert_eq!(table.ambiguity, Some(TableBuildAmbiguity::MultipleHeads(2)));
    }

    #[test]
    fn several_single_records_concatenate() {
        let mut a = GeneralizedData::new("fmp", "u", SourceType::Record, RecordType::Register);
        a.person.name = PersonName::from_full("Arthur Pavey");
        a.relationship_to_head = Some(Relationship::Head);
        let mut b = a.clone();
        b.person.name = PersonName::from_full("Emily Pavey");
        b.relationship_to_head = Some(Relationship::Wife);
        let table = build_table(&[a, b], RecordType::Register);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.head, Some(0));
    }

    #[test]
    fn columns_only_where_filled() {
        let data = census(vec![member("William Pavey", Some(Relationship::Head))]);
        let table = build_table(&[data], RecordType::Census);
        assert_eq!(table.columns(), vec![Column::Name, Column::Relationship]);
    }
}
