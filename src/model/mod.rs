//! Canonical cross-site record schema.
//!
//! Every field is either present with a validated type or absent. Generalizers
//! build these values through the parsing constructors (`EventDate::parse`,
//! `Place::normalize`, `Age::parse`, ...) which return `None` on anything they
//! cannot read, so raw transcription text never leaks past generalization.

pub mod date;
pub mod name;
pub mod place;

use std::fmt;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub use date::{DateQualifier, DateValue, EventDate};
pub use name::PersonName;
pub use place::{Country, Place};

static AGE_YEARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d{1,3})(?:\s*(?:y|yr|yrs|years?))?$").unwrap());
static AGE_MONTHS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d{1,2})\s*(?:m|mo|mos|mths?|months?)$").unwrap());
static AGE_FRACTION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{1,2})/12$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordType {
    Census,
    Register,
    BirthRegistration,
    Birth,
    Baptism,
    Marriage,
    DeathRegistration,
    Death,
    Burial,
    Memorial,
    Probate,
    Will,
    Divorce,
    ElectoralRegister,
    Employment,
    Newspaper,
    PersonProfile,
    Unclassified,
}

impl RecordType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Census => "census",
            Self::Register => "register",
            Self::BirthRegistration => "birth_registration",
            Self::Birth => "birth",
            Self::Baptism => "baptism",
            Self::Marriage => "marriage",
            Self::DeathRegistration => "death_registration",
            Self::Death => "death",
            Self::Burial => "burial",
            Self::Memorial => "memorial",
            Self::Probate => "probate",
            Self::Will => "will",
            Self::Divorce => "divorce",
            Self::ElectoralRegister => "electoral_register",
            Self::Employment => "employment",
            Self::Newspaper => "newspaper",
            Self::PersonProfile => "person_profile",
            Self::Unclassified => "unclassified",
        }
    }

    /// Record types whose source enumerates a household.
    pub fn is_household_type(self) -> bool {
        matches!(self, Self::Census | Self::Register)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Record,
    Image,
    Profile,
    Article,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_lowercase().as_str() {
            "m" | "male" => Some(Self::Male),
            "f" | "female" => Some(Self::Female),
            _ => None,
        }
    }

    pub fn from_relationship(rel: &Relationship) -> Option<Self> {
        use Relationship::*;
        match rel {
            Husband | Son | Stepson | SonInLaw | Grandson | Father | FatherInLaw | Brother
            | BrotherInLaw | Nephew => Some(Self::Male),
            Wife | Daughter | Stepdaughter | DaughterInLaw | Granddaughter | Mother
            | MotherInLaw | Sister | SisterInLaw | Niece => Some(Self::Female),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaritalStatus {
    Single,
    Married,
    Widowed,
    Divorced,
}

impl MaritalStatus {
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().trim_end_matches('.').to_lowercase().as_str() {
            "s" | "single" | "unmarried" | "unm" | "u" | "bachelor" | "spinster" => Some(Self::Single),
            "m" | "mar" | "married" => Some(Self::Married),
            "w" | "wid" | "widow" | "widower" | "widowed" => Some(Self::Widowed),
            "d" | "div" | "divorced" => Some(Self::Divorced),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::Married => "Married",
            Self::Widowed => "Widowed",
            Self::Divorced => "Divorced",
        }
    }
}

/// Age at the event, in whole years or, for infants, months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Age {
    Years(u32),
    Months(u32),
}

impl Age {
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Some(caps) = AGE_YEARS_RE.captures(text) {
            let years: u32 = caps[1].parse().ok()?;
            return (years <= 125).then_some(Self::Years(years));
        }
        if let Some(caps) = AGE_MONTHS_RE.captures(text).or_else(|| AGE_FRACTION_RE.captures(text)) {
            let months: u32 = caps[1].parse().ok()?;
            return (months < 24).then_some(Self::Months(months));
        }
        None
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Years(y) => write!(f, "{}", y),
            Self::Months(1) => f.write_str("1 month"),
            Self::Months(m) => write!(f, "{} months", m),
        }
    }
}

/// Relationship to the head of the household.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    Head,
    Wife,
    Husband,
    Son,
    Daughter,
    Stepson,
    Stepdaughter,
    SonInLaw,
    DaughterInLaw,
    Grandson,
    Granddaughter,
    Father,
    Mother,
    FatherInLaw,
    MotherInLaw,
    Brother,
    Sister,
    BrotherInLaw,
    SisterInLaw,
    Nephew,
    Niece,
    Cousin,
    Servant,
    Boarder,
    Lodger,
    Visitor,
    Other(String),
}

impl Relationship {
    /// `None` for blank or placeholder labels.
    pub fn parse(text: &str) -> Option<Self> {
        let label = crate::text::clean_value(text)?;
        let key = label.to_lowercase().replace(['.', '-'], " ");
        let key = crate::text::collapse_whitespace(&key);
        let rel = match key.as_str() {
            "head" | "head of household" | "hd" => Self::Head,
            "wife" => Self::Wife,
            "husband" => Self::Husband,
            "son" => Self::Son,
            "daughter" | "dau" | "dautr" => Self::Daughter,
            "stepson" | "step son" => Self::Stepson,
            "stepdaughter" | "step daughter" | "step dau" => Self::Stepdaughter,
            "son in law" => Self::SonInLaw,
            "daughter in law" | "dau in law" => Self::DaughterInLaw,
            "grandson" | "grand son" => Self::Grandson,
            "granddaughter" | "grand daughter" | "gr dau" | "gdau" => Self::Granddaughter,
            "father" => Self::Father,
            "mother" => Self::Mother,
            "father in law" => Self::FatherInLaw,
            "mother in law" => Self::MotherInLaw,
            "brother" => Self::Brother,
            "sister" => Self::Sister,
            "brother in law" => Self::BrotherInLaw,
            "sister in law" => Self::SisterInLaw,
            "nephew" => Self::Nephew,
            "niece" => Self::Niece,
            "cousin" => Self::Cousin,
            "servant" | "serv" | "serv t" | "general servant" | "domestic servant" => Self::Servant,
            "boarder" => Self::Boarder,
            "lodger" => Self::Lodger,
            "visitor" => Self::Visitor,
            _ => Self::Other(label.to_lowercase()),
        };
        Some(rel)
    }

    pub fn is_head(&self) -> bool {
        matches!(self, Self::Head)
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Head => "head",
            Self::Wife => "wife",
            Self::Husband => "husband",
            Self::Son => "son",
            Self::Daughter => "daughter",
            Self::Stepson => "stepson",
            Self::Stepdaughter => "stepdaughter",
            Self::SonInLaw => "son-in-law",
            Self::DaughterInLaw => "daughter-in-law",
            Self::Grandson => "grandson",
            Self::Granddaughter => "granddaughter",
            Self::Father => "father",
            Self::Mother => "mother",
            Self::FatherInLaw => "father-in-law",
            Self::MotherInLaw => "mother-in-law",
            Self::Brother => "brother",
            Self::Sister => "sister",
            Self::BrotherInLaw => "brother-in-law",
            Self::SisterInLaw => "sister-in-law",
            Self::Nephew => "nephew",
            Self::Niece => "niece",
            Self::Cousin => "cousin",
            Self::Servant => "servant",
            Self::Boarder => "boarder",
            Self::Lodger => "lodger",
            Self::Visitor => "visitor",
            Self::Other(label) => label,
        }
    }

    /// How a member standing in `self` relation to the head relates to a
    /// person standing in `to` relation to the same head, when it is simple to
    /// say ("mother" for the head's wife seen from the head's son). `sex` is
    /// the member's own; a head of unknown sex has no parent word.
    pub fn relative_to(&self, sex: Option<Sex>, to: &Relationship) -> Option<&'static str> {
        use Relationship::*;
        let is_child = matches!(to, Son | Daughter);
        match (self, to) {
            (Head, Wife) => Some("husband"),
            (Wife, Head) => Some("wife"),
            (Head, Husband) => Some("wife"),
            (Head, _) if is_child => match sex? {
                Sex::Male => Some("father"),
                Sex::Female => Some("mother"),
            },
            (Wife, _) if is_child => Some("mother"),
            (Son, _) if is_child => Some("brother"),
            (Daughter, _) if is_child => Some("sister"),
            (Son, Head | Wife) => Some("son"),
            (Daughter, Head | Wife) => Some("daughter"),
            (Grandson, Son | Daughter) => Some("nephew"),
            (Granddaughter, Son | Daughter) => Some("niece"),
            _ => None,
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A date and/or place. Never both absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<EventDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<Place>,
}

impl Event {
    pub fn new(date: Option<EventDate>, place: Option<Place>) -> Option<Self> {
        (date.is_some() || place.is_some()).then_some(Self { date, place })
    }

    /// "12 Mar 1858 in Dundee, Forfarshire" → date and place. Text without
    /// " in " is read as a date, or failing that as a place.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        match text.split_once(" in ") {
            Some((date, place)) => Self::new(EventDate::parse(date), Place::normalize(place)),
            None => match EventDate::parse(text) {
                Some(date) => Self::new(Some(date), None),
                None => Self::new(None, Place::normalize(text)),
            },
        }
    }

    pub fn year(&self) -> Option<i32> {
        self.date.as_ref().map(EventDate::year)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<PersonName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<Age>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<MaritalStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth: Option<Event>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death: Option<Event>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parents {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father: Option<PersonName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mother: Option<PersonName>,
}

impl Parents {
    pub fn is_empty(&self) -> bool {
        self.father.is_none() && self.mother.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spouse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<PersonName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<Age>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marriage: Option<Event>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub newspaper: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Place>,
    pub published: EventDate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseholdMember {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<PersonName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<Relationship>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<MaritalStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<Age>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_place: Option<Place>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_selected: bool,
}

/// The site-independent result of generalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralizedData {
    pub site: String,
    pub source_type: SourceType,
    pub record_type: RecordType,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessed: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<Collection>,
    #[serde(default)]
    pub person: Person,
    /// The record's own event: census night, baptism, registration quarter...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<Event>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_district: Option<String>,
    #[serde(default, skip_serializing_if = "Parents::is_empty")]
    pub parents: Parents,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub spouses: Vec<Spouse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_to_head: Option<Relationship>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub household: Vec<HouseholdMember>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article: Option<Article>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_reference: Option<String>,
}

impl GeneralizedData {
    pub fn new(site: &str, url: &str, source_type: SourceType, record_type: RecordType) -> Self {
        Self {
            site: site.to_string(),
            source_type,
            record_type,
            url: url.to_string(),
            accessed: None,
            collection: None,
            person: Person::default(),
            event: None,
            registration_district: None,
            parents: Parents::default(),
            spouses: Vec::new(),
            relationship_to_head: None,
            household: Vec::new(),
            article: None,
            source_reference: None,
        }
    }

    pub fn event_date(&self) -> Option<&EventDate> {
        self.event.as_ref().and_then(|e| e.date.as_ref())
    }

    pub fn event_place(&self) -> Option<&Place> {
        self.event.as_ref().and_then(|e| e.place.as_ref())
    }

    pub fn event_year(&self) -> Option<i32> {
        self.event
            .as_ref()
            .and_then(Event::year)
            .or_else(|| self.collection.as_ref().and_then(|c| c.year))
    }

    pub fn full_name(&self) -> Option<String> {
        self.person.name.as_ref().map(PersonName::full)
    }
}
