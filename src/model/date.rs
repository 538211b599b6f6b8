use std::fmt;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::options::DateFormat;

static QUALIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(abt\.?|about|circa|ca\.?|c\.|est\.?|bef\.?|before|aft\.?|after)\s+(.+)$").unwrap()
});
static ISO_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").unwrap());
static NAMED_QUARTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(jan-feb-mar|apr-may-jun|jul-aug-sep|oct-nov-dec)\s+(\d{4})$").unwrap()
});
static YEAR_Q_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^(\d{4})\s+q([1-4])$").unwrap());
static Q_YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^q([1-4])\s+(\d{4})$").unwrap());
static DMY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d{1,2})(?:st|nd|rd|th)?\s+([a-z]+)\.?,?\s+(\d{4})$").unwrap()
});
static MDY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:[a-z]+,\s*)?([a-z]+)\.?\s+(\d{1,2})(?:st|nd|rd|th)?,?\s+(\d{4})$").unwrap()
});
static MY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^([a-z]+)\.?,?\s+(\d{4})$").unwrap());
static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{4})$").unwrap());

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];
const QUARTERS: [&str; 4] = ["Jan-Feb-Mar", "Apr-May-Jun", "Jul-Aug-Sep", "Oct-Nov-Dec"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateQualifier {
    Exact,
    About,
    Before,
    After,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "precision")]
pub enum DateValue {
    Day { date: NaiveDate },
    Month { year: i32, month: u32 },
    Quarter { year: i32, quarter: u32 },
    Year { year: i32 },
}

/// A validated event date. Text that cannot be read as one of the supported
/// shapes never becomes an `EventDate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDate {
    pub qualifier: DateQualifier,
    pub value: DateValue,
}

impl EventDate {
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        let text = text.trim_end_matches('.');
        if text.is_empty() {
            return None;
        }

        if let Some(caps) = QUALIFIER_RE.captures(text) {
            let qualifier = match caps[1].to_lowercase().trim_end_matches('.') {
                "bef" | "before" => DateQualifier::Before,
                "aft" | "after" => DateQualifier::After,
                _ => DateQualifier::About,
            };
            let value = parse_value(&caps[2])?;
            return Some(Self { qualifier, value });
        }

        parse_value(text).map(|value| Self {
            qualifier: DateQualifier::Exact,
            value,
        })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self::exact(DateValue::Day { date })
    }

    pub fn from_year(year: i32) -> Option<Self> {
        plausible_year(year).then(|| Self::exact(DateValue::Year { year }))
    }

    pub fn from_quarter(year: i32, quarter: u32) -> Option<Self> {
        (plausible_year(year) && (1..=4).contains(&quarter))
            .then(|| Self::exact(DateValue::Quarter { year, quarter }))
    }

    fn exact(value: DateValue) -> Self {
        Self {
            qualifier: DateQualifier::Exact,
            value,
        }
    }

    pub fn year(&self) -> i32 {
        match self.value {
            DateValue::Day { date } => date.year(),
            DateValue::Month { year, .. } | DateValue::Quarter { year, .. } | DateValue::Year { year } => year,
        }
    }

    pub fn is_exact(&self) -> bool {
        self.qualifier == DateQualifier::Exact
    }

    /// The bare date: "12 March 1858", "about 1858", "Jul-Aug-Sep 1852".
    pub fn format(&self, style: DateFormat) -> String {
        let bare = format_value(&self.value, style);
        match self.qualifier {
            DateQualifier::Exact => bare,
            DateQualifier::About => format!("about {}", bare),
            DateQualifier::Before => format!("before {}", bare),
            DateQualifier::After => format!("after {}", bare),
        }
    }

    /// The date with its preposition: "on 12 March 1858", "in 1858",
    /// "in the Jul-Aug-Sep quarter of 1852", "about 1858".
    pub fn phrase(&self, style: DateFormat) -> String {
        if !self.is_exact() {
            return self.format(style);
        }
        match self.value {
            DateValue::Day { .. } => format!("on {}", self.format(style)),
            DateValue::Quarter { year, quarter } => {
                format!("in the {} quarter of {}", quarter_label(quarter), year)
            }
            _ => format!("in {}", self.format(style)),
        }
    }
}

impl fmt::Display for EventDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(DateFormat::Long))
    }
}

fn parse_value(text: &str) -> Option<DateValue> {
    if let Some(caps) = ISO_RE.captures(text) {
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        return match (month, day) {
            (0, _) => year_value(year),
            (m, 0) => month_value(year, m),
            (m, d) => day_value(year, m, d),
        };
    }

    if let Some(caps) = NAMED_QUARTER_RE.captures(text) {
        let quarter = QUARTERS
            .iter()
            .position(|q| q.eq_ignore_ascii_case(&caps[1]))? as u32
            + 1;
        let year: i32 = caps[2].parse().ok()?;
        return plausible_year(year).then_some(DateValue::Quarter { year, quarter });
    }
    if let Some(caps) = YEAR_Q_RE.captures(text) {
        return quarter_value(&caps[1], &caps[2]);
    }
    if let Some(caps) = Q_YEAR_RE.captures(text) {
        return quarter_value(&caps[2], &caps[1]);
    }

    if let Some(caps) = DMY_RE.captures(text) {
        let month = month_from_name(&caps[2])?;
        return day_value(caps[3].parse().ok()?, month, caps[1].parse().ok()?);
    }
    if let Some(caps) = MDY_RE.captures(text) {
        let month = month_from_name(&caps[1])?;
        return day_value(caps[3].parse().ok()?, month, caps[2].parse().ok()?);
    }
    if let Some(caps) = MY_RE.captures(text) {
        let month = month_from_name(&caps[1])?;
        return month_value(caps[2].parse().ok()?, month);
    }
    if let Some(caps) = YEAR_RE.captures(text) {
        return year_value(caps[1].parse().ok()?);
    }

    None
}

fn plausible_year(year: i32) -> bool {
    (1000..=2100).contains(&year)
}

fn year_value(year: i32) -> Option<DateValue> {
    plausible_year(year).then_some(DateValue::Year { year })
}

fn month_value(year: i32, month: u32) -> Option<DateValue> {
    (plausible_year(year) && (1..=12).contains(&month)).then_some(DateValue::Month { year, month })
}

fn day_value(year: i32, month: u32, day: u32) -> Option<DateValue> {
    if !plausible_year(year) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day).map(|date| DateValue::Day { date })
}

fn quarter_value(year: &str, quarter: &str) -> Option<DateValue> {
    let year: i32 = year.parse().ok()?;
    let quarter: u32 = quarter.parse().ok()?;
    plausible_year(year).then_some(DateValue::Quarter { year, quarter })
}

/// "Mar", "march", "Sept" → 3 / 9. Needs at least three letters of the name.
pub fn month_from_name(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    if lower.len() < 3 {
        return None;
    }
    if lower == "sept" {
        return Some(9);
    }
    MONTHS
        .iter()
        .position(|m| m.to_lowercase().starts_with(&lower))
        .map(|i| i as u32 + 1)
}

/// Out-of-range numbers come from hand-edited data and print as "Q5".
fn quarter_label(quarter: u32) -> String {
    quarter
        .checked_sub(1)
        .and_then(|i| QUARTERS.get(i as usize))
        .map(|q| q.to_string())
        .unwrap_or_else(|| format!("Q{}", quarter))
}

fn month_label(month: u32, style: DateFormat) -> String {
    match month.checked_sub(1).and_then(|i| MONTHS.get(i as usize)) {
        Some(full) => match style {
            DateFormat::Long => full.to_string(),
            DateFormat::Short => full[..3].to_string(),
        },
        None => month.to_string(),
    }
}

fn format_value(value: &DateValue, style: DateFormat) -> String {
    match *value {
        DateValue::Day { date } => format!("{} {} {}", date.day(), month_label(date.month(), style), date.year()),
        DateValue::Month { year, month } => format!("{} {}", month_label(month, style), year),
        DateValue::Quarter { year, quarter } => format!("{} {}", quarter_label(quarter), year),
        DateValue::Year { year } => year.to_string(),
    }
}
