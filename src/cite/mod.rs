//! Citation assembly shared by every site.
//!
//! A site's builder only decides the site-specific parts (source title, link
//! text, the record's data string and fields). Layout, the data style switch,
//! the accessed date and the inline/source/narrative wrapping live here so every
//! site honours the options the same way.

pub mod data;
pub mod narrative;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::{EventDate, GeneralizedData};
use crate::options::{AccessedDate, CitationOptions, CitationStyle, DateFormat, NarrativeOptions};
use crate::table::HouseholdTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CitationType {
    Inline,
    Source,
    Narrative,
}

impl CitationType {
    pub const ALL: [CitationType; 3] = [Self::Inline, Self::Source, Self::Narrative];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::Source => "source",
            Self::Narrative => "narrative",
        }
    }
}

impl fmt::Display for CitationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CitationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown citation type '{}'", s))
    }
}

/// A simple wikitext table. An empty `headers` renders no header row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WikiTable {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl WikiTable {
    pub fn to_wikitext(&self) -> String {
        let mut out = String::from("{| class=\"wikitable\"\n");
        if !self.headers.is_empty() {
            out.push_str("! ");
            out.push_str(&self.headers.join(" !! "));
            out.push('\n');
        }
        for row in &self.rows {
            out.push_str("|-\n| ");
            out.push_str(&row.join(" || "));
            out.push('\n');
        }
        out.push_str("|}");
        out
    }
}

/// The supplemental record data carried by a citation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "style", content = "value")]
pub enum DataFragment {
    Text(String),
    List(Vec<String>),
    Table(WikiTable),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub citation_type: CitationType,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<DataFragment>,
}

/// What a site contributes to its citations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CitationParts {
    pub title: String,
    pub website: &'static str,
    pub link_text: String,
    pub data_string: Option<String>,
    pub data_fields: Vec<(String, String)>,
    pub source_reference: Option<String>,
}

pub struct CitationInput<'a> {
    pub data: &'a GeneralizedData,
    pub options: &'a CitationOptions,
    pub table: Option<&'a HouseholdTable>,
    pub citation_type: CitationType,
}

/// Lay out `parts` as a citation of `input.citation_type`, with the data style
/// read from `data_style_key`.
pub fn assemble(input: &CitationInput, data_style_key: &str, parts: CitationParts) -> Citation {
    let style = CitationStyle::for_site(input.options, data_style_key);
    let fragment = data::fragment(style.data_style, input, &parts);

    let mut body = format!("'''{}'''", parts.title);
    body.push_str(if style.add_breaks { "<br/> " } else { " " });
    body.push_str(&format!("''{}''", parts.website));

    let link = format!("[{} {}]", input.data.url, parts.link_text);
    let accessed = input
        .data
        .accessed
        .map(|d| format!("(accessed {})", EventDate::from_date(d).format(DateFormat::Long)));
    match (style.accessed_date, accessed) {
        (AccessedDate::ParenAfterLink, Some(accessed)) => {
            body.push_str(&format!(" {} {}", link, accessed))
        }
        (AccessedDate::ParenBeforeLink, Some(accessed)) => {
            body.push_str(&format!(" {} {}", accessed, link))
        }
        _ => body.push_str(&format!(" {}", link)),
    }

    if let Some(DataFragment::Text(text)) = &fragment {
        body.push_str(", ");
        body.push_str(text);
    }
    if let Some(reference) = &parts.source_reference {
        body.push_str("; citing ");
        body.push_str(reference);
    }
    match &fragment {
        Some(DataFragment::List(items)) => {
            let bullet = match input.citation_type {
                CitationType::Source => "\n** ",
                _ => "\n* ",
            };
            for item in items {
                body.push_str(bullet);
                body.push_str(item);
            }
        }
        Some(DataFragment::Table(table)) => {
            body.push('\n');
            body.push_str(&table.to_wikitext());
        }
        _ => {}
    }

    let text = match input.citation_type {
        CitationType::Inline => format!("<ref>{}</ref>", body),
        CitationType::Source => format!("* {}", body),
        CitationType::Narrative => {
            let options = NarrativeOptions::from(input.options);
            let sentence = narrative::build(input.data, &options, input.table);
            format!("{}<ref>{}</ref>", sentence, body)
        }
    };

    Citation {
        citation_type: input.citation_type,
        text,
        data: fragment,
    }
}
