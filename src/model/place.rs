use std::fmt;

use serde::{Deserialize, Serialize};

use crate::text::collapse_whitespace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Country {
    England,
    Wales,
    Scotland,
    Ireland,
    UnitedStates,
    Canada,
    Australia,
    NewZealand,
    India,
}

impl Country {
    pub fn name(self) -> &'static str {
        match self {
            Self::England => "England",
            Self::Wales => "Wales",
            Self::Scotland => "Scotland",
            Self::Ireland => "Ireland",
            Self::UnitedStates => "United States",
            Self::Canada => "Canada",
            Self::Australia => "Australia",
            Self::NewZealand => "New Zealand",
            Self::India => "India",
        }
    }

    pub fn from_name(text: &str) -> Option<Self> {
        let key = text.trim().trim_end_matches('.').to_lowercase();
        COUNTRY_ALIASES
            .iter()
            .find(|(alias, _)| *alias == key)
            .map(|(_, country)| *country)
    }
}

const COUNTRY_ALIASES: &[(&str, Country)] = &[
    ("england", Country::England),
    ("wales", Country::Wales),
    ("scotland", Country::Scotland),
    ("ireland", Country::Ireland),
    ("united states", Country::UnitedStates),
    ("united states of america", Country::UnitedStates),
    ("usa", Country::UnitedStates),
    ("u.s.a", Country::UnitedStates),
    ("us", Country::UnitedStates),
    ("canada", Country::Canada),
    ("australia", Country::Australia),
    ("new zealand", Country::NewZealand),
    ("india", Country::India),
    ("british india", Country::India),
];

/// Trailing components that carry no information once the country is known.
const UK_SUFFIXES: &[&str] = &["united kingdom", "uk", "u.k.", "great britain", "gb"];

struct CountyTable {
    country: Country,
    counties: &'static [&'static str],
    aliases: &'static [(&'static str, &'static str)],
}

static COUNTY_TABLES: &[CountyTable] = &[
    CountyTable {
        country: Country::England,
        counties: &[
            "Bedfordshire", "Berkshire", "Buckinghamshire", "Cambridgeshire", "Cheshire",
            "Cornwall", "Cumberland", "Derbyshire", "Devon", "Dorset", "Durham", "Essex",
            "Gloucestershire", "Hampshire", "Herefordshire", "Hertfordshire",
            "Huntingdonshire", "Kent", "Lancashire", "Leicestershire", "Lincolnshire",
            "London", "Middlesex", "Norfolk", "Northamptonshire", "Northumberland",
            "Nottinghamshire", "Oxfordshire", "Rutland", "Shropshire", "Somerset",
            "Staffordshire", "Suffolk", "Surrey", "Sussex", "Warwickshire", "Westmorland",
            "Wiltshire", "Worcestershire", "Yorkshire",
        ],
        aliases: &[
            ("beds", "Bedfordshire"), ("berks", "Berkshire"), ("bucks", "Buckinghamshire"),
            ("cambs", "Cambridgeshire"), ("devonshire", "Devon"), ("dorsetshire", "Dorset"),
            ("co durham", "Durham"), ("county durham", "Durham"),
            ("glos", "Gloucestershire"), ("gloucs", "Gloucestershire"),
            ("hants", "Hampshire"), ("herts", "Hertfordshire"),
            ("hunts", "Huntingdonshire"), ("lancs", "Lancashire"), ("leics", "Leicestershire"),
            ("lincs", "Lincolnshire"), ("middx", "Middlesex"), ("northants", "Northamptonshire"),
            ("notts", "Nottinghamshire"), ("oxon", "Oxfordshire"), ("salop", "Shropshire"),
            ("somersetshire", "Somerset"), ("staffs", "Staffordshire"), ("warks", "Warwickshire"),
            ("wilts", "Wiltshire"), ("worcs", "Worcestershire"), ("yorks", "Yorkshire"),
        ],
    },
    CountyTable {
        country: Country::Wales,
        counties: &[
            "Anglesey", "Brecknockshire", "Caernarfonshire", "Cardiganshire", "Carmarthenshire",
            "Denbighshire", "Flintshire", "Glamorgan", "Merionethshire", "Monmouthshire",
            "Montgomeryshire", "Pembrokeshire", "Radnorshire",
        ],
        aliases: &[
            ("breconshire", "Brecknockshire"),
            ("carnarvonshire", "Caernarfonshire"), ("caernarvonshire", "Caernarfonshire"),
            ("glam", "Glamorgan"), ("glamorganshire", "Glamorgan"),
        ],
    },
    CountyTable {
        country: Country::Scotland,
        counties: &[
            "Aberdeenshire", "Angus", "Argyllshire", "Ayrshire", "Banffshire", "Berwickshire",
            "Buteshire", "Caithness", "Clackmannanshire", "Dumfriesshire", "Dunbartonshire",
            "East Lothian", "Fife", "Inverness-shire", "Kincardineshire", "Kinross-shire",
            "Kirkcudbrightshire", "Lanarkshire", "Midlothian", "Morayshire", "Nairnshire",
            "Orkney", "Peeblesshire", "Perthshire", "Renfrewshire", "Ross and Cromarty",
            "Roxburghshire", "Selkirkshire", "Shetland", "Stirlingshire", "Sutherland",
            "West Lothian", "Wigtownshire",
        ],
        aliases: &[
            ("forfarshire", "Angus"),
            ("edinburghshire", "Midlothian"), ("haddingtonshire", "East Lothian"),
            ("linlithgowshire", "West Lothian"), ("elginshire", "Morayshire"),
            ("argyll", "Argyllshire"), ("bute", "Buteshire"), ("dumbartonshire", "Dunbartonshire"),
        ],
    },
    CountyTable {
        country: Country::UnitedStates,
        counties: &[
            "Alabama", "Alaska", "Arizona", "Arkansas", "California", "Colorado", "Connecticut",
            "Delaware", "Florida", "Georgia", "Hawaii", "Idaho", "Illinois", "Indiana", "Iowa",
            "Kansas", "Kentucky", "Louisiana", "Maine", "Maryland", "Massachusetts", "Michigan",
            "Minnesota", "Mississippi", "Missouri", "Montana", "Nebraska", "Nevada",
            "New Hampshire", "New Jersey", "New Mexico", "New York", "North Carolina",
            "North Dakota", "Ohio", "Oklahoma", "Oregon", "Pennsylvania", "Rhode Island",
            "South Carolina", "South Dakota", "Tennessee", "Texas", "Utah", "Vermont",
            "Virginia", "Washington", "West Virginia", "Wisconsin", "Wyoming",
        ],
        aliases: &[("mass", "Massachusetts"), ("penn", "Pennsylvania"), ("conn", "Connecticut")],
    },
    CountyTable {
        country: Country::Australia,
        counties: &[
            "New South Wales", "Victoria", "Queensland", "South Australia", "Western Australia",
            "Tasmania", "Northern Territory",
        ],
        aliases: &[("nsw", "New South Wales"), ("sa", "South Australia"), ("van diemen's land", "Tasmania")],
    },
];

fn county_in(table: &CountyTable, name: &str) -> Option<&'static str> {
    let key = name.trim().trim_end_matches('.').to_lowercase();
    if let Some((_, canonical)) = table.aliases.iter().find(|(alias, _)| *alias == key) {
        return Some(*canonical);
    }
    table.counties.iter().find(|c| c.to_lowercase() == key).copied()
}

/// Canonical county or state name for `name` within `country`.
pub fn normalize_county(country: Country, name: &str) -> Option<&'static str> {
    COUNTY_TABLES
        .iter()
        .filter(|t| t.country == country)
        .find_map(|t| county_in(t, name))
}

/// First table (England, Wales, Scotland, US, Australia) that knows `name`.
fn infer_county(name: &str) -> Option<(Country, &'static str)> {
    COUNTY_TABLES
        .iter()
        .find_map(|t| county_in(t, name).map(|c| (t.country, c)))
}

/// A normalized place. `text` is the display form with county aliases
/// resolved and the country appended when it could be inferred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<Country>,
}

impl Place {
    pub fn normalize(raw: &str) -> Option<Self> {
        let parts: Vec<String> = raw
            .split(',')
            .map(collapse_whitespace)
            .filter(|p| !p.is_empty())
            .collect();
        Self::from_components(parts)
    }

    /// Join separately transcribed parts (town, county, country). Empty and
    /// repeated parts are dropped.
    pub fn from_parts<S: AsRef<str>>(parts: &[S]) -> Option<Self> {
        let mut components: Vec<String> = Vec::new();
        for part in parts {
            for piece in part.as_ref().split(',') {
                let piece = collapse_whitespace(piece);
                if piece.is_empty() || components.iter().any(|c| c.eq_ignore_ascii_case(&piece)) {
                    continue;
                }
                components.push(piece);
            }
        }
        Self::from_components(components)
    }

    fn from_components(mut parts: Vec<String>) -> Option<Self> {
        while parts
            .last()
            .is_some_and(|p| UK_SUFFIXES.contains(&p.to_lowercase().as_str()))
        {
            parts.pop();
        }
        if parts.is_empty() {
            return None;
        }

        let mut country = parts.last().and_then(|p| Country::from_name(p));
        if let Some(c) = country {
            if let Some(last) = parts.last_mut() {
                *last = c.name().to_string();
            }
        }

        let searchable = if country.is_some() { parts.len() - 1 } else { parts.len() };
        let mut county = None;
        for idx in (0..searchable).rev() {
            // the first part is usually the town; only read it as a county when alone
            if idx == 0 && parts.len() > 1 && country.is_none() {
                break;
            }
            let found = match country {
                Some(c) => normalize_county(c, &parts[idx]).map(|name| (c, name)),
                None => infer_county(&parts[idx]),
            };
            if let Some((c, name)) = found {
                parts[idx] = name.to_string();
                county = Some(name.to_string());
                if country.is_none() {
                    country = Some(c);
                    parts.push(c.name().to_string());
                }
                break;
            }
        }

        Some(Self {
            text: parts.join(", "),
            county,
            country,
        })
    }

    pub fn is_in(&self, country: Country) -> bool {
        self.country == Some(country)
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(raw: &str) -> Place {
        Place::normalize(raw).unwrap()
    }

    #[test]
    fn scottish_historic_counties() {
        let p = place("Dundee, Forfarshire, Scotland");
        assert_eq!(p.text, "Dundee, Angus, Scotland");
        assert_eq!(p.county.as_deref(), Some("Angus"));
        assert_eq!(p.country, Some(Country::Scotland));

        assert_eq!(place("Haddington, Haddingtonshire").text, "Haddington, East Lothian, Scotland");
        assert_eq!(place("Leith, Edinburghshire, Scotland").county.as_deref(), Some("Midlothian"));
        assert_eq!(place("Elgin, Elginshire, Scotland, United Kingdom").text, "Elgin, Morayshire, Scotland");
        assert_eq!(place("Bo'ness, Linlithgowshire, Scotland").county.as_deref(), Some("West Lothian"));
    }

    #[test]
    fn english_aliases_infer_country() {
        let p = place("Portsmouth, Hants");
        assert_eq!(p.text, "Portsmouth, Hampshire, England");
        assert_eq!(p.country, Some(Country::England));
        assert_eq!(place("Ludlow, Salop, England").county.as_deref(), Some("Shropshire"));
    }

    #[test]
    fn welsh_aliases() {
        let p = place("Cardiff, Glam");
        assert_eq!(p.text, "Cardiff, Glamorgan, Wales");
        assert!(p.is_in(Country::Wales));
    }

    #[test]
    fn uk_suffix_dropped_and_usa_canonical() {
        assert_eq!(place("Bideford, Devon, England, UK").text, "Bideford, Devon, England");
        let p = place("Boston, Suffolk, Massachusetts, USA");
        assert_eq!(p.text, "Boston, Suffolk, Massachusetts, United States");
        assert_eq!(p.county.as_deref(), Some("Massachusetts"));
    }

    #[test]
    fn empty_components_collapsed() {
        assert_eq!(place(" Bideford ,,  Devon ").text, "Bideford, Devon, England");
        assert_eq!(Place::normalize(" , , "), None);
        assert_eq!(Place::normalize("United Kingdom"), None);
    }

    #[test]
    fn unknown_place_kept_without_country() {
        let p = place("Somewhere Unlisted");
        assert_eq!(p.text, "Somewhere Unlisted");
        assert_eq!(p.country, None);
        assert_eq!(p.county, None);
    }

    #[test]
    fn town_named_like_county_not_treated_as_county() {
        let p = place("Perth, Western Australia");
        assert_eq!(p.text, "Perth, Western Australia, Australia");
        assert_eq!(p.country, Some(Country::Australia));
    }

    #[test]
    fn from_parts_drops_repeats() {
        let p = Place::from_parts(&["Bideford", "", "Devon", "devon"]).unwrap();
        assert_eq!(p.text, "Bideford, Devon, England");
    }

    #[test]
    fn lone_county() {
        let p = place("Devon");
        assert_eq!(p.text, "Devon, England");
        assert_eq!(p.county.as_deref(), Some("Devon"));
    }
}
