use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;
use url::Url;

use crate::error::ExtractFailure;
use crate::page::RawPageRecord;
use crate::parser::blocks::{strip_links, Block};
use crate::parser::{parse_page, ParsedPage};
use crate::sites::{query_param, IntermediateRecord};
use crate::text::clean_value;

use super::{WikiTreeRecord, WikiTreeSpouse, WikiTreeView, SITE};

static ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z' _\-]*-\d+$").unwrap());
static LIFESPAN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\([^()]*\d[^()]*\)\s*$").unwrap());
static LNAB_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.*?)\s*\(([^()]+)\)\s*(.*)$").unwrap());
static TRAILING_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([A-Za-z' _\-]+-\d+\)\s*$").unwrap());
static BORN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^Born\b\s*(.*)$").unwrap());
static DIED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^Died\b\s*(.*)$").unwrap());
static CHILD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(Son|Daughter|Child) of (.+)$").unwrap());
static SPOUSE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(Husband|Wife|Spouse) of (.+)$").unwrap());
static MARRIED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*(?:—|–|-|,)\s*married\b\s*").unwrap());

pub fn extract(page: &RawPageRecord) -> Result<IntermediateRecord, ExtractFailure> {
    let url = Url::parse(&page.url).map_err(|_| SITE.extract_failure())?;
    let parsed = parse_page(&page.content);
    let record = if is_edit_page(&url) {
        edit_page(page, &parsed)?
    } else {
        read_page(page, &url, &parsed)?
    };
    debug!(id = %record.wikitree_id, view = ?record.view, "wikitree profile extracted");
    Ok(IntermediateRecord::Wikitree(record))
}

fn is_edit_page(url: &Url) -> bool {
    query_param(url, "title").is_some_and(|t| t.eq_ignore_ascii_case("Special:EditPerson"))
}

/// Profile id from `/wiki/Gow-822` or `index.php?title=Gow-822`. Namespaced
/// pages (`Special:`, `Space:`, `Category:`) have none.
fn profile_id(url: &Url) -> Option<String> {
    let id = url
        .path()
        .strip_prefix("/wiki/")
        .map(str::to_string)
        .or_else(|| query_param(url, "title"))?;
    ID_RE.is_match(&id).then_some(id)
}

fn new_record(page: &RawPageRecord, view: WikiTreeView, wikitree_id: String) -> WikiTreeRecord {
    WikiTreeRecord {
        url: page.url.clone(),
        captured: page.captured,
        view,
        wikitree_id,
        first_name: None,
        middle_name: None,
        last_name_at_birth: None,
        current_last_name: None,
        gender: None,
        birth_date: None,
        birth_location: None,
        death_date: None,
        death_location: None,
        father: None,
        mother: None,
        spouses: Vec::new(),
    }
}

/// Cleaned text, with WikiTree's "[date unknown]" style placeholders dropped.
fn known(text: &str) -> Option<String> {
    clean_value(text.trim().trim_end_matches('.')).filter(|t| !t.starts_with('['))
}

fn meta(parsed: &ParsedPage, key: &str) -> Option<String> {
    parsed.meta(key).map(strip_links).as_deref().and_then(known)
}

/// "24 Jul 1852 in Dundee, Forfarshire" → date and place text.
fn split_date_place(text: &str) -> (Option<String>, Option<String>) {
    let text = text.trim().trim_end_matches('.');
    if let Some(place) = text.strip_prefix("in ") {
        return (None, known(place));
    }
    match text.split_once(" in ") {
        Some((date, place)) => (known(date), known(place)),
        None => (known(text), None),
    }
}

/// "Margaret (Gow) Brown (1852 - 1931)" → forenames, last name at birth,
/// current last name.
fn split_title_name(title: &str) -> (Option<String>, Option<String>, Option<String>) {
    let name = LIFESPAN_RE.replace(title, "");
    if let Some(caps) = LNAB_RE.captures(&name) {
        return (clean_value(&caps[1]), clean_value(&caps[2]), clean_value(&caps[3]));
    }
    match name.trim().rsplit_once(' ') {
        Some((first, last)) => (clean_value(first), clean_value(last), None),
        None => (clean_value(&name), None, None),
    }
}

fn view(parsed: &ParsedPage) -> WikiTreeView {
    let private = parsed
        .meta("Privacy Level")
        .or_else(|| parsed.meta("Privacy"))
        .is_some_and(|p| p.to_lowercase().contains("private"))
        || parsed
            .sections
            .iter()
            .flat_map(|s| s.texts())
            .any(|t| t.to_lowercase().contains("this profile is private"));
    if private {
        return WikiTreeView::Private;
    }
    let logged_out = parsed.sections.iter().flat_map(|s| &s.blocks).any(|b| match b {
        Block::Link { text, .. } | Block::Text(text) => text.eq_ignore_ascii_case("log in"),
        _ => false,
    });
    if logged_out {
        WikiTreeView::LoggedOut
    } else {
        WikiTreeView::Read
    }
}

fn read_page(page: &RawPageRecord, url: &Url, parsed: &ParsedPage) -> Result<WikiTreeRecord, ExtractFailure> {
    let wikitree_id = meta(parsed, "WikiTree ID")
        .filter(|id| ID_RE.is_match(id))
        .or_else(|| profile_id(url))
        .ok_or_else(|| SITE.extract_failure())?;
    let title = parsed.title().ok_or_else(|| SITE.extract_failure())?;

    let mut record = new_record(page, view(parsed), wikitree_id);
    let (first, lnab, current) = split_title_name(title);
    record.first_name = first;
    record.last_name_at_birth = lnab;
    record.current_last_name = current;
    record.gender = meta(parsed, "Gender");

    let vitals = parsed
        .sections
        .iter()
        .take_while(|s| s.kind != "biography")
        .flat_map(|s| s.texts());
    for line in vitals {
        if let Some(caps) = BORN_RE.captures(line) {
            (record.birth_date, record.birth_location) = split_date_place(&caps[1]);
        } else if let Some(caps) = DIED_RE.captures(line) {
            (record.death_date, record.death_location) = split_date_place(&caps[1]);
        } else if let Some(caps) = CHILD_RE.captures(line) {
            infer_gender(&mut record, &caps[1]);
            let mut parents = caps[2].trim_end_matches('.').splitn(2, " and ").map(known);
            record.father = parents.next().flatten();
            record.mother = parents.next().flatten();
        } else if let Some(caps) = SPOUSE_RE.captures(line) {
            infer_gender(&mut record, &caps[1]);
            if let Some(spouse) = spouse(&caps[2]) {
                record.spouses.push(spouse);
            }
        }
    }
    Ok(record)
}

fn infer_gender(record: &mut WikiTreeRecord, role: &str) {
    if record.gender.is_some() {
        return;
    }
    record.gender = match role {
        "Son" | "Husband" => Some("Male".to_string()),
        "Daughter" | "Wife" => Some("Female".to_string()),
        _ => None,
    };
}

/// "John Brown — married 3 Jun 1874 in Dundee"
fn spouse(text: &str) -> Option<WikiTreeSpouse> {
    let (name, married) = match MARRIED_RE.find(text) {
        Some(m) => (&text[..m.start()], Some(&text[m.end()..])),
        None => (text, None),
    };
    let (marriage_date, marriage_location) = married.map(split_date_place).unwrap_or_default();
    Some(WikiTreeSpouse {
        name: known(name)?,
        marriage_date,
        marriage_location,
    })
}

fn edit_page(page: &RawPageRecord, parsed: &ParsedPage) -> Result<WikiTreeRecord, ExtractFailure> {
    let wikitree_id = meta(parsed, "WikiTree ID")
        .filter(|id| ID_RE.is_match(id))
        .ok_or_else(|| SITE.extract_failure())?;
    let person = |key: &str| meta(parsed, key).map(|v| TRAILING_ID_RE.replace(&v, "").into_owned());

    let mut record = new_record(page, WikiTreeView::Edit, wikitree_id);
    record.first_name = meta(parsed, "Proper First Name").or_else(|| meta(parsed, "First Name"));
    record.middle_name = meta(parsed, "Middle Name");
    record.last_name_at_birth = meta(parsed, "Last Name at Birth");
    record.current_last_name = meta(parsed, "Current Last Name");
    record.gender = meta(parsed, "Gender");
    record.birth_date = meta(parsed, "Birth Date");
    record.birth_location = meta(parsed, "Birth Location");
    record.death_date = meta(parsed, "Death Date");
    record.death_location = meta(parsed, "Death Location");
    record.father = person("Father");
    record.mother = person("Mother");
    if let Some(name) = person("Spouse") {
        record.spouses.push(WikiTreeSpouse {
            name,
            marriage_date: meta(parsed, "Marriage Date"),
            marriage_location: meta(parsed, "Marriage Location"),
        });
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wikitree(url: &str, content: &str) -> Result<WikiTreeRecord, ExtractFailure> {
        extract(&RawPageRecord::new(url, content)).map(|r| match r {
            IntermediateRecord::Wikitree(r) => r,
            other => panic!("expected wikitree record, got {:?}", other),
        })
    }

    #[test]
    fn read_page_vitals() {
        let record = wikitree(
            "https://www.wikitree.com/wiki/Gow-822",
            "# Margaret (Gow) Brown (1852 - 1931)\n\
             Born 24 Jul 1852 in Dundee, Forfarshire, Scotland.\n\
             Daughter of [James Gow](https://www.wikitree.com/wiki/Gow-800) and [Ann Smith](https://www.wikitree.com/wiki/Smith-1)\n\
             Wife of [John Brown](https://www.wikitree.com/wiki/Brown-5) — married 3 Jun 1874 in Dundee, Forfarshire, Scotland\n\
             Died 12 Feb 1931 in Perth, Perthshire, Scotland.\n\
             ## Biography\n\
             Born in Dundee.",
        )
        .unwrap();
        assert_eq!(record.view, WikiTreeView::Read);
        assert_eq!(record.wikitree_id, "Gow-822");
        assert_eq!(record.first_name.as_deref(), Some("Margaret"));
        assert_eq!(record.last_name_at_birth.as_deref(), Some("Gow"));
        assert_eq!(record.current_last_name.as_deref(), Some("Brown"));
        assert_eq!(record.gender.as_deref(), Some("Female"));
        assert_eq!(record.birth_date.as_deref(), Some("24 Jul 1852"));
        assert_eq!(record.birth_location.as_deref(), Some("Dundee, Forfarshire, Scotland"));
        assert_eq!(record.father.as_deref(), Some("James Gow"));
        assert_eq!(record.mother.as_deref(), Some("Ann Smith"));
        assert_eq!(record.spouses[0].name, "John Brown");
        assert_eq!(record.spouses[0].marriage_date.as_deref(), Some("3 Jun 1874"));
        assert_eq!(record.death_location.as_deref(), Some("Perth, Perthshire, Scotland"));
    }

    #[test]
    fn father_only_and_unknown_dates() {
        let record = wikitree(
            "https://www.wikitree.com/wiki/Winbush-11",
            "# John Winbush\nSon of [Thomas Winbush](https://www.wikitree.com/wiki/Winbush-10)\nDied [date unknown] in [location unknown].",
        )
        .unwrap();
        assert_eq!(record.father.as_deref(), Some("Thomas Winbush"));
        assert_eq!(record.mother, None);
        assert_eq!(record.death_date, None);
        assert_eq!(record.death_location, None);
        assert_eq!(record.gender.as_deref(), Some("Male"));
    }

    #[test]
    fn views() {
        let private = wikitree(
            "https://www.wikitree.com/wiki/Davey-2737",
            "# Ivy Davey (1920s - 2000s)\nPrivacy Level: Private",
        )
        .unwrap();
        assert_eq!(private.view, WikiTreeView::Private);
        assert_eq!(private.last_name_at_birth.as_deref(), Some("Davey"));

        let logged_out = wikitree(
            "https://www.wikitree.com/wiki/Kimberlin-117",
            "[Log In](https://www.wikitree.com/index.php?title=Special:Userlogin)\n# John Kimberlin (1800 - 1871)",
        )
        .unwrap();
        assert_eq!(logged_out.view, WikiTreeView::LoggedOut);
    }

    #[test]
    fn edit_page_fields() {
        let record = wikitree(
            "https://www.wikitree.com/index.php?title=Special:EditPerson&u=22280837",
            "# Edit Profile of Charles Pavey\nWikiTree ID: Pavey-342\nProper First Name: Charles\nMiddle Name: William\nLast Name at Birth: Pavey\nGender: Male\nBirth Date: 1886\nFather: [William Pavey](https://www.wikitree.com/wiki/Pavey-300) (Pavey-300)",
        )
        .unwrap();
        assert_eq!(record.view, WikiTreeView::Edit);
        assert_eq!(record.wikitree_id, "Pavey-342");
        assert_eq!(record.middle_name.as_deref(), Some("William"));
        assert_eq!(record.father.as_deref(), Some("William Pavey"));
    }

    #[test]
    fn non_profile_pages_rejected() {
        let err = wikitree("https://www.wikitree.com/wiki/Space:Pavey_Name_Study", "# Pavey Name Study").unwrap_err();
        assert_eq!(err.reason, SITE.extract_failed_message);
        assert!(wikitree("https://www.wikitree.com/wiki/Gow-822", "").is_err());
    }
}
