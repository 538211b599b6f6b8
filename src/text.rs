//! Small string helpers shared by the generalizers and the citation builders.

/// Trim and collapse every whitespace run to a single space.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `None` for empty, dash-only or question-mark placeholders.
pub fn clean_value(s: &str) -> Option<String> {
    let v = collapse_whitespace(s);
    if v.is_empty() || v.chars().all(|c| matches!(c, '-' | '?' | '.' | '_')) {
        None
    } else {
        Some(v)
    }
}

pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// "BRICKLAYER'S labourer" → "Bricklayer's Labourer". Hyphenated parts are
/// capitalized separately.
pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            word.split('-')
                .map(|part| capitalize_first(&part.to_lowercase()))
                .collect::<Vec<_>>()
                .join("-")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Names transcribed in capitals ("PAVEY") are title-cased; mixed case is kept.
pub fn normalize_name_case(s: &str) -> String {
    if s.chars().any(|c| c.is_lowercase()) {
        s.to_string()
    } else {
        title_case(s)
    }
}

pub fn indefinite_article(word: &str) -> &'static str {
    match word.chars().next().map(|c| c.to_ascii_lowercase()) {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}

/// "Charles" → "Charles'", "Mary" → "Mary's"
pub fn possessive(name: &str) -> String {
    if name.ends_with('s') {
        format!("{}'", name)
    } else {
        format!("{}'s", name)
    }
}

/// Join with commas and a final "and".
pub fn join_and(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [one] => one.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}
