use once_cell::sync::Lazy;
use regex::Regex;

use crate::catalog::MovieCandidate;

static PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[,.'’"?!]"#).unwrap());
static SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*[:\-]\s*").unwrap());
static AMPERSAND: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*&\s*").unwrap());

/// Normalize a title for comparison.
///
/// Lower-cases, strips common punctuation, turns colon/hyphen separators
/// into a single space and spells out ampersands, so cosmetic variants like
/// "Spider-Man: Homecoming" and "Spider-Man - Homecoming" compare equal.
/// Whitespace runs inside the title are left alone; comparisons are exact
/// string equality on the normalized form, never substring or fuzzy.
pub fn normalize_title(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped = PUNCTUATION.replace_all(&lowered, "");
    let separated = SEPARATOR.replace_all(&stripped, " ");
    let spelled = AMPERSAND.replace_all(&separated, " and ");
    spelled.trim().to_string()
}

/// Whether a search candidate satisfies a target title.
///
/// Either the candidate's title or its original title may match on its own.
/// A candidate carrying neither field never matches.
pub fn titles_match(candidate: &MovieCandidate, target: &str) -> bool {
    let target = normalize_title(target);
    let field_matches = |field: Option<&str>| {
        field.map(|value| normalize_title(value) == target).unwrap_or(false)
    };
    field_matches(candidate.title.as_deref()) || field_matches(candidate.original_title.as_deref())
}
