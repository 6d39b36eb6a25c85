use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex should compile"));
static SLUG_SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s_]+").expect("separator regex should compile"));
static SLUG_INVALID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9-]").expect("slug regex should compile"));
static REPEATED_DASH: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").expect("dash regex should compile"));
static TITLE_INVALID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9 ]").expect("title regex should compile"));
static PAREN_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\d{4}\)").expect("year regex should compile"));
static BARE_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{4}\b").expect("year regex should compile"));
static TITLE_PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,:]").expect("punctuation regex should compile"));

/// A movie to look up, optionally pinned to a release year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieQuery {
    pub title: String,
    pub year: Option<i32>,
}

impl MovieQuery {
    pub fn new(title: impl Into<String>, year: Option<i32>) -> Self {
        Self {
            title: title.into(),
            year,
        }
    }

    /// Parse `"Title:Year"` or a bare title. When the text after the last
    /// colon is not a year the whole item is the title.
    pub fn parse(item: &str) -> Self {
        if let Some((title, year)) = item.rsplit_once(':') {
            if let Ok(year) = year.trim().parse::<i32>() {
                return Self::new(title.trim(), Some(year));
            }
        }
        Self::new(item.trim(), None)
    }
}

/// The lookups run when no items are given on the command line.
pub fn default_queries() -> Vec<MovieQuery> {
    vec![
        MovieQuery::new("The Deer Hunter", Some(1978)),
        MovieQuery::new("Halloween", Some(1978)),
        MovieQuery::new("Raging Bull", Some(1980)),
        MovieQuery::new("History of the World, Part I", Some(1981)),
    ]
}

/// Lowercase, hyphen-separated, ASCII alphanumerics only.
pub fn slugify(text: &str) -> String {
    let text = text.trim().to_lowercase().replace('&', " and ");
    let text = SLUG_SEPARATORS.replace_all(&text, "-");
    let text = SLUG_INVALID.replace_all(&text, "");
    let text = REPEATED_DASH.replace_all(&text, "-");
    text.trim_matches('-').to_string()
}

/// Title form used for token matching.
pub fn normalize_title(title: &str) -> String {
    let text = title.trim().to_lowercase().replace('&', " and ");
    let text = TITLE_INVALID.replace_all(&text, "");
    WHITESPACE.replace_all(&text, " ").to_string()
}

/// Search terms to try in order; punctuation in titles often trips up the
/// store search.
pub fn title_variants(title: &str) -> Vec<String> {
    let candidates = [
        title.to_string(),
        title.replace(':', ","),
        title.replace(',', ":"),
        TITLE_PUNCTUATION.replace_all(title, "").to_string(),
        format!("{title} Mel Brooks"),
    ];
    let mut variants: Vec<String> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !variants.contains(&candidate) {
            variants.push(candidate);
        }
    }
    variants
}

/// `slug-YEAR.jpg`, with year tokens already in the title stripped so they
/// are not doubled.
pub fn cover_filename(title: &str, year: Option<i32>) -> String {
    let Some(year) = year else {
        return format!("{}.jpg", slugify(title));
    };
    let stripped = PAREN_YEAR.replace_all(title, "");
    let stripped = BARE_YEAR.replace_all(&stripped, "");
    let stripped = WHITESPACE.replace_all(&stripped, " ");
    format!("{}-{year}.jpg", slugify(stripped.trim()))
}
