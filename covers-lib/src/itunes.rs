use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Datelike};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::error::CoverError;
use crate::query::{cover_filename, normalize_title, title_variants, MovieQuery};

const ITUNES_SEARCH_URL: &str = "https://itunes.apple.com/search";
const SEARCH_TIMEOUT: Duration = Duration::from_secs(15);
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);
/// Edge length requested when upscaling artwork URLs.
const ARTWORK_SIZE: u32 = 1000;
const YEAR_BONUS: f64 = 0.25;

static ARTWORK_SIZE_SEGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/(\d+)x(\d+)(bb.*?\.(jpg|png))$").expect("artwork regex should compile")
});

// ── API types ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

/// The fields of an iTunes search hit this tool cares about.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub track_name: Option<String>,
    pub collection_name: Option<String>,
    pub release_date: Option<String>,
    pub artwork_url100: Option<String>,
    pub artwork_url60: Option<String>,
}

impl SearchResult {
    pub fn title(&self) -> &str {
        self.track_name
            .as_deref()
            .or(self.collection_name.as_deref())
            .unwrap_or("")
    }

    /// Year of `releaseDate`, which is usually RFC 3339 but only the leading
    /// year is relied on.
    pub fn release_year(&self) -> Option<i32> {
        let date = self.release_date.as_deref()?;
        DateTime::parse_from_rfc3339(date)
            .map(|d| d.year())
            .ok()
            .or_else(|| date.get(..4)?.parse().ok())
    }

    pub fn artwork_url(&self) -> Option<&str> {
        self.artwork_url100
            .as_deref()
            .or(self.artwork_url60.as_deref())
    }
}

// ── Matching ──────────────────────────────────────────────────────────────

/// Highest scoring hit: the share of query title tokens present in the hit's
/// title, plus a bonus when both years are known and at most one apart.
/// Ties go to the earlier hit.
pub fn pick_best_result<'a>(
    title: &str,
    year: Option<i32>,
    results: &'a [SearchResult],
) -> Option<&'a SearchResult> {
    let query = normalize_title(title);
    let query_tokens: HashSet<&str> = query.split_whitespace().collect();

    let mut best: Option<(f64, &SearchResult)> = None;
    for result in results {
        let candidate = normalize_title(result.title());
        let overlap = candidate
            .split_whitespace()
            .collect::<HashSet<_>>()
            .intersection(&query_tokens)
            .count();
        let mut score = overlap as f64 / query_tokens.len().max(1) as f64;
        if let (Some(wanted), Some(released)) = (year, result.release_year()) {
            if (wanted - released).abs() <= 1 {
                score += YEAR_BONUS;
            }
        }
        if best.map_or(true, |(top, _)| score > top) {
            best = Some((score, result));
        }
    }
    best.map(|(_, result)| result)
}

/// Swap the `WxH` size segment of an artwork URL for `size x size`.
pub fn upscale_artwork(url: &str, size: u32) -> String {
    ARTWORK_SIZE_SEGMENT
        .replace(url, format!("/{size}x{size}${{3}}").as_str())
        .into_owned()
}

// ── Client ────────────────────────────────────────────────────────────────

pub struct CoverClient {
    http: reqwest::Client,
}

impl CoverClient {
    pub fn new() -> Result<Self, CoverError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("fetch-covers/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http })
    }

    /// Up to ten movie hits for `term` from the US store.
    pub async fn search(&self, term: &str) -> Result<Vec<SearchResult>, CoverError> {
        let response = self
            .http
            .get(ITUNES_SEARCH_URL)
            .query(&[
                ("term", term),
                ("entity", "movie"),
                ("media", "movie"),
                ("limit", "10"),
                ("country", "US"),
            ])
            .timeout(SEARCH_TIMEOUT)
            .send()
            .await?
            .error_for_status()?;
        let body: SearchResponse = response.json().await?;
        Ok(body.results)
    }

    /// Download `url` to `dest`, creating parent directories.
    pub async fn download(&self, url: &str, dest: &Path) -> Result<(), CoverError> {
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| CoverError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        let bytes = self
            .http
            .get(url)
            .timeout(DOWNLOAD_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        tokio::fs::write(dest, &bytes)
            .await
            .map_err(|source| CoverError::Io {
                path: dest.to_path_buf(),
                source,
            })
    }

    /// Look `query` up and save its artwork into `covers_dir`. Returns the
    /// saved file name, or `None` when nothing usable was found.
    pub async fn fetch_cover(
        &self,
        query: &MovieQuery,
        covers_dir: &Path,
    ) -> Result<Option<String>, CoverError> {
        let mut found: Option<(String, Vec<SearchResult>)> = None;
        for term in title_variants(&query.title) {
            match self.search(&term).await {
                Ok(results) if !results.is_empty() => {
                    found = Some((term, results));
                    break;
                }
                Ok(_) => log::debug!("No results for {term:?}"),
                Err(e) => log::warn!("Search for {term:?} failed: {e}"),
            }
        }
        let Some((term, results)) = found else {
            return Ok(None);
        };
        let Some(best) = pick_best_result(&term, query.year, &results) else {
            return Ok(None);
        };
        let Some(artwork) = best.artwork_url() else {
            log::debug!("Best hit for {:?} has no artwork", query.title);
            return Ok(None);
        };

        let title = best.track_name.as_deref().unwrap_or(&query.title);
        let year = query.year.or_else(|| best.release_year());
        let filename = cover_filename(title, year);
        self.download(&upscale_artwork(artwork, ARTWORK_SIZE), &covers_dir.join(&filename))
            .await?;
        Ok(Some(filename))
    }
}
