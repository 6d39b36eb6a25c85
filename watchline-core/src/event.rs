//! Dataset records as delivered by the loader, and the immutable `Event`
//! values the engine works with.

use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};

/// Stable identifier of an event; also keys its marker in the host.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(pub String);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Record ids show up as numbers or strings depending on who wrote the file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl RecordId {
    fn into_event_id(self) -> EventId {
        match self {
            RecordId::Number(n) => EventId(n.to_string()),
            RecordId::Text(s) => EventId(s),
        }
    }
}

/// One entry of `movies.json`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub watched_date: Option<String>,
    /// Accepted as a fallback for `watched_date` by the debug entry point.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub review_summary: Option<String>,
    #[serde(default)]
    pub review_text: Option<String>,
}

/// A dated cover on the timeline. Immutable once loaded; everything the
/// layout derives from it lives in a side table keyed by `id`.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub year: Option<i32>,
    pub date: NaiveDate,
    pub rating: Option<f64>,
    pub cover_url: Option<String>,
    pub summary: Option<String>,
    pub review_text: Option<String>,
}

impl Event {
    /// Build an event from a record at position `index` of the dataset.
    /// Missing ids fall back to `index + 1`, missing titles to "Untitled".
    pub fn from_record(record: MovieRecord, index: usize) -> TimelineResult<Self> {
        let raw_date = record
            .watched_date
            .or(record.date)
            .ok_or(TimelineError::MissingDate { index })?;
        let date = parse_calendar_date(&raw_date)?;
        let id = record
            .id
            .map(RecordId::into_event_id)
            .unwrap_or_else(|| EventId((index + 1).to_string()));
        Ok(Self {
            id,
            title: record
                .title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "Untitled".to_string()),
            year: record.year,
            date,
            rating: record.rating,
            cover_url: record.cover_url.filter(|u| !u.is_empty()),
            summary: record.review_summary.filter(|s| !s.is_empty()),
            review_text: record.review_text.filter(|s| !s.is_empty()),
        })
    }

    /// Marker caption: "Title (Year)" or just the title.
    pub fn caption(&self) -> String {
        match self.year {
            Some(year) => format!("{} ({})", self.title, year),
            None => self.title.clone(),
        }
    }
}

/// Parse `YYYY-MM-DD`; any time-of-day suffix (`T...`) is ignored.
pub fn parse_calendar_date(input: &str) -> TimelineResult<NaiveDate> {
    let trimmed = input.trim();
    let day_part = trimmed.split('T').next().unwrap_or(trimmed);
    NaiveDate::parse_from_str(day_part, "%Y-%m-%d")
        .map_err(|e| TimelineError::invalid_date(input, e))
}

/// Parse a JSON array of records.
pub fn parse_records(json: &str) -> TimelineResult<Vec<MovieRecord>> {
    Ok(serde_json::from_str(json)?)
}

/// Convert records to events, failing on the first record whose date is
/// missing or malformed. Later records repeating an id are dropped.
pub fn events_from_records(records: Vec<MovieRecord>) -> TimelineResult<Vec<Event>> {
    let mut seen = HashSet::new();
    let mut events = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        let event = Event::from_record(record, index)?;
        if !seen.insert(event.id.clone()) {
            log::warn!("Dropping record {index}: duplicate id {}", event.id);
            continue;
        }
        events.push(event);
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_records_mixed_ids() {
        let json = r#"[
            {"id": 7, "title": "Halloween", "year": 1978, "watched_date": "2025-03-02", "rating": 4.5},
            {"id": "raging-bull", "title": "Raging Bull", "watched_date": "2025-04-10"}
        ]"#;
        let events = events_from_records(parse_records(json).unwrap()).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, EventId::from("7"));
        assert_eq!(events[0].caption(), "Halloween (1978)");
        assert_eq!(events[0].rating, Some(4.5));
        assert_eq!(events[1].id, EventId::from("raging-bull"));
        assert_eq!(events[1].caption(), "Raging Bull");
        assert_eq!(events[1].date, NaiveDate::from_ymd_opt(2025, 4, 10).unwrap());
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let record = MovieRecord {
            date: Some("2025-01-05".into()),
            cover_url: Some(String::new()),
            ..Default::default()
        };
        let event = Event::from_record(record, 4).unwrap();
        assert_eq!(event.id, EventId::from("5"));
        assert_eq!(event.title, "Untitled");
        assert_eq!(event.cover_url, None);
    }

    #[test]
    fn test_time_of_day_is_ignored() {
        let date = parse_calendar_date("2025-06-15T23:59:00Z").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 6, 15).unwrap());
    }

    #[test]
    fn test_bad_date_fails_loudly() {
        let records = vec![MovieRecord {
            title: Some("Bad".into()),
            watched_date: Some("June 15th".into()),
            ..Default::default()
        }];
        let err = events_from_records(records).unwrap_err();
        assert!(matches!(err, TimelineError::InvalidDate { .. }));

        let err = Event::from_record(MovieRecord::default(), 2).unwrap_err();
        assert!(matches!(err, TimelineError::MissingDate { index: 2 }));
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let json = r#"[
            {"id": 1, "title": "A", "watched_date": "2025-01-01"},
            {"id": 1, "title": "B", "watched_date": "2025-01-02"}
        ]"#;
        let events = events_from_records(parse_records(json).unwrap()).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "A");
    }

    #[test]
    fn test_non_array_document_is_rejected() {
        assert!(matches!(
            parse_records(r#"{"movies": []}"#),
            Err(TimelineError::Dataset(_))
        ));
    }
}
