/// Result alias for the fallible (boundary) operations of the engine.
pub type TimelineResult<T> = Result<T, TimelineError>;

/// Failures that can only arise at the engine's boundary: parsing dataset
/// records and resolving caller-supplied identifiers. Geometry never fails.
#[derive(thiserror::Error, Debug)]
pub enum TimelineError {
    /// A calendar date string could not be parsed as `YYYY-MM-DD`.
    #[error("invalid date {input:?}: {source}")]
    InvalidDate {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    /// A dataset record carried neither `watched_date` nor `date`.
    #[error("record {index} has no watched date")]
    MissingDate { index: usize },

    /// The dataset document was not a JSON array of records.
    #[error("malformed dataset: {0}")]
    Dataset(#[from] serde_json::Error),

    /// A marker callback referenced an event that is not loaded.
    #[error("unknown event id {0}")]
    UnknownEvent(String),
}

impl TimelineError {
    pub fn invalid_date(input: impl Into<String>, source: chrono::ParseError) -> Self {
        Self::InvalidDate {
            input: input.into(),
            source,
        }
    }
}
