//! Poster artwork lookup against Apple's iTunes Search API.
//!
//! Queries are matched by normalised title token overlap, with a bonus for a
//! release year within one of the requested year; the winning artwork URL is
//! upscaled and saved under a slugged file name.

pub mod error;
pub mod itunes;
pub mod query;

pub use error::CoverError;
pub use itunes::{pick_best_result, upscale_artwork, CoverClient, SearchResult};
pub use query::{cover_filename, default_queries, normalize_title, slugify, title_variants, MovieQuery};
