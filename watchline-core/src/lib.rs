//! Engine for a horizontally scrolling, zoomable date timeline of movie covers.
//!
//! Everything in here is independent of the browser: the front end implements
//! the traits in [`host`] over DOM elements and a canvas, and drives
//! [`TimelineEngine`] from its animation frame callback.

pub mod autoscroll;
pub mod config;
mod debug;
pub mod draw;
pub mod engine;
pub mod error;
pub mod event;
pub mod host;
pub mod layout;
pub mod range;
pub mod scale;
pub mod scheduler;
pub mod ticks;
pub mod zoom;

pub use config::TimelineConfig;
pub use draw::Palette;
pub use engine::{FrameReport, TimelineEngine};
pub use error::{TimelineError, TimelineResult};
pub use event::{events_from_records, parse_records, Event, EventId, MovieRecord};
pub use host::{MarkerHost, MarkerPlacement, ScrollArea, Surface, TimelineHost, ViewportState};
pub use range::TimelineRange;
