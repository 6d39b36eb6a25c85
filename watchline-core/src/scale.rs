use chrono::NaiveDate;

use crate::config::ScaleConfig;
use crate::range::TimelineRange;

/// Zoom level and side paddings. Paddings only ever grow during a session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleState {
    pub px_per_day: f64,
    pub pad_left: f64,
    pub pad_right: f64,
}

impl ScaleState {
    pub fn new(config: &ScaleConfig) -> Self {
        Self {
            px_per_day: config.clamp_px_per_day(config.initial_px_per_day),
            pad_left: config.base_padding,
            pad_right: config.base_padding,
        }
    }

    /// Content x of `date`, rounded to whole pixels.
    pub fn date_to_x(&self, range: &TimelineRange, date: NaiveDate) -> f64 {
        self.day_offset_to_x(range.days_from_start(date)).round()
    }

    /// Unrounded content x of a (possibly fractional) day offset.
    pub fn day_offset_to_x(&self, days: f64) -> f64 {
        self.pad_left + days * self.px_per_day
    }

    /// Fractional day offset under viewport x `x` for the given scroll offset.
    pub fn x_to_day_offset(&self, x: f64, scroll_left: f64) -> f64 {
        (scroll_left + x - self.pad_left) / self.px_per_day
    }

    /// Total scrollable width for a range of `total_days`.
    pub fn content_width(&self, total_days: i64) -> f64 {
        self.pad_left + total_days as f64 * self.px_per_day + self.pad_right
    }

    /// Widen the paddings so that they are at least `left` and `right`.
    /// Returns true when either padding grew.
    pub fn grow_padding(&mut self, left: f64, right: f64) -> bool {
        let mut grew = false;
        if left > self.pad_left {
            self.pad_left = left;
            grew = true;
        }
        if right > self.pad_right {
            self.pad_right = right;
            grew = true;
        }
        grew
    }
}

/// Largest valid scroll offset for a content width and viewport width.
pub fn max_scroll(content_width: f64, viewport_width: f64) -> f64 {
    (content_width - viewport_width).max(0.0)
}

/// Clamp a scroll offset into `[0, max_scroll]`.
pub fn clamp_scroll(scroll_left: f64, content_width: f64, viewport_width: f64) -> f64 {
    scroll_left.clamp(0.0, max_scroll(content_width, viewport_width))
}
