use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};

use crate::config::TickThresholds;
use crate::scale::ScaleState;

pub const MONTH_TICK_HALF: f64 = 12.0;
pub const MONTH_TICK_WIDTH: f64 = 3.0;
pub const MONTH_LABEL_Y: f64 = 10.0;
pub const MONTH_FONT_PX: f64 = 16.0;
pub const DAY_FONT_PX: f64 = 12.0;
pub const DOT_RADIUS: f64 = 5.0;
pub const HOVER_DOT_RADIUS: f64 = 7.0;
/// Gap between an anchor dot and a day number.
pub const DAY_LABEL_MARGIN: f64 = 6.0;

/// Extra day indices drawn past each viewport edge.
const DAY_INDEX_SLACK: i64 = 2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DayTick {
    /// Half the tick length, drawn symmetrically across the baseline.
    pub half_len: f64,
    pub width: f64,
    /// Multiples of ten use the brighter line colour.
    pub emphasis: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelSide {
    Above,
    Below,
}

pub fn daily_ticks_visible(px_per_day: f64, thresholds: &TickThresholds) -> bool {
    px_per_day >= thresholds.daily_ticks
}

/// Day indices (from the range start) that touch the viewport, with a little
/// slack on both sides, clipped to `[0, total_days]`.
pub fn visible_day_indices(
    scale: &ScaleState,
    scroll_left: f64,
    viewport_width: f64,
    total_days: i64,
) -> RangeInclusive<i64> {
    let first = ((scroll_left - scale.pad_left) / scale.px_per_day).floor() as i64 - DAY_INDEX_SLACK;
    let last = ((scroll_left + viewport_width - scale.pad_left) / scale.px_per_day).ceil() as i64
        + DAY_INDEX_SLACK;
    first.max(0)..=last.min(total_days)
}

/// Viewport x of day index `index`, snapped to the pixel centre for crisp
/// one-pixel lines.
pub fn day_x(scale: &ScaleState, index: i64, scroll_left: f64) -> f64 {
    (scale.pad_left + index as f64 * scale.px_per_day - scroll_left).round() + 0.5
}

/// Tick for a day of month; the 1st has none since the month tick covers it.
pub fn day_tick(day_of_month: u32, px_per_day: f64, thresholds: &TickThresholds) -> Option<DayTick> {
    if day_of_month == 1 {
        return None;
    }
    if day_of_month % 10 == 0 && px_per_day >= thresholds.ten_emphasis {
        Some(DayTick {
            half_len: 10.0,
            width: 2.0,
            emphasis: true,
        })
    } else {
        Some(DayTick {
            half_len: 6.0,
            width: 1.0,
            emphasis: false,
        })
    }
}

/// Day numbers appear for watch days once zoomed in far enough, and always
/// for days whose cover is hovered.
pub fn show_day_number(
    is_watch_day: bool,
    hovered: bool,
    px_per_day: f64,
    thresholds: &TickThresholds,
) -> bool {
    hovered || (is_watch_day && px_per_day >= thresholds.day_numbers)
}

/// Numbers go below the baseline only when the day has covers above and none
/// below.
pub fn label_side(has_cover_above: bool, has_cover_below: bool) -> LabelSide {
    if has_cover_above && !has_cover_below {
        LabelSide::Below
    } else {
        LabelSide::Above
    }
}

/// Top of a day number's text box.
pub fn day_label_y(baseline_y: f64, side: LabelSide, hovered: bool) -> f64 {
    let radius = if hovered { HOVER_DOT_RADIUS } else { DOT_RADIUS };
    match side {
        LabelSide::Below => baseline_y + radius + DAY_LABEL_MARGIN,
        LabelSide::Above => baseline_y - radius - DAY_LABEL_MARGIN - DAY_FONT_PX,
    }
}

/// "Jan 2025"
pub fn month_label(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

pub fn day_number(date: NaiveDate) -> String {
    date.day().to_string()
}
