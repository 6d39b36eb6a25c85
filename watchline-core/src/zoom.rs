//! Cursor-anchored zoom.
//!
//! The day under the cursor is captured before anything changes; after the
//! new scale is applied the scroll offset is solved so that the same day lands
//! back under the cursor. Paddings are widened (never narrowed) when the new
//! scale would otherwise push the anchor past the edge of the content.

use crate::config::{ScaleConfig, ZoomConfig};
use crate::range::TimelineRange;
use crate::scale::{clamp_scroll, ScaleState};

/// Outcome of one zoom step; the caller applies `scroll_left` and
/// `content_width` to the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomStep {
    pub px_per_day: f64,
    pub scroll_left: f64,
    pub content_width: f64,
    /// Day offset that was under the cursor before the step.
    pub anchor_days: f64,
    pub padding_grew: bool,
}

/// Wheel delta to multiplicative zoom factor. Positive deltas (wheel down)
/// shrink px per day.
pub fn wheel_factor(delta: f64, zoom: &ZoomConfig) -> f64 {
    (-delta * zoom.sensitivity).exp()
}

/// Apply `factor` to the scale with the cursor at viewport x `cursor_x`.
///
/// Returns `None` (and leaves `scale` untouched) when the clamped change in
/// px per day is below `zoom.min_change`.
pub fn zoom_at_cursor(
    scale: &mut ScaleState,
    range: &TimelineRange,
    scroll_left: f64,
    viewport_width: f64,
    cursor_x: f64,
    factor: f64,
    bounds: &ScaleConfig,
    zoom: &ZoomConfig,
) -> Option<ZoomStep> {
    let anchor_days = scale.x_to_day_offset(cursor_x, scroll_left);

    let new_px = bounds.clamp_px_per_day(scale.px_per_day * factor);
    if (new_px - scale.px_per_day).abs() < zoom.min_change {
        return None;
    }
    scale.px_per_day = new_px;

    // The anchor must be placeable at cursor_x for any day in the range:
    // day 0 needs pad_left >= cursor_x, the last day needs
    // pad_right >= viewport_width - cursor_x.
    let need_left = cursor_x;
    let need_right = viewport_width - cursor_x;
    let padding_grew = scale.grow_padding(need_left, need_right);
    if padding_grew {
        log::debug!(
            "Zoom padding grew to left={:.0} right={:.0}",
            scale.pad_left,
            scale.pad_right
        );
    }

    let content_width = scale.content_width(range.total_days());
    let target = scale.day_offset_to_x(anchor_days) - cursor_x;
    let scroll_left = clamp_scroll(target, content_width, viewport_width);

    Some(ZoomStep {
        px_per_day: new_px,
        scroll_left,
        content_width,
        anchor_days,
        padding_grew,
    })
}
