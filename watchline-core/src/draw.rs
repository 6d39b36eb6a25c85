//! One full redraw of the visible slice of the timeline.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};

use crate::config::TickThresholds;
use crate::event::{Event, EventId};
use crate::host::{Fill, GradientStop, Point, Rect, Stroke, Surface, TextStyle};
use crate::layout::MarkerLayout;
use crate::range::TimelineRange;
use crate::scale::ScaleState;
use crate::ticks::{
    daily_ticks_visible, day_label_y, day_number, day_tick, day_x, label_side, month_label,
    show_day_number, visible_day_indices, DAY_FONT_PX, DOT_RADIUS, HOVER_DOT_RADIUS,
    MONTH_FONT_PX, MONTH_LABEL_Y, MONTH_TICK_HALF, MONTH_TICK_WIDTH,
};

// ── Palette ───────────────────────────────────────────────────────────────

/// Colours used by the painter. Any CSS colour string the surface accepts.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    pub line: String,
    pub line_dim: String,
    pub highlight: String,
    pub text_dim: String,
    pub glow: String,
    /// Top, middle and bottom of the soft band under the baseline.
    pub band: [String; 3],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            line: "#334455".into(),
            line_dim: "#2a3947".into(),
            highlight: "#8fbaff".into(),
            text_dim: "#9aa4ad".into(),
            glow: "rgba(140,180,255,0.7)".into(),
            band: [
                "rgba(51,68,85,0)".into(),
                "rgba(51,68,85,0.15)".into(),
                "rgba(51,68,85,0)".into(),
            ],
        }
    }
}

// Visibility margins past the viewport edges, in CSS px
const MONTH_MARGIN: f64 = 80.0;
const HOVER_LABEL_MARGIN: f64 = 50.0;
const EVENT_MARGIN: f64 = 10.0;

const BAND_ABOVE: f64 = 30.0;
const BAND_BELOW: f64 = 60.0;

/// Read-only view of everything one frame draws.
pub struct FrameScene<'a> {
    pub events: &'a [Event],
    /// Parallel to `events`.
    pub markers: &'a [MarkerLayout],
    pub hovered: &'a HashSet<EventId>,
    pub range: &'a TimelineRange,
    pub scale: &'a ScaleState,
    pub scroll_left: f64,
    pub width: f64,
    pub height: f64,
    pub baseline_y: f64,
    pub thresholds: &'a TickThresholds,
    pub palette: &'a Palette,
}

/// Per-date lookups used to decide which day numbers show and where.
#[derive(Default)]
struct DayIndex {
    watch: HashSet<NaiveDate>,
    above: HashSet<NaiveDate>,
    below: HashSet<NaiveDate>,
    hovered: HashSet<NaiveDate>,
    /// Hovered dates in event order, for the zoomed-out fallback pass.
    hovered_in_order: Vec<NaiveDate>,
}

impl DayIndex {
    fn build(scene: &FrameScene<'_>) -> Self {
        let mut index = Self::default();
        for (event, marker) in scene.events.iter().zip(scene.markers) {
            index.watch.insert(event.date);
            if marker.lane_sign < 0 {
                index.above.insert(event.date);
            } else {
                index.below.insert(event.date);
            }
            if scene.hovered.contains(&event.id) {
                index.hovered.insert(event.date);
                index.hovered_in_order.push(event.date);
            }
        }
        index
    }

    fn label_y(&self, date: NaiveDate, baseline_y: f64, hovered: bool) -> f64 {
        let side = label_side(self.above.contains(&date), self.below.contains(&date));
        day_label_y(baseline_y, side, hovered)
    }
}

/// Paint the baseline, month and day ticks with labels, the soft band,
/// connectors and anchor dots, in that order.
pub fn paint<S: Surface + ?Sized>(surface: &mut S, scene: &FrameScene<'_>, dpr: f64) {
    let palette = scene.palette;
    let cy = scene.baseline_y;
    let width = scene.width;
    surface.begin_frame(dpr, width, scene.height);

    surface.stroke_line(
        Point::new(0.0, cy),
        Point::new(width, cy),
        &Stroke {
            color: &palette.line_dim,
            width: 2.0,
            glow: None,
        },
    );

    // ── Months ──
    let month_stroke = Stroke {
        color: &palette.line,
        width: MONTH_TICK_WIDTH,
        glow: None,
    };
    let month_text = TextStyle {
        font_px: MONTH_FONT_PX,
        color: &palette.text_dim,
        glow: None,
    };
    for month in scene.range.month_starts() {
        let x = scene.scale.date_to_x(scene.range, month) - scene.scroll_left;
        if x < -MONTH_MARGIN || x > width + MONTH_MARGIN {
            continue;
        }
        surface.stroke_line(
            Point::new(x, cy - MONTH_TICK_HALF),
            Point::new(x, cy + MONTH_TICK_HALF),
            &month_stroke,
        );
        surface.fill_text(&month_label(month), Point::new(x, MONTH_LABEL_Y), &month_text);
    }

    // ── Days ──
    let days = DayIndex::build(scene);
    let px = scene.scale.px_per_day;
    if daily_ticks_visible(px, scene.thresholds) {
        for di in visible_day_indices(scene.scale, scene.scroll_left, width, scene.range.total_days()) {
            let Some(date) = scene.range.date_at(di) else { continue };
            let x = day_x(scene.scale, di, scene.scroll_left);

            if let Some(tick) = day_tick(date.day(), px, scene.thresholds) {
                let color = if tick.emphasis { &palette.line } else { &palette.line_dim };
                surface.stroke_line(
                    Point::new(x, cy - tick.half_len),
                    Point::new(x, cy + tick.half_len),
                    &Stroke {
                        color,
                        width: tick.width,
                        glow: None,
                    },
                );
            }

            let hovered = days.hovered.contains(&date);
            if show_day_number(days.watch.contains(&date), hovered, px, scene.thresholds) {
                let y = days.label_y(date, cy, hovered);
                surface.fill_text(
                    &day_number(date),
                    Point::new(x, y),
                    &TextStyle {
                        font_px: DAY_FONT_PX,
                        color: if hovered { &palette.highlight } else { &palette.text_dim },
                        glow: hovered.then_some(palette.glow.as_str()),
                    },
                );
            }
        }
    } else {
        // Hovered covers still get their day number while zoomed out
        let style = TextStyle {
            font_px: DAY_FONT_PX,
            color: &palette.highlight,
            glow: Some(palette.glow.as_str()),
        };
        for &date in &days.hovered_in_order {
            let di = (date - scene.range.start()).num_days();
            let x = day_x(scene.scale, di, scene.scroll_left);
            if x < -HOVER_LABEL_MARGIN || x > width + HOVER_LABEL_MARGIN {
                continue;
            }
            let y = days.label_y(date, cy, true);
            surface.fill_text(&day_number(date), Point::new(x, y), &style);
        }
    }

    surface.fill_gradient_band(
        Rect {
            x: 0.0,
            y: cy - BAND_ABOVE,
            width,
            height: BAND_ABOVE + BAND_BELOW,
        },
        &[
            GradientStop {
                offset: 0.0,
                color: &palette.band[0],
            },
            GradientStop {
                offset: 0.6,
                color: &palette.band[1],
            },
            GradientStop {
                offset: 1.0,
                color: &palette.band[2],
            },
        ],
    );

    // ── Events ──
    let visible: Vec<(f64, &MarkerLayout, bool)> = scene
        .events
        .iter()
        .zip(scene.markers)
        .filter_map(|(event, marker)| {
            let x = scene.scale.date_to_x(scene.range, event.date) - scene.scroll_left;
            (x >= -EVENT_MARGIN && x <= width + EVENT_MARGIN)
                .then(|| (x, marker, scene.hovered.contains(&event.id)))
        })
        .collect();

    for &(x, marker, hovered) in &visible {
        let Some(edge) = marker.edge_y() else { continue };
        surface.stroke_line(
            Point::new(x, cy),
            Point::new(x, edge),
            &Stroke {
                color: if hovered { &palette.highlight } else { &palette.line_dim },
                width: if hovered { 4.0 } else { 2.0 },
                glow: hovered.then_some(palette.glow.as_str()),
            },
        );
    }

    for &(x, _, hovered) in &visible {
        surface.fill_circle(
            Point::new(x, cy),
            if hovered { HOVER_DOT_RADIUS } else { DOT_RADIUS },
            &Fill {
                color: if hovered { &palette.highlight } else { &palette.line },
                glow: hovered.then_some(palette.glow.as_str()),
            },
        );
    }
}
