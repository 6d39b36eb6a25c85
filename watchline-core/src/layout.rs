//! Cover placement in alternating lanes around the baseline.
//!
//! Placement and measurement are two separate phases: `place` positions every
//! marker and hands back a [`PendingMeasurement`]; once the host has laid the
//! markers out (the next frame), `measure` reads their heights and derives the
//! connector end points. A newer `place` or a `cancel_pending` invalidates any
//! outstanding token so a stale measurement never touches the layout.

use std::collections::{HashMap, HashSet};

use crate::config::{CoverScaleConfig, LaneConfig};
use crate::event::{Event, EventId};
use crate::host::{MarkerHost, MarkerPlacement};
use crate::range::TimelineRange;
use crate::scale::ScaleState;

// ── Geometry ──────────────────────────────────────────────────────────────

/// Lane of the event at `index`: -1 above the baseline for even indices,
/// +1 below for odd ones.
pub fn lane_sign(index: usize) -> i8 {
    if index % 2 == 0 {
        -1
    } else {
        1
    }
}

/// Baseline y in CSS px for a viewport `height` and baseline fraction.
pub fn baseline_y(height: f64, frac: f64) -> f64 {
    (height * frac).round()
}

/// Distance of a marker centre from the baseline.
pub fn lane_offset(height: f64, lanes: &LaneConfig) -> f64 {
    (height * lanes.offset_frac).round().min(lanes.offset_cap)
}

/// Inner edge of a marker of `height` centred at `center_y`: the bottom edge
/// for markers above the baseline, the top edge for those below.
pub fn edge_y(center_y: f64, sign: i8, height: f64) -> f64 {
    center_y - f64::from(sign) * (height / 2.0)
}

/// Smoothstep ramp of the cover scale between the configured zoom levels.
pub fn cover_scale(px_per_day: f64, cfg: &CoverScaleConfig) -> f64 {
    let span = cfg.ramp_end - cfg.ramp_start;
    let t = if span > 0.0 {
        ((px_per_day - cfg.ramp_start) / span).clamp(0.0, 1.0)
    } else if px_per_day >= cfg.ramp_end {
        1.0
    } else {
        0.0
    };
    let eased = t * t * (3.0 - 2.0 * t);
    cfg.min_scale + (cfg.max_scale - cfg.min_scale) * eased
}

// ── Per-marker state ──────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerPhase {
    /// Known to the layout but not yet positioned.
    Hidden,
    /// Positioned; its height has not been read since the last move.
    Placed,
    Measured,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MarkerLayout {
    pub id: EventId,
    pub lane_sign: i8,
    /// Content x of the marker centre.
    pub left: f64,
    pub center_y: f64,
    /// Last measured rendered height.
    pub height: Option<f64>,
    pub phase: MarkerPhase,
}

impl MarkerLayout {
    fn new(id: EventId, lane_sign: i8) -> Self {
        Self {
            id,
            lane_sign,
            left: 0.0,
            center_y: 0.0,
            height: None,
            phase: MarkerPhase::Hidden,
        }
    }

    /// Where the connector from the baseline stops; `None` until measured once.
    pub fn edge_y(&self) -> Option<f64> {
        self.height.map(|h| edge_y(self.center_y, self.lane_sign, h))
    }
}

/// Token for one deferred measurement pass.
#[derive(Debug, PartialEq, Eq)]
pub struct PendingMeasurement {
    generation: u64,
}

/// Everything `place` needs to know about the current view.
#[derive(Clone, Copy, Debug)]
pub struct PlacementContext<'a> {
    pub range: &'a TimelineRange,
    pub scale: &'a ScaleState,
    pub viewport_height: f64,
    pub baseline_frac: f64,
    pub lanes: &'a LaneConfig,
    pub cover_scale: &'a CoverScaleConfig,
}

// ── Layout ────────────────────────────────────────────────────────────────

/// Side table of marker layouts, indexed identically to the event list.
#[derive(Debug, Default)]
pub struct CoverLayout {
    markers: Vec<MarkerLayout>,
    /// Ids of markers that exist in the host.
    known: HashSet<EventId>,
    generation: u64,
    pending: Option<u64>,
}

impl CoverLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markers(&self) -> &[MarkerLayout] {
        &self.markers
    }

    pub fn marker(&self, id: &EventId) -> Option<&MarkerLayout> {
        self.markers.iter().find(|m| &m.id == id)
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Position one marker per event, creating missing markers and removing
    /// those whose event is gone. Returns the token for the follow-up
    /// measurement.
    pub fn place<H: MarkerHost + ?Sized>(
        &mut self,
        events: &[Event],
        ctx: &PlacementContext<'_>,
        host: &mut H,
    ) -> PendingMeasurement {
        let cy = baseline_y(ctx.viewport_height, ctx.baseline_frac);
        let offset = lane_offset(ctx.viewport_height, ctx.lanes);
        let scale = cover_scale(ctx.scale.px_per_day, ctx.cover_scale);

        let mut previous: HashMap<EventId, MarkerLayout> = self
            .markers
            .drain(..)
            .map(|m| (m.id.clone(), m))
            .collect();

        let mut needed = HashSet::with_capacity(events.len());
        for (index, event) in events.iter().enumerate() {
            needed.insert(event.id.clone());
            if !self.known.contains(&event.id) {
                host.ensure_marker(event);
                self.known.insert(event.id.clone());
            }

            let sign = lane_sign(index);
            let mut marker = match previous.remove(&event.id) {
                Some(m) if m.lane_sign == sign => m,
                _ => MarkerLayout::new(event.id.clone(), sign),
            };
            let left = ctx.scale.date_to_x(ctx.range, event.date);
            let center_y = cy + f64::from(sign) * offset;
            let moved = marker.left != left || marker.center_y != center_y;
            marker.left = left;
            marker.center_y = center_y;
            if moved || marker.phase == MarkerPhase::Hidden {
                marker.phase = MarkerPhase::Placed;
            }
            host.position_marker(
                &event.id,
                &MarkerPlacement {
                    left,
                    top: center_y,
                    scale,
                },
            );
            self.markers.push(marker);
        }

        let stale: Vec<EventId> = self
            .known
            .iter()
            .filter(|id| !needed.contains(*id))
            .cloned()
            .collect();
        for id in stale {
            host.remove_marker(&id);
            self.known.remove(&id);
        }

        self.schedule_measurement()
    }

    /// Request a fresh measurement pass without moving anything,
    /// superseding any outstanding token.
    pub fn schedule_measurement(&mut self) -> PendingMeasurement {
        self.generation += 1;
        self.pending = Some(self.generation);
        PendingMeasurement {
            generation: self.generation,
        }
    }

    /// Read rendered heights and derive connector end points. Returns false
    /// (and changes nothing) when `pending` was superseded or cancelled.
    pub fn measure<H: MarkerHost + ?Sized>(
        &mut self,
        pending: PendingMeasurement,
        host: &H,
    ) -> bool {
        if self.pending != Some(pending.generation) {
            log::debug!("Dropping stale cover measurement #{}", pending.generation);
            return false;
        }
        self.pending = None;
        for marker in &mut self.markers {
            if let Some(height) = host.marker_height(&marker.id) {
                marker.height = Some(height);
                marker.phase = MarkerPhase::Measured;
            }
        }
        true
    }

    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }
}
