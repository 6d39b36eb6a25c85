//! The timeline controller.
//!
//! `TimelineEngine` owns every piece of mutable timeline state. Host callbacks
//! (pointer, wheel, scroll, resize, detail open/close) mutate it and set the
//! dirty flag; `frame`/`tick` run once per display frame and are the only
//! place that draws. Nothing here blocks, and all calls are expected on one
//! thread.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::autoscroll::Autoscroll;
use crate::config::TimelineConfig;
use crate::draw::{paint, FrameScene, Palette};
use crate::error::{TimelineError, TimelineResult};
use crate::event::{Event, EventId};
use crate::host::{MarkerHost, ScrollArea, TimelineHost, ViewportState};
use crate::layout::{baseline_y, CoverLayout, PendingMeasurement, PlacementContext};
use crate::range::TimelineRange;
use crate::scale::{clamp_scroll, ScaleState};
use crate::scheduler::{effective_dpr, ensure_backing, RenderScheduler};
use crate::zoom::{wheel_factor, zoom_at_cursor};

/// What one frame did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// A deferred cover measurement ran.
    pub measured: bool,
    /// Autoscroll moved the view.
    pub scrolled: bool,
    /// The backing store was resized.
    pub resized: bool,
    pub redrawn: bool,
}

pub struct TimelineEngine {
    pub(crate) config: TimelineConfig,
    pub(crate) events: Vec<Event>,
    pub(crate) range: Option<TimelineRange>,
    pub(crate) scale: ScaleState,
    /// Last metrics read from the host.
    pub(crate) viewport: ViewportState,
    /// Fractional scroll offset; hosts that store whole pixels would
    /// otherwise swallow slow autoscroll steps.
    pub(crate) scroll_left: f64,
    pub(crate) baseline_frac: f64,
    pub(crate) layout: CoverLayout,
    pending: Option<PendingMeasurement>,
    autoscroll: Autoscroll,
    hovered: HashSet<EventId>,
    /// Scroll offset pinned while the detail view is open.
    detail_scroll: Option<f64>,
    pub(crate) scheduler: RenderScheduler,
    palette: Palette,
    running: bool,
}

impl TimelineEngine {
    pub fn new(config: TimelineConfig) -> Self {
        let scale = ScaleState::new(&config.scale);
        let autoscroll = Autoscroll::new(config.autoscroll.clone());
        let baseline_frac = config
            .baseline
            .initial_frac
            .clamp(config.baseline.min_frac, config.baseline.max_frac);
        Self {
            config,
            events: Vec::new(),
            range: None,
            scale,
            viewport: ViewportState::default(),
            scroll_left: 0.0,
            baseline_frac,
            layout: CoverLayout::new(),
            pending: None,
            autoscroll,
            hovered: HashSet::new(),
            detail_scroll: None,
            scheduler: RenderScheduler::new(),
            palette: Palette::default(),
            running: false,
        }
    }

    // ── Accessors ──

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn event(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|e| &e.id == id)
    }

    pub fn range(&self) -> Option<&TimelineRange> {
        self.range.as_ref()
    }

    pub fn scale(&self) -> &ScaleState {
        &self.scale
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    pub fn layout(&self) -> &CoverLayout {
        &self.layout
    }

    pub fn baseline_frac(&self) -> f64 {
        self.baseline_frac
    }

    pub fn is_hovered(&self, id: &EventId) -> bool {
        self.hovered.contains(id)
    }

    pub fn is_detail_open(&self) -> bool {
        self.detail_scroll.is_some()
    }

    pub fn is_dirty(&self) -> bool {
        self.scheduler.is_dirty()
    }

    pub fn set_palette(&mut self, palette: Palette) {
        if self.palette != palette {
            self.palette = palette;
            self.scheduler.mark_dirty();
        }
    }

    /// Full scrollable width for the current range and scale.
    pub fn content_width(&self) -> f64 {
        self.range
            .map(|r| self.scale.content_width(r.total_days()))
            .unwrap_or(0.0)
    }

    // ── Dataset ──

    /// Install a dataset and derive its range; an empty dataset falls back
    /// to the current calendar year.
    pub fn load<H: ScrollArea + MarkerHost + ?Sized>(&mut self, events: Vec<Event>, host: &mut H) {
        let range = TimelineRange::from_events(&events, self.config.range_pad_days)
            .unwrap_or_else(TimelineRange::current_year);
        log::info!(
            "Loaded {} events, {} to {} ({} days)",
            events.len(),
            range.start(),
            range.end(),
            range.total_days()
        );
        self.hovered.retain(|id| events.iter().any(|e| &e.id == id));
        self.events = events;
        self.range = Some(range);
        self.size_content(host);
    }

    /// The loader gave up: keep the engine interactive over an empty
    /// current-year timeline.
    pub fn load_failed<H: ScrollArea + MarkerHost + ?Sized>(&mut self, host: &mut H) {
        log::warn!("No dataset; showing the current year");
        self.load(Vec::new(), host);
    }

    /// Bring the most recent event into view at the configured alignment.
    pub fn focus_latest<H: ScrollArea + ?Sized>(&mut self, host: &mut H) -> bool {
        let Some(latest) = self.events.iter().map(|e| e.date).max() else {
            return false;
        };
        self.scroll_to_date(latest, self.config.focus_align, host)
    }

    /// Scroll so `date` sits at `align` (0 = left edge, 1 = right edge).
    /// No-op before a range exists.
    pub fn scroll_to_date<H: ScrollArea + ?Sized>(
        &mut self,
        date: NaiveDate,
        align: f64,
        host: &mut H,
    ) -> bool {
        if !align.is_finite() {
            return false;
        }
        let Some(range) = self.range else { return false };
        self.sync_viewport(host);
        let x = self.scale.date_to_x(&range, date);
        let width = self.viewport.width;
        let target = clamp_scroll(x - width * align, self.content_width(), width);
        self.apply_scroll(target, host);
        self.scheduler.mark_dirty();
        true
    }

    // ── Geometry ──

    /// Push the content size for the current scale and re-place covers.
    pub fn size_content<H: ScrollArea + MarkerHost + ?Sized>(&mut self, host: &mut H) {
        if self.range.is_none() {
            return;
        }
        self.sync_viewport(host);
        host.set_content_size(self.content_width(), self.viewport.height);
        self.place_covers(host);
        self.scheduler.mark_dirty();
    }

    pub(crate) fn place_covers<H: MarkerHost + ?Sized>(&mut self, host: &mut H) {
        let Some(range) = self.range.as_ref() else { return };
        let ctx = PlacementContext {
            range,
            scale: &self.scale,
            viewport_height: self.viewport.height,
            baseline_frac: self.baseline_frac,
            lanes: &self.config.lanes,
            cover_scale: &self.config.cover_scale,
        };
        self.pending = Some(self.layout.place(&self.events, &ctx, host));
    }

    /// Re-read the host's metrics, keeping the fractional scroll offset
    /// unless the host moved by a whole pixel or more or the offset is no
    /// longer finite.
    pub fn sync_viewport<H: ScrollArea + ?Sized>(&mut self, host: &H) {
        let metrics = host.metrics();
        if !self.scroll_left.is_finite() || (metrics.scroll_left - self.scroll_left).abs() >= 1.0 {
            self.scroll_left = metrics.scroll_left;
        }
        self.viewport = metrics;
    }

    pub(crate) fn apply_scroll<H: ScrollArea + ?Sized>(&mut self, x: f64, host: &mut H) {
        self.scroll_left = x;
        host.set_scroll_left(x);
        self.viewport = host.metrics();
    }

    // ── Callbacks ──

    pub fn pointer_move(&mut self, x: f64) {
        self.autoscroll.pointer_moved(x);
    }

    pub fn pointer_leave(&mut self) {
        self.autoscroll.pointer_left();
    }

    /// Zoom around viewport x `cursor_x`. Ignored without a range or while
    /// the detail view is open. Returns true when the scale changed.
    pub fn wheel<H: ScrollArea + MarkerHost + ?Sized>(
        &mut self,
        delta_y: f64,
        cursor_x: f64,
        host: &mut H,
    ) -> bool {
        if self.blocks_gestures() || !delta_y.is_finite() || !cursor_x.is_finite() {
            return false;
        }
        let Some(range) = self.range else { return false };
        self.sync_viewport(host);
        let Some(step) = zoom_at_cursor(
            &mut self.scale,
            &range,
            self.scroll_left,
            self.viewport.width,
            cursor_x,
            wheel_factor(delta_y, &self.config.zoom),
            &self.config.scale,
            &self.config.zoom,
        ) else {
            return false;
        };
        host.set_content_size(step.content_width, self.viewport.height);
        self.place_covers(host);
        self.apply_scroll(step.scroll_left, host);
        self.scheduler.mark_dirty();
        true
    }

    /// The host's scroll position changed. While the detail view is open
    /// the position snaps back to where it was when it opened.
    pub fn on_scroll<H: ScrollArea + ?Sized>(&mut self, host: &mut H) {
        if let Some(locked) = self.detail_scroll {
            if host.metrics().scroll_left != locked {
                host.set_scroll_left(locked);
            }
            self.scroll_left = locked;
            self.viewport = host.metrics();
            return;
        }
        self.sync_viewport(host);
        self.scheduler.mark_dirty();
    }

    pub fn resize<H: ScrollArea + MarkerHost + ?Sized>(&mut self, host: &mut H) {
        self.size_content(host);
    }

    /// Pointer entered or left a cover. Returns true when the hover set changed.
    pub fn set_hover(&mut self, id: &EventId, hovered: bool) -> bool {
        let changed = if hovered {
            self.hovered.insert(id.clone())
        } else {
            self.hovered.remove(id)
        };
        if changed {
            self.scheduler.mark_dirty();
        }
        changed
    }

    /// Lock the timeline for the detail view of `id` and return its event.
    pub fn open_detail<H: ScrollArea + ?Sized>(
        &mut self,
        id: &EventId,
        host: &H,
    ) -> TimelineResult<Event> {
        let event = self
            .event(id)
            .cloned()
            .ok_or_else(|| TimelineError::UnknownEvent(id.to_string()))?;
        self.sync_viewport(host);
        self.detail_scroll = Some(self.scroll_left);
        log::debug!("Detail open for {id} at scroll {:.0}", self.scroll_left);
        Ok(event)
    }

    /// Release the lock and restore the pinned scroll offset.
    pub fn close_detail<H: ScrollArea + ?Sized>(&mut self, host: &mut H) {
        if let Some(locked) = self.detail_scroll.take() {
            self.apply_scroll(locked, host);
            self.scheduler.mark_dirty();
        }
    }

    /// Wheel and drag gestures on the timeline are suppressed while true.
    pub fn blocks_gestures(&self) -> bool {
        self.is_detail_open()
    }

    // ── Frame loop ──

    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.scheduler.clock_mut().reset();
        if self.pending.is_none() && !self.layout.markers().is_empty() {
            self.pending = Some(self.layout.schedule_measurement());
        }
        self.scheduler.mark_dirty();
    }

    /// Halt frames and drop any deferred measurement.
    pub fn stop(&mut self) {
        self.running = false;
        self.layout.cancel_pending();
        self.pending = None;
        self.scheduler.clock_mut().reset();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Run one frame at host timestamp `timestamp_ms`; does nothing while stopped.
    pub fn frame<H: TimelineHost + ?Sized>(&mut self, timestamp_ms: f64, host: &mut H) -> FrameReport {
        if !self.running {
            return FrameReport::default();
        }
        let dt = self.scheduler.clock_mut().advance(timestamp_ms);
        self.tick(dt, host)
    }

    /// Advance the engine by `dt_secs`: deferred measurement, autoscroll,
    /// dirty check, then at most one redraw.
    pub fn tick<H: TimelineHost + ?Sized>(&mut self, dt_secs: f64, host: &mut H) -> FrameReport {
        let mut report = FrameReport::default();
        let Some(range) = self.range else { return report };
        self.sync_viewport(host);

        if let Some(pending) = self.pending.take() {
            report.measured = self.layout.measure(pending, host);
            if report.measured {
                self.scheduler.mark_dirty();
            }
        }

        if let Some(next) = self.autoscroll.step(
            self.scroll_left,
            dt_secs,
            self.viewport.width,
            self.content_width(),
            self.is_detail_open(),
        ) {
            self.apply_scroll(next, host);
            self.scheduler.mark_dirty();
            report.scrolled = true;
        }

        if !self.scheduler.needs_redraw(self.viewport.scroll_left, &self.viewport) {
            return report;
        }

        let dpr = effective_dpr(self.viewport.device_pixel_ratio, self.config.max_device_pixel_ratio);
        report.resized = ensure_backing(host, &self.viewport, dpr);
        let scene = FrameScene {
            events: &self.events,
            markers: self.layout.markers(),
            hovered: &self.hovered,
            range: &range,
            scale: &self.scale,
            scroll_left: self.viewport.scroll_left,
            width: self.viewport.width,
            height: self.viewport.height,
            baseline_y: baseline_y(self.viewport.height, self.baseline_frac),
            thresholds: &self.config.ticks,
            palette: &self.palette,
        };
        paint(host, &scene, dpr);
        self.scheduler.rendered(self.viewport.scroll_left, &self.viewport);
        report.redrawn = true;
        report
    }
}
