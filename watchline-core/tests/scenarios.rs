//! End-to-end behaviour of the engine against an in-memory host.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, Utc};
use watchline_core::config::ZoomConfig;
use watchline_core::host::{Fill, GradientStop, Point, Rect, Stroke, TextStyle};
use watchline_core::layout::MarkerPhase;
use watchline_core::{
    parse_records, Event, EventId, MarkerHost, MarkerPlacement, ScrollArea, Surface,
    TimelineConfig, TimelineEngine, TimelineError, ViewportState,
};

const MARKER_HEIGHT: f64 = 150.0;

struct FakeHost {
    scroll_left: f64,
    width: f64,
    height: f64,
    dpr: f64,
    /// Store scroll offsets as whole pixels the way older DOM engines do.
    whole_pixels: bool,
    content: (f64, f64),
    markers: HashMap<EventId, Option<MarkerPlacement>>,
    created: Vec<EventId>,
    removed: Vec<EventId>,
    backing: (u32, u32),
    resizes: usize,
    draw_calls: usize,
    texts: Vec<String>,
}

impl FakeHost {
    fn new(width: f64, height: f64) -> Self {
        Self {
            scroll_left: 0.0,
            width,
            height,
            dpr: 1.0,
            whole_pixels: false,
            content: (0.0, 0.0),
            markers: HashMap::new(),
            created: Vec::new(),
            removed: Vec::new(),
            backing: (0, 0),
            resizes: 0,
            draw_calls: 0,
            texts: Vec::new(),
        }
    }

    fn max_scroll(&self) -> f64 {
        (self.content.0 - self.width).max(0.0)
    }

    /// Scroll as the user would, then let the engine know.
    fn user_scroll(&mut self, engine: &mut TimelineEngine, x: f64) {
        self.set_scroll_left(x);
        engine.on_scroll(self);
    }
}

impl ScrollArea for FakeHost {
    fn metrics(&self) -> ViewportState {
        ViewportState {
            scroll_left: self.scroll_left,
            width: self.width,
            height: self.height,
            device_pixel_ratio: self.dpr,
        }
    }

    fn set_scroll_left(&mut self, x: f64) {
        let x = x.clamp(0.0, self.max_scroll());
        self.scroll_left = if self.whole_pixels { x.floor() } else { x };
    }

    fn set_content_size(&mut self, width: f64, height: f64) {
        self.content = (width, height);
        self.scroll_left = self.scroll_left.min(self.max_scroll());
    }
}

impl MarkerHost for FakeHost {
    fn ensure_marker(&mut self, event: &Event) {
        self.markers.entry(event.id.clone()).or_insert(None);
        self.created.push(event.id.clone());
    }

    fn position_marker(&mut self, id: &EventId, placement: &MarkerPlacement) {
        self.markers.insert(id.clone(), Some(*placement));
    }

    fn remove_marker(&mut self, id: &EventId) {
        self.markers.remove(id);
        self.removed.push(id.clone());
    }

    fn marker_height(&self, id: &EventId) -> Option<f64> {
        self.markers.get(id).map(|_| MARKER_HEIGHT)
    }
}

impl Surface for FakeHost {
    fn backing_size(&self) -> (u32, u32) {
        self.backing
    }

    fn resize_backing(&mut self, width: u32, height: u32, _css_width: f64, _css_height: f64) {
        self.backing = (width, height);
        self.resizes += 1;
    }

    fn begin_frame(&mut self, _dpr: f64, _width: f64, _height: f64) {
        self.draw_calls += 1;
        self.texts.clear();
    }

    fn stroke_line(&mut self, _from: Point, _to: Point, _stroke: &Stroke<'_>) {
        self.draw_calls += 1;
    }

    fn fill_circle(&mut self, _center: Point, _radius: f64, _fill: &Fill<'_>) {
        self.draw_calls += 1;
    }

    fn fill_text(&mut self, text: &str, _at: Point, _style: &TextStyle<'_>) {
        self.draw_calls += 1;
        self.texts.push(text.to_string());
    }

    fn fill_gradient_band(&mut self, _rect: Rect, _stops: &[GradientStop<'_>]) {
        self.draw_calls += 1;
    }

    /// Red is x mod 256, green is y mod 256, blue is 50; only (600, 400) is opaque.
    fn read_pixels(&self, x: u32, y: u32, width: u32, height: u32) -> Option<Vec<u8>> {
        if x + width > self.backing.0 || y + height > self.backing.1 {
            return None;
        }
        let mut out = Vec::with_capacity((width * height * 4) as usize);
        for py in y..y + height {
            for px in x..x + width {
                let alpha = if (px, py) == (600, 400) { 255 } else { 0 };
                out.extend_from_slice(&[(px % 256) as u8, (py % 256) as u8, 50, alpha]);
            }
        }
        Some(out)
    }
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn event(id: &str, date: NaiveDate) -> Event {
    Event {
        id: EventId::from(id),
        title: id.to_uppercase(),
        year: None,
        date,
        rating: None,
        cover_url: None,
        summary: None,
        review_text: None,
    }
}

/// Three watches spanning 2025.
fn year_events() -> Vec<Event> {
    vec![
        event("a", ymd(2025, 1, 1)),
        event("b", ymd(2025, 6, 15)),
        event("c", ymd(2025, 12, 31)),
    ]
}

fn loaded(width: f64, height: f64) -> (TimelineEngine, FakeHost) {
    let mut engine = TimelineEngine::new(TimelineConfig::default());
    let mut host = FakeHost::new(width, height);
    engine.load(year_events(), &mut host);
    (engine, host)
}

// ── Scenarios ─────────────────────────────────────────────────────────────

#[test]
fn test_range_is_padded_around_events() {
    let (engine, host) = loaded(1200.0, 800.0);
    let range = engine.range().unwrap();
    assert_eq!(range.start(), ymd(2024, 12, 22));
    assert_eq!(range.end(), ymd(2026, 1, 10));
    assert_eq!(range.total_days(), 384);
    assert_eq!(host.content, (200.0 + 384.0 * 12.0 + 200.0, 800.0));
    assert_eq!(host.created.len(), 3);
}

#[test]
fn test_zoom_keeps_date_under_cursor() {
    let (mut engine, mut host) = loaded(1200.0, 800.0);
    // Day 100 sits under x = 400 at 12 px/day
    host.user_scroll(&mut engine, 200.0 + 100.0 * 12.0 - 400.0);
    let range = *engine.range().unwrap();
    let date = range.date_at(100).unwrap();
    assert_eq!(engine.date_at_viewport_x(400.0), Some(date));

    let doubling = -(2.0_f64).ln() / ZoomConfig::default().sensitivity;
    assert!(engine.wheel(doubling, 400.0, &mut host));
    assert!((engine.px_per_day() - 24.0).abs() < 1e-9);

    let x = engine.scale().date_to_x(&range, date) - host.scroll_left;
    assert!((x - 400.0).abs() <= 1.0, "date drifted to x={x}");
    assert_eq!(engine.date_at_viewport_x(400.0), Some(date));
    assert_eq!(host.content.0, engine.content_width());
}

#[test]
fn test_empty_dataset_spans_current_year() {
    let mut engine = TimelineEngine::new(TimelineConfig::default());
    let mut host = FakeHost::new(1200.0, 800.0);
    engine.load(Vec::new(), &mut host);

    let range = *engine.range().unwrap();
    let year = Utc::now().year();
    assert_eq!(range.start(), ymd(year, 1, 1));
    assert!(matches!(range.total_days(), 365 | 366));
    assert_eq!(range.date_at(range.total_days() - 1), Some(ymd(year, 12, 31)));

    // Still interactive
    assert!(engine.wheel(-400.0, 600.0, &mut host));
    engine.start();
    assert!(engine.frame(0.0, &mut host).redrawn);
}

#[test]
fn test_failed_load_still_renders() {
    let mut engine = TimelineEngine::new(TimelineConfig::default());
    let mut host = FakeHost::new(1200.0, 800.0);
    engine.load(year_events(), &mut host);
    engine.load_failed(&mut host);

    assert!(engine.events().is_empty());
    assert!(host.markers.is_empty());
    assert_eq!(host.removed.len(), 3);
    assert!(matches!(engine.range().unwrap().total_days(), 365 | 366));
    assert!(engine.tick(0.0, &mut host).redrawn);
}

#[test]
fn test_detail_view_pins_scroll() {
    let (mut engine, mut host) = loaded(1200.0, 800.0);
    host.user_scroll(&mut engine, 500.0);

    let opened = engine.open_detail(&EventId::from("b"), &host).unwrap();
    assert_eq!(opened.title, "B");
    assert!(engine.blocks_gestures());

    host.user_scroll(&mut engine, 800.0);
    assert_eq!(host.scroll_left, 500.0);

    let px = engine.px_per_day();
    assert!(!engine.wheel(-300.0, 600.0, &mut host));
    assert_eq!(engine.px_per_day(), px);

    engine.pointer_move(1199.0);
    let report = engine.tick(0.5, &mut host);
    assert!(!report.scrolled);
    assert_eq!(host.scroll_left, 500.0);

    engine.close_detail(&mut host);
    assert_eq!(host.scroll_left, 500.0);
    assert!(!engine.is_detail_open());

    // Autoscroll resumes once closed
    assert!(engine.tick(0.5, &mut host).scrolled);
    assert!(host.scroll_left > 500.0);
}

#[test]
fn test_unknown_detail_id_is_an_error() {
    let (mut engine, host) = loaded(1200.0, 800.0);
    let err = engine.open_detail(&EventId::from("zzz"), &host).unwrap_err();
    assert!(matches!(err, TimelineError::UnknownEvent(id) if id == "zzz"));
    assert!(!engine.is_detail_open());
}

// ── Frame scheduling ──────────────────────────────────────────────────────

#[test]
fn test_unchanged_frame_draws_nothing() {
    let (mut engine, mut host) = loaded(1200.0, 800.0);
    let first = engine.tick(0.016, &mut host);
    assert!(first.measured && first.redrawn);
    let calls = host.draw_calls;
    assert!(calls > 0);

    let idle = engine.tick(0.016, &mut host);
    assert_eq!(idle, Default::default());
    assert_eq!(host.draw_calls, calls);

    // Hover change redraws once
    assert!(engine.set_hover(&EventId::from("a"), true));
    assert!(engine.tick(0.016, &mut host).redrawn);
    let after_hover = host.draw_calls;
    assert!(!engine.set_hover(&EventId::from("a"), true));
    assert!(!engine.tick(0.016, &mut host).redrawn);
    assert_eq!(host.draw_calls, after_hover);

    // A manual scroll redraws
    host.user_scroll(&mut engine, 300.0);
    assert!(engine.tick(0.016, &mut host).redrawn);
}

#[test]
fn test_backing_store_resizes_only_when_needed() {
    let (mut engine, mut host) = loaded(1200.0, 800.0);
    assert!(engine.tick(0.0, &mut host).resized);
    assert_eq!(host.backing, (1200, 800));

    engine.set_hover(&EventId::from("a"), true);
    let report = engine.tick(0.0, &mut host);
    assert!(report.redrawn && !report.resized);

    host.dpr = 2.0;
    engine.resize(&mut host);
    assert!(engine.tick(0.0, &mut host).resized);
    assert_eq!(host.backing, (2400, 1600));

    // Ratios above 2 are capped
    host.dpr = 3.0;
    engine.resize(&mut host);
    let report = engine.tick(0.0, &mut host);
    assert!(report.redrawn && !report.resized);
    assert_eq!(host.resizes, 2);
}

#[test]
fn test_autoscroll_near_right_edge_clamps_at_end() {
    let (mut engine, mut host) = loaded(1200.0, 800.0);
    engine.pointer_move(1200.0);
    assert!(engine.tick(10.0, &mut host).scrolled);
    assert_eq!(host.scroll_left, host.max_scroll());

    engine.pointer_move(0.0);
    engine.tick(10.0, &mut host);
    assert_eq!(host.scroll_left, 0.0);

    engine.pointer_move(600.0);
    assert!(!engine.tick(10.0, &mut host).scrolled);
    engine.pointer_move(5.0);
    engine.pointer_leave();
    assert!(!engine.tick(10.0, &mut host).scrolled);
}

#[test]
fn test_slow_autoscroll_accumulates_sub_pixel_steps() {
    let (mut engine, mut host) = loaded(1200.0, 800.0);
    host.whole_pixels = true;
    // One pixel into the right edge zone: about 25.5 px/s
    engine.pointer_move(1200.0 - 139.0);
    for _ in 0..60 {
        engine.tick(1.0 / 60.0, &mut host);
    }
    assert!(
        (24.0..=26.0).contains(&host.scroll_left),
        "scrolled to {}",
        host.scroll_left
    );
}

#[test]
fn test_frame_loop_uses_wall_clock() {
    let (mut engine, mut host) = loaded(1200.0, 800.0);
    engine.pointer_move(1200.0);
    assert!(!engine.frame(1000.0, &mut host).scrolled);

    engine.start();
    // First frame after start has no elapsed time
    assert!(!engine.frame(1000.0, &mut host).scrolled);
    engine.frame(1100.0, &mut host);
    assert!((host.scroll_left - 120.0).abs() < 1e-6);

    // Resuming after a long pause does not jump
    engine.stop();
    engine.start();
    engine.frame(60_000.0, &mut host);
    assert!((host.scroll_left - 120.0).abs() < 1e-6);
}

// ── Cover layout ──────────────────────────────────────────────────────────

#[test]
fn test_measurement_waits_for_next_frame_and_stops_with_the_loop() {
    let (mut engine, mut host) = loaded(1200.0, 800.0);
    let placed = |engine: &TimelineEngine| {
        engine
            .layout()
            .markers()
            .iter()
            .all(|m| m.phase == MarkerPhase::Placed)
    };
    assert!(placed(&engine));
    assert!(engine.layout().has_pending());

    engine.stop();
    assert!(!engine.layout().has_pending());
    assert_eq!(engine.frame(16.0, &mut host), Default::default());
    assert!(placed(&engine));

    engine.start();
    assert!(engine.frame(32.0, &mut host).measured);
    let first = &engine.layout().markers()[0];
    assert_eq!(first.phase, MarkerPhase::Measured);
    // Baseline 416, lane offset 200, marker above
    assert_eq!(first.center_y, 216.0);
    assert_eq!(first.edge_y(), Some(216.0 + MARKER_HEIGHT / 2.0));
    let second = &engine.layout().markers()[1];
    assert_eq!(second.edge_y(), Some(616.0 - MARKER_HEIGHT / 2.0));
}

#[test]
fn test_lanes_follow_input_order() {
    let mut engine = TimelineEngine::new(TimelineConfig::default());
    let mut host = FakeHost::new(1200.0, 800.0);
    let scrambled = vec![
        event("p", ymd(2025, 5, 1)),
        event("q", ymd(2025, 1, 1)),
        event("r", ymd(2025, 9, 9)),
        event("s", ymd(2025, 5, 1)),
        event("t", ymd(2025, 2, 2)),
    ];
    engine.load(scrambled.clone(), &mut host);
    let signs: Vec<i8> = engine.layout().markers().iter().map(|m| m.lane_sign).collect();
    assert_eq!(signs, vec![-1, 1, -1, 1, -1]);

    let mut reversed = scrambled;
    reversed.reverse();
    engine.load(reversed, &mut host);
    let layout: Vec<(&str, i8)> = engine
        .layout()
        .markers()
        .iter()
        .map(|m| (m.id.0.as_str(), m.lane_sign))
        .collect();
    assert_eq!(
        layout,
        vec![("t", -1), ("s", 1), ("r", -1), ("q", 1), ("p", -1)]
    );
    // Markers are reused, not recreated
    assert_eq!(host.created.len(), 5);
}

#[test]
fn test_cover_scale_follows_zoom() {
    let (mut engine, mut host) = loaded(1200.0, 800.0);
    let scale_of = |host: &FakeHost| host.markers[&EventId::from("a")].unwrap().scale;
    let at_12 = scale_of(&host);
    engine.set_px_per_day(60.0, &mut host);
    assert_eq!(scale_of(&host), 1.20);
    engine.set_px_per_day(2.0, &mut host);
    assert_eq!(scale_of(&host), 0.75);
    assert!(at_12 > 0.75 && at_12 < 1.20);
}

// ── Zoom properties ───────────────────────────────────────────────────────

#[test]
fn test_zoom_sequence_respects_bounds_padding_and_anchor() {
    let (mut engine, mut host) = loaded(1200.0, 800.0);
    host.user_scroll(&mut engine, 1000.0);
    let cfg = TimelineConfig::default();
    let total = engine.range().unwrap().total_days() as f64;

    let deltas = [-500.0, -800.0, 300.0, -2000.0, 50.0, 4000.0, 900.0, -3.0, -1200.0, 2500.0];
    let mut pads = (engine.scale().pad_left, engine.scale().pad_right);
    for (i, delta) in deltas.iter().enumerate() {
        let cursor = 100.0 + (i as f64 * 263.0) % 1000.0;
        let anchor = engine.scale().x_to_day_offset(cursor, host.scroll_left);
        let changed = engine.wheel(*delta, cursor, &mut host);

        let scale = *engine.scale();
        assert!(scale.px_per_day >= cfg.scale.min_px_per_day);
        assert!(scale.px_per_day <= cfg.scale.max_px_per_day);
        assert!(scale.pad_left >= pads.0 && scale.pad_right >= pads.1);
        pads = (scale.pad_left, scale.pad_right);

        if changed && (0.0..=total).contains(&anchor) {
            let x = scale.day_offset_to_x(anchor) - host.scroll_left;
            assert!((x - cursor).abs() <= 1.0, "step {i}: anchor at {x}, cursor {cursor}");
        }
    }
}

/// Zoom at `cursor` and report where the day that was under it ends up.
fn zoom_and_locate(engine: &mut TimelineEngine, host: &mut FakeHost, delta: f64, cursor: f64) -> f64 {
    let anchor = engine.scale().x_to_day_offset(cursor, host.scroll_left);
    assert!(engine.wheel(delta, cursor, host));
    engine.scale().day_offset_to_x(anchor) - host.scroll_left
}

#[test]
fn test_non_finite_wheel_input_is_ignored() {
    let (mut engine, mut host) = loaded(1200.0, 800.0);
    host.user_scroll(&mut engine, 1000.0);
    let px = engine.px_per_day();

    assert!(!engine.wheel(f64::NAN, 400.0, &mut host));
    assert!(!engine.wheel(f64::INFINITY, 400.0, &mut host));
    assert!(!engine.wheel(-500.0, f64::NAN, &mut host));
    assert!(!engine.wheel(-500.0, f64::NEG_INFINITY, &mut host));
    assert_eq!(engine.px_per_day(), px);
    assert_eq!(host.scroll_left, 1000.0);
    assert!(engine.scale().pad_left.is_finite() && engine.scale().pad_right.is_finite());

    let x = zoom_and_locate(&mut engine, &mut host, -500.0, 400.0);
    assert!((x - 400.0).abs() <= 1.0, "anchor at {x}");
}

#[test]
fn test_non_finite_alignment_leaves_scroll_alone() {
    let (mut engine, mut host) = loaded(1200.0, 800.0);
    host.whole_pixels = true;
    host.user_scroll(&mut engine, 500.0);

    assert!(!engine.scroll_to_date(ymd(2025, 6, 15), f64::NAN, &mut host));
    assert!(!engine.scroll_to_date(ymd(2025, 6, 15), f64::INFINITY, &mut host));
    assert!(!engine.scroll_to_date_str("2025-06-15", f64::NAN, &mut host).unwrap());
    assert_eq!(host.scroll_left, 500.0);

    host.user_scroll(&mut engine, 3000.0);
    let x = zoom_and_locate(&mut engine, &mut host, -500.0, 400.0);
    assert!(host.scroll_left.is_finite());
    assert!((x - 400.0).abs() <= 1.0, "anchor at {x}");
}

#[test]
fn test_far_viewport_x_maps_to_no_date() {
    let (engine, _host) = loaded(1200.0, 800.0);
    assert_eq!(engine.date_at_viewport_x(1e15), None);
    assert_eq!(engine.date_at_viewport_x(-1e15), None);
    assert_eq!(engine.date_at_viewport_x(f64::MAX), None);
    assert!(engine.date_at_viewport_x(600.0).is_some());
}

#[test]
fn test_wheel_without_range_is_ignored() {
    let mut engine = TimelineEngine::new(TimelineConfig::default());
    let mut host = FakeHost::new(1200.0, 800.0);
    assert!(!engine.wheel(-500.0, 300.0, &mut host));
    assert_eq!(engine.tick(0.1, &mut host), Default::default());
    assert_eq!(engine.date_at_center(), None);
}

// ── Debug surface ─────────────────────────────────────────────────────────

#[test]
fn test_focus_latest_aligns_most_recent_event() {
    let (mut engine, mut host) = loaded(600.0, 800.0);
    assert!(engine.focus_latest(&mut host));
    assert_eq!(host.scroll_left, 200.0 + 374.0 * 12.0 - 0.7 * 600.0);
    assert_eq!(engine.date_at_viewport_x(420.0), Some(ymd(2025, 12, 31)));
}

#[test]
fn test_set_px_per_day_clamps_and_resizes() {
    let (mut engine, mut host) = loaded(1200.0, 800.0);
    engine.set_px_per_day(500.0, &mut host);
    assert_eq!(engine.px_per_day(), 160.0);
    assert_eq!(host.content.0, engine.content_width());
    engine.set_px_per_day(f64::NAN, &mut host);
    assert_eq!(engine.px_per_day(), 160.0);
    engine.set_px_per_day(0.0, &mut host);
    assert_eq!(engine.px_per_day(), 1.2);
}

#[test]
fn test_set_records_replaces_dataset() {
    let (mut engine, mut host) = loaded(1200.0, 800.0);
    let records = parse_records(
        r#"[{"title": "First", "date": "2025-02-01"}, {"watched_date": "2025-03-01T20:00:00Z"}]"#,
    )
    .unwrap();
    assert_eq!(engine.set_records(records, &mut host).unwrap(), 2);
    let ids: Vec<&str> = engine.events().iter().map(|e| e.id.0.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
    assert_eq!(engine.events()[1].title, "Untitled");
    assert_eq!(engine.range().unwrap().start(), ymd(2025, 1, 22));
    assert_eq!(host.removed.len(), 3);

    let bad = parse_records(r#"[{"date": "someday"}]"#).unwrap();
    assert!(engine.set_records(bad, &mut host).is_err());
    assert_eq!(engine.events().len(), 2);
}

#[test]
fn test_scroll_to_date_string() {
    let mut engine = TimelineEngine::new(TimelineConfig::default());
    let mut host = FakeHost::new(1200.0, 800.0);
    assert!(!engine.scroll_to_date_str("2025-01-01", 0.5, &mut host).unwrap());

    engine.load(year_events(), &mut host);
    assert!(engine.scroll_to_date_str("2025-06-15", 0.0, &mut host).unwrap());
    assert_eq!(engine.date_at_viewport_x(0.0), Some(ymd(2025, 6, 15)));
    assert!(engine.scroll_to_date_str("2025-06-15", 0.5, &mut host).unwrap());
    assert_eq!(engine.date_at_center(), Some(ymd(2025, 6, 15)));

    let err = engine.scroll_to_date_str("mid June", 0.5, &mut host).unwrap_err();
    assert!(matches!(err, TimelineError::InvalidDate { .. }));
}

#[test]
fn test_scroll_to_end() {
    let (mut engine, mut host) = loaded(1200.0, 800.0);
    engine.scroll_to_end(&mut host);
    assert_eq!(host.scroll_left, host.max_scroll());
    // The right padding is showing, past the last day
    assert!(engine.date_at_viewport_x(1199.0).unwrap() > ymd(2026, 1, 10));
}

#[test]
fn test_baseline_controls() {
    let (mut engine, mut host) = loaded(1200.0, 800.0);
    assert_eq!(engine.baseline_y(), 416.0);

    assert!(engine.set_baseline(0.9, &mut host));
    assert_eq!(engine.baseline_frac(), 0.72);
    assert_eq!(engine.baseline_y(), 576.0);

    assert!(!engine.set_baseline(f64::NAN, &mut host));
    assert_eq!(engine.baseline_frac(), 0.72);

    assert!(engine.set_baseline(0.1, &mut host));
    assert_eq!(engine.baseline_y(), 320.0);
    // Covers move with the baseline
    assert_eq!(host.markers[&EventId::from("a")].unwrap().top, 120.0);
    assert!(engine.is_dirty());
}

#[test]
fn test_sample_canvas_window() {
    let (mut engine, mut host) = loaded(1200.0, 800.0);
    assert_eq!(engine.sample_canvas(&host, 0.5, 0.5), None);

    engine.tick(0.0, &mut host);
    assert_eq!(engine.sample_canvas(&host, 0.5, 0.5), Some([88, 144, 50, 255]));
    assert_eq!(engine.sample_canvas(&host, 0.0, 0.0), Some([1, 1, 50, 0]));
    assert_eq!(engine.sample_canvas(&host, f64::NAN, 0.0), None);
}
