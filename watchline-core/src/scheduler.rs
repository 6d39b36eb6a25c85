//! Frame bookkeeping: elapsed time between frames, the dirty flag and the
//! last rendered view, and device-pixel-ratio aware backing store sizing.

use crate::host::{Surface, ViewportState};

/// Converts host frame timestamps (ms) into elapsed seconds.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    /// Seconds since the previous frame; the first frame after a reset is 0.
    pub fn advance(&mut self, timestamp_ms: f64) -> f64 {
        let dt = match self.last_ms {
            Some(last) => ((timestamp_ms - last) / 1000.0).max(0.0),
            None => 0.0,
        };
        self.last_ms = Some(timestamp_ms);
        dt
    }

    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct RenderedView {
    scroll_left: f64,
    width: f64,
    height: f64,
}

/// Decides whether a frame has to redraw.
#[derive(Debug)]
pub struct RenderScheduler {
    dirty: bool,
    last: Option<RenderedView>,
    clock: FrameClock,
}

impl Default for RenderScheduler {
    fn default() -> Self {
        Self {
            dirty: true,
            last: None,
            clock: FrameClock::default(),
        }
    }
}

impl RenderScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// True when the dirty flag is set or the scroll offset or viewport size
    /// differ from the last redraw.
    pub fn needs_redraw(&self, scroll_left: f64, viewport: &ViewportState) -> bool {
        let current = RenderedView {
            scroll_left,
            width: viewport.width,
            height: viewport.height,
        };
        self.dirty || self.last != Some(current)
    }

    /// Record a completed redraw and clear the dirty flag.
    pub fn rendered(&mut self, scroll_left: f64, viewport: &ViewportState) {
        self.last = Some(RenderedView {
            scroll_left,
            width: viewport.width,
            height: viewport.height,
        });
        self.dirty = false;
    }

    pub fn clock_mut(&mut self) -> &mut FrameClock {
        &mut self.clock
    }
}

/// Clamp the host's device pixel ratio to `[1, max]`; unusable values map to 1.
pub fn effective_dpr(raw: f64, max: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    raw.clamp(1.0, max.max(1.0))
}

/// Backing store size in device pixels for a viewport.
pub fn backing_size_for(viewport: &ViewportState, dpr: f64) -> (u32, u32) {
    (
        (viewport.width * dpr).round().max(0.0) as u32,
        (viewport.height * dpr).round().max(0.0) as u32,
    )
}

/// Resize the surface only when its integer backing size differs, since a
/// resize clears it. Returns true when it resized.
pub fn ensure_backing<S: Surface + ?Sized>(surface: &mut S, viewport: &ViewportState, dpr: f64) -> bool {
    let (w, h) = backing_size_for(viewport, dpr);
    if surface.backing_size() == (w, h) {
        return false;
    }
    surface.resize_backing(w, h, viewport.width, viewport.height);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(w: f64, h: f64, dpr: f64) -> ViewportState {
        ViewportState {
            scroll_left: 0.0,
            width: w,
            height: h,
            device_pixel_ratio: dpr,
        }
    }

    #[test]
    fn test_frame_clock() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.advance(1000.0), 0.0);
        assert!((clock.advance(1016.0) - 0.016).abs() < 1e-12);
        // Timestamps going backwards never produce negative time
        assert_eq!(clock.advance(900.0), 0.0);
        clock.reset();
        assert_eq!(clock.advance(50_000.0), 0.0);
    }

    #[test]
    fn test_redraw_only_on_change() {
        let mut s = RenderScheduler::new();
        let v = view(800.0, 600.0, 1.0);
        assert!(s.needs_redraw(0.0, &v));
        s.rendered(0.0, &v);
        assert!(!s.needs_redraw(0.0, &v));
        assert!(s.needs_redraw(1.0, &v));
        assert!(s.needs_redraw(0.0, &view(801.0, 600.0, 1.0)));
        s.mark_dirty();
        assert!(s.needs_redraw(0.0, &v));
        s.rendered(0.0, &v);
        assert!(!s.is_dirty());
    }

    #[test]
    fn test_effective_dpr() {
        assert_eq!(effective_dpr(3.0, 2.0), 2.0);
        assert_eq!(effective_dpr(0.5, 2.0), 1.0);
        assert_eq!(effective_dpr(f64::NAN, 2.0), 1.0);
        assert_eq!(effective_dpr(1.5, 2.0), 1.5);
    }

    #[test]
    fn test_backing_size_rounds() {
        assert_eq!(backing_size_for(&view(801.0, 600.5, 1.5), 1.5), (1202, 901));
    }
}
