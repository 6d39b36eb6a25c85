//! Control surface for tests and tooling. The browser exposes these as
//! `window.timelineDebug`.

use chrono::NaiveDate;

use crate::engine::TimelineEngine;
use crate::error::TimelineResult;
use crate::event::{events_from_records, parse_calendar_date, MovieRecord};
use crate::host::{MarkerHost, ScrollArea, Surface};
use crate::layout::baseline_y;
use crate::scale::max_scroll;
use crate::scheduler::effective_dpr;

impl TimelineEngine {
    pub fn px_per_day(&self) -> f64 {
        self.scale.px_per_day
    }

    /// Set the zoom directly (clamped), without cursor anchoring.
    pub fn set_px_per_day<H: ScrollArea + MarkerHost + ?Sized>(&mut self, px: f64, host: &mut H) {
        if !px.is_finite() {
            return;
        }
        self.scale.px_per_day = self.config.scale.clamp_px_per_day(px);
        self.size_content(host);
    }

    /// Replace the dataset. Returns the number of events loaded.
    pub fn set_records<H: ScrollArea + MarkerHost + ?Sized>(
        &mut self,
        records: Vec<MovieRecord>,
        host: &mut H,
    ) -> TimelineResult<usize> {
        let events = events_from_records(records)?;
        let count = events.len();
        self.load(events, host);
        Ok(count)
    }

    pub fn scroll_to_end<H: ScrollArea + ?Sized>(&mut self, host: &mut H) {
        self.sync_viewport(host);
        let end = max_scroll(self.content_width(), self.viewport.width);
        self.apply_scroll(end, host);
        self.scheduler.mark_dirty();
    }

    /// Calendar day under viewport x `x`, rounded to the nearest day.
    pub fn date_at_viewport_x(&self, x: f64) -> Option<NaiveDate> {
        let range = self.range.as_ref()?;
        let days = self.scale.x_to_day_offset(x, self.viewport.scroll_left);
        if !days.is_finite() {
            return None;
        }
        range.date_at(days.round() as i64)
    }

    pub fn date_at_center(&self) -> Option<NaiveDate> {
        self.date_at_viewport_x(self.viewport.width / 2.0)
    }

    /// Parse `YYYY-MM-DD` and scroll it to `align`. `Ok(false)` before a
    /// range exists.
    pub fn scroll_to_date_str<H: ScrollArea + ?Sized>(
        &mut self,
        input: &str,
        align: f64,
        host: &mut H,
    ) -> TimelineResult<bool> {
        let date = parse_calendar_date(input)?;
        Ok(self.scroll_to_date(date, align, host))
    }

    pub fn baseline_y(&self) -> f64 {
        baseline_y(self.viewport.height, self.baseline_frac)
    }

    /// Move the baseline to `frac` of the viewport height, clamped to the
    /// configured band. Non-finite input is ignored.
    pub fn set_baseline<H: MarkerHost + ?Sized>(&mut self, frac: f64, host: &mut H) -> bool {
        if !frac.is_finite() {
            return false;
        }
        let band = &self.config.baseline;
        self.baseline_frac = frac.clamp(band.min_frac, band.max_frac);
        self.place_covers(host);
        self.scheduler.mark_dirty();
        true
    }

    /// Colour at a point given as fractions of the viewport: the average RGB
    /// and the maximum alpha of a 3x3 device-pixel window around it.
    pub fn sample_canvas<S: Surface + ?Sized>(&self, surface: &S, xr: f64, yr: f64) -> Option<[u8; 4]> {
        let vw = self.viewport.width;
        let vh = self.viewport.height;
        if vw < 1.0 || vh < 1.0 || !xr.is_finite() || !yr.is_finite() {
            return None;
        }
        let dpr = effective_dpr(self.viewport.device_pixel_ratio, self.config.max_device_pixel_ratio);
        let x = (vw * xr).floor().clamp(0.0, vw - 1.0);
        let y = (vh * yr).floor().clamp(0.0, vh - 1.0);
        let ix = ((x * dpr).floor() - 1.0).max(0.0) as u32;
        let iy = ((y * dpr).floor() - 1.0).max(0.0) as u32;

        let (bw, bh) = surface.backing_size();
        let w = bw.checked_sub(ix)?.min(3);
        let h = bh.checked_sub(iy)?.min(3);
        if w == 0 || h == 0 {
            return None;
        }
        let data = surface.read_pixels(ix, iy, w, h)?;

        let mut sums = [0u32; 3];
        let mut max_alpha = 0u8;
        let mut n = 0u32;
        for px in data.chunks_exact(4) {
            sums[0] += u32::from(px[0]);
            sums[1] += u32::from(px[1]);
            sums[2] += u32::from(px[2]);
            max_alpha = max_alpha.max(px[3]);
            n += 1;
        }
        if n == 0 {
            return None;
        }
        let avg = |sum: u32| (f64::from(sum) / f64::from(n)).round() as u8;
        Some([avg(sums[0]), avg(sums[1]), avg(sums[2]), max_alpha])
    }
}
