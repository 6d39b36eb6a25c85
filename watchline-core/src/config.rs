//! Tuning constants for the timeline.
//!
//! Every field has a default; a partial JSON object deserializes with the
//! remaining fields filled in, so hosts can override only what they need
//! (the browser front end overrides `autoscroll.edge_zone` from CSS).

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub scale: ScaleConfig,
    pub baseline: BaselineConfig,
    pub ticks: TickThresholds,
    pub autoscroll: AutoscrollConfig,
    pub zoom: ZoomConfig,
    pub lanes: LaneConfig,
    pub cover_scale: CoverScaleConfig,
    /// Days added before the earliest and after the latest event.
    pub range_pad_days: i64,
    /// Upper bound applied to the host's device pixel ratio.
    pub max_device_pixel_ratio: f64,
    /// Viewport alignment used when focusing the latest event after a load.
    pub focus_align: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            scale: ScaleConfig::default(),
            baseline: BaselineConfig::default(),
            ticks: TickThresholds::default(),
            autoscroll: AutoscrollConfig::default(),
            zoom: ZoomConfig::default(),
            lanes: LaneConfig::default(),
            cover_scale: CoverScaleConfig::default(),
            range_pad_days: 10,
            max_device_pixel_ratio: 2.0,
            focus_align: 0.7,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleConfig {
    pub initial_px_per_day: f64,
    pub min_px_per_day: f64,
    pub max_px_per_day: f64,
    /// Starting value of both side paddings inside the content area.
    pub base_padding: f64,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            initial_px_per_day: 12.0,
            min_px_per_day: 1.2,
            max_px_per_day: 160.0,
            base_padding: 200.0,
        }
    }
}

impl ScaleConfig {
    pub fn clamp_px_per_day(&self, px: f64) -> f64 {
        px.clamp(self.min_px_per_day, self.max_px_per_day)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaselineConfig {
    /// Fraction of viewport height at which the baseline is drawn.
    pub initial_frac: f64,
    pub min_frac: f64,
    pub max_frac: f64,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            initial_frac: 0.52,
            min_frac: 0.40,
            max_frac: 0.72,
        }
    }
}

/// Zoom bands (in px per day) that switch tick and label detail on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickThresholds {
    pub daily_ticks: f64,
    pub ten_emphasis: f64,
    pub day_numbers: f64,
}

impl Default for TickThresholds {
    fn default() -> Self {
        Self {
            daily_ticks: 18.0,
            ten_emphasis: 24.0,
            day_numbers: 20.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoscrollConfig {
    /// Width in px of the band along each viewport edge that triggers scrolling.
    pub edge_zone: f64,
    /// Scroll speed in px/s with the pointer at the very edge.
    pub max_speed: f64,
}

impl Default for AutoscrollConfig {
    fn default() -> Self {
        Self {
            edge_zone: 140.0,
            max_speed: 1200.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// `factor = exp(-delta * sensitivity)`; positive wheel delta zooms out.
    pub sensitivity: f64,
    /// Changes in px per day smaller than this are dropped.
    pub min_change: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.0015,
            min_change: 0.01,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneConfig {
    /// Marker centre distance from the baseline as a fraction of viewport height.
    pub offset_frac: f64,
    pub offset_cap: f64,
}

impl Default for LaneConfig {
    fn default() -> Self {
        Self {
            offset_frac: 0.25,
            offset_cap: 220.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverScaleConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    /// px per day at which the scale starts to grow from `min_scale`.
    pub ramp_start: f64,
    /// px per day at which `max_scale` is reached.
    pub ramp_end: f64,
}

impl Default for CoverScaleConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.75,
            max_scale: 1.20,
            ramp_start: 8.0,
            ramp_end: 42.0,
        }
    }
}
