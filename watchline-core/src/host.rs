use crate::event::{Event, EventId};

/// Live geometry of the scrolling viewport, read from the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
    pub scroll_left: f64,
    pub width: f64,
    pub height: f64,
    pub device_pixel_ratio: f64,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            scroll_left: 0.0,
            width: 0.0,
            height: 0.0,
            device_pixel_ratio: 1.0,
        }
    }
}

/// The horizontally scrolling container that holds the content area.
pub trait ScrollArea {
    fn metrics(&self) -> ViewportState;
    fn set_scroll_left(&mut self, x: f64);
    /// Resize the scrollable content; `height` is the viewport height.
    fn set_content_size(&mut self, width: f64, height: f64);
}

/// Where a marker should sit, in content coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerPlacement {
    /// Horizontal centre.
    pub left: f64,
    /// Vertical centre.
    pub top: f64,
    /// Visual scale applied to the cover at the current zoom.
    pub scale: f64,
}

/// Owner of the per-event cover elements.
pub trait MarkerHost {
    /// Create the marker for `event` unless it already exists.
    fn ensure_marker(&mut self, event: &Event);
    fn position_marker(&mut self, id: &EventId, placement: &MarkerPlacement);
    fn remove_marker(&mut self, id: &EventId);
    /// Rendered height of the marker after layout, if it exists.
    fn marker_height(&self, id: &EventId) -> Option<f64>;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stroke<'a> {
    pub color: &'a str,
    pub width: f64,
    /// Soft highlight glow colour, if any.
    pub glow: Option<&'a str>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Fill<'a> {
    pub color: &'a str,
    pub glow: Option<&'a str>,
}

/// Text is always drawn centred horizontally with a top baseline.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle<'a> {
    pub font_px: f64,
    pub color: &'a str,
    pub glow: Option<&'a str>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop<'a> {
    pub offset: f64,
    pub color: &'a str,
}

/// A device-pixel-ratio aware 2D drawing target sized to the viewport.
pub trait Surface {
    /// Size of the backing store in device pixels.
    fn backing_size(&self) -> (u32, u32);
    /// Resize the backing store (clears it) and its CSS box.
    fn resize_backing(&mut self, width: u32, height: u32, css_width: f64, css_height: f64);
    /// Reset the transform to `dpr` and clear `width x height` CSS pixels.
    fn begin_frame(&mut self, dpr: f64, width: f64, height: f64);
    fn stroke_line(&mut self, from: Point, to: Point, stroke: &Stroke<'_>);
    fn fill_circle(&mut self, center: Point, radius: f64, fill: &Fill<'_>);
    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle<'_>);
    /// Fill `rect` with a vertical gradient running from its top to its bottom.
    fn fill_gradient_band(&mut self, rect: Rect, stops: &[GradientStop<'_>]);
    /// RGBA bytes of a device-pixel rectangle, row-major.
    fn read_pixels(&self, x: u32, y: u32, width: u32, height: u32) -> Option<Vec<u8>>;
}

/// Everything the engine needs from its environment.
pub trait TimelineHost: ScrollArea + MarkerHost + Surface {}

impl<T: ScrollArea + MarkerHost + Surface> TimelineHost for T {}
