//! Browser implementations of the engine's host seams: the scroll container,
//! one absolutely positioned `div` per cover, and the 2D canvas underneath.

use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, Window};

use watchline_core::host::{Fill, GradientStop, Point, Rect, Stroke, TextStyle};
use watchline_core::{Event, EventId, MarkerHost, MarkerPlacement, Palette, ScrollArea, Surface, ViewportState};

use super::listener::Listener;

const FONT_FAMILY: &str = "system-ui, -apple-system, Segoe UI, Roboto, sans-serif";
const GLOW_BLUR: f64 = 8.0;

/// Pointer activity on a cover.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerInput {
    Enter,
    Leave,
    Activate,
}

pub type MarkerHandler = Rc<dyn Fn(&EventId, MarkerInput)>;

struct MarkerElement {
    root: HtmlElement,
    _listeners: Vec<Listener>,
}

pub struct DomHost {
    window: Window,
    document: Document,
    viewport: HtmlElement,
    scroll: HtmlElement,
    content: HtmlElement,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    markers: HashMap<EventId, MarkerElement>,
    on_marker: MarkerHandler,
}

impl DomHost {
    pub fn new(
        viewport: HtmlElement,
        scroll: HtmlElement,
        content: HtmlElement,
        canvas: HtmlCanvasElement,
        on_marker: MarkerHandler,
    ) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            window,
            document,
            viewport,
            scroll,
            content,
            canvas,
            ctx,
            markers: HashMap::new(),
            on_marker,
        })
    }

    pub fn viewport(&self) -> &HtmlElement {
        &self.viewport
    }

    pub fn scroll(&self) -> &HtmlElement {
        &self.scroll
    }

    /// Viewport-relative x of a pointer event's client x.
    pub fn viewport_x(&self, client_x: f64) -> f64 {
        client_x - self.viewport.get_bounding_client_rect().left()
    }

    /// Toggle the class that dims the timeline behind the detail overlay.
    pub fn set_modal_open(&self, open: bool) {
        let classes = self.viewport.class_list();
        let result = if open {
            classes.add_1("modal-open")
        } else {
            classes.remove_1("modal-open")
        };
        if let Err(e) = result {
            log::error!("Failed to toggle modal-open: {:?}", e);
        }
    }

    pub fn clear_markers(&mut self) {
        for (_, marker) in self.markers.drain() {
            marker.root.remove();
        }
    }

    fn css_var(&self, name: &str) -> Option<String> {
        let root = self.document.document_element()?;
        let style = self.window.get_computed_style(&root).ok()??;
        let value = style.get_property_value(name).ok()?;
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    /// Timeline colours from the page's custom properties.
    pub fn palette(&self) -> Palette {
        let mut palette = Palette::default();
        if let Some(v) = self.css_var("--timeline") {
            palette.line = v;
        }
        if let Some(v) = self.css_var("--timeline-dim") {
            palette.line_dim = v;
        }
        if let Some(v) = self.css_var("--timeline-highlight") {
            palette.highlight = v;
        }
        if let Some(v) = self.css_var("--text-dim") {
            palette.text_dim = v;
        }
        palette
    }

    /// Autoscroll edge zone width from `--edge-zone`, in px.
    pub fn edge_zone(&self) -> Option<f64> {
        let raw = self.css_var("--edge-zone")?;
        let value: f64 = raw.trim_end_matches("px").trim().parse().ok()?;
        (value.is_finite() && value > 0.0).then_some(value)
    }

    fn create_marker(&self, event: &Event) -> Result<MarkerElement, JsValue> {
        let root = self
            .document
            .create_element("div")?
            .dyn_into::<HtmlElement>()?;
        root.set_id(&format!("cover-{}", event.id));
        root.set_class_name("cover");

        if let Some(url) = &event.cover_url {
            let img = self.document.create_element("img")?;
            img.set_attribute("src", url)?;
            img.set_attribute("alt", &format!("{} cover", event.title))?;
            img.set_attribute("decoding", "async")?;
            img.set_attribute("loading", "lazy")?;
            root.append_child(&img)?;
        }
        let label = self.document.create_element("div")?;
        label.set_class_name("label");
        label.set_text_content(Some(&event.caption()));
        root.append_child(&label)?;

        let listeners = vec![
            self.marker_listener(&root, "mouseenter", &event.id, MarkerInput::Enter)?,
            self.marker_listener(&root, "mouseleave", &event.id, MarkerInput::Leave)?,
            self.marker_listener(&root, "click", &event.id, MarkerInput::Activate)?,
        ];
        self.content.append_child(&root)?;
        Ok(MarkerElement {
            root,
            _listeners: listeners,
        })
    }

    fn marker_listener(
        &self,
        root: &HtmlElement,
        kind: &'static str,
        id: &EventId,
        input: MarkerInput,
    ) -> Result<Listener, JsValue> {
        let handler = Rc::clone(&self.on_marker);
        let element = root.clone();
        let id = id.clone();
        Listener::new(root, kind, move |ev| {
            let classes = element.class_list();
            let _ = match input {
                MarkerInput::Enter => classes.add_1("hover"),
                MarkerInput::Leave => classes.remove_1("hover"),
                MarkerInput::Activate => {
                    ev.stop_propagation();
                    Ok(())
                }
            };
            handler(&id, input);
        })
    }

    fn apply_glow(&self, glow: Option<&str>) {
        match glow {
            Some(color) => {
                self.ctx.set_shadow_color(color);
                self.ctx.set_shadow_blur(GLOW_BLUR);
            }
            None => self.ctx.set_shadow_blur(0.0),
        }
    }
}

// ── Scroll container ──────────────────────────────────────────────────────

impl ScrollArea for DomHost {
    fn metrics(&self) -> ViewportState {
        ViewportState {
            scroll_left: f64::from(self.scroll.scroll_left()),
            width: f64::from(self.viewport.client_width()),
            height: f64::from(self.viewport.client_height()),
            device_pixel_ratio: self.window.device_pixel_ratio(),
        }
    }

    fn set_scroll_left(&mut self, x: f64) {
        self.scroll.set_scroll_left(x.round() as i32);
    }

    fn set_content_size(&mut self, width: f64, height: f64) {
        let scroll = self.scroll.style();
        let content = self.content.style();
        let result = scroll
            .set_property("width", &format!("{}px", self.viewport.client_width()))
            .and_then(|_| scroll.set_property("height", &format!("{height}px")))
            .and_then(|_| content.set_property("width", &format!("{width}px")))
            .and_then(|_| content.set_property("height", &format!("{height}px")));
        if let Err(e) = result {
            log::error!("Failed to size timeline content: {:?}", e);
        }
    }
}

// ── Covers ────────────────────────────────────────────────────────────────

impl MarkerHost for DomHost {
    fn ensure_marker(&mut self, event: &Event) {
        if self.markers.contains_key(&event.id) {
            return;
        }
        match self.create_marker(event) {
            Ok(marker) => {
                self.markers.insert(event.id.clone(), marker);
            }
            Err(e) => log::error!("Failed to create cover for {}: {:?}", event.id, e),
        }
    }

    fn position_marker(&mut self, id: &EventId, placement: &MarkerPlacement) {
        let Some(marker) = self.markers.get(id) else { return };
        let style = marker.root.style();
        let result = style
            .set_property("left", &format!("{}px", placement.left))
            .and_then(|_| style.set_property("top", &format!("{}px", placement.top)))
            .and_then(|_| style.set_property("--cover-scale", &placement.scale.to_string()));
        if let Err(e) = result {
            log::error!("Failed to position cover {id}: {:?}", e);
        }
    }

    fn remove_marker(&mut self, id: &EventId) {
        if let Some(marker) = self.markers.remove(id) {
            marker.root.remove();
        }
    }

    fn marker_height(&self, id: &EventId) -> Option<f64> {
        let marker = self.markers.get(id)?;
        let height = marker.root.get_bounding_client_rect().height();
        Some(if height > 0.0 {
            height
        } else {
            f64::from(marker.root.offset_height())
        })
    }
}

// ── Canvas ────────────────────────────────────────────────────────────────

impl Surface for DomHost {
    fn backing_size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn resize_backing(&mut self, width: u32, height: u32, css_width: f64, css_height: f64) {
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{css_width}px"));
        let _ = style.set_property("height", &format!("{css_height}px"));
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn begin_frame(&mut self, dpr: f64, width: f64, height: f64) {
        let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &Stroke<'_>) {
        self.ctx.save();
        self.apply_glow(stroke.glow);
        self.ctx.set_stroke_style_str(stroke.color);
        self.ctx.set_line_width(stroke.width);
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
        self.ctx.restore();
    }

    fn fill_circle(&mut self, center: Point, radius: f64, fill: &Fill<'_>) {
        self.ctx.save();
        self.apply_glow(fill.glow);
        self.ctx.set_fill_style_str(fill.color);
        self.ctx.begin_path();
        let _ = self.ctx.arc(center.x, center.y, radius, 0.0, std::f64::consts::TAU);
        self.ctx.fill();
        self.ctx.restore();
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle<'_>) {
        self.ctx.save();
        self.apply_glow(style.glow);
        self.ctx.set_font(&format!("{}px {FONT_FAMILY}", style.font_px));
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("top");
        self.ctx.set_fill_style_str(style.color);
        let _ = self.ctx.fill_text(text, at.x, at.y);
        self.ctx.restore();
    }

    fn fill_gradient_band(&mut self, rect: Rect, stops: &[GradientStop<'_>]) {
        let gradient = self
            .ctx
            .create_linear_gradient(0.0, rect.y, 0.0, rect.y + rect.height);
        for stop in stops {
            if let Err(e) = gradient.add_color_stop(stop.offset as f32, stop.color) {
                log::error!("Bad gradient stop {}: {:?}", stop.color, e);
                return;
            }
        }
        self.ctx.save();
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
        self.ctx.restore();
    }

    fn read_pixels(&self, x: u32, y: u32, width: u32, height: u32) -> Option<Vec<u8>> {
        let data = self
            .ctx
            .get_image_data(f64::from(x), f64::from(y), f64::from(width), f64::from(height))
            .ok()?;
        Some(data.data().0)
    }
}

impl Drop for DomHost {
    fn drop(&mut self) {
        self.clear_markers();
    }
}
