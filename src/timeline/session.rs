//! The mounted timeline: engine, DOM host, frame loop and page-level
//! listeners, kept in a thread-local so every browser callback reaches the
//! same instance.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent, ResizeObserver, WheelEvent};

use watchline_core::{EventId, TimelineConfig, TimelineEngine};

use super::frame_loop::AnimationLoop;
use super::host::{DomHost, MarkerHandler, MarkerInput};
use super::listener::Listener;
use crate::dataset::{fetch_events, DATASET_URL};
use crate::state::AppState;

thread_local! {
    static SESSION: RefCell<Option<Session>> = const { RefCell::new(None) };
}

pub struct Session {
    pub engine: TimelineEngine,
    pub host: DomHost,
    frames: Option<AnimationLoop>,
    _resize: Option<ResizeWatch>,
    _listeners: Vec<Listener>,
}

impl Session {
    /// Start the engine and its frame loop unless already running.
    pub fn start_frames(&mut self) {
        if self.frames.is_some() {
            return;
        }
        self.engine.start();
        match AnimationLoop::start(frame) {
            Ok(frames) => self.frames = Some(frames),
            Err(e) => log::error!("Failed to start frame loop: {:?}", e),
        }
    }

    fn stop_frames(&mut self) {
        self.engine.stop();
        self.frames = None;
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.stop_frames();
    }
}

struct ResizeWatch {
    observer: ResizeObserver,
    _callback: Closure<dyn FnMut(js_sys::Array)>,
}

impl ResizeWatch {
    fn observe(target: &HtmlElement) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(js_sys::Array)>::new(|_entries: js_sys::Array| {
            with_session(|s| s.engine.resize(&mut s.host));
        });
        let observer = ResizeObserver::new(callback.as_ref().unchecked_ref())?;
        observer.observe(target);
        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for ResizeWatch {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Run `f` against the mounted session. `None` when nothing is mounted or
/// the session is already borrowed further up the stack.
pub fn with_session<R>(f: impl FnOnce(&mut Session) -> R) -> Option<R> {
    SESSION.with(|cell| match cell.try_borrow_mut() {
        Ok(mut slot) => slot.as_mut().map(f),
        Err(_) => {
            log::warn!("Timeline session busy; dropping callback");
            None
        }
    })
}

pub fn is_mounted() -> bool {
    SESSION.with(|cell| cell.try_borrow().map(|s| s.is_some()).unwrap_or(true))
}

fn frame(timestamp: f64) {
    with_session(|s| s.engine.frame(timestamp, &mut s.host));
}

// ── Mount / teardown ──────────────────────────────────────────────────────

pub fn mount(
    state: AppState,
    viewport: HtmlElement,
    scroll: HtmlElement,
    content: HtmlElement,
    canvas: HtmlCanvasElement,
) -> Result<(), JsValue> {
    let on_marker: MarkerHandler = Rc::new(move |id: &EventId, input: MarkerInput| match input {
        MarkerInput::Enter => {
            with_session(|s| s.engine.set_hover(id, true));
        }
        MarkerInput::Leave => {
            with_session(|s| s.engine.set_hover(id, false));
        }
        MarkerInput::Activate => open_detail(state, id),
    });
    let host = DomHost::new(viewport, scroll, content, canvas, on_marker)?;

    let mut config = TimelineConfig::default();
    if let Some(edge_zone) = host.edge_zone() {
        config.autoscroll.edge_zone = edge_zone;
    }
    let mut engine = TimelineEngine::new(config);
    engine.set_palette(host.palette());

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let listeners = vec![
        Listener::new(&window, "beforeunload", |_| teardown())?,
        Listener::new(&document, "visibilitychange", {
            let document = document.clone();
            move |_| set_visible(!document.hidden())
        })?,
        Listener::new(&document, "keydown", move |ev| {
            let Some(key) = ev.dyn_ref::<KeyboardEvent>() else { return };
            if key.key() == "Escape" {
                close_detail(state);
            }
        })?,
        Listener::active(host.scroll(), "touchmove", |ev| block_if_modal(&ev))?,
    ];
    let resize = ResizeWatch::observe(host.viewport())?;

    let session = Session {
        engine,
        host,
        frames: None,
        _resize: Some(resize),
        _listeners: listeners,
    };
    SESSION.with(|cell| *cell.borrow_mut() = Some(session));
    crate::debug::install();
    log::debug!("Timeline mounted");
    Ok(())
}

/// Stop the frame loop, drop listeners and covers, and forget the session.
pub fn teardown() {
    let session = SESSION.with(|cell| cell.try_borrow_mut().ok().and_then(|mut slot| slot.take()));
    if session.is_some() {
        crate::debug::uninstall();
        log::debug!("Timeline torn down");
    }
    drop(session);
}

fn set_visible(visible: bool) {
    with_session(|s| {
        if visible {
            s.start_frames();
        } else {
            s.stop_frames();
        }
    });
}

/// Load the dataset into the mounted engine, or fall back to an empty
/// current-year timeline with a banner.
pub async fn load_dataset(state: AppState) {
    match fetch_events(DATASET_URL).await {
        Ok(events) => {
            let count = events.len();
            with_session(|s| {
                s.engine.load(events, &mut s.host);
                s.engine.focus_latest(&mut s.host);
                s.start_frames();
            });
            state.event_count.set(count);
        }
        Err(e) => {
            log::error!("Failed to load {DATASET_URL}: {e}");
            state.load_error.set(Some(format!(
                "Could not load {DATASET_URL}. If viewing via file://, run a static server."
            )));
            with_session(|s| {
                s.engine.load_failed(&mut s.host);
                s.start_frames();
            });
        }
    }
}

// ── Input ─────────────────────────────────────────────────────────────────

pub fn pointer_move(ev: &MouseEvent) {
    with_session(|s| {
        let x = s.host.viewport_x(f64::from(ev.client_x()));
        s.engine.pointer_move(x);
    });
}

pub fn pointer_leave() {
    with_session(|s| s.engine.pointer_leave());
}

pub fn wheel(ev: &WheelEvent) {
    ev.prevent_default();
    with_session(|s| {
        let x = s.host.viewport_x(f64::from(ev.client_x()));
        s.engine.wheel(ev.delta_y(), x, &mut s.host);
    });
}

pub fn scrolled() {
    with_session(|s| s.engine.on_scroll(&mut s.host));
}

/// Swallow a scroll gesture while the detail view is open.
fn block_if_modal(ev: &web_sys::Event) {
    if with_session(|s| s.engine.blocks_gestures()).unwrap_or(false) {
        ev.prevent_default();
        ev.stop_propagation();
    }
}

// ── Detail view ───────────────────────────────────────────────────────────

pub fn open_detail(state: AppState, id: &EventId) {
    if state.is_detail_open() {
        return;
    }
    let opened = with_session(|s| {
        let event = s.engine.open_detail(id, &s.host)?;
        s.host.set_modal_open(true);
        Ok::<_, watchline_core::TimelineError>(event)
    });
    match opened {
        Some(Ok(event)) => state.detail.set(Some(event)),
        Some(Err(e)) => log::error!("Cannot open detail: {e}"),
        None => {}
    }
}

pub fn close_detail(state: AppState) {
    if !state.is_detail_open() {
        return;
    }
    state.detail.set(None);
    with_session(|s| {
        s.engine.close_detail(&mut s.host);
        s.host.set_modal_open(false);
    });
}
