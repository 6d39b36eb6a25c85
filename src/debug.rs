//! `window.timelineDebug`: hooks for browser tests and the console.

use js_sys::{Array, Object, Reflect, JSON};
use wasm_bindgen::prelude::*;

use watchline_core::MovieRecord;

use crate::timeline::session::with_session;

const GLOBAL_NAME: &str = "timelineDebug";
/// Alignment used by `scrollToDateStr` when none is given.
const DEFAULT_ALIGN: f64 = 0.5;

fn set_fn(target: &Object, name: &str, f: JsValue) {
    if let Err(e) = Reflect::set(target, &JsValue::from_str(name), &f) {
        log::error!("Failed to install debug hook {name}: {:?}", e);
    }
}

fn date_value(date: Option<chrono::NaiveDate>) -> JsValue {
    date.map(|d| JsValue::from_str(&d.format("%Y-%m-%d").to_string()))
        .unwrap_or(JsValue::NULL)
}

fn records_from_js(items: &JsValue) -> Result<Vec<MovieRecord>, String> {
    if items.is_null() || items.is_undefined() {
        return Ok(Vec::new());
    }
    let json = JSON::stringify(items)
        .map_err(|e| format!("{:?}", e))?
        .as_string()
        .ok_or("items are not serializable")?;
    watchline_core::parse_records(&json).map_err(|e| e.to_string())
}

pub fn install() {
    let Some(window) = web_sys::window() else { return };
    let hooks = Object::new();

    set_fn(
        &hooks,
        "getPxPerDay",
        Closure::<dyn Fn() -> JsValue>::new(|| {
            with_session(|s| JsValue::from_f64(s.engine.px_per_day())).unwrap_or(JsValue::NULL)
        })
        .into_js_value(),
    );
    set_fn(
        &hooks,
        "setPxPerDay",
        Closure::<dyn Fn(f64)>::new(|px: f64| {
            with_session(|s| s.engine.set_px_per_day(px, &mut s.host));
        })
        .into_js_value(),
    );
    set_fn(
        &hooks,
        "setEvents",
        Closure::<dyn Fn(JsValue) -> JsValue>::new(|items: JsValue| {
            let records = match records_from_js(&items) {
                Ok(records) => records,
                Err(e) => {
                    log::error!("setEvents failed: {e}");
                    return JsValue::NULL;
                }
            };
            let loaded = with_session(|s| {
                let count = s.engine.set_records(records, &mut s.host)?;
                s.start_frames();
                Ok::<_, watchline_core::TimelineError>(count)
            });
            match loaded {
                Some(Ok(count)) => JsValue::from_f64(count as f64),
                Some(Err(e)) => {
                    log::error!("setEvents failed: {e}");
                    JsValue::NULL
                }
                None => JsValue::NULL,
            }
        })
        .into_js_value(),
    );
    set_fn(
        &hooks,
        "scrollToEnd",
        Closure::<dyn Fn()>::new(|| {
            with_session(|s| s.engine.scroll_to_end(&mut s.host));
        })
        .into_js_value(),
    );
    set_fn(
        &hooks,
        "dateAtViewportX",
        Closure::<dyn Fn(f64) -> JsValue>::new(|x: f64| {
            with_session(|s| {
                s.engine.sync_viewport(&s.host);
                date_value(s.engine.date_at_viewport_x(x))
            })
            .unwrap_or(JsValue::NULL)
        })
        .into_js_value(),
    );
    set_fn(
        &hooks,
        "dateAtCenter",
        Closure::<dyn Fn() -> JsValue>::new(|| {
            with_session(|s| {
                s.engine.sync_viewport(&s.host);
                date_value(s.engine.date_at_center())
            })
            .unwrap_or(JsValue::NULL)
        })
        .into_js_value(),
    );
    set_fn(
        &hooks,
        "scrollToDateStr",
        Closure::<dyn Fn(JsValue, JsValue) -> bool>::new(|date: JsValue, align: JsValue| {
            let Some(date) = date.as_string() else { return false };
            let align = align.as_f64().unwrap_or(DEFAULT_ALIGN);
            with_session(|s| s.engine.scroll_to_date_str(&date, align, &mut s.host))
                .and_then(|result| {
                    result
                        .map_err(|e| log::warn!("scrollToDateStr: {e}"))
                        .ok()
                })
                .unwrap_or(false)
        })
        .into_js_value(),
    );
    set_fn(
        &hooks,
        "getBaselineY",
        Closure::<dyn Fn() -> JsValue>::new(|| {
            with_session(|s| {
                s.engine.sync_viewport(&s.host);
                JsValue::from_f64(s.engine.baseline_y())
            })
            .unwrap_or(JsValue::NULL)
        })
        .into_js_value(),
    );
    set_fn(
        &hooks,
        "setBaseline",
        Closure::<dyn Fn(f64) -> bool>::new(|frac: f64| {
            with_session(|s| s.engine.set_baseline(frac, &mut s.host)).unwrap_or(false)
        })
        .into_js_value(),
    );
    set_fn(
        &hooks,
        "sampleCanvas",
        Closure::<dyn Fn(f64, f64) -> JsValue>::new(|xr: f64, yr: f64| {
            with_session(|s| s.engine.sample_canvas(&s.host, xr, yr))
                .flatten()
                .map(|rgba| {
                    rgba.iter()
                        .map(|&c| JsValue::from(c))
                        .collect::<Array>()
                        .into()
                })
                .unwrap_or(JsValue::NULL)
        })
        .into_js_value(),
    );

    if let Err(e) = Reflect::set(&window, &JsValue::from_str(GLOBAL_NAME), &hooks) {
        log::error!("Failed to install {GLOBAL_NAME}: {:?}", e);
    }
}

pub fn uninstall() {
    if let Some(window) = web_sys::window() {
        let _ = Reflect::delete_property(&window, &JsValue::from_str(GLOBAL_NAME));
    }
}
