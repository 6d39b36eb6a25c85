use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A `requestAnimationFrame` loop that re-schedules itself every frame until
/// dropped.
pub struct AnimationLoop {
    handle: Rc<Cell<Option<i32>>>,
    callback: FrameCallback,
}

impl AnimationLoop {
    pub fn start(mut on_frame: impl FnMut(f64) + 'static) -> Result<Self, JsValue> {
        let handle = Rc::new(Cell::new(None));
        let callback: FrameCallback = Rc::new(RefCell::new(None));

        let next_handle = Rc::clone(&handle);
        let next_callback = Rc::downgrade(&callback);
        *callback.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
            next_handle.set(None);
            on_frame(timestamp);
            let Some(callback) = next_callback.upgrade() else { return };
            match request_frame(&callback) {
                Ok(id) => next_handle.set(Some(id)),
                Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
            }
        }));

        handle.set(Some(request_frame(&callback)?));
        Ok(Self { handle, callback })
    }
}

fn request_frame(callback: &FrameCallback) -> Result<i32, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let callback = callback.borrow();
    let closure = callback
        .as_ref()
        .ok_or_else(|| JsValue::from_str("animation loop stopped"))?;
    window.request_animation_frame(closure.as_ref().unchecked_ref())
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        if let (Some(id), Some(window)) = (self.handle.take(), web_sys::window()) {
            let _ = window.cancel_animation_frame(id);
        }
        self.callback.borrow_mut().take();
    }
}
