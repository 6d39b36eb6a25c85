use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlElement, MouseEvent, WheelEvent};
use crate::state::AppState;
use crate::timeline::session;

#[component]
pub fn Timeline() -> impl IntoView {
    let state = expect_context::<AppState>();
    let viewport_ref = NodeRef::<leptos::html::Div>::new();
    let scroll_ref = NodeRef::<leptos::html::Div>::new();
    let content_ref = NodeRef::<leptos::html::Div>::new();
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

    // Mount the engine once every element exists, then load the dataset
    Effect::new(move || {
        let (Some(viewport), Some(scroll), Some(content), Some(canvas)) = (
            viewport_ref.get(),
            scroll_ref.get(),
            content_ref.get(),
            canvas_ref.get(),
        ) else {
            return;
        };
        if session::is_mounted() {
            return;
        }
        let viewport: HtmlElement = viewport.into();
        let scroll: HtmlElement = scroll.into();
        let content: HtmlElement = content.into();
        if let Err(e) = session::mount(state, viewport, scroll, content, canvas) {
            log::error!("Failed to mount timeline: {:?}", e);
            return;
        }
        spawn_local(session::load_dataset(state));
    });

    on_cleanup(session::teardown);

    let on_wheel = move |ev: WheelEvent| session::wheel(&ev);
    let on_mousemove = move |ev: MouseEvent| session::pointer_move(&ev);

    view! {
        <div
            class="timeline-viewport"
            node_ref=viewport_ref
            on:mousemove=on_mousemove
            on:mouseleave=move |_| session::pointer_leave()
            on:wheel=on_wheel
        >
            <canvas class="timeline-canvas" node_ref=canvas_ref />
            <div
                class="timeline-scroll"
                node_ref=scroll_ref
                on:scroll=move |_| session::scrolled()
            >
                <div class="timeline-content" node_ref=content_ref></div>
            </div>
            {move || state.load_error.get().map(|msg| view! { <div class="banner">{msg}</div> })}
        </div>
    }
}
