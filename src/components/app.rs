use leptos::prelude::*;
use crate::components::detail::DetailOverlay;
use crate::components::timeline::Timeline;
use crate::state::AppState;

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new();
    provide_context(state);

    let count_label = move || match state.event_count.get() {
        0 => String::new(),
        1 => "1 movie".to_string(),
        n => format!("{n} movies"),
    };

    view! {
        <div class="app">
            <header class="app-header">
                <span class="app-title">"Watchline"</span>
                <span class="app-count">{count_label}</span>
            </header>
            <Timeline />
            <DetailOverlay />
        </div>
    }
}
