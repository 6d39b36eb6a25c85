use leptos::prelude::*;
use watchline_core::Event;

#[derive(Clone, Copy)]
pub struct AppState {
    /// Event shown in the detail overlay; `None` while it is closed.
    pub detail: RwSignal<Option<Event>>,
    /// Message for the banner shown when the dataset could not be loaded.
    pub load_error: RwSignal<Option<String>>,
    pub event_count: RwSignal<usize>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            detail: RwSignal::new(None),
            load_error: RwSignal::new(None),
            event_count: RwSignal::new(0),
        }
    }

    pub fn is_detail_open(&self) -> bool {
        self.detail.with_untracked(Option::is_some)
    }
}
