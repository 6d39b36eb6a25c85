use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use watchline_core::{events_from_records, parse_records, Event};

/// Static dataset served next to the page.
pub const DATASET_URL: &str = "content/movies.json";

/// Fetch and parse the dataset at `url`.
pub async fn fetch_events(url: &str) -> Result<Vec<Event>, String> {
    let window = web_sys::window().ok_or("No window object")?;
    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| format!("fetch failed: {:?}", e))?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| "fetch did not return a Response".to_string())?;
    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }
    let text = JsFuture::from(response.text().map_err(|e| format!("{:?}", e))?)
        .await
        .map_err(|e| format!("reading body failed: {:?}", e))?
        .as_string()
        .ok_or("response body is not text")?;
    let records = parse_records(&text).map_err(|e| e.to_string())?;
    events_from_records(records).map_err(|e| e.to_string())
}
