//! Text rendering of [`AppState`] through the feature selectors.

use crate::AppState;
use counter::selectors as counter_selectors;
use giphy_cats::selectors as giphy_selectors;
use remote_data_service::{Lifecycle, selectors};

/// One line per feature
#[must_use]
pub fn render(state: &AppState) -> String {
    format!(
        "Counter: {} (clicks: {})\nGiphy cats: {}",
        counter_selectors::count(&state.counter),
        counter_selectors::total_clicks(&state.counter),
        giphy_cats(&state.giphy_cats),
    )
}

fn giphy_cats(state: &Lifecycle) -> String {
    if selectors::is_loading(state) {
        return "loading...".to_string();
    }
    if selectors::is_failure(state) {
        return format!("error: {}", selectors::error_message(state));
    }
    if selectors::is_success(state) {
        return giphy_selectors::image_url(state)
            .unwrap_or_else(|| "no image in response".to_string());
    }
    "type `cat` to fetch one".to_string()
}
