//! Chart header naming the charted component and its unit.

use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn ChartHeader() -> Element {
    let state = use_context::<AppState>();
    let snapshot = (state.snapshot)();
    let selection = snapshot.selection;

    let title = selection
        .component
        .clone()
        .unwrap_or_else(|| "No component selected".to_string());
    let unit = selection.unit.unwrap_or_default();

    rsx! {
        div {
            style: "margin-bottom: 8px;",
            h3 {
                style: "margin: 0 0 4px 0; font-size: 16px;",
                "{title}"
            }
            if !unit.is_empty() {
                p {
                    style: "margin: 0; font-size: 12px; color: #666;",
                    "Y-axis: {unit}"
                }
            }
        }
    }
}
