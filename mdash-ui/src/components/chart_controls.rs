//! Chart type and projection toggles. Both re-render from the cached series.

use crate::dispatch::Dispatcher;
use crate::state::AppState;
use dioxus::prelude::*;
use mdash_core::{ChartType, Command};

const TOGGLE_ON: &str = "padding: 4px 10px; border: 1px solid #0366d6; background: #0366d6; color: #fff; cursor: pointer;";
const TOGGLE_OFF: &str = "padding: 4px 10px; border: 1px solid #ccc; background: #fff; color: #333; cursor: pointer;";

#[component]
pub fn ChartControls() -> Element {
    let state = use_context::<AppState>();
    let dispatcher = use_context::<Dispatcher>();
    let mode = (state.snapshot)().mode;

    let on_projection_change = {
        let dispatcher = dispatcher.clone();
        move |evt: Event<FormData>| {
            dispatcher.send(Command::SetShowProjection(evt.checked()));
        }
    };

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; gap: 12px; align-items: center;",
            div {
                id: "chart-type-toggle",
                for (chart_type, label) in [(ChartType::Line, "Line"), (ChartType::Bar, "Bar")] {
                    button {
                        key: "{chart_type.as_str()}",
                        style: if mode.chart_type == chart_type { TOGGLE_ON } else { TOGGLE_OFF },
                        onclick: {
                            let dispatcher = dispatcher.clone();
                            move |_| dispatcher.send(Command::SetChartType(chart_type))
                        },
                        "{label}"
                    }
                }
            }
            label {
                input {
                    id: "projection-toggle",
                    r#type: "checkbox",
                    checked: mode.show_projection,
                    onchange: on_projection_change,
                }
                " Show projection"
            }
        }
    }
}
