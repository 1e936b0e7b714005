//! Dropdown selector for the unit of the selected component.

use crate::dispatch::Dispatcher;
use crate::state::AppState;
use dioxus::prelude::*;
use mdash_core::{Command, LevelState};

#[component]
pub fn UnitSelector() -> Element {
    let state = use_context::<AppState>();
    let dispatcher = use_context::<Dispatcher>();
    let view = (state.units)();
    let selected = match &view.state {
        LevelState::Selected(value) => value.clone(),
        _ => String::new(),
    };

    let on_change = move |evt: Event<FormData>| {
        dispatcher.send(Command::SelectUnit(evt.value()));
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "unit-select",
                style: "font-weight: bold; margin-right: 8px;",
                "Unit: "
            }
            select {
                id: "unit-select",
                disabled: view.options.is_empty(),
                onchange: on_change,
                if view.options.is_empty() {
                    option { value: "", "No units available" }
                }
                for unit in view.options.iter() {
                    option {
                        value: "{unit}",
                        selected: *unit == selected,
                        "{unit}"
                    }
                }
            }
        }
    }
}
