//! Button group for one hierarchy level (sector, subsector or component).

use crate::components::LoadingSpinner;
use crate::dispatch::Dispatcher;
use crate::state::AppState;
use dioxus::prelude::*;
use mdash_core::{Command, Level, LevelState};

#[derive(Props, Clone, PartialEq)]
pub struct LevelButtonsProps {
    pub level: Level,
    pub title: String,
    /// Stack buttons vertically (sidebar) instead of wrapping them in a row.
    #[props(default = false)]
    pub vertical: bool,
}

/// One button per option; the selected option is highlighted. Clicking sends
/// the select command for the level.
#[component]
pub fn LevelButtons(props: LevelButtonsProps) -> Element {
    let state = use_context::<AppState>();
    let dispatcher = use_context::<Dispatcher>();
    let level = props.level;
    let view = state.level(level)();

    let selected = match &view.state {
        LevelState::Selected(value) => Some(value.clone()),
        _ => None,
    };
    let direction = if props.vertical { "column" } else { "row" };

    let body = match view.state {
        LevelState::Unselected => rsx! {},
        LevelState::Loading if view.options.is_empty() => rsx! { LoadingSpinner {} },
        LevelState::Empty => rsx! {
            p {
                style: "margin: 0; color: #999; font-style: italic;",
                "No {level.as_str()}s available"
            }
        },
        _ => rsx! {
            div {
                style: "display: flex; flex-direction: {direction}; flex-wrap: wrap; gap: 6px;",
                for option in view.options.iter().cloned() {
                    LevelButton {
                        key: "{option}",
                        label: option.clone(),
                        active: selected.as_deref() == Some(option.as_str()),
                        onclick: {
                            let dispatcher = dispatcher.clone();
                            let option = option.clone();
                            move |_| dispatcher.send(Command::select(level, option.clone()))
                        },
                    }
                }
            }
        },
    };

    rsx! {
        div {
            class: "level-{level.as_str()}",
            style: "margin: 8px 0;",
            h4 {
                style: "margin: 0 0 6px 0; font-size: 14px;",
                "{props.title}"
            }
            {body}
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct LevelButtonProps {
    label: String,
    active: bool,
    onclick: EventHandler<MouseEvent>,
}

#[component]
fn LevelButton(props: LevelButtonProps) -> Element {
    let style = if props.active {
        "padding: 4px 10px; border: 1px solid #0366d6; background: #0366d6; color: #fff; border-radius: 4px; cursor: pointer; text-align: left;"
    } else {
        "padding: 4px 10px; border: 1px solid #ccc; background: #fff; color: #333; border-radius: 4px; cursor: pointer; text-align: left;"
    };

    rsx! {
        button {
            style: "{style}",
            onclick: move |evt| props.onclick.call(evt),
            "{props.label}"
        }
    }
}
