//! Year and series-type selectors.

use crate::dispatch::Dispatcher;
use crate::state::AppState;
use dioxus::prelude::*;
use log::warn;
use mdash_core::{Command, SeriesType, Year};

/// Dropdown of the years offered for the current series type.
#[component]
pub fn YearSelector() -> Element {
    let state = use_context::<AppState>();
    let dispatcher = use_context::<Dispatcher>();
    let years = (state.years)();
    let selected = (state.snapshot)().selection.year;

    let on_change = move |evt: Event<FormData>| match evt.value().parse::<Year>() {
        Ok(year) => dispatcher.send(Command::SelectYear(year)),
        Err(e) => warn!("ignoring year {:?}: {}", evt.value(), e),
    };

    rsx! {
        label {
            style: "font-weight: bold; margin-right: 12px;",
            "Year: "
            select {
                id: "year-select",
                disabled: years.is_empty(),
                onchange: on_change,
                for year in years.iter() {
                    option {
                        value: "{year}",
                        selected: Some(*year) == selected,
                        "{year}"
                    }
                }
            }
        }
    }
}

/// Switches the year list between actual and projected years.
#[component]
pub fn SeriesTypeSelector() -> Element {
    let state = use_context::<AppState>();
    let dispatcher = use_context::<Dispatcher>();
    let current = (state.snapshot)().selection.series_type;

    let on_change = move |evt: Event<FormData>| match evt.value().parse::<SeriesType>() {
        Ok(series_type) => dispatcher.send(Command::SelectSeriesType(series_type)),
        Err(e) => warn!("{}", e),
    };

    rsx! {
        label {
            style: "font-weight: bold; margin-right: 12px;",
            "Series: "
            select {
                id: "series-type-select",
                onchange: on_change,
                for (series_type, label) in [
                    (SeriesType::Actual, "Actual"),
                    (SeriesType::Projection, "Projection"),
                ] {
                    option {
                        value: "{series_type.as_str()}",
                        selected: series_type == current,
                        "{label}"
                    }
                }
            }
        }
    }
}
