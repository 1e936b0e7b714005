//! Macro-indicator dashboard
//!
//! Drill down sector → subsector → component → unit and see the subsector's
//! KPIs, the component's card and its actual/projection time series.
//!
//! Data flow:
//! 1. On mount: load Chart.js and send `Init`, which loads the year list and
//!    sectors and cascades down to the first unit.
//! 2. Every click or select sends a command to the cascade controller; the
//!    controller writes results back into the AppState signals.
//! 3. Chart type and projection toggles redraw from the cached series.

use dioxus::prelude::*;
use log::error;
use mdash_client::ClientConfig;
use mdash_core::{Command, DashboardConfig, Level};
use mdash_ui::components::{
    ChartContainer, ChartControls, ChartHeader, ComponentKpiCard, ErrorDisplay, KpiCards,
    LevelButtons, SeriesTypeSelector, UnitSelector, YearSelector,
};
use mdash_ui::dispatch::Dispatcher;
use mdash_ui::js_bridge;
use mdash_ui::state::AppState;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("dashboard-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let state = use_context_provider(AppState::new);
    let connection = use_hook(move || {
        Dispatcher::connect(
            state,
            ClientConfig::new(js_bridge::page_origin()),
            DashboardConfig::default(),
        )
        .map_err(|e| {
            error!("cannot reach backend: {}", e);
            e.to_string()
        })
    });

    match connection {
        Ok(dispatcher) => rsx! { Dashboard { dispatcher: dispatcher } },
        Err(message) => rsx! {
            ErrorDisplay { message: message }
        },
    }
}

#[component]
fn Dashboard(dispatcher: Dispatcher) -> Element {
    let dispatcher = use_context_provider(move || dispatcher);
    let state = use_context::<AppState>();
    let chart_container = DashboardConfig::default().chart_container;

    // ─── Load Chart.js and start the cascade, once ───
    use_effect(move || {
        js_bridge::init_charts();
        dispatcher.send(Command::Init);
    });

    rsx! {
        div {
            style: "display: flex; gap: 24px; font-family: sans-serif; padding: 16px;",
            aside {
                style: "width: 220px; flex-shrink: 0;",
                LevelButtons { level: Level::Sector, title: "Sectors".to_string(), vertical: true }
            }
            main {
                style: "flex: 1; min-width: 0;",
                LevelButtons { level: Level::Subsector, title: "Subsectors".to_string() }
                div {
                    style: "margin: 8px 0;",
                    SeriesTypeSelector {}
                    YearSelector {}
                }
                KpiCards {}
                LevelButtons { level: Level::Component, title: "Components".to_string() }
                div {
                    style: "display: flex; gap: 16px; align-items: flex-start;",
                    div {
                        style: "flex-shrink: 0;",
                        UnitSelector {}
                        ComponentKpiCard {}
                    }
                    div {
                        style: "flex: 1; min-width: 0;",
                        ChartHeader {}
                        ChartControls {}
                        ChartContainer { id: chart_container, loading: (state.chart_pending)() }
                    }
                }
            }
        }
    }
}
