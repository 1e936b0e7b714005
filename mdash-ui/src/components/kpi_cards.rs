//! KPI cards: the subsector panel and the selected component's card.

use crate::components::LoadingSpinner;
use crate::state::AppState;
use dioxus::prelude::*;
use mdash_core::{ComponentCard, KpiPanel};

const CARD_STYLE: &str = "padding: 10px 14px; border: 1px solid #e1e4e8; border-radius: 6px; background: #fafbfc; min-width: 160px;";

/// Every KPI of the selected subsector for the selected year.
#[component]
pub fn KpiCards() -> Element {
    let state = use_context::<AppState>();
    let panel = (state.panel)();

    match panel {
        KpiPanel::Loading => rsx! {
            LoadingSpinner { message: "Loading KPIs...".to_string() }
        },
        KpiPanel::Empty => rsx! {
            p {
                style: "color: #999; font-style: italic;",
                "No KPIs available"
            }
        },
        KpiPanel::Cards(cards) => rsx! {
            div {
                id: "kpi-cards",
                style: "display: flex; flex-wrap: wrap; gap: 10px;",
                for card in cards.iter() {
                    div {
                        key: "{card.label}",
                        style: CARD_STYLE,
                        div {
                            style: "font-size: 12px; color: #586069;",
                            "{card.label}"
                        }
                        div {
                            style: "font-size: 20px; font-weight: bold;",
                            "{card.value}"
                        }
                    }
                }
            }
        },
    }
}

/// The KPI matching the selected component, titled with its unit.
#[component]
pub fn ComponentKpiCard() -> Element {
    let state = use_context::<AppState>();
    let card = (state.card)();

    let (title, value) = match card {
        ComponentCard::Loading => ("Loading...".to_string(), String::new()),
        ComponentCard::Value { title, value } => (title, value),
        ComponentCard::NotAvailable => ("Component".to_string(), "N/A".to_string()),
    };

    rsx! {
        div {
            id: "component-kpi",
            style: CARD_STYLE,
            div {
                style: "font-size: 12px; color: #586069;",
                "{title}"
            }
            div {
                style: "font-size: 24px; font-weight: bold; color: #0366d6;",
                "{value}"
            }
        }
    }
}
