//! Dioxus front end for the macro-indicator dashboard.
//!
//! - `js_bridge`: Chart.js calls via `js_sys::eval()` and the [`ChartSurface`](mdash_core::ChartSurface) over them
//! - `state`: reactive AppState with Dioxus Signals
//! - `view`: writes controller output into the AppState signals
//! - `dispatch`: hands UI events to the cascade controller
//! - `components`: RSX components for the selectors, KPI cards and chart

pub mod components;
pub mod dispatch;
pub mod js_bridge;
pub mod state;
pub mod view;
