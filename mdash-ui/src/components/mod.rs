//! Reusable Dioxus RSX components for the dashboard.

mod chart_container;
mod chart_controls;
mod chart_header;
mod error_display;
mod kpi_cards;
mod level_buttons;
mod loading_spinner;
mod unit_selector;
mod year_selector;

pub use chart_container::ChartContainer;
pub use chart_controls::ChartControls;
pub use chart_header::ChartHeader;
pub use error_display::ErrorDisplay;
pub use kpi_cards::{ComponentKpiCard, KpiCards};
pub use level_buttons::LevelButtons;
pub use loading_spinner::LoadingSpinner;
pub use unit_selector::UnitSelector;
pub use year_selector::{SeriesTypeSelector, YearSelector};
