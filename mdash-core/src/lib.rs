//! Core of the macro-indicator dashboard.
//!
//! Holds the selection store, the backend seam, the loaders that read the
//! sector hierarchy and KPI tables, the chart and card presenters, and the
//! [`CascadeController`] that ties them together. Nothing here depends on a
//! particular UI or HTTP stack.

pub mod cards;
pub mod cascade;
pub mod config;
pub mod error;
pub mod generation;
pub mod kpi;
pub mod loader;
pub mod model;
pub mod presenter;
pub mod series;
pub mod source;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use cards::{card_for, panel_for, ComponentCard, KpiCard, KpiPanel, KpiPresenter, KpiSurface};
pub use cascade::{CascadeController, Command, HierarchyView, LevelState, LevelView, Surfaces};
pub use config::DashboardConfig;
pub use error::{FetchError, FetchResult};
pub use kpi::{extract_component_value, find_component_entry, KpiResolver};
pub use loader::HierarchyLoader;
pub use model::{
    ChartData, ChartMode, ChartType, KpiMap, KpiValue, Level, Selection, Series, SeriesType,
    Snapshot, Year, YearSet,
};
pub use presenter::{ChartHandle, ChartPresenter, ChartSpec, ChartStyle, ChartSurface, Dataset};
pub use series::{series_from_chart_data, SeriesBuilder};
pub use source::{DataSource, Route};
pub use store::{SelectionStore, Update};
