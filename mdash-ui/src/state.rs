//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with
//! `use_context::<AppState>()`. Only [`DioxusView`](crate::view::DioxusView)
//! writes to it; components read.

use dioxus::prelude::*;
use mdash_core::{ComponentCard, KpiPanel, Level, LevelView, Snapshot, Year};

#[derive(Clone, Copy)]
pub struct AppState {
    pub sectors: Signal<LevelView>,
    pub subsectors: Signal<LevelView>,
    pub components: Signal<LevelView>,
    pub units: Signal<LevelView>,
    /// Years offered for the current series type
    pub years: Signal<Vec<Year>>,
    /// Last published selection and chart mode
    pub snapshot: Signal<Snapshot>,
    pub panel: Signal<KpiPanel>,
    pub card: Signal<ComponentCard>,
    /// A series is being built for the chart
    pub chart_pending: Signal<bool>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            sectors: Signal::new(LevelView::default()),
            subsectors: Signal::new(LevelView::default()),
            components: Signal::new(LevelView::default()),
            units: Signal::new(LevelView::default()),
            years: Signal::new(Vec::new()),
            snapshot: Signal::new(Snapshot::default()),
            panel: Signal::new(KpiPanel::Loading),
            card: Signal::new(ComponentCard::Loading),
            chart_pending: Signal::new(false),
        }
    }

    pub fn level(&self, level: Level) -> Signal<LevelView> {
        match level {
            Level::Sector => self.sectors,
            Level::Subsector => self.subsectors,
            Level::Component => self.components,
            Level::Unit => self.units,
        }
    }
}
