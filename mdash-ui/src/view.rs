//! Bridges controller output into Dioxus signals.

use crate::state::AppState;
use dioxus::prelude::*;
use mdash_core::{
    ComponentCard, HierarchyView, KpiPanel, KpiSurface, Level, LevelView, Snapshot, Year,
};

/// Render surface that stores everything it is shown in [`AppState`].
pub struct DioxusView {
    state: AppState,
}

impl DioxusView {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl HierarchyView for DioxusView {
    fn show_level(&self, level: Level, view: &LevelView) {
        let mut signal = self.state.level(level);
        signal.set(view.clone());
    }

    fn show_years(&self, years: &[Year], _selected: Option<Year>) {
        let mut signal = self.state.years;
        signal.set(years.to_vec());
    }

    fn show_snapshot(&self, snapshot: &Snapshot) {
        let mut signal = self.state.snapshot;
        signal.set(snapshot.clone());
    }

    fn show_chart_pending(&self, pending: bool) {
        let mut signal = self.state.chart_pending;
        signal.set(pending);
    }
}

impl KpiSurface for DioxusView {
    fn show_panel(&self, panel: &KpiPanel) {
        let mut signal = self.state.panel;
        signal.set(panel.clone());
    }

    fn show_component(&self, card: &ComponentCard) {
        let mut signal = self.state.card;
        signal.set(card.clone());
    }
}
