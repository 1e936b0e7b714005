//! Single source of truth for the current selection and chart mode.

use crate::model::{ChartMode, ChartType, Level, Selection, SeriesType, Snapshot, Year};
use log::warn;
use std::cell::RefCell;

/// One field update applied by [`SelectionStore::set`].
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    /// Set a hierarchy level; every deeper level becomes unset.
    Level(Level, String),
    /// Unset a hierarchy level and everything below it.
    Clear(Level),
    Year(Option<Year>),
    SeriesType(SeriesType),
    ChartType(ChartType),
    ShowProjection(bool),
}

/// Holds the selection and chart mode for the lifetime of the page.
///
/// Interior mutability keeps the store shareable through an `Rc` on the
/// single UI thread; no borrow is ever handed out.
#[derive(Debug, Default)]
pub struct SelectionStore {
    state: RefCell<Snapshot>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Snapshot {
        self.state.borrow().clone()
    }

    pub fn selection(&self) -> Selection {
        self.state.borrow().selection.clone()
    }

    pub fn mode(&self) -> ChartMode {
        self.state.borrow().mode
    }

    /// Apply one update. Returns `false` when the update was refused because
    /// the parent level is unset.
    pub fn set(&self, update: Update) -> bool {
        let mut state = self.state.borrow_mut();
        match update {
            Update::Level(level, value) => {
                if let Some(parent) = level.parent() {
                    if state.selection.level(parent).is_none() {
                        warn!(
                            "refusing to set {} to {:?}: {} is not selected",
                            level.as_str(),
                            value,
                            parent.as_str()
                        );
                        return false;
                    }
                }
                *state.selection.level_mut(level) = Some(value);
                for deeper in level.deeper() {
                    *state.selection.level_mut(deeper) = None;
                }
            }
            Update::Clear(level) => {
                *state.selection.level_mut(level) = None;
                for deeper in level.deeper() {
                    *state.selection.level_mut(deeper) = None;
                }
            }
            Update::Year(year) => state.selection.year = year,
            Update::SeriesType(series_type) => state.selection.series_type = series_type,
            Update::ChartType(chart_type) => state.mode.chart_type = chart_type,
            Update::ShowProjection(show) => state.mode.show_projection = show,
        }
        true
    }

    /// Shallow merge of several updates, applied in order. Returns `false`
    /// if any of them was refused.
    pub fn set_all(&self, updates: impl IntoIterator<Item = Update>) -> bool {
        updates
            .into_iter()
            .fold(true, |applied, update| self.set(update) && applied)
    }
}
