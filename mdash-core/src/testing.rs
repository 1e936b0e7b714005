//! In-memory doubles for the backend and the render surfaces.

use crate::cards::{ComponentCard, KpiPanel, KpiSurface};
use crate::cascade::{HierarchyView, LevelView};
use crate::error::{FetchError, FetchResult};
use crate::model::{ChartData, KpiMap, Level, Snapshot, Year, YearSet};
use crate::presenter::{ChartHandle, ChartSpec, ChartSurface};
use crate::source::{DataSource, Route};
use async_trait::async_trait;
use futures::channel::oneshot;
use serde::de::DeserializeOwned;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

/// Canned JSON responses keyed by request path.
///
/// A held route parks every request for it until [`FakeSource::release`];
/// that is how tests control response arrival order.
#[derive(Default)]
pub struct FakeSource {
    responses: RefCell<HashMap<String, serde_json::Value>>,
    failing: RefCell<HashSet<String>>,
    held: RefCell<HashSet<String>>,
    pending: RefCell<Vec<(String, oneshot::Sender<()>)>>,
    calls: RefCell<Vec<String>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, route: Route<'_>, body: serde_json::Value) -> Self {
        self.set(route, body);
        self
    }

    pub fn set(&self, route: Route<'_>, body: serde_json::Value) {
        self.responses.borrow_mut().insert(route.path(), body);
    }

    pub fn fail(&self, route: Route<'_>) {
        self.failing.borrow_mut().insert(route.path());
    }

    pub fn hold(&self, route: Route<'_>) {
        self.held.borrow_mut().insert(route.path());
    }

    /// Let every parked request for `route` complete and stop holding it.
    /// Returns `false` if nothing was parked.
    pub fn release(&self, route: Route<'_>) -> bool {
        let path = route.path();
        self.held.borrow_mut().remove(&path);
        let (ready, parked): (Vec<_>, Vec<_>) = self
            .pending
            .borrow_mut()
            .drain(..)
            .partition(|(p, _)| *p == path);
        *self.pending.borrow_mut() = parked;

        let released = !ready.is_empty();
        for (_, tx) in ready {
            let _ = tx.send(());
        }
        released
    }

    /// Every requested path, in request order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|path| path.starts_with(prefix))
            .count()
    }

    async fn respond<T: DeserializeOwned>(&self, route: Route<'_>) -> FetchResult<T> {
        let path = route.path();
        self.calls.borrow_mut().push(path.clone());

        let held = self.held.borrow().contains(&path);
        if held {
            let (tx, rx) = oneshot::channel();
            self.pending.borrow_mut().push((path.clone(), tx));
            rx.await
                .map_err(|_| FetchError::network(path.clone(), "request dropped"))?;
        }

        if self.failing.borrow().contains(&path) {
            return Err(FetchError::network(path, "connection refused"));
        }
        let body = self.responses.borrow().get(&path).cloned();
        match body {
            Some(body) => {
                serde_json::from_value(body).map_err(|e| FetchError::parse(path, e))
            }
            None => Err(FetchError::Status { path, status: 404 }),
        }
    }
}

#[async_trait(?Send)]
impl DataSource for FakeSource {
    async fn sectors(&self) -> FetchResult<Vec<String>> {
        self.respond(Route::Sectors).await
    }

    async fn subsectors(&self, sector: &str) -> FetchResult<Vec<String>> {
        self.respond(Route::Subsectors(sector)).await
    }

    async fn components(&self, sector: &str, subsector: &str) -> FetchResult<Vec<String>> {
        self.respond(Route::Components(sector, subsector)).await
    }

    async fn units(
        &self,
        sector: &str,
        subsector: &str,
        component: &str,
    ) -> FetchResult<Vec<String>> {
        self.respond(Route::Units(sector, subsector, component)).await
    }

    async fn years(&self) -> FetchResult<YearSet> {
        self.respond(Route::Years).await
    }

    async fn kpis(&self, sector: &str, subsector: &str, year: Year) -> FetchResult<KpiMap> {
        self.respond(Route::Kpis(sector, subsector, year)).await
    }

    async fn chart_data(
        &self,
        sector: &str,
        subsector: &str,
        component: &str,
        unit: &str,
    ) -> FetchResult<ChartData> {
        self.respond(Route::ChartData(sector, subsector, component, unit))
            .await
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartEvent {
    Created {
        container: String,
        handle: ChartHandle,
        spec: ChartSpec,
    },
    Destroyed(ChartHandle),
}

/// Chart surface that records every create and destroy.
#[derive(Default)]
pub struct RecordingChart {
    next: Cell<u64>,
    events: RefCell<Vec<ChartEvent>>,
}

impl RecordingChart {
    pub fn events(&self) -> Vec<ChartEvent> {
        self.events.borrow().clone()
    }

    /// Charts created and not yet destroyed.
    pub fn live(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .fold(0usize, |live, event| match event {
                ChartEvent::Created { .. } => live + 1,
                ChartEvent::Destroyed(_) => live.saturating_sub(1),
            })
    }

    pub fn last_spec(&self) -> Option<ChartSpec> {
        self.events
            .borrow()
            .iter()
            .rev()
            .find_map(|event| match event {
                ChartEvent::Created { spec, .. } => Some(spec.clone()),
                ChartEvent::Destroyed(_) => None,
            })
    }
}

impl ChartSurface for RecordingChart {
    fn create(&self, container: &str, spec: &ChartSpec) -> ChartHandle {
        let handle = ChartHandle(self.next.get());
        self.next.set(handle.0 + 1);
        self.events.borrow_mut().push(ChartEvent::Created {
            container: container.to_string(),
            handle,
            spec: spec.clone(),
        });
        handle
    }

    fn destroy(&self, handle: ChartHandle) {
        self.events.borrow_mut().push(ChartEvent::Destroyed(handle));
    }
}

/// KPI surface that keeps the last panel and card shown.
#[derive(Default)]
pub struct RecordingKpis {
    panel: RefCell<Option<KpiPanel>>,
    card: RefCell<Option<ComponentCard>>,
}

impl RecordingKpis {
    pub fn last_panel(&self) -> Option<KpiPanel> {
        self.panel.borrow().clone()
    }

    pub fn last_card(&self) -> Option<ComponentCard> {
        self.card.borrow().clone()
    }
}

impl KpiSurface for RecordingKpis {
    fn show_panel(&self, panel: &KpiPanel) {
        *self.panel.borrow_mut() = Some(panel.clone());
    }

    fn show_component(&self, card: &ComponentCard) {
        *self.card.borrow_mut() = Some(card.clone());
    }
}

/// Hierarchy view that keeps the last state published for each region.
#[derive(Default)]
pub struct RecordingView {
    levels: RefCell<HashMap<Level, LevelView>>,
    years: RefCell<Vec<Year>>,
    snapshot: RefCell<Option<Snapshot>>,
    chart_pending: Cell<bool>,
}

impl RecordingView {
    pub fn level(&self, level: Level) -> Option<LevelView> {
        self.levels.borrow().get(&level).cloned()
    }

    pub fn years(&self) -> Vec<Year> {
        self.years.borrow().clone()
    }

    pub fn snapshot(&self) -> Option<Snapshot> {
        self.snapshot.borrow().clone()
    }

    pub fn chart_pending(&self) -> bool {
        self.chart_pending.get()
    }
}

impl HierarchyView for RecordingView {
    fn show_level(&self, level: Level, view: &LevelView) {
        self.levels.borrow_mut().insert(level, view.clone());
    }

    fn show_years(&self, years: &[Year], _selected: Option<Year>) {
        *self.years.borrow_mut() = years.to_vec();
    }

    fn show_snapshot(&self, snapshot: &Snapshot) {
        *self.snapshot.borrow_mut() = Some(snapshot.clone());
    }

    fn show_chart_pending(&self, pending: bool) {
        self.chart_pending.set(pending);
    }
}
