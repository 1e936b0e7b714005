//! The cascade controller: keeps the four hierarchy levels, the year list,
//! the KPI cards and the chart consistent while their data loads
//! asynchronously.
//!
//! Selecting a level stores it, clears everything below, loads the child
//! options and auto-selects the first one, recursing down to the unit. Every
//! cascade carries a [`Ticket`]; after each fetch a cascade whose ticket is no
//! longer current stops without touching state. The KPI panel, component card,
//! chart and year list each have their own generation so a newer refresh
//! always wins over an older one still in flight.

use crate::cards::{KpiPresenter, KpiSurface};
use crate::config::DashboardConfig;
use crate::error::FetchResult;
use crate::generation::{Generation, Ticket};
use crate::kpi::KpiResolver;
use crate::loader::HierarchyLoader;
use crate::model::{ChartType, Level, SeriesType, Series, Snapshot, Year};
use crate::presenter::{ChartPresenter, ChartSurface};
use crate::series::SeriesBuilder;
use crate::source::DataSource;
use crate::store::{SelectionStore, Update};
use log::{debug, info, warn};
use std::cell::RefCell;
use std::rc::Rc;

/// A user intent, decoupled from whichever UI produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Load the year list and sectors, then cascade from the first sector.
    Init,
    SelectSector(String),
    SelectSubsector(String),
    SelectComponent(String),
    SelectUnit(String),
    SelectYear(Year),
    SelectSeriesType(SeriesType),
    SetChartType(ChartType),
    SetShowProjection(bool),
}

impl Command {
    /// The select command for `level`.
    pub fn select(level: Level, value: impl Into<String>) -> Self {
        let value = value.into();
        match level {
            Level::Sector => Command::SelectSector(value),
            Level::Subsector => Command::SelectSubsector(value),
            Level::Component => Command::SelectComponent(value),
            Level::Unit => Command::SelectUnit(value),
        }
    }
}

/// Load state of one hierarchy level.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LevelState {
    /// The parent is not selected, so nothing has been loaded.
    #[default]
    Unselected,
    Loading,
    Selected(String),
    /// The options loaded (or failed to load) and there are none.
    Empty,
}

/// A level's state together with the options offered for it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LevelView {
    pub state: LevelState,
    pub options: Vec<String>,
}

/// Render target for option lists and the current selection.
pub trait HierarchyView {
    fn show_level(&self, level: Level, view: &LevelView);

    fn show_years(&self, years: &[Year], selected: Option<Year>);

    fn show_snapshot(&self, snapshot: &Snapshot);

    /// Whether a series is being built for the chart.
    fn show_chart_pending(&self, _pending: bool) {}
}

/// Render targets the controller writes to.
#[derive(Clone)]
pub struct Surfaces {
    pub chart: Rc<dyn ChartSurface>,
    pub kpis: Rc<dyn KpiSurface>,
    pub view: Rc<dyn HierarchyView>,
}

pub struct CascadeController {
    store: Rc<SelectionStore>,
    loader: HierarchyLoader,
    kpis: KpiResolver,
    series: SeriesBuilder,
    chart: ChartPresenter,
    cards: KpiPresenter,
    view: Rc<dyn HierarchyView>,
    chart_container: String,

    levels: RefCell<[LevelView; 4]>,
    year_options: RefCell<Vec<Year>>,
    last_series: RefCell<Option<Series>>,

    cascade_gen: Generation,
    years_gen: Generation,
    panel_gen: Generation,
    card_gen: Generation,
    chart_gen: Generation,
}

impl CascadeController {
    pub fn new(
        source: Rc<dyn DataSource>,
        store: Rc<SelectionStore>,
        surfaces: Surfaces,
        config: DashboardConfig,
    ) -> Self {
        Self {
            store,
            loader: HierarchyLoader::new(source.clone()),
            kpis: KpiResolver::new(source.clone()),
            series: SeriesBuilder::new(source),
            chart: ChartPresenter::new(surfaces.chart, config.chart_style),
            cards: KpiPresenter::new(surfaces.kpis),
            view: surfaces.view,
            chart_container: config.chart_container,
            levels: RefCell::new(Default::default()),
            year_options: RefCell::new(Vec::new()),
            last_series: RefCell::new(None),
            cascade_gen: Generation::new(),
            years_gen: Generation::new(),
            panel_gen: Generation::new(),
            card_gen: Generation::new(),
            chart_gen: Generation::new(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.store.get()
    }

    pub fn level(&self, level: Level) -> LevelView {
        self.levels.borrow()[level as usize].clone()
    }

    pub fn year_options(&self) -> Vec<Year> {
        self.year_options.borrow().clone()
    }

    /// The series currently drawn, if any.
    pub fn last_series(&self) -> Option<Series> {
        self.last_series.borrow().clone()
    }

    /// Run one command to completion. Failures are absorbed into placeholder
    /// states; nothing propagates to the caller.
    pub async fn handle(&self, command: Command) {
        debug!("handling {:?}", command);
        match command {
            Command::Init => self.init().await,
            Command::SelectSector(value) => self.select(Level::Sector, value).await,
            Command::SelectSubsector(value) => self.select(Level::Subsector, value).await,
            Command::SelectComponent(value) => self.select(Level::Component, value).await,
            Command::SelectUnit(value) => self.select(Level::Unit, value).await,
            Command::SelectYear(year) => self.select_year(year).await,
            Command::SelectSeriesType(series_type) => self.select_series_type(series_type).await,
            Command::SetChartType(chart_type) => {
                self.store.set(Update::ChartType(chart_type));
                self.publish();
                self.redraw();
            }
            Command::SetShowProjection(show) => {
                self.store.set(Update::ShowProjection(show));
                self.publish();
                self.redraw();
            }
        }
    }

    async fn init(&self) {
        info!("initializing dashboard");
        self.load_years().await;

        let ticket = self.cascade_gen.advance();
        self.set_level(Level::Sector, LevelState::Loading, Vec::new());
        let sectors = self.loader.list_sectors().await;
        if !self.cascade_gen.is_current(ticket) {
            debug!("discarding stale sector list");
            return;
        }
        match self.accept_options(Level::Sector, sectors) {
            Some(first) => self.apply_sector(first, ticket).await,
            None => {
                self.store.set(Update::Clear(Level::Sector));
                self.invalidate_below(Level::Sector);
                self.cards.panel_empty();
                self.show_placeholders();
                self.publish();
            }
        }
    }

    async fn select(&self, level: Level, value: String) {
        if !self.is_offered(level, &value) {
            warn!(
                "ignoring {} {:?}: not among the loaded options",
                level.as_str(),
                value
            );
            return;
        }
        let ticket = self.cascade_gen.advance();
        info!("selected {} {:?}", level.as_str(), value);
        match level {
            Level::Sector => self.apply_sector(value, ticket).await,
            Level::Subsector => self.apply_subsector(value, ticket).await,
            Level::Component => self.apply_component(value, ticket).await,
            Level::Unit => self.apply_unit(value, ticket).await,
        }
    }

    /// Sectors are offered by the page before they are loaded, so an unloaded
    /// sector list accepts anything. Deeper levels only accept loaded options.
    fn is_offered(&self, level: Level, value: &str) -> bool {
        let levels = self.levels.borrow();
        let view = &levels[level as usize];
        if level == Level::Sector && view.options.is_empty() {
            return true;
        }
        view.options.iter().any(|option| option == value)
    }

    async fn apply_sector(&self, sector: String, ticket: Ticket) {
        let update = Update::Level(Level::Sector, sector.clone());
        if !self.store.set(update) {
            return;
        }
        self.mark_selected(Level::Sector, &sector);
        self.invalidate_below(Level::Sector);
        self.panel_gen.advance();
        self.cards.panel_loading();
        self.set_level(Level::Subsector, LevelState::Loading, Vec::new());
        self.publish();

        let subsectors = self.loader.list_subsectors(&sector).await;
        if !self.cascade_gen.is_current(ticket) {
            debug!("discarding stale subsectors of {}", sector);
            return;
        }
        match self.accept_options(Level::Subsector, subsectors) {
            Some(first) => self.apply_subsector(first, ticket).await,
            None => {
                self.cards.panel_empty();
                self.show_placeholders();
            }
        }
    }

    async fn apply_subsector(&self, subsector: String, ticket: Ticket) {
        let update = Update::Level(Level::Subsector, subsector.clone());
        if !self.store.set(update) {
            return;
        }
        let Some(sector) = self.store.selection().sector else {
            return;
        };
        self.mark_selected(Level::Subsector, &subsector);
        self.invalidate_below(Level::Subsector);
        self.set_level(Level::Component, LevelState::Loading, Vec::new());
        self.publish();

        // The panel only displays; the drill-down must not wait on it.
        futures::join!(self.refresh_panel(), async {
            let components = self.loader.list_components(&sector, &subsector).await;
            if !self.cascade_gen.is_current(ticket) {
                debug!("discarding stale components of {}/{}", sector, subsector);
                return;
            }
            match self.accept_options(Level::Component, components) {
                Some(first) => self.apply_component(first, ticket).await,
                None => self.show_placeholders(),
            }
        });
    }

    async fn apply_component(&self, component: String, ticket: Ticket) {
        let update = Update::Level(Level::Component, component.clone());
        if !self.store.set(update) {
            return;
        }
        let selection = self.store.selection();
        let Some((sector, subsector)) = selection.kpi_scope() else {
            return;
        };
        self.mark_selected(Level::Component, &component);
        self.invalidate_below(Level::Component);
        self.set_level(Level::Unit, LevelState::Loading, Vec::new());
        self.publish();

        let units = self.loader.list_units(sector, subsector, &component).await;
        if !self.cascade_gen.is_current(ticket) {
            debug!("discarding stale units of {}", component);
            return;
        }
        match self.accept_options(Level::Unit, units) {
            Some(first) => self.apply_unit(first, ticket).await,
            None => self.show_placeholders(),
        }
    }

    async fn apply_unit(&self, unit: String, ticket: Ticket) {
        if !self.cascade_gen.is_current(ticket) {
            return;
        }
        let update = Update::Level(Level::Unit, unit.clone());
        if !self.store.set(update) {
            return;
        }
        self.mark_selected(Level::Unit, &unit);
        self.publish();
        futures::join!(self.refresh_card(), self.refresh_chart());
    }

    async fn select_year(&self, year: Year) {
        if !self.year_options.borrow().contains(&year) {
            warn!("ignoring year {}: not among the loaded options", year);
            return;
        }
        self.store.set(Update::Year(Some(year)));
        self.publish();
        self.refresh_displays().await;
    }

    async fn select_series_type(&self, series_type: SeriesType) {
        self.store.set(Update::SeriesType(series_type));
        self.publish();
        if self.load_years().await {
            self.refresh_displays().await;
        }
    }

    /// Reload the year options for the current series type and select the
    /// first one. Returns `false` if a newer reload superseded this one.
    async fn load_years(&self) -> bool {
        let ticket = self.years_gen.advance();
        let result = self.loader.list_years().await;
        if !self.years_gen.is_current(ticket) {
            debug!("discarding stale year list");
            return false;
        }

        let series_type = self.store.selection().series_type;
        let years = match result {
            Ok(years) => years.for_type(series_type).to_vec(),
            Err(e) => {
                warn!("year list unavailable: {}", e);
                Vec::new()
            }
        };
        let first = years.first().copied();
        self.store.set(Update::Year(first));
        self.view.show_years(&years, first);
        *self.year_options.borrow_mut() = years;
        self.publish();
        true
    }

    async fn refresh_displays(&self) {
        futures::join!(
            self.refresh_panel(),
            self.refresh_card(),
            self.refresh_chart()
        );
    }

    async fn refresh_panel(&self) {
        let ticket = self.panel_gen.advance();
        let selection = self.store.selection();
        let (Some((sector, subsector)), Some(year)) = (selection.kpi_scope(), selection.year)
        else {
            self.cards.panel_empty();
            return;
        };

        self.cards.panel_loading();
        let result = self.kpis.resolve_kpis(sector, subsector, year).await;
        if !self.panel_gen.is_current(ticket) {
            debug!(
                "discarding stale kpi panel for {}/{}/{}",
                sector, subsector, year
            );
            return;
        }
        match result {
            Ok(kpis) => self.cards.panel(&kpis),
            Err(e) => {
                warn!("kpi panel unavailable: {}", e);
                self.cards.panel_empty();
            }
        }
    }

    async fn refresh_card(&self) {
        let ticket = self.card_gen.advance();
        let selection = self.store.selection();
        let (Some((sector, subsector, component, unit)), Some(year)) =
            (selection.full_path(), selection.year)
        else {
            self.cards.card_unavailable();
            return;
        };

        self.cards.card_loading();
        let result = self.kpis.resolve_kpis(sector, subsector, year).await;
        if !self.card_gen.is_current(ticket) {
            debug!("discarding stale card for {}", component);
            return;
        }
        match result {
            Ok(kpis) => self.cards.card(&kpis, component, unit),
            Err(e) => {
                warn!("component card unavailable: {}", e);
                self.cards.card_unavailable();
            }
        }
    }

    async fn refresh_chart(&self) {
        let ticket = self.chart_gen.advance();
        let selection = self.store.selection();
        if selection.full_path().is_none() {
            self.clear_chart();
            return;
        }

        self.view.show_chart_pending(true);
        let result: FetchResult<Series> = self.series.build_series(&selection).await;
        if !self.chart_gen.is_current(ticket) {
            debug!("discarding stale series for {:?}", selection.component);
            return;
        }
        self.view.show_chart_pending(false);
        match result {
            Ok(series) => {
                let mode = self.store.mode();
                self.chart.render(&self.chart_container, mode, &series);
                *self.last_series.borrow_mut() = Some(series);
            }
            Err(e) => {
                warn!("chart unavailable: {}", e);
                self.clear_chart();
            }
        }
    }

    /// Re-render the current series under the current chart mode, without
    /// fetching anything.
    fn redraw(&self) {
        let series = self.last_series.borrow().clone();
        if let Some(series) = series {
            self.chart
                .render(&self.chart_container, self.store.mode(), &series);
        }
    }

    fn clear_chart(&self) {
        self.view.show_chart_pending(false);
        self.chart.clear(&self.chart_container);
        *self.last_series.borrow_mut() = None;
    }

    /// Record a loaded option list. Returns the first option to auto-select,
    /// or `None` if the list is empty or failed to load.
    fn accept_options(&self, level: Level, result: FetchResult<Vec<String>>) -> Option<String> {
        let options = match result {
            Ok(options) => options,
            Err(e) => {
                warn!("{} options unavailable: {}", level.as_str(), e);
                Vec::new()
            }
        };
        match options.first().cloned() {
            Some(first) => {
                self.set_level(level, LevelState::Loading, options);
                Some(first)
            }
            None => {
                self.set_level(level, LevelState::Empty, Vec::new());
                None
            }
        }
    }

    fn mark_selected(&self, level: Level, value: &str) {
        let options = self.levels.borrow()[level as usize].options.clone();
        let state = LevelState::Selected(value.to_string());
        self.set_level(level, state, options);
    }

    fn set_level(&self, level: Level, state: LevelState, options: Vec<String>) {
        let view = LevelView { state, options };
        self.levels.borrow_mut()[level as usize] = view.clone();
        self.view.show_level(level, &view);
    }

    /// Reset every level below `level` and drop whatever the card and chart
    /// show; in-flight refreshes for them become stale.
    fn invalidate_below(&self, level: Level) {
        for deeper in level.deeper() {
            self.set_level(deeper, LevelState::Unselected, Vec::new());
        }
        self.card_gen.advance();
        self.chart_gen.advance();
        self.cards.card_loading();
        self.clear_chart();
    }

    /// Final state of a cascade that ran out of options.
    fn show_placeholders(&self) {
        self.card_gen.advance();
        self.chart_gen.advance();
        self.cards.card_unavailable();
        self.clear_chart();
        self.publish();
    }

    fn publish(&self) {
        self.view.show_snapshot(&self.store.get());
    }
}
