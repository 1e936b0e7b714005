//! `walk`: drive the cascade controller headlessly with console surfaces.

use log::{debug, info};
use mdash_core::{
    CascadeController, ChartHandle, ChartSpec, ChartSurface, ChartType, Command, ComponentCard,
    DashboardConfig, DataSource, HierarchyView, KpiPanel, KpiSurface, Level, LevelView,
    SelectionStore, SeriesType, Snapshot, Surfaces, Year,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Selections to apply after start-up, in cascade order.
#[derive(Debug, Default)]
pub struct WalkSteps {
    pub sector: Option<String>,
    pub subsector: Option<String>,
    pub component: Option<String>,
    pub unit: Option<String>,
    pub year: Option<Year>,
    pub series_type: Option<SeriesType>,
    pub chart_type: Option<ChartType>,
    pub hide_projection: bool,
}

impl WalkSteps {
    /// `Init` followed by one command per requested step. The series type
    /// goes before the year because it resets the year.
    pub fn into_commands(self) -> Vec<Command> {
        let steps = [
            self.sector.map(Command::SelectSector),
            self.subsector.map(Command::SelectSubsector),
            self.component.map(Command::SelectComponent),
            self.unit.map(Command::SelectUnit),
            self.series_type.map(Command::SelectSeriesType),
            self.year.map(Command::SelectYear),
            self.chart_type.map(Command::SetChartType),
            self.hide_projection
                .then_some(Command::SetShowProjection(false)),
        ];
        let mut commands = vec![Command::Init];
        commands.extend(steps.into_iter().flatten());
        commands
    }
}

/// Surfaces that log what the dashboard would show and keep the latest of
/// each for the final report.
#[derive(Default)]
pub struct ConsoleSurfaces {
    next_chart: Cell<u64>,
    chart: RefCell<Option<ChartSpec>>,
    panel: RefCell<KpiPanel>,
    card: RefCell<ComponentCard>,
}

impl ConsoleSurfaces {
    pub fn chart(&self) -> Option<ChartSpec> {
        self.chart.borrow().clone()
    }

    pub fn panel(&self) -> KpiPanel {
        self.panel.borrow().clone()
    }

    pub fn card(&self) -> ComponentCard {
        self.card.borrow().clone()
    }
}

impl ChartSurface for ConsoleSurfaces {
    fn create(&self, container: &str, spec: &ChartSpec) -> ChartHandle {
        let handle = ChartHandle(self.next_chart.get());
        self.next_chart.set(handle.0 + 1);
        debug!(
            "chart {} in {}: {} over {} years",
            handle.0,
            container,
            spec.chart_type.as_str(),
            spec.labels.len()
        );
        *self.chart.borrow_mut() = Some(spec.clone());
        handle
    }

    fn destroy(&self, handle: ChartHandle) {
        debug!("chart {} destroyed", handle.0);
        *self.chart.borrow_mut() = None;
    }
}

impl KpiSurface for ConsoleSurfaces {
    fn show_panel(&self, panel: &KpiPanel) {
        *self.panel.borrow_mut() = panel.clone();
    }

    fn show_component(&self, card: &ComponentCard) {
        *self.card.borrow_mut() = card.clone();
    }
}

impl HierarchyView for ConsoleSurfaces {
    fn show_level(&self, level: Level, view: &LevelView) {
        debug!(
            "{}: {:?} of {} options",
            level.as_str(),
            view.state,
            view.options.len()
        );
    }

    fn show_years(&self, years: &[Year], selected: Option<Year>) {
        debug!("{} years, selected {:?}", years.len(), selected);
    }

    fn show_snapshot(&self, _snapshot: &Snapshot) {}

    fn show_chart_pending(&self, pending: bool) {
        if pending {
            debug!("building series");
        }
    }
}

pub async fn run_walk(source: Rc<dyn DataSource>, commands: Vec<Command>) -> anyhow::Result<()> {
    let console = Rc::new(ConsoleSurfaces::default());
    let controller = CascadeController::new(
        source,
        Rc::new(SelectionStore::new()),
        Surfaces {
            chart: console.clone(),
            kpis: console.clone(),
            view: console.clone(),
        },
        DashboardConfig::default(),
    );

    for command in commands {
        info!("{:?}", command);
        controller.handle(command).await;
    }

    print!("{}", report(&controller.snapshot(), &console));
    Ok(())
}

/// Human-readable summary of what the dashboard shows.
pub fn report(snapshot: &Snapshot, console: &ConsoleSurfaces) -> String {
    let sel = &snapshot.selection;
    let show = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
    let mut out = String::new();

    out += &format!("sector:     {}\n", show(&sel.sector));
    out += &format!("subsector:  {}\n", show(&sel.subsector));
    out += &format!("component:  {}\n", show(&sel.component));
    out += &format!("unit:       {}\n", show(&sel.unit));
    let year = sel.year.map_or("-".to_string(), |y| y.to_string());
    out += &format!("year:       {} ({})\n", year, sel.series_type.as_str());

    let card = match console.card() {
        ComponentCard::Value { title, value } => format!("{} = {}", title, value),
        _ => "N/A".to_string(),
    };
    out += &format!("card:       {}\n", card);
    if let KpiPanel::Cards(cards) = console.panel() {
        out += &format!("kpis:       {} cards\n", cards.len());
    }

    match console.chart() {
        Some(spec) => {
            out += &format!("chart:      {}\n", spec.chart_type.as_str());
            for dataset in &spec.datasets {
                let values: Vec<String> = dataset
                    .data
                    .iter()
                    .map(|v| v.map_or("-".to_string(), |v| v.to_string()))
                    .collect();
                out += &format!("  {:<11} {}\n", dataset.label, values.join(" "));
            }
        }
        None => out.push_str("chart:      none\n"),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdash_core::{ChartMode, ChartPresenter, ChartStyle, KpiMap, KpiPresenter, KpiValue, Series};

    #[test]
    fn series_type_is_applied_before_year() {
        let commands = WalkSteps {
            sector: Some("Fiscal sector".into()),
            year: Some(Year(2026)),
            series_type: Some(SeriesType::Projection),
            hide_projection: true,
            ..WalkSteps::default()
        }
        .into_commands();

        assert_eq!(
            commands,
            vec![
                Command::Init,
                Command::SelectSector("Fiscal sector".into()),
                Command::SelectSeriesType(SeriesType::Projection),
                Command::SelectYear(Year(2026)),
                Command::SetShowProjection(false),
            ]
        );
    }

    #[test]
    fn console_keeps_only_the_live_chart() {
        let console = Rc::new(ConsoleSurfaces::default());
        let presenter = ChartPresenter::new(console.clone(), ChartStyle::default());
        let series = Series::assemble(&[Year(2023)], vec![Some(4.0)], &[], vec![]);

        presenter.render("chart", ChartMode::default(), &series);
        assert_eq!(console.chart().map(|s| s.labels), Some(vec![Year(2023)]));
        presenter.clear("chart");
        assert!(console.chart().is_none());
    }

    #[test]
    fn report_lists_selection_card_and_datasets() {
        let console = Rc::new(ConsoleSurfaces::default());
        let cards = KpiPresenter::new(console.clone());
        let kpis = KpiMap::from_pairs([("Grants (% GDP)", KpiValue::Text("2.5".into()))]);
        cards.panel(&kpis);
        cards.card(&kpis, "Grants", "Percentage of GDP");

        let presenter = ChartPresenter::new(console.clone(), ChartStyle::default());
        let series = Series::assemble(
            &[Year(2023)],
            vec![Some(2.5)],
            &[Year(2024)],
            vec![Some(2.7)],
        );
        presenter.render("chart", ChartMode::default(), &series);

        let mut snapshot = Snapshot::default();
        snapshot.selection.sector = Some("Fiscal sector".into());
        snapshot.selection.year = Some(Year(2023));

        let text = report(&snapshot, &console);
        assert!(text.contains("sector:     Fiscal sector\n"));
        assert!(text.contains("subsector:  -\n"));
        assert!(text.contains("year:       2023 (actual)\n"));
        let card = "card:       Grants (Percentage of GDP) = 2.5\n";
        assert!(text.contains(card));
        assert!(text.contains("kpis:       1 cards\n"));
        assert!(text.contains("  Actual      2.5\n"));
        assert!(text.contains("  Projection  - 2.7\n"));
    }
}
