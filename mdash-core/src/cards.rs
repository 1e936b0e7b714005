//! KPI card rendering: the subsector panel and the selected component's card.

use crate::kpi::find_component_entry;
use crate::model::KpiMap;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KpiCard {
    pub label: String,
    pub value: String,
}

/// All KPIs of the selected subsector for the selected year.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum KpiPanel {
    Loading,
    Cards(Vec<KpiCard>),
    #[default]
    Empty,
}

/// The KPI matching the selected component.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ComponentCard {
    Loading,
    Value { title: String, value: String },
    #[default]
    NotAvailable,
}

/// Render target for KPI cards.
pub trait KpiSurface {
    fn show_panel(&self, panel: &KpiPanel);

    fn show_component(&self, card: &ComponentCard);
}

/// Sole writer of the KPI display regions.
#[derive(Clone)]
pub struct KpiPresenter {
    surface: Rc<dyn KpiSurface>,
}

impl KpiPresenter {
    pub fn new(surface: Rc<dyn KpiSurface>) -> Self {
        Self { surface }
    }

    pub fn panel_loading(&self) {
        self.surface.show_panel(&KpiPanel::Loading);
    }

    pub fn panel_empty(&self) {
        self.surface.show_panel(&KpiPanel::Empty);
    }

    pub fn panel(&self, kpis: &KpiMap) {
        self.surface.show_panel(&panel_for(kpis));
    }

    pub fn card_loading(&self) {
        self.surface.show_component(&ComponentCard::Loading);
    }

    pub fn card_unavailable(&self) {
        self.surface.show_component(&ComponentCard::NotAvailable);
    }

    pub fn card(&self, kpis: &KpiMap, component: &str, unit: &str) {
        self.surface
            .show_component(&card_for(kpis, component, unit));
    }
}

pub fn panel_for(kpis: &KpiMap) -> KpiPanel {
    if kpis.is_empty() {
        return KpiPanel::Empty;
    }
    KpiPanel::Cards(
        kpis.iter()
            .map(|(label, value)| KpiCard {
                label: label.to_string(),
                value: value.to_string(),
            })
            .collect(),
    )
}

/// Card showing the raw value of the first label matching `component`.
pub fn card_for(kpis: &KpiMap, component: &str, unit: &str) -> ComponentCard {
    match find_component_entry(kpis, component) {
        Some((_, value)) => ComponentCard::Value {
            title: format!("{} ({})", component, unit),
            value: value.to_string(),
        },
        None => ComponentCard::NotAvailable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::KpiValue;

    fn kpis() -> KpiMap {
        KpiMap::from_pairs([
            ("Revenue (% GDP)", KpiValue::Text("24.1".into())),
            ("Tax revenue (% GDP)", KpiValue::Text("15.8".into())),
            ("Grants (% GDP)", KpiValue::Missing),
        ])
    }

    #[test]
    fn panel_lists_every_kpi_in_order() {
        match panel_for(&kpis()) {
            KpiPanel::Cards(cards) => {
                assert_eq!(cards.len(), 3);
                assert_eq!(cards[0].label, "Revenue (% GDP)");
                assert_eq!(cards[2].value, "N/A");
            }
            other => panic!("expected cards, got {:?}", other),
        }
        assert_eq!(panel_for(&KpiMap::default()), KpiPanel::Empty);
    }

    #[test]
    fn card_titles_component_with_unit() {
        assert_eq!(
            card_for(&kpis(), "Tax revenue", "Percentage of GDP"),
            ComponentCard::Value {
                title: "Tax revenue (Percentage of GDP)".into(),
                value: "15.8".into(),
            }
        );
        assert_eq!(
            card_for(&kpis(), "Expense", "Percentage of GDP"),
            ComponentCard::NotAvailable
        );
    }
}
