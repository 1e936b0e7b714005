//! `kpis`: print one subsector's KPI table.

use mdash_core::{panel_for, DataSource, KpiPanel, KpiResolver, Year};
use std::rc::Rc;

pub async fn run_kpis(
    source: Rc<dyn DataSource>,
    sector: &str,
    subsector: &str,
    year: Year,
) -> anyhow::Result<()> {
    let kpis = KpiResolver::new(source)
        .resolve_kpis(sector, subsector, year)
        .await?;

    match panel_for(&kpis) {
        KpiPanel::Cards(cards) => {
            let width = cards.iter().map(|c| c.label.len()).max().unwrap_or(0);
            println!("{} / {} ({})", sector, subsector, year);
            for card in cards {
                println!("  {:width$}  {}", card.label, card.value, width = width);
            }
        }
        _ => println!("No KPIs for {} / {} in {}", sector, subsector, year),
    }
    Ok(())
}
