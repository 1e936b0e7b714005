//! `tree`: print the drill-down hierarchy.

use log::{info, warn};
use mdash_core::{DataSource, HierarchyLoader};
use std::rc::Rc;

pub async fn run_tree(source: Rc<dyn DataSource>, only_sector: Option<&str>) -> anyhow::Result<()> {
    let loader = HierarchyLoader::new(source);

    let sectors = match only_sector {
        Some(sector) => vec![sector.to_string()],
        None => loader.list_sectors().await?,
    };
    info!("walking {} sectors", sectors.len());

    for sector in &sectors {
        println!("{}", sector);
        let subsectors = match loader.list_subsectors(sector).await {
            Ok(subsectors) => subsectors,
            Err(e) => {
                warn!("skipping {}: {}", sector, e);
                continue;
            }
        };
        for subsector in &subsectors {
            println!("  {}", subsector);
            let components = loader
                .list_components(sector, subsector)
                .await
                .unwrap_or_else(|e| {
                    warn!("no components for {}/{}: {}", sector, subsector, e);
                    Vec::new()
                });
            for component in &components {
                let units = loader
                    .list_units(sector, subsector, component)
                    .await
                    .unwrap_or_else(|e| {
                        warn!("no units for {}: {}", component, e);
                        Vec::new()
                    });
                println!("    {} [{}]", component, units.join(", "));
            }
        }
    }

    Ok(())
}
