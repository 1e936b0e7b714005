//! Option lists for each hierarchy level.

use crate::error::FetchResult;
use crate::model::YearSet;
use crate::source::DataSource;
use log::debug;
use std::rc::Rc;

/// Fetches the valid children of a parent selection. Nothing is cached:
/// every call goes to the backend.
#[derive(Clone)]
pub struct HierarchyLoader {
    source: Rc<dyn DataSource>,
}

impl HierarchyLoader {
    pub fn new(source: Rc<dyn DataSource>) -> Self {
        Self { source }
    }

    pub async fn list_sectors(&self) -> FetchResult<Vec<String>> {
        let sectors = self.source.sectors().await?;
        debug!("loaded {} sectors", sectors.len());
        Ok(sectors)
    }

    pub async fn list_subsectors(&self, sector: &str) -> FetchResult<Vec<String>> {
        let subsectors = self.source.subsectors(sector).await?;
        debug!("loaded {} subsectors of {}", subsectors.len(), sector);
        Ok(subsectors)
    }

    pub async fn list_components(
        &self,
        sector: &str,
        subsector: &str,
    ) -> FetchResult<Vec<String>> {
        let components = self.source.components(sector, subsector).await?;
        debug!(
            "loaded {} components of {}/{}",
            components.len(),
            sector,
            subsector
        );
        Ok(components)
    }

    pub async fn list_units(
        &self,
        sector: &str,
        subsector: &str,
        component: &str,
    ) -> FetchResult<Vec<String>> {
        let units = self.source.units(sector, subsector, component).await?;
        debug!(
            "loaded {} units of {}/{}/{}",
            units.len(),
            sector,
            subsector,
            component
        );
        Ok(units)
    }

    pub async fn list_years(&self) -> FetchResult<YearSet> {
        let years = self.source.years().await?;
        debug!(
            "loaded {} actual and {} projection years",
            years.actual.len(),
            years.projection.len()
        );
        Ok(years)
    }
}
