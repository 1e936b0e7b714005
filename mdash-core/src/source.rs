//! The backend seam: every network read the dashboard performs.

use crate::error::FetchResult;
use crate::model::{ChartData, KpiMap, Year, YearSet};
use async_trait::async_trait;
use std::fmt;

/// Read-only access to the indicator backend.
///
/// Futures are not `Send`: the dashboard runs on a single browser thread.
#[async_trait(?Send)]
pub trait DataSource {
    async fn sectors(&self) -> FetchResult<Vec<String>>;

    async fn subsectors(&self, sector: &str) -> FetchResult<Vec<String>>;

    async fn components(&self, sector: &str, subsector: &str) -> FetchResult<Vec<String>>;

    async fn units(
        &self,
        sector: &str,
        subsector: &str,
        component: &str,
    ) -> FetchResult<Vec<String>>;

    async fn years(&self) -> FetchResult<YearSet>;

    async fn kpis(&self, sector: &str, subsector: &str, year: Year) -> FetchResult<KpiMap>;

    async fn chart_data(
        &self,
        sector: &str,
        subsector: &str,
        component: &str,
        unit: &str,
    ) -> FetchResult<ChartData>;
}

/// A backend endpoint with its path parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    Sectors,
    Subsectors(&'a str),
    Components(&'a str, &'a str),
    Units(&'a str, &'a str, &'a str),
    Years,
    Kpis(&'a str, &'a str, Year),
    ChartData(&'a str, &'a str, &'a str, &'a str),
}

impl Route<'_> {
    /// Request path with every segment percent-encoded.
    pub fn path(&self) -> String {
        fn join(head: &str, segments: &[&str]) -> String {
            let mut path = format!("/api/{}", head);
            for segment in segments {
                path.push('/');
                path.push_str(&urlencoding::encode(segment));
            }
            path
        }

        match *self {
            Route::Sectors => join("sectors", &[]),
            Route::Subsectors(sector) => join("subsectors", &[sector]),
            Route::Components(sector, subsector) => join("components", &[sector, subsector]),
            Route::Units(sector, subsector, component) => {
                join("units", &[sector, subsector, component])
            }
            Route::Years => join("years", &[]),
            Route::Kpis(sector, subsector, year) => {
                join("kpis", &[sector, subsector, &year.to_string()])
            }
            Route::ChartData(sector, subsector, component, unit) => {
                join("chart-data", &[sector, subsector, component, unit])
            }
        }
    }
}

impl fmt::Display for Route<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_percent_encoded() {
        assert_eq!(Route::Sectors.path(), "/api/sectors");
        assert_eq!(
            Route::Subsectors("Real sector").path(),
            "/api/subsectors/Real%20sector"
        );
        assert_eq!(
            Route::Units("External sector", "Exports", "Exports of goods & services").path(),
            "/api/units/External%20sector/Exports/Exports%20of%20goods%20%26%20services"
        );
        assert_eq!(
            Route::Kpis("Fiscal sector", "Fiscal balance", Year(2024)).path(),
            "/api/kpis/Fiscal%20sector/Fiscal%20balance/2024"
        );
    }

    #[test]
    fn slashes_inside_segments_do_not_split_the_path() {
        assert_eq!(
            Route::Components("Fiscal sector", "Balance/Deficit").path(),
            "/api/components/Fiscal%20sector/Balance%2FDeficit"
        );
        assert_eq!(
            Route::ChartData("a", "b", "c", "RWF/USD").path(),
            "/api/chart-data/a/b/c/RWF%2FUSD"
        );
    }
}
