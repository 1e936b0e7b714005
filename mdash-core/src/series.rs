//! Time-series assembly for the selected component.

use crate::error::{FetchError, FetchResult};
use crate::kpi::{extract_component_value, KpiResolver};
use crate::loader::HierarchyLoader;
use crate::model::{ChartData, Selection, Series, SeriesPart, Year};
use crate::source::DataSource;
use futures::future::join_all;
use log::{debug, warn};
use std::rc::Rc;

#[derive(Clone)]
pub struct SeriesBuilder {
    source: Rc<dyn DataSource>,
    loader: HierarchyLoader,
    kpis: KpiResolver,
}

impl SeriesBuilder {
    pub fn new(source: Rc<dyn DataSource>) -> Self {
        Self {
            loader: HierarchyLoader::new(source.clone()),
            kpis: KpiResolver::new(source.clone()),
            source,
        }
    }

    /// Resolve the selected component's value for every actual and
    /// projection year.
    ///
    /// All years are requested at once; results are placed by year index, so
    /// response arrival order never affects the output. A year whose fetch
    /// fails becomes a gap. If the year list itself cannot be fetched the
    /// series is empty.
    pub async fn build_series(&self, selection: &Selection) -> FetchResult<Series> {
        let sector = selection
            .sector
            .as_deref()
            .ok_or(FetchError::Incomplete("sector"))?;
        let subsector = selection
            .subsector
            .as_deref()
            .ok_or(FetchError::Incomplete("subsector"))?;
        let component = selection
            .component
            .as_deref()
            .ok_or(FetchError::Incomplete("component"))?;

        let years = match self.loader.list_years().await {
            Ok(years) => years,
            Err(e) => {
                warn!("year list unavailable, building empty series: {}", e);
                return Ok(Series::default());
            }
        };

        let (actual, projection) = futures::join!(
            self.values_for(sector, subsector, component, &years.actual),
            self.values_for(sector, subsector, component, &years.projection),
        );
        debug!(
            "built series for {}: {} actual, {} projection points",
            component,
            actual.iter().flatten().count(),
            projection.iter().flatten().count()
        );

        Ok(Series::assemble(
            &years.actual,
            actual,
            &years.projection,
            projection,
        ))
    }

    async fn values_for(
        &self,
        sector: &str,
        subsector: &str,
        component: &str,
        years: &[Year],
    ) -> Vec<Option<f64>> {
        join_all(years.iter().map(|&year| async move {
            match self.kpis.resolve_kpis(sector, subsector, year).await {
                Ok(kpis) => extract_component_value(&kpis, component),
                Err(e) => {
                    warn!("no {} value for {}: {}", component, year, e);
                    None
                }
            }
        }))
        .await
    }

    /// Fetch the pre-assembled series for a complete selection from the
    /// chart-data endpoint.
    pub async fn fetch_chart_data(&self, selection: &Selection) -> FetchResult<Series> {
        let (sector, subsector, component, unit) = selection
            .full_path()
            .ok_or(FetchError::Incomplete("unit"))?;
        let data = self
            .source
            .chart_data(sector, subsector, component, unit)
            .await?;
        Ok(series_from_chart_data(data))
    }
}

/// Lay out a chart-data payload on the shared year axis. Value lists that
/// disagree in length with their years are cut or padded with gaps.
pub fn series_from_chart_data(data: ChartData) -> Series {
    fn aligned(part: SeriesPart) -> (Vec<Year>, Vec<Option<f64>>) {
        let mut values = part.values;
        values.resize(part.years.len(), None);
        (part.years, values)
    }

    let (actual_years, actual_values) = aligned(data.actual);
    let (projection_years, projection_values) = aligned(data.projection);
    Series::assemble(
        &actual_years,
        actual_values,
        &projection_years,
        projection_values,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Route;
    use crate::testing::FakeSource;
    use futures::executor::{block_on, LocalPool};
    use futures::task::LocalSpawnExt;
    use serde_json::json;
    use std::cell::RefCell;

    fn selection() -> Selection {
        Selection {
            sector: Some("Real sector".into()),
            subsector: Some("GDP and components".into()),
            component: Some("Real GDP".into()),
            unit: Some("Billion RWF, Level".into()),
            ..Selection::default()
        }
    }

    fn kpis(value: serde_json::Value) -> serde_json::Value {
        json!({ "Public investment (% GDP)": "7.0", "Real GDP (billion FRW)": value })
    }

    fn source() -> FakeSource {
        let s = "Real sector";
        let ss = "GDP and components";
        FakeSource::new()
            .with(
                Route::Years,
                json!({"actual": [2019, 2020, 2021], "projection": [2022, 2023]}),
            )
            .with(Route::Kpis(s, ss, Year(2019)), kpis(json!("10")))
            .with(Route::Kpis(s, ss, Year(2020)), kpis(json!("12.0")))
            .with(Route::Kpis(s, ss, Year(2021)), kpis(json!("N/A")))
            .with(Route::Kpis(s, ss, Year(2022)), kpis(json!(15)))
            .with(Route::Kpis(s, ss, Year(2023)), kpis(json!("16")))
    }

    #[test]
    fn aligns_actual_and_projection_on_one_axis() {
        let builder = SeriesBuilder::new(Rc::new(source()));
        let series = block_on(builder.build_series(&selection())).unwrap();

        let years: Vec<i32> = series.labels.iter().map(|y| y.0).collect();
        assert_eq!(years, vec![2019, 2020, 2021, 2022, 2023]);
        assert_eq!(series.actual, vec![Some(10.0), Some(12.0), None]);
        assert_eq!(
            series.projection,
            vec![None, None, None, Some(15.0), Some(16.0)]
        );
    }

    #[test]
    fn reassembles_by_year_not_by_arrival() {
        let fake = Rc::new(source());
        let s = "Real sector";
        let ss = "GDP and components";
        for year in [2019, 2020, 2021] {
            fake.hold(Route::Kpis(s, ss, Year(year)));
        }

        let builder = SeriesBuilder::new(fake.clone());
        let result = Rc::new(RefCell::new(None));
        let mut pool = LocalPool::new();
        {
            let result = result.clone();
            pool.spawner()
                .spawn_local(async move {
                    let series = builder.build_series(&selection()).await;
                    *result.borrow_mut() = Some(series);
                })
                .unwrap();
        }
        pool.run_until_stalled();
        assert!(result.borrow().is_none());

        // Release newest first.
        for year in [2021, 2020, 2019] {
            assert!(fake.release(Route::Kpis(s, ss, Year(year))));
            pool.run_until_stalled();
        }

        let series = result.borrow_mut().take().unwrap().unwrap();
        assert_eq!(series.actual, vec![Some(10.0), Some(12.0), None]);
    }

    #[test]
    fn failed_years_become_gaps() {
        let fake = source();
        fake.fail(Route::Kpis("Real sector", "GDP and components", Year(2022)));
        let builder = SeriesBuilder::new(Rc::new(fake));
        let series = block_on(builder.build_series(&selection())).unwrap();
        assert_eq!(series.projection, vec![None, None, None, None, Some(16.0)]);
    }

    #[test]
    fn missing_years_give_an_empty_series() {
        let fake = source();
        fake.fail(Route::Years);
        let builder = SeriesBuilder::new(Rc::new(fake));
        let series = block_on(builder.build_series(&selection())).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn incomplete_selection_is_rejected() {
        let builder = SeriesBuilder::new(Rc::new(source()));
        let mut sel = selection();
        sel.component = None;
        sel.unit = None;
        let err = block_on(builder.build_series(&sel)).unwrap_err();
        assert_eq!(err, FetchError::Incomplete("component"));
    }

    #[test]
    fn chart_data_payload_is_padded() {
        let data: ChartData = serde_json::from_value(json!({
            "actual": {"years": [2024, 2025], "values": [1.0, 2.0]},
            "projection": {"years": [2026, 2027], "values": [3.0]},
        }))
        .unwrap();
        let series = series_from_chart_data(data);
        assert_eq!(series.labels.len(), 4);
        assert_eq!(series.actual, vec![Some(1.0), Some(2.0)]);
        assert_eq!(series.projection, vec![None, None, Some(3.0), None]);
    }

    #[test]
    fn fetches_chart_data_for_full_path() {
        let fake = source().with(
            Route::ChartData(
                "Real sector",
                "GDP and components",
                "Real GDP",
                "Billion RWF, Level",
            ),
            json!({
                "actual": {"years": [2024], "values": [9.5]},
                "projection": {"years": [], "values": []},
            }),
        );
        let builder = SeriesBuilder::new(Rc::new(fake));
        let series = block_on(builder.fetch_chart_data(&selection())).unwrap();
        assert_eq!(series.actual, vec![Some(9.5)]);
        assert!(!series.has_projection());
    }
}
