//! KPI lookups for a (sector, subsector, year) triple.

use crate::error::FetchResult;
use crate::model::{KpiMap, KpiValue, Year};
use crate::source::DataSource;
use log::debug;
use std::rc::Rc;

#[derive(Clone)]
pub struct KpiResolver {
    source: Rc<dyn DataSource>,
}

impl KpiResolver {
    pub fn new(source: Rc<dyn DataSource>) -> Self {
        Self { source }
    }

    /// Fetch the KPI mapping. Identical calls re-fetch.
    pub async fn resolve_kpis(
        &self,
        sector: &str,
        subsector: &str,
        year: Year,
    ) -> FetchResult<KpiMap> {
        let kpis = self.source.kpis(sector, subsector, year).await?;
        debug!(
            "resolved {} kpis for {}/{}/{}",
            kpis.len(),
            sector,
            subsector,
            year
        );
        Ok(kpis)
    }
}

/// First entry whose label contains `component`, in mapping order.
///
/// Labels are matched by substring, so a component whose name is contained
/// in another label ("Steel" in "Steel Imports") resolves to whichever label
/// the backend lists first.
pub fn find_component_entry<'a>(
    kpis: &'a KpiMap,
    component: &str,
) -> Option<(&'a str, &'a KpiValue)> {
    kpis.iter().find(|(label, _)| label.contains(component))
}

/// Numeric value of the first label containing `component`; `None` when no
/// label matches or the matched value is not a number.
pub fn extract_component_value(kpis: &KpiMap, component: &str) -> Option<f64> {
    find_component_entry(kpis, component)
        .and_then(|(_, value)| value.as_f64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Route;
    use crate::testing::FakeSource;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn first_matching_label_wins() {
        let kpis = KpiMap::from_pairs([
            ("Steel Production", KpiValue::Number(5.0)),
            ("Steel Imports", KpiValue::Number(3.0)),
        ]);
        assert_eq!(extract_component_value(&kpis, "Steel"), Some(5.0));

        let reversed = KpiMap::from_pairs([
            ("Steel Imports", KpiValue::Number(3.0)),
            ("Steel Production", KpiValue::Number(5.0)),
        ]);
        assert_eq!(extract_component_value(&reversed, "Steel"), Some(3.0));
    }

    #[test]
    fn first_match_is_not_skipped_when_unparseable() {
        let kpis = KpiMap::from_pairs([
            ("Grants (% GDP)", KpiValue::Text("N/A".into())),
            ("Grants received", KpiValue::Text("4.2".into())),
        ]);
        assert_eq!(extract_component_value(&kpis, "Grants"), None);
    }

    #[test]
    fn no_match_is_none() {
        let kpis = KpiMap::from_pairs([("Tax revenue (% GDP)", KpiValue::Text("15.1".into()))]);
        assert_eq!(extract_component_value(&kpis, "Expense"), None);
        let (label, _) = find_component_entry(&kpis, "Tax revenue").unwrap();
        assert_eq!(label, "Tax revenue (% GDP)");
    }

    #[test]
    fn resolve_preserves_backend_order() {
        let source = FakeSource::new().with(
            Route::Kpis("Steel", "Output", Year(2020)),
            json!({"Steel Production": "5", "Steel Imports": "3"}),
        );
        let resolver = KpiResolver::new(Rc::new(source));
        let kpis = block_on(resolver.resolve_kpis("Steel", "Output", Year(2020)))
            .unwrap();
        assert_eq!(extract_component_value(&kpis, "Steel"), Some(5.0));
    }

    #[test]
    fn resolve_reports_malformed_bodies() {
        let source = FakeSource::new().with(
            Route::Kpis("A", "B", Year(2020)),
            json!(["not", "a", "map"]),
        );
        let resolver = KpiResolver::new(Rc::new(source));
        let err = block_on(resolver.resolve_kpis("A", "B", Year(2020)))
            .unwrap_err();
        assert!(matches!(err, crate::error::FetchError::Parse { .. }));
    }
}
