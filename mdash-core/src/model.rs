//! Core data types shared by the store, loaders and presenters.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar year as used by the indicator backend.
///
/// The backend emits years as JSON numbers, but the year `<select>` hands them
/// back as strings, so both forms deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Year(pub i32);

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Year {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i32>().map(Year)
    }
}

impl<'de> Deserialize<'de> for Year {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawYear {
            Number(i64),
            Text(String),
        }

        match RawYear::deserialize(deserializer)? {
            RawYear::Number(n) => i32::try_from(n)
                .map(Year)
                .map_err(|_| de::Error::custom(format!("year out of range: {}", n))),
            RawYear::Text(s) => s
                .parse::<Year>()
                .map_err(|_| de::Error::custom(format!("invalid year: {:?}", s))),
        }
    }
}

/// Which year list drives the year selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesType {
    #[default]
    Actual,
    Projection,
}

impl SeriesType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeriesType::Actual => "actual",
            SeriesType::Projection => "projection",
        }
    }
}

impl FromStr for SeriesType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "actual" => Ok(SeriesType::Actual),
            "projection" => Ok(SeriesType::Projection),
            other => Err(format!("unknown series type: {}", other)),
        }
    }
}

/// Chart geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Line,
    Bar,
}

impl ChartType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Line => "line",
            ChartType::Bar => "bar",
        }
    }
}

impl FromStr for ChartType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "line" => Ok(ChartType::Line),
            "bar" | "column" => Ok(ChartType::Bar),
            other => Err(format!("unknown chart type: {}", other)),
        }
    }
}

/// The four dependent levels of the drill-down hierarchy, shallowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Sector,
    Subsector,
    Component,
    Unit,
}

impl Level {
    pub const ALL: [Level; 4] = [
        Level::Sector,
        Level::Subsector,
        Level::Component,
        Level::Unit,
    ];

    /// The level directly above this one, if any.
    pub fn parent(&self) -> Option<Level> {
        match self {
            Level::Sector => None,
            Level::Subsector => Some(Level::Sector),
            Level::Component => Some(Level::Subsector),
            Level::Unit => Some(Level::Component),
        }
    }

    /// All levels strictly below this one.
    pub fn deeper(&self) -> impl Iterator<Item = Level> {
        let this = *self;
        Level::ALL.into_iter().filter(move |l| *l > this)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Sector => "sector",
            Level::Subsector => "subsector",
            Level::Component => "component",
            Level::Unit => "unit",
        }
    }
}

/// Current drill-down selection.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Selection {
    pub sector: Option<String>,
    pub subsector: Option<String>,
    pub component: Option<String>,
    pub unit: Option<String>,
    pub year: Option<Year>,
    pub series_type: SeriesType,
}

impl Selection {
    pub fn level(&self, level: Level) -> Option<&str> {
        match level {
            Level::Sector => self.sector.as_deref(),
            Level::Subsector => self.subsector.as_deref(),
            Level::Component => self.component.as_deref(),
            Level::Unit => self.unit.as_deref(),
        }
    }

    pub(crate) fn level_mut(&mut self, level: Level) -> &mut Option<String> {
        match level {
            Level::Sector => &mut self.sector,
            Level::Subsector => &mut self.subsector,
            Level::Component => &mut self.component,
            Level::Unit => &mut self.unit,
        }
    }

    /// True when every set level has all of its ancestors set.
    pub fn is_consistent(&self) -> bool {
        Level::ALL.iter().all(|level| match (self.level(*level), level.parent()) {
            (Some(_), Some(parent)) => self.level(parent).is_some(),
            _ => true,
        })
    }

    /// Sector and subsector, the key of a KPI lookup.
    pub fn kpi_scope(&self) -> Option<(&str, &str)> {
        Some((self.sector.as_deref()?, self.subsector.as_deref()?))
    }

    /// All four hierarchy levels, present only once the drill-down is complete.
    pub fn full_path(&self) -> Option<(&str, &str, &str, &str)> {
        Some((
            self.sector.as_deref()?,
            self.subsector.as_deref()?,
            self.component.as_deref()?,
            self.unit.as_deref()?,
        ))
    }
}

/// Chart presentation flags, independent of the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartMode {
    pub chart_type: ChartType,
    pub show_projection: bool,
}

impl Default for ChartMode {
    fn default() -> Self {
        Self {
            chart_type: ChartType::Line,
            show_projection: true,
        }
    }
}

/// Point-in-time copy of the store.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Snapshot {
    pub selection: Selection,
    pub mode: ChartMode,
}

/// Available years, split at the actual/projection boundary.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct YearSet {
    #[serde(default)]
    pub actual: Vec<Year>,
    #[serde(default)]
    pub projection: Vec<Year>,
}

impl YearSet {
    pub fn for_type(&self, series_type: SeriesType) -> &[Year] {
        match series_type {
            SeriesType::Actual => &self.actual,
            SeriesType::Projection => &self.projection,
        }
    }
}

/// A single KPI value as delivered by the backend.
///
/// The backend formats numbers as strings ("12.3") and uses "N/A" for gaps,
/// so text is the common case.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum KpiValue {
    Number(f64),
    Text(String),
    Missing,
}

impl KpiValue {
    /// Numeric reading of the value; `None` when it is not a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            KpiValue::Number(n) if n.is_finite() => Some(*n),
            KpiValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }
}

impl fmt::Display for KpiValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KpiValue::Number(n) => write!(f, "{}", n),
            KpiValue::Text(s) => f.write_str(s),
            KpiValue::Missing => f.write_str("N/A"),
        }
    }
}

impl From<serde_json::Value> for KpiValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => KpiValue::Missing,
            serde_json::Value::Number(n) => n.as_f64().map_or(KpiValue::Missing, KpiValue::Number),
            serde_json::Value::String(s) => KpiValue::Text(s),
            other => KpiValue::Text(other.to_string()),
        }
    }
}

/// KPI label to value mapping for one (sector, subsector, year), in backend order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct KpiMap {
    entries: Vec<(String, KpiValue)>,
}

impl KpiMap {
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, KpiValue)>,
        K: Into<String>,
    {
        Self {
            entries: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &KpiValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'de> Deserialize<'de> for KpiMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // serde_json is built with `preserve_order`, so the map keeps backend order.
        let map = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
        Ok(Self {
            entries: map.into_iter().map(|(k, v)| (k, v.into())).collect(),
        })
    }
}

/// Chart-ready time series: one shared label axis, two aligned value lines.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Series {
    pub labels: Vec<Year>,
    /// One value per actual year.
    pub actual: Vec<Option<f64>>,
    /// One value per label; `None` across the actual span.
    pub projection: Vec<Option<f64>>,
}

impl Series {
    /// Lay out actual and projection values on one axis, padding the
    /// projection line so it starts where the actual line ends.
    pub fn assemble(
        actual_years: &[Year],
        actual_values: Vec<Option<f64>>,
        projection_years: &[Year],
        projection_values: Vec<Option<f64>>,
    ) -> Self {
        debug_assert_eq!(actual_years.len(), actual_values.len());
        debug_assert_eq!(projection_years.len(), projection_values.len());

        let labels = actual_years
            .iter()
            .chain(projection_years.iter())
            .copied()
            .collect();
        let projection = std::iter::repeat(None)
            .take(actual_years.len())
            .chain(projection_values)
            .collect();

        Self {
            labels,
            actual: actual_values,
            projection,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Whether the projection line has anything to draw.
    pub fn has_projection(&self) -> bool {
        self.projection.iter().any(Option::is_some)
    }
}

/// One half of the `/api/chart-data` payload.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SeriesPart {
    #[serde(default)]
    pub years: Vec<Year>,
    #[serde(default)]
    pub values: Vec<Option<f64>>,
}

/// Pre-assembled time series for a full selection path.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ChartData {
    #[serde(default)]
    pub actual: SeriesPart,
    #[serde(default)]
    pub projection: SeriesPart,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_accepts_numbers_and_strings() {
        let years: Vec<Year> = serde_json::from_str(r#"[2019, "2020", " 2021 "]"#).unwrap();
        assert_eq!(years, vec![Year(2019), Year(2020), Year(2021)]);
        assert!(serde_json::from_str::<Year>(r#""soon""#).is_err());
    }

    #[test]
    fn kpi_map_keeps_backend_order() {
        let map: KpiMap =
            serde_json::from_str(r#"{"Zeta": "1.0", "Alpha": 2, "Mid": null}"#).unwrap();
        let labels: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(labels, vec!["Zeta", "Alpha", "Mid"]);
        let values: Vec<&KpiValue> = map.iter().map(|(_, v)| v).collect();
        assert_eq!(values[1], &KpiValue::Number(2.0));
        assert_eq!(values[2], &KpiValue::Missing);
    }

    #[test]
    fn kpi_value_numeric_reading() {
        assert_eq!(KpiValue::Text("12.5".into()).as_f64(), Some(12.5));
        assert_eq!(KpiValue::Text("N/A".into()).as_f64(), None);
        assert_eq!(KpiValue::Number(3.0).as_f64(), Some(3.0));
        assert_eq!(KpiValue::Missing.as_f64(), None);
        assert_eq!(KpiValue::Missing.to_string(), "N/A");
    }

    #[test]
    fn selection_consistency() {
        let mut sel = Selection::default();
        assert!(sel.is_consistent());
        sel.subsector = Some("Revenue".into());
        assert!(!sel.is_consistent());
        sel.sector = Some("Fiscal sector".into());
        assert!(sel.is_consistent());
    }

    #[test]
    fn series_assemble_pads_projection() {
        let series = Series::assemble(
            &[Year(2024), Year(2025)],
            vec![Some(1.0), None],
            &[Year(2026)],
            vec![Some(3.0)],
        );
        assert_eq!(series.labels, vec![Year(2024), Year(2025), Year(2026)]);
        assert_eq!(series.projection, vec![None, None, Some(3.0)]);
        assert!(series.has_projection());
    }

    #[test]
    fn chart_data_tolerates_missing_halves() {
        let data: ChartData =
            serde_json::from_str(r#"{"actual": {"years": [2020], "values": [1.5]}}"#).unwrap();
        assert_eq!(data.actual.years, vec![Year(2020)]);
        assert!(data.projection.years.is_empty());
    }

    #[test]
    fn level_ordering() {
        let deeper: Vec<Level> = Level::Subsector.deeper().collect();
        assert_eq!(deeper, vec![Level::Component, Level::Unit]);
        assert_eq!(Level::Sector.parent(), None);
    }
}
