//! Chart rendering: turns a [`Series`] into datasets and owns the chart
//! instance bound to each container.

use crate::model::{ChartMode, ChartType, Series, Year};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Identifies a chart instance created by a [`ChartSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChartHandle(pub u64);

/// The charting primitive: draws a chart from labels and datasets.
///
/// A chart instance exclusively owns its canvas and must be destroyed
/// before another is created in the same container.
pub trait ChartSurface {
    fn create(&self, container: &str, spec: &ChartSpec) -> ChartHandle;

    fn destroy(&self, handle: ChartHandle);
}

/// Visual settings for both lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartStyle {
    pub actual_color: String,
    pub projection_color: String,
    pub border_width: u32,
    /// Dash/gap lengths for the projection stroke.
    pub projection_dash: Vec<u32>,
    /// Bezier curve tension; 0 draws straight segments.
    pub tension: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            actual_color: "#0366d6".to_string(),
            projection_color: "#d66a03".to_string(),
            border_width: 2,
            projection_dash: vec![6, 6],
            tension: 0.0,
        }
    }
}

/// One line (or bar group) of a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<Option<f64>>,
    pub border_color: String,
    pub background_color: String,
    pub border_width: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_dash: Option<Vec<u32>>,
    pub tension: f64,
}

/// Everything the charting primitive needs to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub labels: Vec<Year>,
    pub datasets: Vec<Dataset>,
}

impl ChartSpec {
    pub fn dataset(&self, label: &str) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.label == label)
    }
}

pub const ACTUAL_LABEL: &str = "Actual";
pub const PROJECTION_LABEL: &str = "Projection";

pub struct ChartPresenter {
    surface: Rc<dyn ChartSurface>,
    style: ChartStyle,
    instances: RefCell<HashMap<String, ChartHandle>>,
}

impl ChartPresenter {
    pub fn new(surface: Rc<dyn ChartSurface>, style: ChartStyle) -> Self {
        Self {
            surface,
            style,
            instances: RefCell::new(HashMap::new()),
        }
    }

    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    /// Datasets for `series` under `mode`. The projection dataset is only
    /// included when enabled and non-empty.
    pub fn build_spec(&self, mode: ChartMode, series: &Series) -> ChartSpec {
        let fill = |color: &str| match mode.chart_type {
            ChartType::Line => "transparent".to_string(),
            ChartType::Bar => color.to_string(),
        };

        let mut datasets = vec![Dataset {
            label: ACTUAL_LABEL.to_string(),
            data: series.actual.clone(),
            border_color: self.style.actual_color.clone(),
            background_color: fill(&self.style.actual_color),
            border_width: self.style.border_width,
            border_dash: None,
            tension: self.style.tension,
        }];

        if mode.show_projection && series.has_projection() {
            datasets.push(Dataset {
                label: PROJECTION_LABEL.to_string(),
                data: series.projection.clone(),
                border_color: self.style.projection_color.clone(),
                background_color: fill(&self.style.projection_color),
                border_width: self.style.border_width,
                border_dash: Some(self.style.projection_dash.clone()),
                tension: self.style.tension,
            });
        }

        ChartSpec {
            chart_type: mode.chart_type,
            labels: series.labels.clone(),
            datasets,
        }
    }

    /// Replace whatever chart `container` holds with one drawn from `series`.
    pub fn render(&self, container: &str, mode: ChartMode, series: &Series) {
        self.clear(container);
        let spec = self.build_spec(mode, series);
        let handle = self.surface.create(container, &spec);
        self.instances
            .borrow_mut()
            .insert(container.to_string(), handle);
    }

    /// Destroy the chart in `container`, leaving it empty.
    pub fn clear(&self, container: &str) {
        let previous = self.instances.borrow_mut().remove(container);
        if let Some(handle) = previous {
            self.surface.destroy(handle);
        }
    }

    pub fn is_active(&self, container: &str) -> bool {
        self.instances.borrow().contains_key(container)
    }
}
