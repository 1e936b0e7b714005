//! Dashboard-level settings.

use crate::presenter::ChartStyle;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CHART_CONTAINER: &str = "component-chart";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardConfig {
    /// DOM id (or console name) of the chart render target.
    pub chart_container: String,
    pub chart_style: ChartStyle,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            chart_container: DEFAULT_CHART_CONTAINER.to_string(),
            chart_style: ChartStyle::default(),
        }
    }
}
