//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! Chart.js is loaded from a CDN at startup and the bridge functions in
//! `assets/js/chart-bridge.js` are evaluated as globals on `window`. Every
//! chart call polls until both are ready and the container exists.

use log::debug;
use mdash_core::{ChartHandle, ChartSpec, ChartSurface};
use serde_json::json;
use std::cell::Cell;

static CHART_BRIDGE_JS: &str = include_str!("../assets/js/chart-bridge.js");

const CHART_JS_URL: &str = "https://cdn.jsdelivr.net/npm/chart.js@4.4.1/dist/chart.umd.min.js";

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('mdash JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Quote `s` as a JS string literal.
fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

/// Inject Chart.js and install the bridge functions once it has loaded.
/// Call once at app startup.
pub fn init_charts() {
    let init_js = format!(
        r#"
        (function() {{
            if (window.__mdashChartsReady) return;
            if (typeof Chart === 'undefined' && !document.getElementById('mdash-chartjs')) {{
                var script = document.createElement('script');
                script.id = 'mdash-chartjs';
                script.src = {url};
                document.head.appendChild(script);
            }}
            var bridge = {bridge};
            var waitForChartJs = setInterval(function() {{
                if (typeof Chart !== 'undefined') {{
                    clearInterval(waitForChartJs);
                    (0, eval)(bridge);
                    window.mdashCreateChart = mdashCreateChart;
                    window.mdashDestroyChart = mdashDestroyChart;
                    window.__mdashChartsReady = true;
                    console.log('mdash charts initialized');
                }}
            }}, 100);
        }})();
        "#,
        url = js_string(CHART_JS_URL),
        bridge = js_string(CHART_BRIDGE_JS),
    );
    let _ = js_sys::eval(&init_js);
}

/// Draw a chart from a Chart.js config into `container_id` under `handle`.
pub fn create_chart(container_id: &str, handle: u64, config_json: &str) {
    let container = js_string(container_id);
    let config = js_string(config_json);
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__mdashChartsReady &&
                    document.getElementById({container})) {{
                    clearInterval(poll);
                    try {{
                        window.mdashCreateChart({container}, {handle}, {config});
                    }} catch(e) {{ console.error('[mdash] createChart error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

pub fn destroy_chart(handle: u64) {
    call_js(&format!(
        r#"
        if (window.__mdashChartsReady) {{
            window.mdashDestroyChart({handle});
        }} else {{
            window.__mdashDestroyed = window.__mdashDestroyed || {{}};
            window.__mdashDestroyed[{handle}] = true;
        }}
        "#,
    ));
}

/// Scheme, host and port of the current page, e.g. `http://localhost:8080`.
pub fn page_origin() -> String {
    web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .unwrap_or_default()
}

/// Full Chart.js configuration for `spec`.
pub fn chart_config(spec: &ChartSpec) -> serde_json::Value {
    json!({
        "type": spec.chart_type,
        "data": {
            "labels": spec.labels,
            "datasets": spec.datasets,
        },
        "options": {
            "responsive": true,
            "maintainAspectRatio": false,
            "spanGaps": false,
            "interaction": { "mode": "index", "intersect": false },
            "plugins": {
                "legend": { "position": "top" },
                "tooltip": { "enabled": true },
            },
            "scales": {
                "x": { "title": { "display": true, "text": "Year" } },
                "y": { "beginAtZero": false },
            },
        },
    })
}

/// [`ChartSurface`] drawing through Chart.js.
#[derive(Default)]
pub struct ChartJsSurface {
    next: Cell<u64>,
}

impl ChartJsSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChartSurface for ChartJsSurface {
    fn create(&self, container: &str, spec: &ChartSpec) -> ChartHandle {
        let handle = self.next.get();
        self.next.set(handle + 1);
        let config = chart_config(spec).to_string();
        debug!("creating chart {} in #{}", handle, container);
        create_chart(container, handle, &config);
        ChartHandle(handle)
    }

    fn destroy(&self, handle: ChartHandle) {
        debug!("destroying chart {}", handle.0);
        destroy_chart(handle.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdash_core::{ChartMode, ChartPresenter, ChartStyle, ChartType, Series, Year};
    use std::rc::Rc;

    #[test]
    fn js_strings_are_escaped() {
        assert_eq!(js_string("it's \"here\""), r#""it's \"here\"""#);
        assert_eq!(js_string("a\nb"), r#""a\nb""#);
    }

    #[test]
    fn config_wraps_spec_for_chart_js() {
        let presenter = ChartPresenter::new(Rc::new(ChartJsSurface::new()), ChartStyle::default());
        let series = Series::assemble(
            &[Year(2023)],
            vec![Some(1.0)],
            &[Year(2024)],
            vec![Some(2.0)],
        );
        let spec = presenter.build_spec(
            ChartMode {
                chart_type: ChartType::Bar,
                show_projection: true,
            },
            &series,
        );

        let config = chart_config(&spec);
        assert_eq!(config["type"], "bar");
        assert_eq!(config["data"]["labels"][1], 2024);
        assert_eq!(config["data"]["datasets"][1]["label"], "Projection");
        assert_eq!(config["options"]["interaction"]["mode"], "index");
    }
}
