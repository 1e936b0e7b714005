//! Command implementations for the mdash CLI.
//!
//! Headless access to the indicator backend: browse the hierarchy, print KPI
//! tables, build or export a component's time series, and drive the cascade
//! controller end to end without a browser.

use clap::Subcommand;
use mdash_client::{ClientConfig, HttpSource};
use mdash_core::{ChartType, SeriesType, Year};
use std::rc::Rc;

pub mod kpis;
pub mod series;
pub mod tree;
pub mod walk;

#[derive(Subcommand)]
pub enum Command {
    /// Print the sector → subsector → component → unit hierarchy
    Tree {
        /// Only walk this sector
        #[arg(short, long)]
        sector: Option<String>,
    },

    /// Print every KPI of a subsector for one year
    Kpis {
        sector: String,
        subsector: String,
        year: Year,
    },

    /// Build a component's actual and projection series
    Series {
        sector: String,
        subsector: String,
        component: String,

        /// Unit of the component; required with --from-chart-data
        #[arg(short, long)]
        unit: Option<String>,

        /// Read the pre-assembled series from the chart-data endpoint
        #[arg(long)]
        from_chart_data: bool,

        /// Write the series to this CSV file instead of printing it
        #[arg(long)]
        csv: Option<String>,
    },

    /// Run the dashboard cascade from start-up and print where it lands
    Walk {
        #[arg(long)]
        sector: Option<String>,
        #[arg(long)]
        subsector: Option<String>,
        #[arg(long)]
        component: Option<String>,
        #[arg(long)]
        unit: Option<String>,
        #[arg(long)]
        year: Option<Year>,
        /// "actual" or "projection"
        #[arg(long)]
        series_type: Option<SeriesType>,
        /// "line" or "bar"
        #[arg(long)]
        chart_type: Option<ChartType>,
        #[arg(long)]
        hide_projection: bool,
    },
}

pub async fn run(config: ClientConfig, command: Command) -> anyhow::Result<()> {
    let source = Rc::new(HttpSource::new(config)?);
    match command {
        Command::Tree { sector } => tree::run_tree(source, sector.as_deref()).await,
        Command::Kpis {
            sector,
            subsector,
            year,
        } => kpis::run_kpis(source, &sector, &subsector, year).await,
        Command::Series {
            sector,
            subsector,
            component,
            unit,
            from_chart_data,
            csv,
        } => {
            let request = series::SeriesRequest {
                sector,
                subsector,
                component,
                unit,
                from_chart_data,
            };
            series::run_series(source, request, csv.as_deref()).await
        }
        Command::Walk {
            sector,
            subsector,
            component,
            unit,
            year,
            series_type,
            chart_type,
            hide_projection,
        } => {
            let steps = walk::WalkSteps {
                sector,
                subsector,
                component,
                unit,
                year,
                series_type,
                chart_type,
                hide_projection,
            };
            walk::run_walk(source, steps.into_commands()).await
        }
    }
}
