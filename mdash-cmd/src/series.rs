//! `series`: build one component's time series, print it or export it as CSV.

use anyhow::Context;
use log::info;
use mdash_core::{DataSource, Selection, Series, SeriesBuilder};
use std::io::Write;
use std::rc::Rc;

pub struct SeriesRequest {
    pub sector: String,
    pub subsector: String,
    pub component: String,
    pub unit: Option<String>,
    pub from_chart_data: bool,
}

impl SeriesRequest {
    fn selection(&self) -> Selection {
        Selection {
            sector: Some(self.sector.clone()),
            subsector: Some(self.subsector.clone()),
            component: Some(self.component.clone()),
            unit: self.unit.clone(),
            ..Selection::default()
        }
    }
}

pub async fn run_series(
    source: Rc<dyn DataSource>,
    request: SeriesRequest,
    csv_path: Option<&str>,
) -> anyhow::Result<()> {
    if request.from_chart_data && request.unit.is_none() {
        anyhow::bail!("--from-chart-data needs --unit");
    }

    let builder = SeriesBuilder::new(source);
    let selection = request.selection();
    let series = if request.from_chart_data {
        builder.fetch_chart_data(&selection).await?
    } else {
        builder.build_series(&selection).await?
    };
    let points = series.actual.iter().chain(&series.projection).flatten();
    info!(
        "{}: {} years, {} points",
        request.component,
        series.labels.len(),
        points.count()
    );

    match csv_path {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("cannot create {}", path))?;
            write_csv(&series, file)?;
            info!("wrote {}", path);
        }
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            writeln!(out, "{:>6}  {:>14}  {:>14}", "year", "actual", "projection")?;
            for [year, actual, projection] in rows(&series) {
                writeln!(out, "{:>6}  {:>14}  {:>14}", year, actual, projection)?;
            }
        }
    }
    Ok(())
}

/// One `[year, actual, projection]` row per label; gaps are empty strings.
pub fn rows(series: &Series) -> Vec<[String; 3]> {
    let cell = |value: Option<&Option<f64>>| match value {
        Some(Some(v)) => v.to_string(),
        _ => String::new(),
    };

    series
        .labels
        .iter()
        .enumerate()
        .map(|(i, year)| {
            [
                year.to_string(),
                cell(series.actual.get(i)),
                cell(series.projection.get(i)),
            ]
        })
        .collect()
}

pub fn write_csv<W: Write>(series: &Series, writer: W) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["year", "actual", "projection"])?;
    for row in rows(series) {
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdash_core::Year;

    fn series() -> Series {
        Series::assemble(
            &[Year(2022), Year(2023)],
            vec![Some(10.5), None],
            &[Year(2024)],
            vec![Some(12.0)],
        )
    }

    #[test]
    fn rows_leave_gaps_empty() {
        let rows = rows(&series());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], ["2022".to_string(), "10.5".into(), String::new()]);
        assert_eq!(rows[1], ["2023".to_string(), String::new(), String::new()]);
        assert_eq!(rows[2], ["2024".to_string(), String::new(), "12".into()]);
    }

    #[test]
    fn csv_has_header_and_one_line_per_year() {
        let mut buf = Vec::new();
        write_csv(&series(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "year,actual,projection\n2022,10.5,\n2023,,\n2024,,12\n"
        );
    }

    #[tokio::test]
    async fn chart_data_needs_a_unit() {
        let source = Rc::new(
            mdash_client::HttpSource::new(mdash_client::ClientConfig::new("http://127.0.0.1:9"))
                .unwrap(),
        );
        let request = SeriesRequest {
            sector: "Fiscal sector".into(),
            subsector: "Revenue".into(),
            component: "Grants".into(),
            unit: None,
            from_chart_data: true,
        };
        let err = run_series(source, request, None).await.unwrap_err();
        assert!(err.to_string().contains("--unit"));
    }
}
