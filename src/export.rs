use crate::wave::SampleSeries;
use crate::wave_plotter::util::series_extent;
use crate::wave_plotter::{LineStyle, PlotStyle};
use plotters::prelude::*;
use serde::Serialize;
use std::fs::File;
use std::io;
use std::path::Path;
use std::time::Instant;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("could not write samples: {0}")]
    Csv(#[from] csv::Error),
    #[error("could not render chart: {0}")]
    Render(String),
    #[error("image size must be non-zero, got {0}x{1}")]
    InvalidSize(u32, u32),
}

#[derive(Serialize)]
struct SampleRecord {
    time: f64,
    elongation: f64,
}

/// Renders the series as a PNG chart at `path`.
pub fn save_png(
    path: &Path,
    series: &SampleSeries,
    style: &PlotStyle,
    size: (u32, u32),
) -> Result<(), ExportError> {
    if size.0 == 0 || size.1 == 0 {
        return Err(ExportError::InvalidSize(size.0, size.1));
    }

    let start = Instant::now();
    let root = BitMapBackend::new(path, size).into_drawing_area();
    draw_chart(&root, series, style).map_err(|e| ExportError::Render(e.to_string()))?;

    log::info!(
        "Saved {} samples to {} in {:?}",
        series.len(),
        path.display(),
        start.elapsed()
    );

    Ok(())
}

fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    series: &SampleSeries,
    style: &PlotStyle,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let extent = series_extent(series);
    let [r, g, b] = style.color;
    let color = RGBColor(r, g, b);

    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(root)
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(extent.min_x..extent.max_x, extent.min_y..extent.max_y)?;

    chart
        .configure_mesh()
        .x_desc("time [seconds]")
        .y_desc("elongation [units]")
        .draw()?;

    let finite_points = series
        .points()
        .filter(|(t, e)| t.is_finite() && e.is_finite());

    match style.line_style {
        LineStyle::None => {
            chart.draw_series(finite_points.map(|point| Circle::new(point, 3, color.filled())))?;
        }
        LineStyle::Line => {
            chart.draw_series(LineSeries::new(finite_points, &color))?;
        }
    }

    root.present()?;
    Ok(())
}

/// Writes one `time,elongation` row per sample, after a header row.
pub fn write_csv<W: io::Write>(writer: W, series: &SampleSeries) -> Result<(), ExportError> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);

    // The header is written even when there are no samples
    writer.write_record(["time", "elongation"])?;
    for (time, elongation) in series.points() {
        writer.serialize(SampleRecord { time, elongation })?;
    }

    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn save_csv(path: &Path, series: &SampleSeries) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })?;

    write_csv(file, series)?;
    log::info!("Exported {} samples to {}", series.len(), path.display());

    Ok(())
}
