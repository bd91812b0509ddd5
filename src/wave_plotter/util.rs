use crate::wave::SampleSeries;
use egui_plot::PlotBounds;

/// Axis ranges covering every finite sample of a series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Default for Extent {
    fn default() -> Self {
        Extent {
            min_x: 0.0,
            max_x: 1.0,
            min_y: -1.0,
            max_y: 1.0,
        }
    }
}

impl Extent {
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Rescales to the data, like an axis "fit all".
///
/// Non-finite samples are skipped. An empty series gets the unit box and a
/// zero-width axis is widened by one unit on each side so the chart stays drawable.
pub fn series_extent(series: &SampleSeries) -> Extent {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for (x, y) in series.points() {
        if !x.is_finite() || !y.is_finite() {
            continue;
        }
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    if min_x > max_x {
        return Extent::default();
    }

    if min_x == max_x {
        min_x -= 1.0;
        max_x += 1.0;
    }
    if min_y == max_y {
        min_y -= 1.0;
        max_y += 1.0;
    }

    Extent {
        min_x,
        max_x,
        min_y,
        max_y,
    }
}

pub(crate) fn calculate_bounds(series: &SampleSeries) -> PlotBounds {
    let extent = series_extent(series);

    PlotBounds::from_min_max([extent.min_x, extent.min_y], [extent.max_x, extent.max_y])
}
