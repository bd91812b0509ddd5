use crate::wave::SampleSeries;
use eframe::epaint::{Color32, Stroke};
use egui_plot::{PlotBounds, PlotPoint, PlotPoints, PlotResponse, PlotUi, Polygon};
use std::ops::Range;

#[derive(Clone, Debug)]
pub(crate) struct PlotSelection {
    start_pos: Option<PlotPoint>,
    end_pos: Option<PlotPoint>,
    default_bounds: PlotBounds,
    plot_bounds: PlotBounds,
    zoom_history: Vec<PlotBounds>,
}

impl PlotSelection {
    pub(crate) fn update_selection(&mut self, plot_response: &PlotResponse<()>) {
        let plot_bounds = plot_response.transform.bounds();
        let response = &plot_response.response;

        if response.drag_started() {
            self.start_pos = generate_plot_point(plot_response, plot_bounds);
            self.end_pos = None;
        }

        if response.dragged() {
            self.end_pos = generate_plot_point(plot_response, plot_bounds);
        }
    }

    /// Zooms the x axis to the dragged box, keeping the y axis.
    pub(crate) fn select_zoom(&mut self) {
        if let (Some(start), Some(end)) = (self.start_pos, self.end_pos) {
            let (new_min_x, new_max_x) = (start.x.min(end.x), start.x.max(end.x));
            let (min_y, max_y) = (self.plot_bounds.min()[1], self.plot_bounds.max()[1]);

            if new_min_x < new_max_x {
                let new_bound = PlotBounds::from_min_max([new_min_x, min_y], [new_max_x, max_y]);
                self.zoom_history.push(self.plot_bounds);
                self.plot_bounds = new_bound;
            }

            self.end_pos = None;
            self.start_pos = None;
        }
    }

    /// Steps back one zoom level.
    ///
    /// A pending selection box is dropped first. Otherwise the previous bounds
    /// from the history are restored, then the default bounds. Returns `false`
    /// when there was nothing left to undo.
    pub(crate) fn revert_zoom(&mut self) -> bool {
        if self.start_pos.is_some() || self.end_pos.is_some() {
            self.start_pos = None;
            self.end_pos = None;
            return true;
        }

        if let Some(bounds) = self.zoom_history.pop() {
            self.plot_bounds = bounds;
            true
        } else if self.plot_bounds != self.default_bounds {
            self.plot_bounds = self.default_bounds;
            true
        } else {
            false
        }
    }

    /// Rescales to new data, forgetting any zoom.
    pub(crate) fn reset(&mut self, bounds: PlotBounds) {
        *self = PlotSelection::new(bounds);
    }

    pub(crate) fn get_selected_data_range_indices(&self, series: &SampleSeries) -> Option<Range<usize>> {
        if let (Some(start), Some(end)) = (self.start_pos, self.end_pos) {
            let start_x = start.x.min(end.x);
            let end_x = start.x.max(end.x);
            let time = series.time_samples();

            let start_idx = time.partition_point(|&t| t < start_x);
            let end_idx = time.partition_point(|&t| t <= end_x);

            if start_idx < end_idx {
                Some(start_idx..end_idx)
            } else {
                None
            }
        } else {
            None
        }
    }

    pub(crate) fn get_plot_bounds(&self) -> PlotBounds {
        self.plot_bounds
    }

    pub(crate) fn draw_selection_box(&self, plot_ui: &mut PlotUi) {
        if let (Some(start), Some(end)) = (self.start_pos, self.end_pos) {
            let plot_bounds = plot_ui.plot_bounds();
            let min_y = plot_bounds.min()[1];
            let max_y = plot_bounds.max()[1];

            let points = vec![
                [start.x, min_y],
                [end.x, min_y],
                [end.x, max_y],
                [start.x, max_y],
                [start.x, min_y],
            ];

            let polygon = Polygon::new(PlotPoints::new(points))
                .stroke(Stroke::new(2.0, Color32::BLUE))
                .fill_color(Color32::from_rgba_premultiplied(100, 100, 255, 5));

            plot_ui.polygon(polygon);
        }
    }

    pub(crate) fn new(plot_bounds: PlotBounds) -> Self {
        PlotSelection {
            start_pos: None,
            end_pos: None,
            default_bounds: plot_bounds,
            plot_bounds,
            zoom_history: vec![],
        }
    }
}

fn generate_plot_point(response: &PlotResponse<()>, plot_bounds: &PlotBounds) -> Option<PlotPoint> {
    let pointer_pos = response.response.hover_pos()?;
    let plot_pos = response.transform.value_from_position(pointer_pos);

    Some(PlotPoint {
        x: plot_pos.x.clamp(plot_bounds.min()[0], plot_bounds.max()[0]),
        y: plot_pos.y.clamp(plot_bounds.min()[1], plot_bounds.max()[1]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wave::WaveParameters;

    fn unit_bounds() -> PlotBounds {
        PlotBounds::from_min_max([0.0, -1.0], [1.0, 1.0])
    }

    fn dragged(start_x: f64, end_x: f64) -> PlotSelection {
        let mut selection = PlotSelection::new(unit_bounds());
        selection.start_pos = Some(PlotPoint::new(start_x, 0.0));
        selection.end_pos = Some(PlotPoint::new(end_x, 0.5));
        selection
    }

    #[test]
    fn zoom_keeps_vertical_range() {
        let mut selection = dragged(0.75, 0.25);

        selection.select_zoom();

        let bounds = selection.get_plot_bounds();
        assert_eq!(bounds.min(), [0.25, -1.0]);
        assert_eq!(bounds.max(), [0.75, 1.0]);
        assert!(selection.start_pos.is_none());
    }

    #[test]
    fn revert_walks_history_back_to_default() {
        let mut selection = dragged(0.2, 0.8);
        selection.select_zoom();
        selection.start_pos = Some(PlotPoint::new(0.3, 0.0));
        selection.end_pos = Some(PlotPoint::new(0.4, 0.0));
        selection.select_zoom();

        assert!(selection.revert_zoom());
        assert_eq!(selection.get_plot_bounds().min()[0], 0.2);
        assert!(selection.revert_zoom());
        assert_eq!(selection.get_plot_bounds(), unit_bounds());
        assert!(!selection.revert_zoom());
    }

    #[test]
    fn revert_drops_pending_box_first() {
        let mut selection = dragged(0.2, 0.8);

        assert!(selection.revert_zoom());
        assert!(selection.start_pos.is_none() && selection.end_pos.is_none());
        assert_eq!(selection.get_plot_bounds(), unit_bounds());
    }

    #[test]
    fn empty_box_does_not_zoom() {
        let mut selection = dragged(0.5, 0.5);

        selection.select_zoom();

        assert_eq!(selection.get_plot_bounds(), unit_bounds());
        assert!(!selection.revert_zoom());
    }

    #[test]
    fn selected_indices_follow_time_axis() {
        let series = SampleSeries::generate(&WaveParameters {
            oscillation_frequency: 1.0,
            sampling_frequency: 10.0,
            ..Default::default()
        });
        let selection = dragged(0.45, 0.15);

        assert_eq!(selection.get_selected_data_range_indices(&series), Some(2..5));
    }

    #[test]
    fn reset_forgets_zoom() {
        let mut selection = dragged(0.2, 0.8);
        selection.select_zoom();

        let new_bounds = PlotBounds::from_min_max([0.0, -2.0], [4.0, 2.0]);
        selection.reset(new_bounds);

        assert_eq!(selection.get_plot_bounds(), new_bounds);
        assert!(!selection.revert_zoom());
    }
}
