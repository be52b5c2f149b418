//! Map Panel Widget
//! Plots the selected practice as a single marker with the viewport fitted
//! around it.

use crate::map::FIT_BUFFER_DEG;
use crate::view::ViewModel;
use egui::{Color32, RichText};
use egui_plot::{Plot, PlotBounds, PlotPoint, Points, Text};

const MARKER_COLOR: Color32 = Color32::from_rgb(0, 48, 135); // dark blue
const MAP_HEIGHT: f32 = 300.0;

/// Coordinate view of the selected practice.
pub struct MapPanel;

impl MapPanel {
    pub fn show(ui: &mut egui::Ui, view: &ViewModel) {
        let Some(map) = &view.map else {
            ui.label(
                RichText::new("No matching practices for the current filters")
                    .size(14.0)
                    .color(Color32::GRAY),
            );
            return;
        };

        let marker = map.marker.clone();
        let bounds = map.bounds;

        Plot::new("practice_map")
            .height(MAP_HEIGHT)
            .x_axis_label("Longitude")
            .y_axis_label("Latitude")
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max(bounds.min(), bounds.max()));
                plot_ui.points(
                    Points::new(vec![[marker.longitude, marker.latitude]])
                        .radius(6.0)
                        .color(MARKER_COLOR)
                        .name(&marker.label),
                );
                plot_ui.text(Text::new(
                    PlotPoint::new(
                        marker.longitude,
                        marker.latitude + FIT_BUFFER_DEG * 0.3,
                    ),
                    RichText::new(marker.label.clone())
                        .size(12.0)
                        .color(MARKER_COLOR),
                ));
            });
    }
}
