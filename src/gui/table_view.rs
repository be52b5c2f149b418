//! Table Preview Widget
//! Full-table preview with virtualized rows so only the visible window is
//! materialized from the DataFrame.

use egui::{RichText, ScrollArea};
use polars::prelude::*;

const ROW_HEIGHT: f32 = 18.0;
const COL_WIDTH: f32 = 130.0;
const PREVIEW_HEIGHT: f32 = 280.0;

/// Scrollable preview of the full loaded table.
pub struct TableView;

impl TableView {
    pub fn show(ui: &mut egui::Ui, df: &DataFrame) {
        let columns = df.get_columns();
        let total_rows = df.height();

        ScrollArea::horizontal()
            .id_salt("table_preview_h")
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    for column in columns {
                        ui.add_sized(
                            [COL_WIDTH, ROW_HEIGHT],
                            egui::Label::new(
                                RichText::new(column.name().as_str()).strong().size(11.0),
                            )
                            .truncate(),
                        );
                    }
                });
                ui.separator();

                ScrollArea::vertical()
                    .id_salt("table_preview_v")
                    .max_height(PREVIEW_HEIGHT)
                    .show_rows(ui, ROW_HEIGHT, total_rows, |ui, row_range| {
                        for row in row_range {
                            ui.horizontal(|ui| {
                                for column in columns {
                                    ui.add_sized(
                                        [COL_WIDTH, ROW_HEIGHT],
                                        egui::Label::new(
                                            RichText::new(Self::cell_text(column, row)).size(11.0),
                                        )
                                        .truncate(),
                                    );
                                }
                            });
                        }
                    });
            });
    }

    fn cell_text(column: &Column, row: usize) -> String {
        match column.get(row) {
            Ok(value) if !value.is_null() => value.to_string().trim_matches('"').to_string(),
            _ => String::new(),
        }
    }
}
