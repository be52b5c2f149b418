//! GP Practice Explorer Main Application
//! Main window: sidebar filter cascade plus map, practice detail, table
//! preview and download sections.

use crate::config::AppConfig;
use crate::data::{Dataset, PracticeRecord};
use crate::export::{self, ExportError};
use crate::gui::{FilterPanel, MapPanel, TableView};
use crate::view::{self, ViewModel};
use chrono::Local;
use egui::{Color32, RichText, SidePanel};
use std::path::Path;
use tracing::{error, info, warn};

/// Main application window.
pub struct ExplorerApp {
    dataset: &'static Dataset,
    config: AppConfig,
    filter_panel: FilterPanel,
    show_preview: bool,
    status: String,
    empty_warned: bool,
}

impl ExplorerApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        dataset: &'static Dataset,
        config: AppConfig,
    ) -> Self {
        Self {
            dataset,
            config,
            filter_panel: FilterPanel::new(),
            show_preview: true,
            status: String::new(),
            empty_warned: false,
        }
    }

    /// Handle the ZIP download: native save dialog primed with the dated
    /// filename, then the archive bytes written to the chosen path.
    fn handle_export(&mut self) {
        let name = export::archive_name(Local::now().date_naive());
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Zip archive", &["zip"])
            .set_file_name(&name)
            .save_file()
        else {
            return; // user cancelled
        };

        match self.write_archive(&path) {
            Ok(()) => {
                info!(path = %path.display(), "export archive written");
                self.status = format!("Saved {}", path.display());
            }
            Err(e) => {
                error!("export failed: {e}");
                self.status = format!("Error: {e}");
            }
        }
    }

    fn write_archive(&self, path: &Path) -> Result<(), ExportError> {
        let bytes = export::build_archive(self.dataset.frame(), &self.config.notes_txt)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    fn show_body(&mut self, ui: &mut egui::Ui, view: &ViewModel) {
        ui.add_space(5.0);
        ui.heading("GP Practice Explorer");
        ui.label(
            RichText::new("GP practice demographics, locations and downloads")
                .size(12.0)
                .color(Color32::GRAY),
        );
        ui.add_space(10.0);

        MapPanel::show(ui, view);
        ui.add_space(8.0);

        if let Some(summary) = &view.summary {
            ui.label(RichText::new(format!("Selected GP Practice: {summary}")).strong());
        }
        if let Some(record) = &view.record {
            ui.add_space(8.0);
            Self::show_record(ui, record);
        }

        ui.add_space(12.0);
        ui.separator();
        ui.add_space(5.0);

        ui.label(RichText::new("Download Data").size(16.0).strong());
        ui.add_space(5.0);
        ui.checkbox(&mut self.show_preview, "Preview data download");
        if self.show_preview {
            TableView::show(ui, self.dataset.frame());
        }
        ui.add_space(8.0);

        let button = egui::Button::new(RichText::new("Download ZIP").size(14.0))
            .min_size(egui::vec2(150.0, 30.0));
        if ui.add(button).clicked() {
            self.handle_export();
        }
        if !self.status.is_empty() {
            let status_color = if self.status.starts_with("Error") {
                Color32::from_rgb(220, 53, 69)
            } else {
                Color32::from_rgb(40, 167, 69)
            };
            ui.label(RichText::new(&self.status).size(11.0).color(status_color));
        }

        ui.add_space(12.0);
        ui.separator();
        ui.add_space(5.0);

        ui.label(RichText::new("Help and Support").size(16.0).strong());
        ui.add_space(4.0);
        egui::CollapsingHeader::new("About this app").show(ui, |ui| {
            ui.label(RichText::new("GP Practice Explorer").strong());
            ui.label(
                "Filter to an ICB, Local Authority District and GP practice, inspect the \
                 practice on the map, and download the full dataset as a zip archive.",
            );
        });
        ui.label(
            RichText::new("For support with using the tool please contact the data team.")
                .size(11.0)
                .color(Color32::GRAY),
        );
    }

    fn show_record(ui: &mut egui::Ui, record: &PracticeRecord) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("practice_detail")
                    .striped(true)
                    .min_col_width(130.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        let field = |ui: &mut egui::Ui, label: &str, value: String| {
                            ui.label(RichText::new(label).strong().size(11.0));
                            ui.label(RichText::new(value).size(11.0));
                            ui.end_row();
                        };
                        field(ui, "Practice code", record.code.clone());
                        field(ui, "Practice name", record.name.clone());
                        field(ui, "Postcode", record.postcode.clone());
                        field(ui, "CCG", format!("{} ({})", record.ccg_name, record.ccg_code));
                        field(ui, "PCN", format!("{} ({})", record.pcn_name, record.pcn_code));
                        field(
                            ui,
                            "Location",
                            format!("{} ({})", record.location_name, record.location_code),
                        );
                        field(ui, "ICB", format!("{} ({})", record.icb_name, record.icb_code));
                        field(
                            ui,
                            "Region",
                            format!("{} ({})", record.region_name, record.region_code),
                        );
                        field(
                            ui,
                            "LA District",
                            format!("{} ({})", record.district_name, record.district_code),
                        );
                        field(ui, "LA", format!("{} ({})", record.la_name, record.la_code));
                        field(
                            ui,
                            "Registered patients",
                            record.registered_patients.to_string(),
                        );
                        field(
                            ui,
                            "Coordinates",
                            format!("{:.4}, {:.4}", record.latitude, record.longitude),
                        );
                    });
            });
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let view = match view::build(self.dataset.frame(), self.filter_panel.selection()) {
            Ok(view) => view,
            Err(e) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.colored_label(Color32::from_rgb(220, 53, 69), format!("Error: {e}"));
                });
                return;
            }
        };
        self.filter_panel.sync(&view);

        if view.practice_options.is_empty() {
            if !self.empty_warned {
                warn!("no practices match the current filter selection");
                self.empty_warned = true;
            }
        } else {
            self.empty_warned = false;
        }

        SidePanel::left("filter_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("sidebar")
                    .show(ui, |ui| {
                        self.filter_panel.show(ui, &view);
                    });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().id_salt("body").show(ui, |ui| {
                self.show_body(ui, &view);
            });
        });
    }
}
