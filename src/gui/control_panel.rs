//! Filter Panel Widget
//! Sidebar with the cascading practice filters: ICB -> district -> practice.

use crate::view::{Selection, ViewModel};
use egui::{ComboBox, RichText, ScrollArea};

const COMBO_WIDTH: f32 = 260.0;
const DISTRICT_LIST_HEIGHT: f32 = 140.0;

/// Left side panel holding the user's filter selection.
pub struct FilterPanel {
    selection: Selection,
}

impl Default for FilterPanel {
    fn default() -> Self {
        Self {
            selection: Selection::default(),
        }
    }
}

impl FilterPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// The selection as of the last frame.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Adopt the normalized selection computed for this frame.
    pub fn sync(&mut self, view: &ViewModel) {
        self.selection = view.selection.clone();
    }

    /// Draw the filter cascade.
    pub fn show(&mut self, ui: &mut egui::Ui, view: &ViewModel) {
        ui.add_space(5.0);
        ui.label(RichText::new("Filter GP Practice").size(16.0).strong());
        ui.add_space(10.0);

        ui.label("ICB Filter:");
        let selected_icb = self.selection.icb.clone().unwrap_or_default();
        ComboBox::from_id_salt("icb_filter")
            .width(COMBO_WIDTH)
            .selected_text(&selected_icb)
            .show_ui(ui, |ui| {
                for icb in &view.icb_options {
                    if ui.selectable_label(selected_icb == *icb, icb).clicked()
                        && selected_icb != *icb
                    {
                        self.selection.icb = Some(icb.clone());
                        // district and practice choices belong to the old ICB
                        self.selection.districts.clear();
                        self.selection.practice = None;
                    }
                }
            });

        ui.add_space(10.0);

        ui.label("Local Authority District Filter:");
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical()
                    .id_salt("district_filter")
                    .max_height(DISTRICT_LIST_HEIGHT)
                    .show(ui, |ui| {
                        for district in &view.district_options {
                            let mut checked = self.selection.districts.contains(district);
                            if ui.checkbox(&mut checked, district).changed() {
                                if checked {
                                    self.selection.districts.push(district.clone());
                                } else {
                                    self.selection.districts.retain(|d| d != district);
                                }
                                self.selection.practice = None;
                            }
                        }
                    });
            });
        ui.horizontal(|ui| {
            if ui.small_button("Clear All").clicked() {
                self.selection.districts.clear();
                self.selection.practice = None;
            }
            ui.label(
                RichText::new("empty selection = all districts")
                    .size(10.0)
                    .weak(),
            );
        });

        ui.add_space(10.0);

        ui.label("Select GP Practice:");
        if view.practice_options.is_empty() {
            ui.add_enabled_ui(false, |ui| {
                ComboBox::from_id_salt("practice_filter")
                    .width(COMBO_WIDTH)
                    .selected_text("No matching practices")
                    .show_ui(ui, |_ui| {});
            });
        } else {
            let selected_practice = self.selection.practice.clone().unwrap_or_default();
            ComboBox::from_id_salt("practice_filter")
                .width(COMBO_WIDTH)
                .selected_text(&selected_practice)
                .show_ui(ui, |ui| {
                    for practice in &view.practice_options {
                        if ui
                            .selectable_label(selected_practice == *practice, practice)
                            .clicked()
                        {
                            self.selection.practice = Some(practice.clone());
                        }
                    }
                });
        }

        ui.add_space(10.0);
        ui.separator();
    }
}
