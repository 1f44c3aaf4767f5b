//! egui renderings of the form controls. Every control writes straight into
//! the draft value it is handed.

use std::ops::RangeInclusive;

use admin_core::widgets::{field_error, FileUpload, MultiSelect, MultiSelectClick, Select};
use eframe::egui;
use shared::error::ValidationErrorMap;

use crate::controller::events::{UiError, UiErrorCategory, UiErrorContext};

pub const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(240, 71, 71);
pub const WARN_COLOR: egui::Color32 = egui::Color32::from_rgb(232, 169, 59);

/// Validation problems are the user's to fix; everything else is a failure.
pub fn status_color(category: UiErrorCategory) -> egui::Color32 {
    match category {
        UiErrorCategory::Validation => WARN_COLOR,
        UiErrorCategory::Transport | UiErrorCategory::Unknown => ERROR_COLOR,
    }
}

/// First server or local message for `field`, in red under the input.
pub fn error_text(ui: &mut egui::Ui, errors: &ValidationErrorMap, field: &str) {
    if let Some(message) = field_error(errors, field) {
        ui.colored_label(ERROR_COLOR, message);
    }
}

pub fn input(
    ui: &mut egui::Ui,
    label: &str,
    edit: egui::TextEdit<'_>,
    errors: &ValidationErrorMap,
    field: &str,
) {
    ui.label(label);
    ui.add(edit.desired_width(f32::INFINITY));
    error_text(ui, errors, field);
}

pub fn number(
    ui: &mut egui::Ui,
    label: &str,
    value: &mut u32,
    range: RangeInclusive<u32>,
    errors: &ValidationErrorMap,
    field: &str,
) {
    ui.horizontal(|ui| {
        ui.label(label);
        ui.add(egui::DragValue::new(value).range(range));
    });
    error_text(ui, errors, field);
}

pub fn select<V: Clone + PartialEq>(
    ui: &mut egui::Ui,
    label: &str,
    control: &Select<V>,
    value: &mut Option<V>,
    errors: &ValidationErrorMap,
    field: &str,
) {
    ui.label(label);
    let selected = control.selected_label(value.as_ref()).to_owned();
    egui::ComboBox::from_id_salt(field)
        .selected_text(selected)
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            if control.options().is_empty() {
                ui.weak("No options available");
            }
            for option in control.options() {
                ui.selectable_value(value, Some(option.value.clone()), option.label.as_str());
            }
        });
    error_text(ui, errors, field);
}

enum Clicked<V> {
    Surface,
    Option(V),
    RemoveChip(V),
}

/// Chips for the selection plus a toggle; the option list shows while open.
/// Only one click target is taken per frame.
pub fn multi_select<V: Clone + PartialEq>(
    ui: &mut egui::Ui,
    label: &str,
    control: &mut MultiSelect<V>,
    selection: &mut Vec<V>,
) {
    ui.label(label);
    let mut clicked = None;

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal_wrapped(|ui| {
            let chips = control.chips(selection);
            if chips.is_empty() {
                ui.weak(control.placeholder());
            }
            for chip in chips {
                ui.label(chip.label.as_str());
                if ui.small_button("x").on_hover_text("Remove").clicked() {
                    clicked = Some(Clicked::RemoveChip(chip.value.clone()));
                }
            }
            let toggle = if control.is_open() { "Done" } else { "Choose" };
            if ui.small_button(toggle).clicked() && clicked.is_none() {
                clicked = Some(Clicked::Surface);
            }
        });
    });

    if control.is_open() {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            egui::ScrollArea::vertical()
                .id_salt(label)
                .max_height(160.0)
                .show(ui, |ui| {
                    if control.options().is_empty() {
                        ui.weak("No options available");
                    }
                    for option in control.options() {
                        let selected = control.is_selected(&option.value, selection);
                        if ui
                            .selectable_label(selected, option.label.as_str())
                            .clicked()
                        {
                            clicked = Some(Clicked::Option(option.value.clone()));
                        }
                    }
                });
        });
    }

    match clicked {
        Some(Clicked::Surface) => control.click(MultiSelectClick::Surface, selection),
        Some(Clicked::Option(value)) => control.click(MultiSelectClick::Option(&value), selection),
        Some(Clicked::RemoveChip(value)) => {
            control.click(MultiSelectClick::RemoveChip(&value), selection)
        }
        None => {}
    }
}

/// File picker row. `current` names the file already stored on the server.
pub fn file_upload(
    ui: &mut egui::Ui,
    label: &str,
    control: &mut FileUpload,
    current: Option<&str>,
    notices: &mut Vec<UiError>,
) {
    ui.label(label);
    ui.horizontal(|ui| {
        if ui.button("Choose file...").clicked() {
            let accept = control.accept();
            let mut dialog = rfd::FileDialog::new();
            if !accept.extensions().is_empty() {
                dialog = dialog.add_filter(accept.to_string(), accept.extensions());
            }
            if let Some(path) = dialog.pick_file() {
                if let Err(err) = control.choose_path(&path) {
                    tracing::warn!("file selection rejected: {err:#}");
                    notices.push(UiError::from_message(
                        UiErrorContext::FileSelection,
                        format!("{err:#}"),
                    ));
                }
            }
        }

        let chosen = control.file_name().map(str::to_owned);
        match chosen {
            Some(name) => {
                ui.label(name);
                if ui.small_button("Clear").clicked() {
                    control.clear();
                }
            }
            None => {
                ui.weak(current.unwrap_or("No file chosen"));
            }
        }
    });
}
