//! One entity screen: search bar, record table and the create/edit modal.

use admin_core::{
    screen::REFERENCE_DATA_FIELD,
    Command, Entity, EntityScreen,
};
use eframe::egui;

use super::{
    forms::FormView,
    widgets::{error_text, ERROR_COLOR},
};
use crate::controller::events::UiError;

/// Draws the screen and returns the commands its intents produced.
pub fn entity_panel<F: FormView>(
    ctx: &egui::Context,
    ui: &mut egui::Ui,
    screen: &mut EntityScreen<F>,
    notices: &mut Vec<UiError>,
) -> Vec<Command> {
    let label = <F::Record as Entity>::LABEL;
    let mut commands = Vec::new();

    ui.heading(format!("{label}s"));
    ui.horizontal(|ui| {
        let mut search = screen.search().to_string();
        let response = ui.add(
            egui::TextEdit::singleline(&mut search)
                .hint_text("Search")
                .desired_width(260.0),
        );
        if response.changed() {
            screen.set_search(search);
        }
        if ui.button(format!("Add New {label}")).clicked() {
            commands.extend(screen.open_create());
        }
        if screen.is_loading() {
            ui.spinner();
        }
    });
    ui.separator();

    let (edit, delete) = record_table::<F>(ui, screen);
    if let Some(id) = edit {
        commands.extend(screen.open_edit(id));
    }
    if let Some(id) = delete {
        commands.extend(screen.delete(id, confirm_delete::<F>));
    }

    commands.extend(form_modal(ctx, screen, notices));
    commands
}

/// Returns the ids whose Edit or Delete button was clicked this frame.
fn record_table<F: FormView>(
    ui: &mut egui::Ui,
    screen: &EntityScreen<F>,
) -> (Option<i64>, Option<i64>) {
    let mut edit = None;
    let mut delete = None;
    let columns = F::columns();

    egui::ScrollArea::vertical().show(ui, |ui| {
        egui::Grid::new(("records", <F::Record as Entity>::LABEL))
            .striped(true)
            .num_columns(columns.len() + 1)
            .spacing([16.0, 6.0])
            .show(ui, |ui| {
                for column in columns {
                    ui.strong(*column);
                }
                ui.strong("Actions");
                ui.end_row();

                for record in screen.visible_records() {
                    for cell in F::row(record) {
                        ui.label(cell);
                    }
                    let id = record.id();
                    ui.horizontal(|ui| {
                        if ui.add_enabled(id.is_some(), egui::Button::new("Edit")).clicked() {
                            edit = id;
                        }
                        let delete_button = egui::Button::new(
                            egui::RichText::new("Delete").color(ERROR_COLOR),
                        );
                        if ui.add_enabled(id.is_some(), delete_button).clicked() {
                            delete = id;
                        }
                    });
                    ui.end_row();
                }
            });

        if !screen.is_loading() && screen.visible_records().is_empty() {
            ui.weak("No records");
        }
    });

    (edit, delete)
}

fn confirm_delete<F: FormView>(record: &F::Record) -> bool {
    let label = <F::Record as Entity>::LABEL;
    let name = F::row(record).into_iter().next().unwrap_or_default();
    let answer = rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Warning)
        .set_title(format!("Delete {label}"))
        .set_description(format!(
            "Delete {} \"{name}\"? This cannot be undone.",
            label.to_lowercase()
        ))
        .set_buttons(rfd::MessageButtons::YesNo)
        .show();
    answer == rfd::MessageDialogResult::Yes
}

/// The modal for the open form, if any. Clicking the backdrop or pressing
/// escape cancels it.
fn form_modal<F: FormView>(
    ctx: &egui::Context,
    screen: &mut EntityScreen<F>,
    notices: &mut Vec<UiError>,
) -> Option<Command> {
    let modal = screen.modal_mut()?;
    let title = modal.title();
    let errors = modal.errors().clone();
    let saving = modal.is_saving();
    let lookups_pending = modal.lookups_pending();
    let mut submit = false;
    let mut cancel = false;

    let response = egui::Modal::new(egui::Id::new(("entity_form", <F::Record as Entity>::LABEL)))
        .show(ctx, |ui| {
            ui.set_width(520.0);
            ui.heading(title);
            if lookups_pending {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading reference data...");
                });
            }
            error_text(ui, &errors, REFERENCE_DATA_FIELD);

            egui::ScrollArea::vertical()
                .max_height(560.0)
                .show(ui, |ui| {
                    modal.form_mut().show(ui, &errors, notices);
                });

            ui.separator();
            ui.horizontal(|ui| {
                let save_label = if saving { "Saving..." } else { "Save" };
                if ui
                    .add_enabled(!saving, egui::Button::new(save_label))
                    .clicked()
                {
                    submit = true;
                }
                if ui.button("Cancel").clicked() {
                    cancel = true;
                }
                if saving {
                    ui.spinner();
                }
            });
        });

    if cancel || response.should_close() {
        screen.cancel();
        return None;
    }
    if submit {
        return screen.submit();
    }
    None
}
