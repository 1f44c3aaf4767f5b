use std::time::Duration;

use admin_core::{
    Command, CourseForm, EntityScreen, InstructorForm, RecitationForm, StudentForm,
};
use client_core::{LookupFailurePolicy, Resource};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use tracing::{error, warn};

use super::{panels::entity_panel, widgets::status_color};
use crate::controller::{
    events::{UiError, UiEvent},
    orchestration::dispatch_backend_command,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Students,
    Instructors,
    Courses,
    Recitations,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Students, Tab::Instructors, Tab::Courses, Tab::Recitations];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Students => "Students",
            Tab::Instructors => "Instructors",
            Tab::Courses => "Courses",
            Tab::Recitations => "Recitations",
        }
    }
}

pub struct AdminApp {
    cmd_tx: Sender<Command>,
    ui_rx: Receiver<UiEvent>,
    tab: Tab,
    students: EntityScreen<StudentForm>,
    instructors: EntityScreen<InstructorForm>,
    courses: EntityScreen<CourseForm>,
    recitations: EntityScreen<RecitationForm>,
    status: Option<UiError>,
}

impl AdminApp {
    /// Builds every screen and queues its first fetch.
    pub fn new(
        cmd_tx: Sender<Command>,
        ui_rx: Receiver<UiEvent>,
        policy: LookupFailurePolicy,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            tab: Tab::Students,
            students: EntityScreen::new(policy),
            instructors: EntityScreen::new(policy),
            courses: EntityScreen::new(policy),
            recitations: EntityScreen::new(policy),
            status: None,
        };
        let mounts = [
            app.students.mount(),
            app.instructors.mount(),
            app.courses.mount(),
            app.recitations.mount(),
        ];
        for command in mounts {
            app.dispatch(command);
        }
        app
    }

    fn dispatch(&mut self, command: Command) {
        if let Err(err) = dispatch_backend_command(&self.cmd_tx, command) {
            error!("{}", err.status_line());
            self.status = Some(err);
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Outcome(outcome) => {
                    let follow_up = match outcome.resource() {
                        Resource::Students => self.students.apply(outcome),
                        Resource::Instructors => self.instructors.apply(outcome),
                        Resource::Courses => self.courses.apply(outcome),
                        Resource::Recitations => self.recitations.apply(outcome),
                        Resource::Lessons => {
                            warn!("dropping outcome for lessons; no screen manages them");
                            None
                        }
                    };
                    if let Some(command) = follow_up {
                        self.dispatch(command);
                    }
                }
                UiEvent::Error(err) => {
                    error!("{}", err.status_line());
                    self.status = Some(err);
                }
            }
        }
    }

    fn show_tabs(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("entity_tabs").show(ctx, |ui| {
            ui.horizontal(|ui| {
                for tab in Tab::ALL {
                    ui.selectable_value(&mut self.tab, tab, tab.label());
                }
            });
        });
    }

    fn show_status(&mut self, ctx: &egui::Context) {
        let Some(status) = &self.status else {
            return;
        };
        let line = status.status_line();
        let color = status_color(status.category());
        let mut dismissed = false;
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(color, line);
                if ui.small_button("Dismiss").clicked() {
                    dismissed = true;
                }
            });
        });
        if dismissed {
            self.status = None;
        }
    }
}

impl eframe::App for AdminApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.show_tabs(ctx);
        self.show_status(ctx);

        let mut notices = Vec::new();
        let commands = egui::CentralPanel::default()
            .show(ctx, |ui| match self.tab {
                Tab::Students => entity_panel(ctx, ui, &mut self.students, &mut notices),
                Tab::Instructors => entity_panel(ctx, ui, &mut self.instructors, &mut notices),
                Tab::Courses => entity_panel(ctx, ui, &mut self.courses, &mut notices),
                Tab::Recitations => entity_panel(ctx, ui, &mut self.recitations, &mut notices),
            })
            .inner;

        for command in commands {
            self.dispatch(command);
        }
        if let Some(notice) = notices.pop() {
            self.status = Some(notice);
        }

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
