//! Per-entity table columns and form layouts.

use admin_core::{CourseForm, EntityForm, InstructorForm, RecitationForm, StudentForm};
use eframe::egui::{self, TextEdit};
use shared::{
    catalog::{QURAN_PART_COUNT, RECITATION_PAGE_COUNT},
    domain::{Course, Instructor, Recitation, Student},
    error::ValidationErrorMap,
};

use super::widgets::{file_upload, input, multi_select, number, select};
use crate::controller::events::UiError;

const DATE_HINT: &str = "YYYY-MM-DD";

/// How one entity form is drawn inside the shell.
pub trait FormView: EntityForm {
    fn columns() -> &'static [&'static str];

    /// Table cells for one record; the first cell also names the record in
    /// the delete prompt.
    fn row(record: &Self::Record) -> Vec<String>;

    fn show(&mut self, ui: &mut egui::Ui, errors: &ValidationErrorMap, notices: &mut Vec<UiError>);
}

fn password_fields(
    ui: &mut egui::Ui,
    password: &mut String,
    confirmation: &mut String,
    editing: bool,
    errors: &ValidationErrorMap,
) {
    let hint = if editing {
        "Leave blank to keep the current password"
    } else {
        ""
    };
    input(
        ui,
        "Password",
        TextEdit::singleline(password).password(true).hint_text(hint),
        errors,
        "password",
    );
    input(
        ui,
        "Confirm password",
        TextEdit::singleline(confirmation).password(true),
        errors,
        "password_confirmation",
    );
}

impl FormView for StudentForm {
    fn columns() -> &'static [&'static str] {
        &["Name", "Email", "Phone", "Enrolled"]
    }

    fn row(student: &Student) -> Vec<String> {
        vec![
            student.name.clone(),
            student.email.clone(),
            student.phone_number.clone(),
            student.enroll_date.clone(),
        ]
    }

    fn show(&mut self, ui: &mut egui::Ui, errors: &ValidationErrorMap, notices: &mut Vec<UiError>) {
        let editing = self.is_edit();
        let draft = &mut self.draft;
        input(ui, "Name", TextEdit::singleline(&mut draft.name), errors, "name");
        input(ui, "Email", TextEdit::singleline(&mut draft.email), errors, "email");
        password_fields(
            ui,
            &mut draft.password,
            &mut draft.password_confirmation,
            editing,
            errors,
        );
        input(
            ui,
            "Certificate",
            TextEdit::singleline(&mut draft.certificate),
            errors,
            "certificate",
        );
        input(
            ui,
            "Birth date",
            TextEdit::singleline(&mut draft.birth_date).hint_text(DATE_HINT),
            errors,
            "birth_date",
        );
        input(
            ui,
            "Phone number",
            TextEdit::singleline(&mut draft.phone_number),
            errors,
            "phone_number",
        );
        input(ui, "Address", TextEdit::singleline(&mut draft.address), errors, "address");
        input(
            ui,
            "Enroll date",
            TextEdit::singleline(&mut draft.enroll_date).hint_text(DATE_HINT),
            errors,
            "enroll_date",
        );
        input(ui, "Notes", TextEdit::multiline(&mut draft.notes), errors, "notes");
        file_upload(
            ui,
            "Photo",
            &mut self.image,
            draft.student_img.as_deref(),
            notices,
        );
        multi_select(
            ui,
            "Memorized parts",
            &mut self.memorized_parts,
            &mut draft.quran_memorized_parts,
        );
        multi_select(
            ui,
            "Passed parts",
            &mut self.passed_parts,
            &mut draft.quran_passed_parts,
        );
    }
}

impl FormView for InstructorForm {
    fn columns() -> &'static [&'static str] {
        &["Name", "Email", "Phone", "Qualifications"]
    }

    fn row(instructor: &Instructor) -> Vec<String> {
        vec![
            instructor.name.clone(),
            instructor.email.clone(),
            instructor.phone_number.clone(),
            instructor.religious_qualifications.join(", "),
        ]
    }

    fn show(&mut self, ui: &mut egui::Ui, errors: &ValidationErrorMap, notices: &mut Vec<UiError>) {
        let editing = self.is_edit();
        let draft = &mut self.draft;
        input(ui, "Name", TextEdit::singleline(&mut draft.name), errors, "name");
        input(ui, "Email", TextEdit::singleline(&mut draft.email), errors, "email");
        password_fields(
            ui,
            &mut draft.password,
            &mut draft.password_confirmation,
            editing,
            errors,
        );
        input(
            ui,
            "Certificate",
            TextEdit::singleline(&mut draft.certificate),
            errors,
            "certificate",
        );
        input(
            ui,
            "Birth date",
            TextEdit::singleline(&mut draft.birth_date).hint_text(DATE_HINT),
            errors,
            "birth_date",
        );
        input(
            ui,
            "Phone number",
            TextEdit::singleline(&mut draft.phone_number),
            errors,
            "phone_number",
        );
        input(ui, "Address", TextEdit::singleline(&mut draft.address), errors, "address");
        multi_select(
            ui,
            "Religious qualifications",
            &mut self.qualifications,
            &mut draft.religious_qualifications,
        );
        multi_select(
            ui,
            "Memorized parts",
            &mut self.memorized_parts,
            &mut draft.quran_memorized_parts,
        );
        multi_select(
            ui,
            "Passed parts",
            &mut self.passed_parts,
            &mut draft.quran_passed_parts,
        );
        file_upload(
            ui,
            "Photo",
            &mut self.image,
            draft.instructor_img.as_deref(),
            notices,
        );
    }
}

impl FormView for CourseForm {
    fn columns() -> &'static [&'static str] {
        &["Title", "Type", "Level", "Starts", "Students"]
    }

    fn row(course: &Course) -> Vec<String> {
        vec![
            course.title.clone(),
            course.kind.label().to_string(),
            course.level.clone(),
            course.start_date.clone(),
            course.students.len().to_string(),
        ]
    }

    fn show(&mut self, ui: &mut egui::Ui, errors: &ValidationErrorMap, notices: &mut Vec<UiError>) {
        let draft = &mut self.draft;
        let mut kind = Some(draft.kind);
        select(ui, "Course type", &self.kind, &mut kind, errors, "type");
        if let Some(kind) = kind {
            draft.kind = kind;
        }
        input(ui, "Title", TextEdit::singleline(&mut draft.title), errors, "title");
        input(
            ui,
            "Description",
            TextEdit::multiline(&mut draft.description),
            errors,
            "description",
        );
        input(
            ui,
            "Start date",
            TextEdit::singleline(&mut draft.start_date).hint_text(DATE_HINT),
            errors,
            "start_date",
        );
        input(
            ui,
            "Expected end date",
            TextEdit::singleline(&mut draft.expected_end_date).hint_text(DATE_HINT),
            errors,
            "expected_end_date",
        );
        input(
            ui,
            "Start time",
            TextEdit::singleline(&mut draft.course_start_time).hint_text("HH:MM"),
            errors,
            "course_start_time",
        );
        input(ui, "Level", TextEdit::singleline(&mut draft.level), errors, "level");
        input(
            ui,
            "File name",
            TextEdit::singleline(&mut draft.file_name),
            errors,
            "file_name",
        );
        file_upload(ui, "Image", &mut self.image, draft.image.as_deref(), notices);
        file_upload(
            ui,
            "Syllabus (PDF)",
            &mut self.pdf,
            draft.file_path.as_deref(),
            notices,
        );
        multi_select(ui, "Students", &mut self.students, &mut draft.students);
        multi_select(ui, "Instructors", &mut self.instructors, &mut draft.instructors);
    }
}

impl FormView for RecitationForm {
    fn columns() -> &'static [&'static str] {
        &["Student", "Course", "Lesson", "Evaluation", "Juz / page"]
    }

    fn row(recitation: &Recitation) -> Vec<String> {
        let or_dash = |value: Option<String>| value.unwrap_or_else(|| "-".to_string());
        vec![
            or_dash(recitation.student_id.map(|id| id.to_string())),
            or_dash(recitation.course_id.map(|id| id.to_string())),
            or_dash(recitation.lesson_id.map(|id| id.to_string())),
            recitation
                .recitation_evaluation
                .map(|evaluation| evaluation.label().to_string())
                .unwrap_or_default(),
            format!("{} / {}", recitation.current_juz, recitation.current_juz_page),
        ]
    }

    fn show(&mut self, ui: &mut egui::Ui, errors: &ValidationErrorMap, _notices: &mut Vec<UiError>) {
        let draft = &mut self.draft;
        select(ui, "Course", &self.courses, &mut draft.course_id, errors, "course_id");
        select(ui, "Lesson", &self.lessons, &mut draft.lesson_id, errors, "lesson_id");
        select(ui, "Student", &self.students, &mut draft.student_id, errors, "student_id");
        multi_select(
            ui,
            "Pages recited",
            &mut self.pages,
            &mut draft.recitation_per_page,
        );
        select(
            ui,
            "Evaluation",
            &self.evaluation,
            &mut draft.recitation_evaluation,
            errors,
            "recitation_evaluation",
        );
        number(
            ui,
            "Current juz",
            &mut draft.current_juz,
            1..=QURAN_PART_COUNT,
            errors,
            "current_juz",
        );
        number(
            ui,
            "Current juz page",
            &mut draft.current_juz_page,
            1..=RECITATION_PAGE_COUNT,
            errors,
            "current_juz_page",
        );
    }
}
