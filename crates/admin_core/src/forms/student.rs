use client_core::{MultipartPayload, Payload};
use shared::{catalog, domain::Student, error::ValidationErrorMap};

use super::{check_passwords, require, EntityForm};
use crate::{
    entity::Entity,
    widgets::{Accept, FileUpload, MultiSelect},
};

pub struct StudentForm {
    pub draft: Student,
    pub image: FileUpload,
    pub memorized_parts: MultiSelect<String>,
    pub passed_parts: MultiSelect<String>,
}

impl StudentForm {
    fn with_draft(draft: Student) -> Self {
        Self {
            draft,
            image: FileUpload::new(Accept::Images),
            memorized_parts: MultiSelect::new(catalog::quran_parts(), "Select memorized parts"),
            passed_parts: MultiSelect::new(catalog::quran_parts(), "Select passed parts"),
        }
    }
}

impl EntityForm for StudentForm {
    type Record = Student;

    fn blank() -> Self {
        Self::with_draft(Student::default())
    }

    fn edit(record: &Student) -> Self {
        Self::with_draft(Student {
            password: String::new(),
            password_confirmation: String::new(),
            ..record.clone()
        })
    }

    fn record_id(&self) -> Option<i64> {
        self.draft.id()
    }

    fn validate(&self) -> ValidationErrorMap {
        let draft = &self.draft;
        let mut errors = ValidationErrorMap::new();
        require(&mut errors, "name", &draft.name);
        require(&mut errors, "email", &draft.email);
        require(&mut errors, "phone_number", &draft.phone_number);
        require(&mut errors, "birth_date", &draft.birth_date);
        require(&mut errors, "enroll_date", &draft.enroll_date);
        require(&mut errors, "address", &draft.address);
        check_passwords(
            &mut errors,
            &draft.password,
            &draft.password_confirmation,
            !self.is_edit(),
        );
        errors
    }

    /// Multipart; the part lists travel as JSON-encoded arrays in one field each.
    fn to_payload(&self) -> Result<Payload, serde_json::Error> {
        let draft = &self.draft;
        let mut form = MultipartPayload::new()
            .text("name", &draft.name)
            .text("email", &draft.email);
        if !draft.password.is_empty() {
            form = form
                .text("password", &draft.password)
                .text("password_confirmation", &draft.password_confirmation);
        }
        let form = form
            .text("certificate", &draft.certificate)
            .text("birth_date", &draft.birth_date)
            .text("phone_number", &draft.phone_number)
            .text("address", &draft.address)
            .text("enroll_date", &draft.enroll_date)
            .text("notes", &draft.notes)
            .file("student_img", self.image.file())
            .text(
                "quran_memorized_parts",
                serde_json::to_string(&draft.quran_memorized_parts)?,
            )
            .text(
                "quran_passed_parts",
                serde_json::to_string(&draft.quran_passed_parts)?,
            );
        Ok(Payload::Multipart(form))
    }
}
