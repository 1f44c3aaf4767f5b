use client_core::{MultipartPayload, Payload};
use shared::{catalog, domain::Instructor, error::ValidationErrorMap};

use super::{check_passwords, require, EntityForm};
use crate::{
    entity::Entity,
    widgets::{Accept, FileUpload, MultiSelect},
};

pub struct InstructorForm {
    pub draft: Instructor,
    pub image: FileUpload,
    pub qualifications: MultiSelect<String>,
    pub memorized_parts: MultiSelect<String>,
    pub passed_parts: MultiSelect<String>,
}

impl InstructorForm {
    fn with_draft(draft: Instructor) -> Self {
        Self {
            draft,
            image: FileUpload::new(Accept::Images),
            qualifications: MultiSelect::new(
                catalog::religious_qualifications(),
                "Select qualifications",
            ),
            memorized_parts: MultiSelect::new(catalog::quran_parts(), "Select memorized parts"),
            passed_parts: MultiSelect::new(catalog::quran_parts(), "Select passed parts"),
        }
    }
}

impl EntityForm for InstructorForm {
    type Record = Instructor;

    fn blank() -> Self {
        Self::with_draft(Instructor::default())
    }

    fn edit(record: &Instructor) -> Self {
        Self::with_draft(Instructor {
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
        require(&mut errors, "address", &draft.address);
        check_passwords(
            &mut errors,
            &draft.password,
            &draft.password_confirmation,
            !self.is_edit(),
        );
        errors
    }

    /// Multipart with one `field[]` part per list entry.
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
            .repeated("religious_qualifications[]", &draft.religious_qualifications)
            .repeated("quran_memorized_parts[]", &draft.quran_memorized_parts)
            .repeated("quran_passed_parts[]", &draft.quran_passed_parts)
            .file("instructor_img", self.image.file());
        Ok(Payload::Multipart(form))
    }
}
