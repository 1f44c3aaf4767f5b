use client_core::{MultipartPayload, Payload, Resource};
use shared::{
    catalog,
    domain::{Course, CourseType, Instructor, InstructorId, Student, StudentId},
    error::ValidationErrorMap,
};

use super::{options_from, require, EntityForm};
use crate::{
    entity::Entity,
    lookup::ReferenceData,
    widgets::{Accept, FileUpload, MultiSelect, Select},
};

pub struct CourseForm {
    pub draft: Course,
    pub kind: Select<CourseType>,
    pub image: FileUpload,
    pub pdf: FileUpload,
    pub students: MultiSelect<StudentId>,
    pub instructors: MultiSelect<InstructorId>,
}

impl CourseForm {
    fn with_draft(draft: Course) -> Self {
        Self {
            draft,
            kind: Select::new(catalog::course_types(), "Select course type"),
            image: FileUpload::new(Accept::Images),
            pdf: FileUpload::new(Accept::Pdf),
            students: MultiSelect::new(Vec::new(), "Select students"),
            instructors: MultiSelect::new(Vec::new(), "Select instructors"),
        }
    }
}

impl EntityForm for CourseForm {
    type Record = Course;

    fn blank() -> Self {
        Self::with_draft(Course::default())
    }

    fn edit(record: &Course) -> Self {
        Self::with_draft(record.clone())
    }

    fn record_id(&self) -> Option<i64> {
        self.draft.id()
    }

    fn lookups() -> &'static [Resource] {
        &[Resource::Students, Resource::Instructors]
    }

    fn apply_reference_data(&mut self, data: &ReferenceData) {
        self.students.set_options(options_from(
            data.records::<Student>(Resource::Students),
            |student| student.id,
            |student| student.name.clone(),
        ));
        self.instructors.set_options(options_from(
            data.records::<Instructor>(Resource::Instructors),
            |instructor| instructor.id,
            |instructor| instructor.name.clone(),
        ));
    }

    fn validate(&self) -> ValidationErrorMap {
        let draft = &self.draft;
        let mut errors = ValidationErrorMap::new();
        require(&mut errors, "title", &draft.title);
        require(&mut errors, "level", &draft.level);
        require(&mut errors, "course_start_time", &draft.course_start_time);
        require(&mut errors, "start_date", &draft.start_date);
        require(&mut errors, "expected_end_date", &draft.expected_end_date);
        require(&mut errors, "description", &draft.description);
        require(&mut errors, "file_name", &draft.file_name);
        errors
    }

    /// Multipart; enrolled people go as repeated `course_*_id[]` parts.
    fn to_payload(&self) -> Result<Payload, serde_json::Error> {
        let draft = &self.draft;
        let form = MultipartPayload::new()
            .text("type", draft.kind.wire_name())
            .text("title", &draft.title)
            .text("description", &draft.description)
            .text("start_date", &draft.start_date)
            .text("expected_end_date", &draft.expected_end_date)
            .text("course_start_time", &draft.course_start_time)
            .text("level", &draft.level)
            .text("file_name", draft.file_name.trim())
            .file("image", self.image.file())
            .file("file_path", self.pdf.file())
            .repeated("course_student_id[]", &draft.students)
            .repeated("course_instructor_id[]", &draft.instructors);
        Ok(Payload::Multipart(form))
    }
}
