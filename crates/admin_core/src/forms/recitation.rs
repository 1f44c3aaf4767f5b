use client_core::{Payload, Resource};
use shared::{
    catalog::{self, QURAN_PART_COUNT, RECITATION_PAGE_COUNT},
    domain::{Course, CourseId, Evaluation, Lesson, LessonId, Recitation, Student, StudentId},
    error::ValidationErrorMap,
};

use super::{options_from, require_some, EntityForm};
use crate::{
    entity::Entity,
    lookup::ReferenceData,
    widgets::{MultiSelect, Select},
};

pub struct RecitationForm {
    pub draft: Recitation,
    pub courses: Select<CourseId>,
    pub lessons: Select<LessonId>,
    pub students: Select<StudentId>,
    pub evaluation: Select<Evaluation>,
    pub pages: MultiSelect<u32>,
}

impl RecitationForm {
    fn with_draft(draft: Recitation) -> Self {
        Self {
            draft,
            courses: Select::new(Vec::new(), "Select course"),
            lessons: Select::new(Vec::new(), "Select lesson"),
            students: Select::new(Vec::new(), "Select student"),
            evaluation: Select::new(catalog::evaluations(), "Select evaluation"),
            pages: MultiSelect::new(catalog::recitation_pages(), "Select pages"),
        }
    }
}

impl EntityForm for RecitationForm {
    type Record = Recitation;

    fn blank() -> Self {
        Self::with_draft(Recitation::default())
    }

    fn edit(record: &Recitation) -> Self {
        Self::with_draft(record.clone())
    }

    fn record_id(&self) -> Option<i64> {
        self.draft.id()
    }

    fn lookups() -> &'static [Resource] {
        &[Resource::Courses, Resource::Lessons, Resource::Students]
    }

    fn apply_reference_data(&mut self, data: &ReferenceData) {
        self.courses.set_options(options_from(
            data.records::<Course>(Resource::Courses),
            |course| course.id,
            |course| course.title.clone(),
        ));
        self.lessons.set_options(options_from(
            data.records::<Lesson>(Resource::Lessons),
            |lesson| lesson.id,
            |lesson| lesson.lesson_title.clone(),
        ));
        self.students.set_options(options_from(
            data.records::<Student>(Resource::Students),
            |student| student.id,
            |student| student.name.clone(),
        ));
    }

    fn validate(&self) -> ValidationErrorMap {
        let draft = &self.draft;
        let mut errors = ValidationErrorMap::new();
        require_some(&mut errors, "course_id", draft.course_id);
        require_some(&mut errors, "lesson_id", draft.lesson_id);
        require_some(&mut errors, "student_id", draft.student_id);
        require_some(&mut errors, "recitation_evaluation", draft.recitation_evaluation);
        if !(1..=QURAN_PART_COUNT).contains(&draft.current_juz) {
            errors.push(
                "current_juz",
                format!("The current juz must be between 1 and {QURAN_PART_COUNT}."),
            );
        }
        if !(1..=RECITATION_PAGE_COUNT).contains(&draft.current_juz_page) {
            errors.push(
                "current_juz_page",
                format!("The current juz page must be between 1 and {RECITATION_PAGE_COUNT}."),
            );
        }
        errors
    }

    fn to_payload(&self) -> Result<Payload, serde_json::Error> {
        Ok(Payload::Json(serde_json::to_value(&self.draft)?))
    }
}
