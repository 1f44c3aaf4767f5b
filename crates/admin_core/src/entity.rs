use std::fmt::Debug;

use client_core::Resource;
use serde::de::DeserializeOwned;
use shared::domain::{Course, Instructor, Recitation, Student};

/// A record kind managed by one admin screen.
pub trait Entity: Clone + Debug + DeserializeOwned + Send + 'static {
    const RESOURCE: Resource;
    /// Singular display name ("Student").
    const LABEL: &'static str;

    fn id(&self) -> Option<i64>;

    /// String forms of the fields the search box matches against.
    fn search_fields(&self) -> Vec<String>;
}

/// Case-sensitive substring match over the record's search fields. An empty
/// term matches every record.
pub fn matches_search<E: Entity>(record: &E, term: &str) -> bool {
    term.is_empty()
        || record
            .search_fields()
            .iter()
            .any(|field| field.contains(term))
}

impl Entity for Student {
    const RESOURCE: Resource = Resource::Students;
    const LABEL: &'static str = "Student";

    fn id(&self) -> Option<i64> {
        self.id.map(|id| id.0)
    }

    fn search_fields(&self) -> Vec<String> {
        vec![self.name.clone(), self.email.clone()]
    }
}

impl Entity for Instructor {
    const RESOURCE: Resource = Resource::Instructors;
    const LABEL: &'static str = "Instructor";

    fn id(&self) -> Option<i64> {
        self.id.map(|id| id.0)
    }

    fn search_fields(&self) -> Vec<String> {
        vec![self.name.clone(), self.email.clone()]
    }
}

impl Entity for Course {
    const RESOURCE: Resource = Resource::Courses;
    const LABEL: &'static str = "Course";

    fn id(&self) -> Option<i64> {
        self.id.map(|id| id.0)
    }

    fn search_fields(&self) -> Vec<String> {
        vec![self.title.clone(), self.level.clone()]
    }
}

impl Entity for Recitation {
    const RESOURCE: Resource = Resource::Recitations;
    const LABEL: &'static str = "Recitation";

    fn id(&self) -> Option<i64> {
        self.id.map(|id| id.0)
    }

    fn search_fields(&self) -> Vec<String> {
        self.student_id
            .map(|id| id.to_string())
            .into_iter()
            .chain(self.course_id.map(|id| id.to_string()))
            .collect()
    }
}
