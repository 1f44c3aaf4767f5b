//! One form per entity, all behind the [`EntityForm`] contract: own a draft,
//! declare reference lookups, check it locally, encode it for the server.

mod course;
mod instructor;
mod recitation;
mod student;

use client_core::{Payload, Resource};
use shared::{catalog::SelectOption, error::ValidationErrorMap};

use crate::{entity::Entity, lookup::ReferenceData};

pub use course::CourseForm;
pub use instructor::InstructorForm;
pub use recitation::RecitationForm;
pub use student::StudentForm;

pub const PASSWORD_MISMATCH: &str = "Passwords do not match";

pub trait EntityForm: Send + 'static {
    type Record: Entity;

    /// A form for a new record.
    fn blank() -> Self;

    /// A form whose draft is a copy of `record`.
    fn edit(record: &Self::Record) -> Self;

    fn record_id(&self) -> Option<i64>;

    fn is_edit(&self) -> bool {
        self.record_id().is_some()
    }

    /// Resources whose lists feed this form's pickers.
    fn lookups() -> &'static [Resource] {
        &[]
    }

    fn apply_reference_data(&mut self, _data: &ReferenceData) {}

    /// Synchronous pre-submit check. An empty map means the draft may be sent.
    fn validate(&self) -> ValidationErrorMap;

    fn to_payload(&self) -> Result<Payload, serde_json::Error>;
}

pub(crate) fn require(errors: &mut ValidationErrorMap, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(field, required_message(field));
    }
}

pub(crate) fn require_some<T>(errors: &mut ValidationErrorMap, field: &str, value: Option<T>) {
    if value.is_none() {
        errors.push(field, required_message(field));
    }
}

fn required_message(field: &str) -> String {
    format!("The {} field is required.", field.replace('_', " "))
}

/// Passwords are mandatory for new accounts; when one is typed it must match
/// its confirmation.
pub(crate) fn check_passwords(
    errors: &mut ValidationErrorMap,
    password: &str,
    confirmation: &str,
    creating: bool,
) {
    if creating {
        require(errors, "password", password);
    }
    if !password.is_empty() && password != confirmation {
        errors.push("password_confirmation", PASSWORD_MISMATCH);
    }
}

/// Options built from looked-up records; records without an id are skipped.
pub(crate) fn options_from<T, V>(
    records: Vec<T>,
    value: impl Fn(&T) -> Option<V>,
    label: impl Fn(&T) -> String,
) -> Vec<SelectOption<V>> {
    records
        .iter()
        .filter_map(|record| value(record).map(|value| SelectOption::new(value, label(record))))
        .collect()
}

#[cfg(test)]
#[path = "tests/forms_tests.rs"]
mod tests;
