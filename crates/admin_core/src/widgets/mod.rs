//! Form controls. Controls hold presentation state only; the values they
//! edit live in the owning form's draft.

pub mod file_upload;
pub mod multi_select;
pub mod select;

use shared::error::ValidationErrorMap;

pub use file_upload::{Accept, FileUpload, RejectedFile};
pub use multi_select::{toggle_selection, MultiSelect, MultiSelectClick};
pub use select::Select;

/// Error text rendered under an input: the first message for that field.
pub fn field_error<'a>(errors: &'a ValidationErrorMap, field: &str) -> Option<&'a str> {
    errors.first(field)
}
