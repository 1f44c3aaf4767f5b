//! Entity management for the school admin: a generic CRUD screen reducer,
//! per-entity forms, form controls, and the command runner that connects
//! them to a [`client_core::ResourceApi`].

pub mod commands;
pub mod entity;
pub mod forms;
pub mod lookup;
pub mod screen;
pub mod widgets;

pub use commands::{execute, Command, Outcome};
pub use entity::{matches_search, Entity};
pub use forms::{CourseForm, EntityForm, InstructorForm, RecitationForm, StudentForm};
pub use lookup::{load_reference_data, ReferenceData};
pub use screen::{EntityScreen, FormSession};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
