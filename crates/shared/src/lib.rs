//! Domain records and shared vocabulary for the hifz school admin workspace.

pub mod catalog;
pub mod domain;
pub mod error;
