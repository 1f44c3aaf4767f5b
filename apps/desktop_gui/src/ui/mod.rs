//! UI layer for the admin desktop app: app shell, screen panels, forms and controls.

pub mod app;
pub mod forms;
pub mod panels;
pub mod widgets;

pub use app::AdminApp;
