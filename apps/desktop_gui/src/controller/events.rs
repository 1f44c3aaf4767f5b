//! Backend-to-UI events and the shell-level errors shown in the status bar.

use admin_core::Outcome;

pub enum UiEvent {
    Outcome(Outcome),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    CommandQueue,
    FileSelection,
}

impl UiErrorContext {
    pub fn label(self) -> &'static str {
        match self {
            UiErrorContext::BackendStartup => "Backend",
            UiErrorContext::CommandQueue => "Request",
            UiErrorContext::FileSelection => "File",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_ascii_lowercase();
        let category = if lower.contains("disconnected")
            || lower.contains("queue is full")
            || lower.contains("startup failure")
            || lower.contains("unavailable")
        {
            UiErrorCategory::Transport
        } else if lower.contains("not an accepted")
            || lower.contains("invalid")
            || lower.contains("missing")
        {
            UiErrorCategory::Validation
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// One line for the status bar.
    pub fn status_line(&self) -> String {
        format!("{} error: {}", self.context.label(), self.message)
    }
}
