use shared::error::ValidationErrorMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server rejected the submission with per-field messages (HTTP 422).
    #[error("validation failed with status {status}: {} field(s) rejected", fields.len())]
    Validation {
        status: u16,
        message: Option<String>,
        fields: ValidationErrorMap,
    },
    #[error("unexpected status {status} from {url}: {body}")]
    Status {
        status: u16,
        url: String,
        body: String,
    },
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid attachment {file_name}: {reason}")]
    Attachment { file_name: String, reason: String },
}

impl ClientError {
    pub fn validation_fields(&self) -> Option<&ValidationErrorMap> {
        match self {
            ClientError::Validation { fields, .. } => Some(fields),
            _ => None,
        }
    }
}
