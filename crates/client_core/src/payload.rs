//! Submission bodies: plain JSON or multipart form data.

use reqwest::multipart::{Form, Part};
use serde_json::Value;

use crate::error::ClientError;

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Multipart(MultipartPayload),
}

impl Payload {
    pub fn is_multipart(&self) -> bool {
        matches!(self, Payload::Multipart(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAttachment {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartValue {
    Text(String),
    File(FileAttachment),
}

/// Ordered multipart fields. Keys may repeat (`ids[]`), so this is a list
/// rather than a map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartPayload {
    parts: Vec<(String, PartValue)>,
}

impl MultipartPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts
            .push((name.into(), PartValue::Text(value.into())));
        self
    }

    /// Appends one `name` part per value, in order.
    pub fn repeated<I, T>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        for value in values {
            self.parts
                .push((name.to_string(), PartValue::Text(value.to_string())));
        }
        self
    }

    pub fn file(mut self, name: impl Into<String>, attachment: Option<&FileAttachment>) -> Self {
        if let Some(attachment) = attachment {
            self.parts
                .push((name.into(), PartValue::File(attachment.clone())));
        }
        self
    }

    pub fn parts(&self) -> &[(String, PartValue)] {
        &self.parts
    }

    pub fn texts(&self, name: &str) -> Vec<&str> {
        self.parts
            .iter()
            .filter(|(key, _)| key == name)
            .filter_map(|(_, value)| match value {
                PartValue::Text(text) => Some(text.as_str()),
                PartValue::File(_) => None,
            })
            .collect()
    }

    pub fn first_text(&self, name: &str) -> Option<&str> {
        self.texts(name).into_iter().next()
    }

    pub fn file_part(&self, name: &str) -> Option<&FileAttachment> {
        self.parts.iter().find_map(|(key, value)| match value {
            PartValue::File(file) if key == name => Some(file),
            _ => None,
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.parts.iter().any(|(key, _)| key == name)
    }

    pub fn into_form(self) -> Result<Form, ClientError> {
        let mut form = Form::new();
        for (name, value) in self.parts {
            form = match value {
                PartValue::Text(text) => form.text(name, text),
                PartValue::File(file) => {
                    let part = Part::bytes(file.bytes)
                        .file_name(file.file_name.clone())
                        .mime_str(&file.mime_type)
                        .map_err(|err| ClientError::Attachment {
                            file_name: file.file_name,
                            reason: err.to_string(),
                        })?;
                    form.part(name, part)
                }
            };
        }
        Ok(form)
    }
}
