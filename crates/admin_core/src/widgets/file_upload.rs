use std::{fmt, fs, path::Path};

use anyhow::{Context, Result};
use client_core::FileAttachment;
use mime_guess::mime;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accept {
    Any,
    Images,
    Pdf,
}

impl Accept {
    pub fn allows(self, mime_type: &mime::Mime) -> bool {
        match self {
            Accept::Any => true,
            Accept::Images => mime_type.type_() == mime::IMAGE,
            Accept::Pdf => *mime_type == mime::APPLICATION_PDF,
        }
    }

    /// Extensions offered by a native file dialog for this filter.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Accept::Any => &[],
            Accept::Images => &["png", "jpg", "jpeg", "gif", "webp", "bmp"],
            Accept::Pdf => &["pdf"],
        }
    }
}

impl fmt::Display for Accept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Accept::Any => "any",
            Accept::Images => "image",
            Accept::Pdf => "PDF",
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{file_name} ({mime_type}) is not an accepted {accept} file")]
pub struct RejectedFile {
    pub file_name: String,
    pub mime_type: String,
    pub accept: Accept,
}

/// Holds at most one chosen file for a form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    accept: Accept,
    file: Option<FileAttachment>,
}

impl FileUpload {
    pub fn new(accept: Accept) -> Self {
        Self { accept, file: None }
    }

    pub fn accept(&self) -> Accept {
        self.accept
    }

    pub fn file(&self) -> Option<&FileAttachment> {
        self.file.as_ref()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file.as_ref().map(|file| file.file_name.as_str())
    }

    /// Replaces the current file. A rejected file leaves the previous one in place.
    pub fn choose(&mut self, file_name: impl Into<String>, bytes: Vec<u8>) -> Result<(), RejectedFile> {
        let file_name = file_name.into();
        let mime_type = mime_guess::from_path(&file_name).first_or_octet_stream();
        if !self.accept.allows(&mime_type) {
            return Err(RejectedFile {
                file_name,
                mime_type: mime_type.to_string(),
                accept: self.accept,
            });
        }
        self.file = Some(FileAttachment {
            file_name,
            mime_type: mime_type.to_string(),
            bytes,
        });
        Ok(())
    }

    pub fn choose_path(&mut self, path: &Path) -> Result<()> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .with_context(|| format!("'{}' has no file name", path.display()))?;
        let bytes =
            fs::read(path).with_context(|| format!("failed to read '{}'", path.display()))?;
        self.choose(file_name, bytes)?;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.file = None;
    }
}

#[cfg(test)]
#[path = "tests/file_upload_tests.rs"]
mod tests;
