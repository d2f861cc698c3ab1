//! Document capability and a plain-text implementation

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use crate::core::error::{IoError, Result};

/// Capability contract for anything the container can manage.
///
/// A document is default-constructible (a fresh, empty instance) and can
/// load itself from and persist itself to a path. What the bytes mean is
/// entirely the implementation's business.
pub trait Document: Default {
    /// Replace this document's content with what `path` holds.
    fn read_file(&mut self, path: &str) -> Result<()>;

    /// Persist this document's content to `path`.
    fn write_file(&self, path: &str) -> Result<()>;
}

/// A plain UTF-8 text document
#[derive(Debug, Clone, Default)]
pub struct TextDocument {
    /// Document content
    content: String,
    /// Last time the backing file was read or written
    last_modified: Option<SystemTime>,
}

impl TextDocument {
    /// Create a document with initial content
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            last_modified: None,
        }
    }

    /// Get the document content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replace the content; returns true if it actually changed
    pub fn set_content(&mut self, content: String) -> bool {
        if self.content != content {
            self.content = content;
            true
        } else {
            false
        }
    }

    /// Append a line to the content
    pub fn append_line(&mut self, line: &str) {
        if !self.content.is_empty() && !self.content.ends_with('\n') {
            self.content.push('\n');
        }
        self.content.push_str(line);
        self.content.push('\n');
    }

    /// Number of lines in the content
    pub fn line_count(&self) -> usize {
        self.content.lines().count()
    }

    /// Whether the document has no content
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Last time the backing file was touched, if ever
    #[allow(dead_code)]
    pub fn last_modified(&self) -> Option<SystemTime> {
        self.last_modified
    }
}

impl Document for TextDocument {
    fn read_file(&mut self, path: &str) -> Result<()> {
        let content = fs::read_to_string(path).map_err(|e| IoError::from_io(path, e))?;

        let last_modified = fs::metadata(Path::new(path))
            .ok()
            .and_then(|m| m.modified().ok());

        self.content = content;
        self.last_modified = last_modified;
        tracing::debug!("Read document: {}", path);
        Ok(())
    }

    fn write_file(&self, path: &str) -> Result<()> {
        fs::write(path, &self.content).map_err(|e| IoError::from_io(path, e))?;
        tracing::info!("Saved document: {}", path);
        Ok(())
    }
}
