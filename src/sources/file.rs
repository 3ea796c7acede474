//! File-based configuration source.

use super::{ConfigSource, Document};
use crate::core::Format;
use crate::error::{ConfigError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File-based configuration source.
///
/// Reads a JSON, YAML or TOML document with the format detected from the
/// file extension. Files are required: a missing file is an error rather
/// than an empty source.
///
/// # Examples
///
/// ```rust,no_run
/// use scaleout_config::sources::FileSource;
///
/// let source = FileSource::new("plans/blackfriday.json");
/// ```
pub struct FileSource {
    path: PathBuf,
    format: Option<Format>,
    priority: i32,
}

impl FileSource {
    /// Create a new file source with automatic format detection.
    ///
    /// The format is detected from the file extension:
    /// - `.json` -> JSON
    /// - `.yaml`, `.yml` -> YAML
    /// - `.toml` -> TOML
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            format: None,
            priority: 100,
        }
    }

    /// Force a format instead of detecting it from the extension.
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    /// Set the priority for this source.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// The path this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn format(&self) -> Result<Format> {
        match self.format {
            Some(format) => Ok(format),
            None => Format::from_path(&self.path),
        }
    }
}

impl ConfigSource for FileSource {
    fn load(&self) -> Result<Option<Document>> {
        let format = self.format()?;

        if !self.path.exists() {
            return Err(ConfigError::LoadError(format!(
                "Configuration file not found: {}",
                self.path.display()
            )));
        }

        let bytes = fs::read(&self.path)?;
        tracing::debug!(path = %self.path.display(), %format, len = bytes.len(), "read configuration file");
        Ok(Some(Document::new(bytes, format)))
    }

    fn name(&self) -> String {
        format!("file:{}", self.path.display())
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}
