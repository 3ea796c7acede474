//! Environment variable configuration source.

use super::{ConfigSource, Document};
use crate::core::Format;
use crate::error::{ConfigError, Result};
use std::env;

/// Reads a whole configuration document from one environment variable.
///
/// An unset or empty variable yields no document, letting lower priority
/// sources (usually a file) supply it instead.
///
/// # Examples
///
/// ```rust
/// use scaleout_config::sources::EnvSource;
///
/// // SCALEOUT_CONFIG='{"EventName": "blackfriday", ...}'
/// let source = EnvSource::new("SCALEOUT_CONFIG");
/// ```
pub struct EnvSource {
    var: String,
    format: Format,
    priority: i32,
}

impl EnvSource {
    /// Create a source reading a JSON document from `var`.
    pub fn new(var: impl Into<String>) -> Self {
        Self {
            var: var.into(),
            format: Format::Json,
            priority: 300, // Env vars have highest priority by default
        }
    }

    /// Decode the variable's contents with a different format.
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Set the priority for this source.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl ConfigSource for EnvSource {
    fn load(&self) -> Result<Option<Document>> {
        match env::var(&self.var) {
            Ok(value) if value.trim().is_empty() => Ok(None),
            Ok(value) => {
                tracing::debug!(var = %self.var, format = %self.format, "read configuration from environment");
                Ok(Some(Document::new(value, self.format)))
            }
            Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(_)) => Err(ConfigError::LoadError(format!(
                "Environment variable {} is not valid unicode",
                self.var
            ))),
        }
    }

    fn name(&self) -> String {
        format!("env:{}", self.var)
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}
