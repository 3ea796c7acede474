//! Builder for loading a [`Configuration`] from files and the environment.

use crate::core::{ConfigLoader, Configuration};
use crate::error::Result;
use crate::sources::{ConfigSource, EnvSource, FileSource};
use std::path::PathBuf;

/// Builder for loading a validated `Configuration`.
///
/// # Examples
///
/// ```rust,no_run
/// use scaleout_config::prelude::*;
///
/// # fn example() -> Result<()> {
/// let config = Configuration::builder()
///     .with_file("plans/blackfriday.json")
///     .with_env("SCALEOUT_CONFIG")
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ConfigurationBuilder {
    file_paths: Vec<PathBuf>,
    env_var: Option<String>,
    custom_sources: Vec<Box<dyn ConfigSource>>,
}

impl ConfigurationBuilder {
    /// Create a new builder with no sources.
    pub fn new() -> Self {
        Self {
            file_paths: Vec::new(),
            env_var: None,
            custom_sources: Vec::new(),
        }
    }

    /// Add a file source with automatic format detection.
    ///
    /// Supported formats: JSON (.json), YAML (.yaml, .yml), TOML (.toml)
    ///
    /// Later files have higher priority, so the last file added is tried first.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_paths.push(path.into());
        self
    }

    /// Read an inline JSON document from an environment variable.
    ///
    /// When the variable is set it takes precedence over every file.
    pub fn with_env(mut self, var: impl Into<String>) -> Self {
        self.env_var = Some(var.into());
        self
    }

    /// Add a custom configuration source.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use scaleout_config::prelude::*;
    /// use scaleout_config::sources::FileSource;
    ///
    /// let custom_source = FileSource::new("plans/override.yaml").with_priority(150);
    ///
    /// Configuration::builder().with_source(custom_source);
    /// ```
    pub fn with_source<S: ConfigSource + 'static>(mut self, source: S) -> Self {
        self.custom_sources.push(Box::new(source));
        self
    }

    /// Assemble the loader without running it.
    pub fn into_loader(self) -> ConfigLoader {
        let mut loader = ConfigLoader::new();

        // Add file sources with increasing priority
        for (index, path) in self.file_paths.into_iter().enumerate() {
            let priority = 100 + (index as i32 * 10); // 100, 110, 120, etc.
            loader.add_source(Box::new(FileSource::new(path).with_priority(priority)));
        }

        for source in self.custom_sources {
            loader.add_source(source);
        }

        if let Some(var) = self.env_var {
            loader.add_source(Box::new(EnvSource::new(var)));
        }

        loader
    }

    /// Load, decode and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No source yields a document, or a source fails to load
    /// - The document does not decode
    /// - Validation fails
    pub fn build(self) -> Result<Configuration> {
        self.into_loader().load()
    }
}

impl Default for ConfigurationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Configuration {
    /// Create a new builder for loading a configuration.
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::new()
    }
}
