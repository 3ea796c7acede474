//! Configuration loader that picks a document from several sources.

use crate::core::Configuration;
use crate::error::{ConfigError, Result};
use crate::sources::{ConfigSource, Document};
use std::cmp::Reverse;

/// Asks sources for a document, highest priority first.
///
/// Unlike a layered loader, documents are never merged: the first source
/// that yields one supplies the whole configuration.
pub struct ConfigLoader {
    sources: Vec<Box<dyn ConfigSource>>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Add a configuration source.
    pub fn add_source(&mut self, source: Box<dyn ConfigSource>) {
        self.sources.push(source);
    }

    /// Sources in the order they are consulted. Ties keep insertion order.
    fn ordered(&self) -> Vec<&dyn ConfigSource> {
        let mut sorted: Vec<&dyn ConfigSource> = self.sources.iter().map(|s| &**s).collect();
        sorted.sort_by_key(|s| Reverse(s.priority()));
        sorted
    }

    /// Fetch the winning document without decoding it.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No sources were added
    /// - A consulted source fails to load
    /// - No source yields a document
    pub fn fetch(&self) -> Result<(String, Document)> {
        if self.sources.is_empty() {
            return Err(ConfigError::LoadError(
                "No configuration sources specified".to_string(),
            ));
        }

        for source in self.ordered() {
            let document = source.load().map_err(|e| match e {
                // Decode and validation failures keep their kind
                ConfigError::Parse(_) | ConfigError::Validation(_) => e,
                other => ConfigError::LoadError(format!(
                    "Failed to load source '{}': {}",
                    source.name(),
                    other
                )),
            })?;

            match document {
                Some(document) => {
                    tracing::debug!(source = %source.name(), "using configuration source");
                    return Ok((source.name(), document));
                }
                None => tracing::debug!(source = %source.name(), "source has no document"),
            }
        }

        Err(ConfigError::LoadError(format!(
            "No source provided a configuration document (tried: {})",
            self.source_names().join(", ")
        )))
    }

    /// Fetch, decode and validate a configuration.
    ///
    /// # Errors
    ///
    /// Everything [`ConfigLoader::fetch`] returns, plus `Parse` and
    /// `Validation` errors from constructing the configuration.
    pub fn load(&self) -> Result<Configuration> {
        let (name, document) = self.fetch()?;
        let configuration = Configuration::from_slice_with_format(&document.bytes, document.format)?;
        tracing::info!(
            source = %name,
            event = %configuration.event_name,
            groups = configuration.auto_scaling_groups.len(),
            "loaded scale-out configuration"
        );
        Ok(configuration)
    }

    /// Get the list of source names in the order they are consulted.
    pub fn source_names(&self) -> Vec<String> {
        self.ordered().iter().map(|s| s.name()).collect()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
