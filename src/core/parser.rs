//! Decoding documents into a [`Configuration`] and the construction entry points.

use crate::core::{Configuration, Validate};
use crate::error::{ConfigError, ParseError, Result};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Encoding of a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// JSON, the canonical encoding.
    #[default]
    Json,
    /// YAML, with the same field names.
    Yaml,
    /// TOML, with `[[AutoScalingGroups]]` tables.
    Toml,
}

impl Format {
    /// Detect the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the path has no extension or an unsupported one.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                ConfigError::LoadError(format!(
                    "Unable to determine file format for: {}",
                    path.display()
                ))
            })?;

        match extension {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            _ => Err(ConfigError::LoadError(format!(
                "Unsupported file extension: {}. Supported: .json, .yaml, .yml, .toml",
                extension
            ))),
        }
    }

    /// Decode `data` without validating it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the bytes do not decode, or
    /// `FeatureNotEnabled` if the format was compiled out.
    pub fn decode(self, data: &[u8]) -> Result<Configuration> {
        match self {
            Self::Json => Ok(serde_json::from_slice(data).map_err(ParseError::from)?),
            #[cfg(feature = "yaml")]
            Self::Yaml => Ok(serde_yaml::from_slice(data).map_err(ParseError::from)?),
            #[cfg(not(feature = "yaml"))]
            Self::Yaml => Err(ConfigError::FeatureNotEnabled("yaml")),
            #[cfg(feature = "toml")]
            Self::Toml => {
                let text = std::str::from_utf8(data).map_err(ParseError::from)?;
                Ok(toml::from_str(text).map_err(ParseError::from)?)
            }
            #[cfg(not(feature = "toml"))]
            Self::Toml => Err(ConfigError::FeatureNotEnabled("toml")),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
            Self::Toml => write!(f, "toml"),
        }
    }
}

impl FromStr for Format {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            other => Err(ConfigError::LoadError(format!("Unknown format: {}", other))),
        }
    }
}

impl Configuration {
    /// Decode a JSON document and validate it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the bytes are not a well-formed
    /// document of the expected shape, or `ConfigError::Validation` with the
    /// first broken invariant.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scaleout_config::prelude::*;
    ///
    /// let data = br#"{
    ///     "EventName": "blackfriday",
    ///     "AutoScalingGroups": [
    ///         {"Name": "backend-asg", "Growth": 30, "Region": "sa-east-1"}
    ///     ]
    /// }"#;
    ///
    /// let config = Configuration::from_slice(data)?;
    /// assert_eq!(config.event_name, "blackfriday");
    /// assert_eq!(config.auto_scaling_groups[0].growth, 30);
    /// # Ok::<(), ConfigError>(())
    /// ```
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        Self::from_slice_with_format(data, Format::Json)
    }

    /// Decode a document in the given format and validate it.
    ///
    /// # Errors
    ///
    /// Same as [`Configuration::from_slice`].
    pub fn from_slice_with_format(data: &[u8], format: Format) -> Result<Self> {
        let configuration = format.decode(data).inspect_err(|e| {
            tracing::warn!(%format, error = %e, "rejected configuration document");
        })?;

        if let Err(e) = configuration.validate() {
            tracing::warn!(stage = %e.stage(), error = %e, "configuration failed validation");
            return Err(e.into());
        }

        tracing::debug!(
            event = %configuration.event_name,
            groups = configuration.auto_scaling_groups.len(),
            "configuration accepted"
        );
        Ok(configuration)
    }
}

impl FromStr for Configuration {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_slice(s.as_bytes())
    }
}
