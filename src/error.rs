//! Error types for scaleout-config.
//!
//! Construction fails in exactly one of two ways: the bytes do not decode
//! ([`ParseError`]) or the decoded plan breaks an invariant
//! ([`ValidationError`]). Every message carries the stage that raised it.

use std::fmt;

/// Result type alias for scaleout-config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur when building a configuration.
///
/// Wrapped errors are rendered into the message rather than exposed through
/// `source()`, so a report walking the chain prints each one once.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The document could not be decoded into the expected shape.
    #[error("{stage}: {0}", stage = Stage::NewConfiguration)]
    Parse(ParseError),

    /// The document decoded but violates an invariant.
    #[error("{stage}: {0}", stage = Stage::NewConfiguration)]
    Validation(ValidationError),

    /// Failed to obtain a document from a source.
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    /// IO error occurred while reading a source.
    #[error("IO error: {0}")]
    IoError(std::io::Error),

    /// Attempted to use a format whose cargo feature is not enabled.
    #[error("Feature not enabled: {0}")]
    FeatureNotEnabled(&'static str),
}

impl ConfigError {
    /// Returns `true` if the document failed to decode.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse(_))
    }

    /// Returns `true` if the document decoded but was rejected by validation.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// The validation failure, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

/// Decode failure, wrapping the underlying deserializer error.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Malformed JSON or a JSON value of the wrong type.
    #[error("invalid JSON document: {0}")]
    Json(serde_json::Error),

    /// Malformed YAML or a YAML value of the wrong type.
    #[cfg(feature = "yaml")]
    #[error("invalid YAML document: {0}")]
    Yaml(serde_yaml::Error),

    /// Malformed TOML or a TOML value of the wrong type.
    #[cfg(feature = "toml")]
    #[error("invalid TOML document: {0}")]
    Toml(toml::de::Error),

    /// Text formats other than JSON need UTF-8 input.
    #[error("document is not valid UTF-8: {0}")]
    Utf8(std::str::Utf8Error),
}

impl From<ParseError> for ConfigError {
    fn from(err: ParseError) -> Self {
        ConfigError::Parse(err)
    }
}

impl From<ValidationError> for ConfigError {
    fn from(err: ValidationError) -> Self {
        ConfigError::Validation(err)
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        ParseError::Json(err)
    }
}

#[cfg(feature = "yaml")]
impl From<serde_yaml::Error> for ParseError {
    fn from(err: serde_yaml::Error) -> Self {
        ParseError::Yaml(err)
    }
}

#[cfg(feature = "toml")]
impl From<toml::de::Error> for ParseError {
    fn from(err: toml::de::Error) -> Self {
        ParseError::Toml(err)
    }
}

impl From<std::str::Utf8Error> for ParseError {
    fn from(err: std::str::Utf8Error) -> Self {
        ParseError::Utf8(err)
    }
}

/// The pipeline stage that raised an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// The construction entry point.
    NewConfiguration,
    /// Top-level checks on the whole configuration.
    ValidateConfiguration,
    /// Checks on a single auto-scaling group.
    ValidateAutoScalingGroup,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NewConfiguration => write!(f, "new_configuration"),
            Self::ValidateConfiguration => write!(f, "validate_configuration"),
            Self::ValidateAutoScalingGroup => write!(f, "validate_auto_scaling_group"),
        }
    }
}

/// A rule broken by a single auto-scaling group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupViolation {
    /// `Name` is empty or missing.
    EmptyName,
    /// `Growth` is zero, negative or missing.
    NonPositiveGrowth(i64),
}

impl fmt::Display for GroupViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Name can't be empty"),
            Self::NonPositiveGrowth(_) => write!(f, "Growth must be greater than 0"),
        }
    }
}

/// The first invariant violated by a decoded configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// `EventName` is empty or missing.
    EmptyEventName,

    /// `AutoScalingGroups` is empty or missing.
    EmptyAutoScalingGroups,

    /// A group failed its own checks.
    InvalidAutoScalingGroup {
        /// Zero-based position of the group in the document
        index: usize,
        /// The rule it broke
        violation: GroupViolation,
    },
}

impl ValidationError {
    /// Create a group error for the group at `index`.
    pub fn invalid_group(index: usize, violation: GroupViolation) -> Self {
        Self::InvalidAutoScalingGroup { index, violation }
    }

    /// The innermost stage that detected the violation.
    pub fn stage(&self) -> Stage {
        match self {
            Self::EmptyEventName | Self::EmptyAutoScalingGroups => Stage::ValidateConfiguration,
            Self::InvalidAutoScalingGroup { .. } => Stage::ValidateAutoScalingGroup,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = Stage::ValidateConfiguration;
        match self {
            Self::EmptyEventName => write!(f, "{}: EventName can't be empty", tag),
            Self::EmptyAutoScalingGroups => {
                write!(f, "{}: AutoScalingGroups can't be empty", tag)
            }
            Self::InvalidAutoScalingGroup { index, violation } => write!(
                f,
                "{}: {}[{}]: {}",
                tag,
                Stage::ValidateAutoScalingGroup,
                index,
                violation
            ),
        }
    }
}

impl std::error::Error for ValidationError {}
