//! Configuration source trait.

use crate::core::Format;
use crate::error::Result;

/// A raw configuration document and the encoding it uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Undecoded document bytes.
    pub bytes: Vec<u8>,
    /// How to decode `bytes`.
    pub format: Format,
}

impl Document {
    /// Wrap raw bytes in the given format.
    pub fn new(bytes: impl Into<Vec<u8>>, format: Format) -> Self {
        Self {
            bytes: bytes.into(),
            format,
        }
    }
}

/// Trait for configuration sources.
///
/// A source hands back one whole document. Sources are never merged: the
/// loader asks them in priority order and the first one with a document wins.
pub trait ConfigSource: Send + Sync {
    /// Fetch the raw document.
    ///
    /// Returns `Ok(None)` when the source has nothing to offer (for example
    /// an unset environment variable), so lower priority sources get a turn.
    ///
    /// # Errors
    ///
    /// Returns an error if the source exists but cannot be read.
    fn load(&self) -> Result<Option<Document>>;

    /// Get a human-readable name for this source (for logging/debugging).
    fn name(&self) -> String;

    /// Get the priority of this source (higher = consulted first).
    ///
    /// Default priorities:
    /// - Environment variables: 300
    /// - Files: 100
    fn priority(&self) -> i32 {
        100
    }
}
