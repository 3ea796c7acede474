//! # scaleout-config
//!
//! Parse and validate scale-out plans: how many instances to add to a set of
//! named auto-scaling groups ahead of a named event.
//!
//! ## Overview
//!
//! A plan is decoded from raw bytes and checked before it is handed back.
//! Construction fails with one of two errors:
//! - a parse error when the bytes do not decode into the expected shape
//! - a validation error naming the first broken invariant
//!
//! Nothing here talks to a cloud provider; an executor consumes the validated
//! [`Configuration`](core::Configuration) and issues the scaling calls.
//!
//! ## Quick Start
//!
//! ```rust
//! use scaleout_config::prelude::*;
//!
//! let data = br#"{
//!     "EventName": "blackfriday",
//!     "AutoScalingGroups": [
//!         {"Name": "backend-asg", "Growth": 30, "Region": "sa-east-1", "Profile": "default"},
//!         {"Name": "frontend-asg", "Growth": 10, "Region": "sa-east-1"}
//!     ]
//! }"#;
//!
//! let config = Configuration::from_slice(data)?;
//! assert_eq!(config.auto_scaling_groups.len(), 2);
//! assert!(config.auto_scaling_groups[1].uses_default_profile());
//! # Ok::<(), ConfigError>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `yaml`: accept YAML documents (default)
//! - `toml`: accept TOML documents (default)
//! - `cli`: build the `scaleout-check` binary (default)

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod sources;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::core::{
        AutoScalingGroup, Configuration, ConfigurationBuilder, Format, Validate,
    };
    pub use crate::error::{ConfigError, ParseError, Result, Stage, ValidationError};
}
