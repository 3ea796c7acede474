//! Configuration document sources.

mod config_source;
mod env;
mod file;

pub use config_source::{ConfigSource, Document};
pub use env::EnvSource;
pub use file::FileSource;
