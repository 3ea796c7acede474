//! Core configuration types: the data model, parsing and validation.

mod builder;
mod loader;
mod model;
mod parser;
mod validation;

pub use builder::ConfigurationBuilder;
pub use loader::ConfigLoader;
pub use model::{AutoScalingGroup, Configuration};
pub use parser::Format;
pub use validation::Validate;
