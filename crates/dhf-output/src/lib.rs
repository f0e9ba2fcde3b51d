//! Output writers for generated validation configuration.

pub mod emitter;
pub mod error;
pub mod yaml;

pub use error::{OutputError, Result};
pub use yaml::{to_yaml_string, write_document};
