//! Library side of the `dhf-checkgen` binary.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod types;
