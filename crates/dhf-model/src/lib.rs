//! Data model for generated validation-check configuration.

pub mod document;
pub mod error;
pub mod ids;
pub mod record;

pub use document::{
    CheckEntry, LlmValidation, ValidationCriteria, ValidationDocument, ValidationGroup,
};
pub use error::{ModelError, Result};
pub use ids::{CHECK_NAME_MAX_CHARS, CheckId, GroupKey, truncate_chars};
pub use record::CheckRecord;
