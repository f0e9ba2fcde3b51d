use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("line {line}: missing required column `{column}`")]
    MissingColumn { column: String, line: u64 },

    #[error("line {line}: phase name is empty, cannot derive a phase number")]
    EmptyPhase { line: u64 },

    #[error("group labels `{first}` and `{second}` both normalize to key `{key}`")]
    KeyCollision {
        key: String,
        first: String,
        second: String,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
