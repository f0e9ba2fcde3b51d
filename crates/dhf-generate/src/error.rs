use thiserror::Error;

use dhf_model::ModelError;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("phases `{first}` and `{second}` would both write {file_name}")]
    DuplicatePhaseOutput {
        file_name: String,
        first: String,
        second: String,
    },
}

pub type Result<T, E = GenerateError> = std::result::Result<T, E>;
