use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Raised while turning a raw option bag into [`ResolvedOptions`](crate::ResolvedOptions).
#[derive(Debug, Error)]
pub enum OptionsError {
    /// The value is the wrong kind for the option, e.g. a boolean or a
    /// numeric string where an integer is expected.
    #[error("TypeError: {field} expects {expected}, got {got}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        got: String,
    },

    /// The value has the right kind but is outside the option's domain.
    #[error("ArgumentError: {field}: {reason}")]
    InvalidArgument {
        field: String,
        reason: String,
    },

    #[error("malformed options file: {0}")]
    Malformed(#[from] toml::de::Error),
}

impl OptionsError {
    pub fn field(&self) -> Option<&str> {
        match self {
            OptionsError::TypeMismatch { field, .. } | OptionsError::InvalidArgument { field, .. } => Some(field.as_str()),
            OptionsError::Malformed(_) => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid options: {0}")]
    InvalidOptions(#[from] OptionsError),

    #[error("InvalidArgument: {} does not exist (create_if_missing is false)", .path.display())]
    CreateIfMissingViolation { path: PathBuf },

    #[error("InvalidArgument: {} exists (error_if_exists is true)", .path.display())]
    ErrorIfExistsViolation { path: PathBuf },

    #[error("storage engine failure: {0}")]
    EngineIOFailure(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
