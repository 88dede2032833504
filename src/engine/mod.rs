use std::io;
use std::path::Path;
use thiserror::Error;
use crate::options::ResolvedOptions;

pub mod file;
mod manifest;

/// Open failures reported by a storage engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No database at the path and `create_if_missing` is false.
    #[error("NotFound: {0}")]
    NotFound(String),

    /// A database exists at the path and `error_if_exists` is true.
    #[error("AlreadyExists: {0}")]
    AlreadyExists(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// The embedded storage engine the opener hands resolved options to.
pub trait StorageEngine {
    type Handle: EngineHandle;

    fn open(&self, path: &Path, options: &ResolvedOptions) -> Result<Self::Handle, EngineError>;
}

/// A live engine resource. Closing must be idempotent: only the first call
/// releases anything, and it reports so by returning true.
pub trait EngineHandle {
    fn close(&self) -> bool;
    fn is_closed(&self) -> bool;
}
