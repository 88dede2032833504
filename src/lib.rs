mod core;
mod engine;
mod error;
mod logs;
mod options;
mod table;
mod utils;
pub mod logging;

pub use crate::core::db::{Database, Opener};
pub use crate::engine::{EngineError, EngineHandle, StorageEngine};
pub use crate::engine::file::{FileEngine, FileHandle};
pub use crate::error::{Error, OptionsError, Result};
pub use crate::options::{
    ResolvedOptions, DEFAULT_BLOCK_RESTART_INTERVAL, DEFAULT_BLOCK_SIZE, DEFAULT_COMPRESSION,
    DEFAULT_MAX_OPEN_FILES, DEFAULT_WRITE_BUFFER_SIZE,
};
pub use crate::options::resolver::{resolve, Resolver, UnknownKeyPolicy};
pub use crate::options::value::{OptionValue, RawOptions};
pub use crate::table::cache::BlockCache;
pub use crate::utils::bloom::BloomFilterPolicy;

pub type DB = crate::core::db::Database<FileEngine>;

/// Block compression algorithms understood by the storage engine. The
/// discriminants are the on-disk identifiers.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum CompressionType {
    NoCompression = 0,
    SnappyCompression = 1,
}

impl CompressionType {
    pub const ALL: [CompressionType; 2] = [CompressionType::NoCompression, CompressionType::SnappyCompression];

    pub fn discriminant(self) -> u8 {
        self as u8
    }
}

impl TryFrom<i64> for CompressionType {
    type Error = i64;

    fn try_from(value: i64) -> std::result::Result<Self, Self::Error> {
        Self::ALL.into_iter()
            .find(|compression| i64::from(compression.discriminant()) == value)
            .ok_or(value)
    }
}

pub trait FilterPolicy {
    fn name(&self) -> String;
    fn key_may_match(&self, filter: &[u8], key: &[u8]) -> bool;
    fn create_filter(&self, keys: &[&[u8]]) -> Vec<u8>;
}
