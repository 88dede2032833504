pub mod resolver;
pub mod value;

use crate::CompressionType;

pub const DEFAULT_WRITE_BUFFER_SIZE: usize = 4 * 1024 * 1024;
pub const DEFAULT_MAX_OPEN_FILES: u32 = 1000;
pub const DEFAULT_BLOCK_SIZE: usize = 4 * 1024;
pub const DEFAULT_BLOCK_RESTART_INTERVAL: u32 = 16;
pub const DEFAULT_COMPRESSION: CompressionType = CompressionType::SnappyCompression;

/// Names of the recognized options.
pub(crate) mod key {
    pub const CREATE_IF_MISSING: &str = "create_if_missing";
    pub const ERROR_IF_EXISTS: &str = "error_if_exists";
    pub const PARANOID_CHECKS: &str = "paranoid_checks";
    pub const WRITE_BUFFER_SIZE: &str = "write_buffer_size";
    pub const MAX_OPEN_FILES: &str = "max_open_files";
    pub const BLOCK_CACHE_SIZE: &str = "block_cache_size";
    pub const BLOCK_SIZE: &str = "block_size";
    pub const BLOCK_RESTART_INTERVAL: &str = "block_restart_interval";
    pub const COMPRESSION: &str = "compression";
    pub const BLOOM_FILTER_POLICY: &str = "bloom_filter_policy";
}

/// Fully validated open options, exactly as handed to the storage engine.
///
/// Only the resolver builds non-default values, so a record obtained from an
/// open database always reports what the engine was opened with.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ResolvedOptions {
    create_if_missing: bool,
    error_if_exists: bool,
    paranoid_checks: bool,
    write_buffer_size: usize,
    max_open_files: u32,
    block_cache_size: Option<usize>,
    block_size: usize,
    block_restart_interval: u32,
    compression: CompressionType,
    bloom_filter_policy: Option<u32>,
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        Self {
            create_if_missing: false,
            error_if_exists: false,
            paranoid_checks: false,
            write_buffer_size: DEFAULT_WRITE_BUFFER_SIZE,
            max_open_files: DEFAULT_MAX_OPEN_FILES,
            block_cache_size: None,
            block_size: DEFAULT_BLOCK_SIZE,
            block_restart_interval: DEFAULT_BLOCK_RESTART_INTERVAL,
            compression: DEFAULT_COMPRESSION,
            bloom_filter_policy: None,
        }
    }
}

impl ResolvedOptions {
    /// If true, the database will be created if it is missing.
    pub fn create_if_missing(&self) -> bool {
        self.create_if_missing
    }

    /// If true, opening an existing database is an error.
    pub fn error_if_exists(&self) -> bool {
        self.error_if_exists
    }

    /// If true, the engine verifies the data it reads aggressively and
    /// fails the open on any corruption.
    pub fn paranoid_checks(&self) -> bool {
        self.paranoid_checks
    }

    /// Bytes of updates to buffer in memory before converting them to a
    /// sorted on-disk file.
    pub fn write_buffer_size(&self) -> usize {
        self.write_buffer_size
    }

    pub fn max_open_files(&self) -> u32 {
        self.max_open_files
    }

    /// Capacity in bytes of the uncompressed block cache, `None` for no cache.
    pub fn block_cache_size(&self) -> Option<usize> {
        self.block_cache_size
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Number of keys between restart points for delta encoding of keys.
    pub fn block_restart_interval(&self) -> u32 {
        self.block_restart_interval
    }

    pub fn compression(&self) -> CompressionType {
        self.compression
    }

    /// Bits per key of the bloom filter, `None` for no filter.
    pub fn bloom_filter_policy(&self) -> Option<u32> {
        self.bloom_filter_policy
    }
}
