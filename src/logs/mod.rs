pub mod filename;
pub mod file;
pub mod wal;

pub const MANIFEST_FILE_NUMBER: u64 = 1;
