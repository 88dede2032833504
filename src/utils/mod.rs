pub mod bloom;
pub mod coding;
pub mod common;
