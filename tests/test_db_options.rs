use std::fs;
use std::path::PathBuf;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use leveldb::{CompressionType, Error, OptionValue, OptionsError, RawOptions, DB};
use tempfile::tempdir;

struct Fixture {
    _tmp_dir: TempDir,
    path: PathBuf,
}

fn setup() -> Fixture {
    leveldb::logging::init_from(leveldb::logging::TEST_CONFIG_FILE);
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.child("db_test.db").path().to_path_buf();
    Fixture { _tmp_dir: tmp_dir, path }
}

fn open_with<V: Into<OptionValue>>(fixture: &Fixture, key: &str, value: V) -> leveldb::Result<DB> {
    DB::open_or_create(&fixture.path, RawOptions::new().set(key, value))
}

fn is_type_error(result: leveldb::Result<DB>) -> bool {
    matches!(result, Err(Error::InvalidOptions(OptionsError::TypeMismatch { .. })))
}

#[test]
fn test_create_if_missing_behavior() {
    let fixture = setup();

    let result = DB::open(&fixture.path, RawOptions::new());
    assert!(matches!(result, Err(Error::CreateIfMissingViolation { .. })));

    let db = DB::open(&fixture.path, RawOptions::new().set("create_if_missing", true)).unwrap();
    assert!(db.options().create_if_missing());
    db.close();

    let db2 = DB::open(&fixture.path, RawOptions::new()).unwrap();
    assert!(!db2.options().create_if_missing());
    db2.close();

    fs::remove_dir_all(&fixture.path).unwrap();
    let db3 = DB::open_or_create(&fixture.path, RawOptions::new()).unwrap();
    assert!(db3.options().create_if_missing());
}

#[test]
fn test_error_if_exists_behavior() {
    let fixture = setup();

    let db = DB::open(&fixture.path, RawOptions::new().set("create_if_missing", true)).unwrap();
    assert!(!db.options().error_if_exists());
    db.close();

    let raw = RawOptions::new().set("create_if_missing", true).set("error_if_exists", true);
    let result = DB::open(&fixture.path, raw);
    assert!(matches!(result, Err(Error::ErrorIfExistsViolation { .. })));
}

#[test]
fn test_second_open_while_live_fails() {
    let fixture = setup();

    let db = DB::open_or_create(&fixture.path, RawOptions::new()).unwrap();
    let result = DB::open(&fixture.path, RawOptions::new());
    assert!(matches!(result, Err(Error::EngineIOFailure(_))));

    assert!(db.close());
    assert!(!db.close());
    assert!(db.is_closed());
    assert!(DB::open(&fixture.path, RawOptions::new()).is_ok());
}

#[test]
fn test_paranoid_check_default() {
    let fixture = setup();
    let db = DB::open_or_create(&fixture.path, RawOptions::new()).unwrap();
    assert!(!db.options().paranoid_checks());
}

#[test]
fn test_paranoid_check_on_and_off() {
    let fixture = setup();

    let db = open_with(&fixture, "paranoid_checks", true).unwrap();
    assert!(db.options().paranoid_checks());
    db.close();

    let db = open_with(&fixture, "paranoid_checks", false).unwrap();
    assert!(!db.options().paranoid_checks());
}

#[test]
fn test_write_buffer_size() {
    let fixture = setup();

    let db = DB::open_or_create(&fixture.path, RawOptions::new()).unwrap();
    assert_eq!(db.options().write_buffer_size(), leveldb::DEFAULT_WRITE_BUFFER_SIZE);
    db.close();

    let db = open_with(&fixture, "write_buffer_size", 10 * 1042).unwrap();
    assert_eq!(db.options().write_buffer_size(), 10420);
    db.close();

    assert!(is_type_error(open_with(&fixture, "write_buffer_size", "1234")));
}

#[test]
fn test_max_open_files() {
    let fixture = setup();

    let db = DB::open_or_create(&fixture.path, RawOptions::new()).unwrap();
    assert_eq!(db.options().max_open_files(), leveldb::DEFAULT_MAX_OPEN_FILES);
    db.close();

    let db = open_with(&fixture, "max_open_files", 2000).unwrap();
    assert_eq!(db.options().max_open_files(), 2000);
    db.close();

    assert!(is_type_error(open_with(&fixture, "max_open_files", "2000")));
}

#[test]
fn test_cache_size() {
    let fixture = setup();

    let db = DB::open_or_create(&fixture.path, RawOptions::new()).unwrap();
    assert_eq!(db.options().block_cache_size(), None);
    assert!(db.block_cache().is_none());
    db.close();

    let db = open_with(&fixture, "block_cache_size", 10 * 1024 * 1024).unwrap();
    assert_eq!(db.options().block_cache_size(), Some(10 * 1024 * 1024));
    assert_eq!(db.block_cache().map(|cache| cache.capacity()), Some(10 * 1024 * 1024));
    db.close();

    assert!(is_type_error(open_with(&fixture, "block_cache_size", false)));
}

#[test]
fn test_block_size() {
    let fixture = setup();

    let db = DB::open_or_create(&fixture.path, RawOptions::new()).unwrap();
    assert_eq!(db.options().block_size(), leveldb::DEFAULT_BLOCK_SIZE);
    db.close();

    let db = open_with(&fixture, "block_size", 2 * 1024).unwrap();
    assert_eq!(db.options().block_size(), 2 * 1024);
    db.close();

    assert!(is_type_error(open_with(&fixture, "block_size", true)));
}

#[test]
fn test_block_restart_interval() {
    let fixture = setup();

    let db = DB::open_or_create(&fixture.path, RawOptions::new()).unwrap();
    assert_eq!(db.options().block_restart_interval(), leveldb::DEFAULT_BLOCK_RESTART_INTERVAL);
    db.close();

    let db = open_with(&fixture, "block_restart_interval", 32).unwrap();
    assert_eq!(db.options().block_restart_interval(), 32);
    db.close();

    assert!(is_type_error(open_with(&fixture, "block_restart_interval", "abc")));
}

#[test]
fn test_compression() {
    let fixture = setup();

    let db = DB::open_or_create(&fixture.path, RawOptions::new()).unwrap();
    assert_eq!(db.options().compression(), leveldb::DEFAULT_COMPRESSION);
    db.close();

    let db = open_with(&fixture, "compression", CompressionType::NoCompression).unwrap();
    assert_eq!(db.options().compression(), CompressionType::NoCompression);
    db.close();

    assert!(is_type_error(open_with(&fixture, "compression", "1234")));
    assert!(is_type_error(open_with(&fixture, "compression", 999)));
}

#[test]
fn test_filter_policy() {
    let fixture = setup();

    let db = DB::open_or_create(&fixture.path, RawOptions::new()).unwrap();
    assert_eq!(db.options().bloom_filter_policy(), None);
    assert!(db.filter_policy().is_none());
    db.close();

    let db = open_with(&fixture, "bloom_filter_policy", 10).unwrap();
    assert_eq!(db.options().bloom_filter_policy(), Some(10));
    assert_eq!(db.filter_policy().map(|policy| policy.bits_per_key()), Some(10));
    db.close();
}

#[test]
fn test_filter_policy_invalid_type() {
    let fixture = setup();

    let result = open_with(&fixture, "bloom_filter_policy", 0);
    assert!(matches!(result, Err(Error::InvalidOptions(OptionsError::InvalidArgument { .. }))));
    assert!(is_type_error(open_with(&fixture, "bloom_filter_policy", -1)));
    assert!(is_type_error(open_with(&fixture, "bloom_filter_policy", "1234")));
    assert!(is_type_error(open_with(&fixture, "bloom_filter_policy", OptionValue::Other(String::from("object")))));
    assert!(!fixture.path.exists());
}

#[test]
fn test_options_from_toml_file() {
    leveldb::logging::init_from(leveldb::logging::TEST_CONFIG_FILE);
    let tmp_dir = tempdir().unwrap();
    let db_path = tmp_dir.path().join("leveldb");
    let options_file = tmp_dir.path().join("options.toml");
    fs::write(&options_file, "create_if_missing = true\nblock_size = 8192\ncompression = 0\n").unwrap();

    let raw = RawOptions::from_toml_str(&fs::read_to_string(&options_file).unwrap()).unwrap();
    let db = DB::open(&db_path, raw).unwrap();
    assert!(db.options().create_if_missing());
    assert_eq!(db.options().block_size(), 8192);
    assert_eq!(db.options().compression(), CompressionType::NoCompression);
    assert_eq!(fs::read_to_string(db_path.join("CURRENT")).unwrap(), "MANIFEST-000001");

    let raw = RawOptions::from_toml_str("write_buffer_size = \"4096\"").unwrap();
    assert!(matches!(DB::open(&db_path, raw), Err(Error::InvalidOptions(OptionsError::TypeMismatch { .. }))));
}
