use std::path::Path;
use std::sync::Once;

static INIT: Once = Once::new();

/// Default log4rs configuration file, looked up in the working directory.
#[cfg(not(test))]
pub const CONFIG_FILE: &str = "log4rs.yaml";
#[cfg(test)]
pub const CONFIG_FILE: &str = TEST_CONFIG_FILE;

/// Console-only configuration used by the test suites.
pub const TEST_CONFIG_FILE: &str = "tests/log4rs.yaml";

/// Configures log4rs from [`CONFIG_FILE`] once per process. Opening a
/// database calls this; without the file, logging stays unconfigured.
pub fn init() {
    init_from(CONFIG_FILE)
}

/// Like [`init`] with an explicit configuration file. Only the first call
/// in a process has any effect.
pub fn init_from<P: AsRef<Path>>(config: P) {
    let config = config.as_ref();
    INIT.call_once(|| {
        if !config.exists() {
            return;
        }
        if let Err(err) = log4rs::init_file(config, Default::default()) {
            eprintln!("cannot load logging configuration {}: {}", config.display(), err);
        }
    });
}

#[cfg(test)]
mod tests {
    use std::fs;
    use super::{CONFIG_FILE, TEST_CONFIG_FILE};

    #[test]
    fn test_config_writes_no_files() {
        assert_eq!(CONFIG_FILE, TEST_CONFIG_FILE);
        assert!(log4rs::config::load_config_file(TEST_CONFIG_FILE, Default::default()).is_ok());

        let config = fs::read_to_string(TEST_CONFIG_FILE).unwrap();
        assert!(!config.contains("kind: file"));
        assert!(!config.contains("kind: rolling_file"));
    }
}
