use std::{fs, io};
use std::path::Path;
use crate::logs::filename;
use crate::logs::filename::FileType;

/// Atomically points `CURRENT` at the given manifest via a temp file rename.
pub fn set_current_file(db_path: &Path, manifest_number: u64) -> io::Result<()> {
    let temp_path = filename::make_temp_file_name(db_path, manifest_number);
    fs::write(&temp_path, filename::manifest_name(manifest_number))?;
    let result = fs::rename(&temp_path, filename::make_current_file_name(db_path));
    if result.is_err() {
        fs::remove_file(&temp_path)?;
    }
    result
}

/// Reads `CURRENT` and returns the manifest number it names.
pub fn read_current_file(db_path: &Path) -> io::Result<u64> {
    let content = fs::read_to_string(filename::make_current_file_name(db_path))?;
    match filename::parse_file_name(content.trim_end()) {
        Some((FileType::ManifestFile, number)) => Ok(number),
        _ => Err(io::Error::new(io::ErrorKind::InvalidData, format!("CURRENT file is malformed: {:?}", content))),
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, io};
    use tempfile::tempdir;
    use super::{read_current_file, set_current_file};

    #[test]
    fn test_current_file() {
        let tmp_dir = tempdir().unwrap();
        set_current_file(tmp_dir.path(), 5).unwrap();

        let current = tmp_dir.path().join("CURRENT");
        assert_eq!(fs::read_to_string(&current).unwrap(), "MANIFEST-000005");
        assert!(!tmp_dir.path().join("000005.dbtmp").exists());
        assert_eq!(read_current_file(tmp_dir.path()).unwrap(), 5);

        fs::write(&current, "garbage").unwrap();
        let err = read_current_file(tmp_dir.path()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
