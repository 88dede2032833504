use std::path::{Path, PathBuf};

#[derive(Eq, PartialEq, Debug)]
pub enum FileType {
    LockFile,
    ManifestFile,
    CurrentFile,
}

fn make_file_name(db_path: &Path, number: u64, suffix: &str) -> PathBuf {
    let mut path = db_path.join(format!("{:06}", number));
    path.set_extension(suffix);
    path
}

pub fn make_temp_file_name(db_path: &Path, number: u64) -> PathBuf {
    make_file_name(db_path, number, "dbtmp")
}

pub fn manifest_name(number: u64) -> String {
    format!("MANIFEST-{:06}", number)
}

pub fn make_manifest_file_name(db_path: &Path, number: u64) -> PathBuf {
    db_path.join(manifest_name(number))
}

pub fn make_current_file_name(db_path: &Path) -> PathBuf {
    db_path.join("CURRENT")
}

pub fn make_lock_file_name(db_path: &Path) -> PathBuf {
    db_path.join("LOCK")
}

pub fn parse_file_name(filename: &str) -> Option<(FileType, u64)> {
    if filename == "CURRENT" {
        Some((FileType::CurrentFile, 0))
    } else if filename == "LOCK" {
        Some((FileType::LockFile, 0))
    } else {
        let number = filename.strip_prefix("MANIFEST-")?;
        number.parse::<u64>().ok().map(|num| (FileType::ManifestFile, num))
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use super::{make_manifest_file_name, make_temp_file_name, parse_file_name, FileType};

    #[test]
    fn test_file_names() {
        let db = Path::new("/tmp/leveldb");
        assert_eq!(make_manifest_file_name(db, 1), Path::new("/tmp/leveldb/MANIFEST-000001"));
        assert_eq!(make_temp_file_name(db, 7), Path::new("/tmp/leveldb/000007.dbtmp"));
    }

    #[test]
    fn test_parse_file_name() {
        assert_eq!(parse_file_name("CURRENT"), Some((FileType::CurrentFile, 0)));
        assert_eq!(parse_file_name("LOCK"), Some((FileType::LockFile, 0)));
        assert_eq!(parse_file_name("MANIFEST-000012"), Some((FileType::ManifestFile, 12)));
        assert_eq!(parse_file_name("MANIFEST-"), None);
        assert_eq!(parse_file_name("MANIFEST-12a"), None);
        assert_eq!(parse_file_name("000003.ldb"), None);
        assert_eq!(parse_file_name("000004.log"), None);
    }
}
