use std::{fs, io};
use std::path::{Path, PathBuf};
use fslock::LockFile;
use parking_lot::Mutex;
use crate::engine::{manifest, EngineError, EngineHandle, StorageEngine};
use crate::logs::filename;
use crate::options::ResolvedOptions;
use crate::table::cache::BlockCache;
use crate::utils::bloom::BloomFilterPolicy;

/// Directory-backed engine using the LevelDB layout: `CURRENT` names the
/// live `MANIFEST-*`, and `LOCK` guards the directory against a second
/// concurrent open.
#[derive(Copy, Clone, Debug, Default)]
pub struct FileEngine;

pub struct FileHandle {
    name: PathBuf,
    lock: Mutex<Option<LockFile>>,
    block_cache: Option<BlockCache>,
    filter_policy: Option<BloomFilterPolicy>,
}

fn lock_db(path: &Path) -> io::Result<LockFile> {
    let lock_file_name = filename::make_lock_file_name(path).into_os_string();
    let mut lock = LockFile::open(&lock_file_name)?;
    if !lock.try_lock()? {
        return Err(io::Error::new(
            io::ErrorKind::WouldBlock,
            format!("lock {}: already held by process", path.display()),
        ));
    }
    Ok(lock)
}

/// Removes a database directory created by a failed open. Disarmed once
/// the open succeeds.
struct CreatedDir<'a> {
    path: Option<&'a Path>,
}

impl<'a> CreatedDir<'a> {
    fn create(path: &'a Path) -> io::Result<Self> {
        fs::create_dir_all(path)?;
        Ok(Self { path: Some(path) })
    }

    fn existing() -> Self {
        Self { path: None }
    }

    fn disarm(mut self) {
        self.path = None;
    }
}

impl Drop for CreatedDir<'_> {
    fn drop(&mut self) {
        let Some(path) = self.path else {
            return;
        };
        if let Err(err) = fs::remove_dir_all(path) {
            log::warn!("cannot remove {} after failed open: {}", path.display(), err);
        }
    }
}

fn not_found(path: &Path) -> EngineError {
    EngineError::NotFound(format!("{} does not exist (create_if_missing is false)", path.display()))
}

impl FileEngine {
    fn recover(path: &Path, options: &ResolvedOptions) -> Result<(), EngineError> {
        if fs::metadata(filename::make_current_file_name(path)).is_err() {
            if !options.create_if_missing() {
                return Err(not_found(path));
            }
            log::info!("Creating DB {} since it was missing", path.display());
            manifest::create_manifest(path)?;
            return Ok(());
        }

        if options.error_if_exists() {
            return Err(EngineError::AlreadyExists(format!("{} exists (error_if_exists is true)", path.display())));
        }

        match manifest::read_manifest(path) {
            Ok(descriptor) => {
                log::info!("Recovered DB {}, next file number {:?}", path.display(), descriptor.next_file_number);
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::InvalidData && !options.paranoid_checks() => {
                log::warn!("ignoring corrupted manifest of {}: {}", path.display(), err);
                Ok(())
            }
            Err(err) => {
                log::error!("cannot recover {}: {}", path.display(), err);
                Err(err.into())
            }
        }
    }
}

impl StorageEngine for FileEngine {
    type Handle = FileHandle;

    fn open(&self, path: &Path, options: &ResolvedOptions) -> Result<FileHandle, EngineError> {
        let created = if path.is_dir() {
            CreatedDir::existing()
        } else if options.create_if_missing() {
            CreatedDir::create(path)?
        } else {
            return Err(not_found(path));
        };

        // released by drop if recovery fails, before the directory goes
        let lock = lock_db(path)?;
        Self::recover(path, options)?;
        created.disarm();

        let block_cache = options.block_cache_size().map(|capacity| {
            log::info!("Block cache of {} bytes for {}", capacity, path.display());
            BlockCache::new(capacity)
        });
        let filter_policy = options.bloom_filter_policy().map(|bits_per_key| {
            log::info!("Bloom filter with {} bits per key for {}", bits_per_key, path.display());
            BloomFilterPolicy::new(bits_per_key)
        });

        Ok(FileHandle {
            name: path.to_path_buf(),
            lock: Mutex::new(Some(lock)),
            block_cache,
            filter_policy,
        })
    }
}

impl FileHandle {
    pub fn path(&self) -> &Path {
        &self.name
    }

    pub fn block_cache(&self) -> Option<&BlockCache> {
        self.block_cache.as_ref()
    }

    pub fn filter_policy(&self) -> Option<&BloomFilterPolicy> {
        self.filter_policy.as_ref()
    }
}

impl EngineHandle for FileHandle {
    fn close(&self) -> bool {
        let Some(mut lock) = self.lock.lock().take() else {
            return false;
        };
        if let Err(err) = lock.unlock() {
            log::error!("cannot unlock {}: {}", self.name.display(), err);
        }
        true
    }

    fn is_closed(&self) -> bool {
        self.lock.lock().is_none()
    }
}

impl Drop for FileHandle {
    fn drop(&mut self) {
        self.close();
    }
}
