use std::path::{Path, PathBuf};
use crate::engine::file::FileEngine;
use crate::engine::{EngineError, EngineHandle, StorageEngine};
use crate::error::{Error, Result};
use crate::logging;
use crate::options::key;
use crate::options::resolver::Resolver;
use crate::options::value::RawOptions;
use crate::options::ResolvedOptions;
use crate::table::cache::BlockCache;
use crate::utils::bloom::BloomFilterPolicy;

/// Resolves caller options and opens the storage engine with them.
///
/// Resolution happens entirely before the engine is touched, so invalid
/// options never acquire any engine resource.
#[derive(Clone, Debug, Default)]
pub struct Opener<E: StorageEngine> {
    engine: E,
    resolver: Resolver,
}

impl<E: StorageEngine> Opener<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            resolver: Resolver::default(),
        }
    }

    pub fn with_resolver(mut self, resolver: Resolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Strict open: every option not in `raw` takes its default, including
    /// `create_if_missing = false`.
    pub fn open<P: AsRef<Path>>(&self, path: P, raw: RawOptions) -> Result<Database<E>> {
        logging::init();
        let path = path.as_ref();
        log::info!("Opening database at path: {}", path.display());

        let options = self.resolver.resolve(raw)?;
        let handle = self.engine.open(path, &options).map_err(|err| {
            log::error!("cannot open {}: {}", path.display(), err);
            translate(path, err)
        })?;

        Ok(Database {
            name: path.to_path_buf(),
            options,
            handle,
        })
    }

    /// Opens, creating the database when it is missing unless the caller
    /// set `create_if_missing` explicitly.
    pub fn open_or_create<P: AsRef<Path>>(&self, path: P, mut raw: RawOptions) -> Result<Database<E>> {
        if !raw.contains_key(key::CREATE_IF_MISSING) {
            raw.insert(key::CREATE_IF_MISSING, true);
        }
        self.open(path, raw)
    }
}

fn translate(path: &Path, err: EngineError) -> Error {
    match err {
        EngineError::NotFound(_) => Error::CreateIfMissingViolation { path: path.to_path_buf() },
        EngineError::AlreadyExists(_) => Error::ErrorIfExistsViolation { path: path.to_path_buf() },
        EngineError::Io(err) => Error::EngineIOFailure(err),
    }
}

/// An open database. Holds the engine handle and the exact options the
/// engine was opened with.
pub struct Database<E: StorageEngine> {
    name: PathBuf,
    options: ResolvedOptions,
    handle: E::Handle,
}

impl<E: StorageEngine> Database<E> {
    pub fn options(&self) -> &ResolvedOptions {
        &self.options
    }

    pub fn path(&self) -> &Path {
        &self.name
    }

    pub fn handle(&self) -> &E::Handle {
        &self.handle
    }

    /// Releases the engine handle. Safe to call any number of times; returns
    /// true only for the call that actually released it.
    pub fn close(&self) -> bool {
        let released = self.handle.close();
        if released {
            log::info!("Database Closed {:?}", self.name);
        }
        released
    }

    pub fn is_closed(&self) -> bool {
        self.handle.is_closed()
    }
}

impl<E: StorageEngine> Drop for Database<E> {
    fn drop(&mut self) {
        self.close();
    }
}

impl Database<FileEngine> {
    /// Strict open on the file engine, see [`Opener::open`].
    pub fn open<P: AsRef<Path>>(path: P, raw: RawOptions) -> Result<Self> {
        Opener::new(FileEngine).open(path, raw)
    }

    /// Open-or-create on the file engine, see [`Opener::open_or_create`].
    pub fn open_or_create<P: AsRef<Path>>(path: P, raw: RawOptions) -> Result<Self> {
        Opener::new(FileEngine).open_or_create(path, raw)
    }

    pub fn block_cache(&self) -> Option<&BlockCache> {
        self.handle.block_cache()
    }

    pub fn filter_policy(&self) -> Option<&BloomFilterPolicy> {
        self.handle.filter_policy()
    }
}
