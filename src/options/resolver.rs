use std::any::type_name;
use crate::CompressionType;
use crate::error::OptionsError;
use crate::options::key;
use crate::options::ResolvedOptions;
use crate::options::value::{OptionValue, RawOptions};

/// What to do with option names that are not part of the recognized set.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum UnknownKeyPolicy {
    /// Log a warning and drop the option.
    #[default]
    Ignore,
    /// Fail resolution with [`OptionsError::InvalidArgument`].
    Reject,
}

/// Validates a [`RawOptions`] bag and fills in defaults.
#[derive(Copy, Clone, Debug, Default)]
pub struct Resolver {
    unknown_keys: UnknownKeyPolicy,
}

/// Resolves with the default [`Resolver`], which ignores unknown options.
pub fn resolve(raw: RawOptions) -> Result<ResolvedOptions, OptionsError> {
    Resolver::new().resolve(raw)
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unknown_keys(mut self, policy: UnknownKeyPolicy) -> Self {
        self.unknown_keys = policy;
        self
    }

    pub fn unknown_keys(&self) -> UnknownKeyPolicy {
        self.unknown_keys
    }

    pub fn resolve(&self, mut raw: RawOptions) -> Result<ResolvedOptions, OptionsError> {
        let mut options = ResolvedOptions::default();

        if let Some(value) = raw.remove(key::CREATE_IF_MISSING) {
            options.create_if_missing = expect_boolean(key::CREATE_IF_MISSING, value)?;
        }
        if let Some(value) = raw.remove(key::ERROR_IF_EXISTS) {
            options.error_if_exists = expect_boolean(key::ERROR_IF_EXISTS, value)?;
        }
        if let Some(value) = raw.remove(key::PARANOID_CHECKS) {
            options.paranoid_checks = expect_boolean(key::PARANOID_CHECKS, value)?;
        }
        if let Some(value) = raw.remove(key::WRITE_BUFFER_SIZE) {
            options.write_buffer_size = expect_integer(key::WRITE_BUFFER_SIZE, value)?;
        }
        if let Some(value) = raw.remove(key::MAX_OPEN_FILES) {
            options.max_open_files = expect_integer(key::MAX_OPEN_FILES, value)?;
        }
        if let Some(value) = raw.remove(key::BLOCK_CACHE_SIZE) {
            options.block_cache_size = Some(expect_integer(key::BLOCK_CACHE_SIZE, value)?);
        }
        if let Some(value) = raw.remove(key::BLOCK_SIZE) {
            options.block_size = expect_integer(key::BLOCK_SIZE, value)?;
        }
        if let Some(value) = raw.remove(key::BLOCK_RESTART_INTERVAL) {
            options.block_restart_interval = expect_integer(key::BLOCK_RESTART_INTERVAL, value)?;
        }
        if let Some(value) = raw.remove(key::COMPRESSION) {
            options.compression = expect_compression(value)?;
        }
        if let Some(value) = raw.remove(key::BLOOM_FILTER_POLICY) {
            options.bloom_filter_policy = Some(expect_bits_per_key(value)?);
        }

        // whatever is left over is not a recognized option
        let mut unknown = raw.keys().map(String::from).collect::<Vec<_>>();
        unknown.sort();
        for name in unknown {
            match self.unknown_keys {
                UnknownKeyPolicy::Ignore => log::warn!("ignoring unknown option {:?}", name),
                UnknownKeyPolicy::Reject => {
                    return Err(OptionsError::InvalidArgument {
                        field: name,
                        reason: String::from("unknown option"),
                    });
                }
            }
        }

        Ok(options)
    }
}

fn type_mismatch(field: &str, expected: &'static str, got: String) -> OptionsError {
    OptionsError::TypeMismatch {
        field: String::from(field),
        expected,
        got,
    }
}

fn expect_boolean(field: &str, value: OptionValue) -> Result<bool, OptionsError> {
    match value {
        OptionValue::Boolean(b) => Ok(b),
        other => Err(type_mismatch(field, "boolean", String::from(other.kind()))),
    }
}

/// Only `Integer` values are accepted, and only when the number fits `T`;
/// a negative size is the wrong kind of value, not an out-of-domain one.
fn expect_integer<T: TryFrom<i64>>(field: &str, value: OptionValue) -> Result<T, OptionsError> {
    match value {
        OptionValue::Integer(number) => T::try_from(number)
            .map_err(|_| type_mismatch(field, type_name::<T>(), format!("integer {}", number))),
        other => Err(type_mismatch(field, type_name::<T>(), String::from(other.kind()))),
    }
}

fn expect_compression(value: OptionValue) -> Result<CompressionType, OptionsError> {
    let field = key::COMPRESSION;
    match value {
        OptionValue::Integer(number) => CompressionType::try_from(number)
            .map_err(|number| type_mismatch(field, "CompressionType", format!("integer {}", number))),
        other => Err(type_mismatch(field, "CompressionType", String::from(other.kind()))),
    }
}

fn expect_bits_per_key(value: OptionValue) -> Result<u32, OptionsError> {
    let bits_per_key: u32 = expect_integer(key::BLOOM_FILTER_POLICY, value)?;
    if bits_per_key == 0 {
        return Err(OptionsError::InvalidArgument {
            field: String::from(key::BLOOM_FILTER_POLICY),
            reason: String::from("bits per key must be greater than zero"),
        });
    }
    Ok(bits_per_key)
}
