use std::collections::hash_map;
use std::collections::HashMap;
use crate::CompressionType;
use crate::error::OptionsError;

/// A loosely typed option value as supplied by the caller. The variant is the
/// value's kind; the resolver never converts between kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum OptionValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    /// Any other kind of value, tagged with the name of its kind.
    Other(String),
}

impl OptionValue {
    pub fn kind(&self) -> &str {
        match self {
            OptionValue::Boolean(_) => "boolean",
            OptionValue::Integer(_) => "integer",
            OptionValue::Float(_) => "float",
            OptionValue::String(_) => "string",
            OptionValue::Other(kind) => kind.as_str(),
        }
    }
}

macro_rules! derive_integer_value {
    ($($t:ty),*) => {
        $(
            impl From<$t> for OptionValue {
                fn from(value: $t) -> Self {
                    OptionValue::Integer(i64::from(value))
                }
            }
        )*
    };
}

derive_integer_value!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Boolean(value)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Float(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::String(String::from(value))
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::String(value)
    }
}

impl From<CompressionType> for OptionValue {
    fn from(value: CompressionType) -> Self {
        OptionValue::Integer(i64::from(value.discriminant()))
    }
}

impl From<toml::Value> for OptionValue {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::Boolean(b) => OptionValue::Boolean(b),
            toml::Value::Integer(i) => OptionValue::Integer(i),
            toml::Value::Float(f) => OptionValue::Float(f),
            toml::Value::String(s) => OptionValue::String(s),
            toml::Value::Datetime(_) => OptionValue::Other(String::from("datetime")),
            toml::Value::Array(_) => OptionValue::Other(String::from("array")),
            toml::Value::Table(_) => OptionValue::Other(String::from("table")),
        }
    }
}

/// The caller's option bag: option name to untyped value. Consumed once by
/// the resolver.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawOptions {
    entries: HashMap<String, OptionValue>,
}

impl RawOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn set<K: Into<String>, V: Into<OptionValue>>(mut self, key: K, value: V) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert<K: Into<String>, V: Into<OptionValue>>(&mut self, key: K, value: V) -> Option<OptionValue> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<OptionValue> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Reads an options file. Every TOML value keeps its own kind, so
    /// `write_buffer_size = "4096"` is still rejected by the resolver.
    pub fn from_toml_str(text: &str) -> Result<Self, OptionsError> {
        let table: toml::Table = text.parse()?;
        Ok(table.into_iter().collect())
    }
}

impl<K: Into<String>, V: Into<OptionValue>> FromIterator<(K, V)> for RawOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = RawOptions::new();
        for (key, value) in iter {
            options.insert(key, value);
        }
        options
    }
}

impl IntoIterator for RawOptions {
    type Item = (String, OptionValue);
    type IntoIter = hash_map::IntoIter<String, OptionValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
