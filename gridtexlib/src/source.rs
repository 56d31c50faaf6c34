//! Keyed data sources backing table columns.
//!
//! A column's data is anything that can answer two questions about a
//! [`Key`]: is it there, and what is its [`Value`]. Plain maps implement
//! [`KeyedSource`] out of the box; adapters for richer domain objects only
//! need to provide [`KeyedSource::get`].

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Separator used when a composite key is looked up in a string-keyed map.
pub const COMPOSITE_KEY_SEPARATOR: &str = ":";

/// Lookup key for a row.
///
/// Deserializes from JSON as a string (`Plain`), an array of strings
/// (`Composite`) or `null` (`Null`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    /// A single name, e.g. a regressor
    Plain(String),
    /// A multi-part name, e.g. (regressor, equation)
    Composite(Vec<String>),
    /// Matches nothing; used for spacer and section-label rows
    Null,
}

impl Key {
    /// Create a plain key
    pub fn plain(name: impl Into<String>) -> Self {
        Key::Plain(name.into())
    }

    /// Create a composite key from its parts
    pub fn composite<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Key::Composite(parts.into_iter().map(Into::into).collect())
    }

    /// The flat name used against string-keyed maps, `None` for `Null`.
    pub fn lookup_name(&self) -> Option<String> {
        match self {
            Key::Plain(name) => Some(name.clone()),
            Key::Composite(parts) => Some(parts.join(COMPOSITE_KEY_SEPARATOR)),
            Key::Null => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Plain(name) => write!(f, "{}", name),
            Key::Composite(parts) => write!(f, "{}", parts.join(COMPOSITE_KEY_SEPARATOR)),
            Key::Null => write!(f, "<null>"),
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Plain(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Plain(name)
    }
}

/// A dynamically typed value held by a source or produced by a formatter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<Value>),
}

impl Value {
    /// Short name of the variant, for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::List(_) => "list",
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

/// Anything a column can read cell values from.
pub trait KeyedSource {
    /// Fetch the value stored under `key`
    fn get(&self, key: &Key) -> Option<&Value>;

    /// Whether `key` is present
    fn has(&self, key: &Key) -> bool {
        self.get(key).is_some()
    }
}

impl KeyedSource for HashMap<Key, Value> {
    fn get(&self, key: &Key) -> Option<&Value> {
        match key {
            Key::Null => None,
            _ => HashMap::get(self, key),
        }
    }
}

impl KeyedSource for BTreeMap<Key, Value> {
    fn get(&self, key: &Key) -> Option<&Value> {
        match key {
            Key::Null => None,
            _ => BTreeMap::get(self, key),
        }
    }
}

impl KeyedSource for HashMap<String, Value> {
    fn get(&self, key: &Key) -> Option<&Value> {
        match key {
            Key::Plain(name) => HashMap::get(self, name),
            Key::Composite(_) => key.lookup_name().and_then(|name| HashMap::get(self, &name)),
            Key::Null => None,
        }
    }
}

impl KeyedSource for BTreeMap<String, Value> {
    fn get(&self, key: &Key) -> Option<&Value> {
        match key {
            Key::Plain(name) => BTreeMap::get(self, name),
            Key::Composite(_) => key
                .lookup_name()
                .and_then(|name| BTreeMap::get(self, &name)),
            Key::Null => None,
        }
    }
}
