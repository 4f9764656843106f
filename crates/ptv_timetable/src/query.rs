//! Query-string encoding
//!
//! [`QueryParams`] is an insertion-ordered mapping from parameter name to a
//! typed [`QueryValue`]. Encoding is deterministic: the same params always
//! produce the same string, which matters because the encoded query is part
//! of the signed message.
//!
//! Per-type rules:
//! - booleans become `true` / `false`
//! - numbers use their shortest decimal form (`5.0` becomes `5`)
//! - date-times become RFC 3339 UTC with a `Z` suffix
//! - lists repeat the key once per element, in order
//! - text is form-urlencoded (space becomes `+`)

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use url::form_urlencoded;

/// A single query value
#[derive(Debug, Clone, PartialEq)]
pub enum QueryScalar {
    /// Free text
    Text(String),
    /// Signed integer
    Integer(i64),
    /// Unsigned integer, used for identifiers
    Unsigned(u64),
    /// Floating point number
    Float(f64),
    /// Boolean flag
    Bool(bool),
    /// Point in time, sent as UTC
    DateTime(DateTime<Utc>),
}

impl QueryScalar {
    /// Returns false for NaN and infinite floats
    #[must_use]
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Float(n) => n.is_finite(),
            _ => true,
        }
    }
}

impl fmt::Display for QueryScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Unsigned(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
            Self::DateTime(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::Secs, true)),
        }
    }
}

impl From<&str> for QueryScalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for QueryScalar {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for QueryScalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for QueryScalar {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u32> for QueryScalar {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u64> for QueryScalar {
    fn from(value: u64) -> Self {
        Self::Unsigned(value)
    }
}

impl From<f64> for QueryScalar {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<DateTime<Utc>> for QueryScalar {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value)
    }
}

/// A query parameter value: one scalar, or a list sharing the same key
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    /// Single entry
    One(QueryScalar),
    /// One entry per element, in order
    Many(Vec<QueryScalar>),
}

impl From<QueryScalar> for QueryValue {
    fn from(value: QueryScalar) -> Self {
        Self::One(value)
    }
}

macro_rules! impl_query_value_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for QueryValue {
                fn from(value: $ty) -> Self {
                    Self::One(value.into())
                }
            }
        )*
    };
}

impl_query_value_from!(&str, String, bool, i64, u32, u64, f64, DateTime<Utc>);

/// Insertion-ordered query parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    entries: Vec<(String, QueryValue)>,
}

impl QueryParams {
    /// Create an empty parameter set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`.
    ///
    /// A name that is already present keeps its position and takes the new
    /// value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<QueryValue>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.entries.iter_mut().find(|(key, _)| *key == name) {
            slot.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Set `name` only when the caller supplied a value.
    ///
    /// `Some(false)` and `Some(0)` are values like any other and are kept.
    pub fn insert_opt<T: Into<QueryScalar>>(&mut self, name: &str, value: Option<T>) {
        if let Some(value) = value {
            self.insert(name, QueryValue::One(value.into()));
        }
    }

    /// Set `name` to a list, repeated once per element when encoded
    pub fn insert_list<I, T>(&mut self, name: &str, values: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<QueryScalar>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.insert(name, QueryValue::Many(values));
    }

    /// Set `name` to a list only when the caller supplied one
    pub fn insert_list_opt<I, T>(&mut self, name: &str, values: Option<I>)
    where
        I: IntoIterator<Item = T>,
        T: Into<QueryScalar>,
    {
        if let Some(values) = values {
            self.insert_list(name, values);
        }
    }

    /// Look up a parameter by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&QueryValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Returns true if `name` was supplied
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Parameter names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Name/value pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Number of parameters (a list counts once)
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no parameter was supplied
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Name of the first parameter holding a NaN or infinite number
    #[must_use]
    pub fn first_non_finite(&self) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, value)| match value {
                QueryValue::One(scalar) => !scalar.is_finite(),
                QueryValue::Many(scalars) => scalars.iter().any(|s| !s.is_finite()),
            })
            .map(|(key, _)| key.as_str())
    }

    /// Encode into a query string (without the leading `?`)
    #[must_use]
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in &self.entries {
            match value {
                QueryValue::One(scalar) => {
                    serializer.append_pair(name, &scalar.to_string());
                },
                QueryValue::Many(scalars) => {
                    for scalar in scalars {
                        serializer.append_pair(name, &scalar.to_string());
                    }
                },
            }
        }
        serializer.finish()
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<QueryValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}
