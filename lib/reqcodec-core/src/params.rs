//! Parameter values and parameter sources.
//!
//! A path template asks for named parameters; a [`PathParams`] type supplies
//! them. Types that know their parameter names ahead of time (structs using
//! `#[derive(PathParams)]`, or `()` for templates without parameters) declare
//! them through [`PathParams::declared_names`], which lets the codec factory
//! reject a missing or extra parameter once, when the codec is built.
//! Dynamic maps such as [`ParamMap`] declare nothing and are interpolated
//! as-is.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// A scalar path parameter value: a string or a number.
#[derive(Debug, Clone, PartialEq)]
pub enum PathValue {
    /// Text value, substituted verbatim.
    Str(String),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    UInt(u64),
    /// Floating point number. Whole values drop the `.0`; non-finite values
    /// render as `Infinity`, `-Infinity` and `NaN`.
    Float(f64),
}

impl fmt::Display for PathValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::UInt(n) => write!(f, "{n}"),
            Self::Float(n) if n.is_nan() => f.write_str("NaN"),
            Self::Float(n) if n.is_infinite() => {
                f.write_str(if n.is_sign_negative() { "-Infinity" } else { "Infinity" })
            }
            Self::Float(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for PathValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for PathValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for PathValue {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

macro_rules! path_value_from {
    ($variant:ident as $target:ty: $($ty:ty),*) => {
        $(
            impl From<$ty> for PathValue {
                fn from(value: $ty) -> Self {
                    Self::$variant(<$target>::from(value))
                }
            }
        )*
    };
}

path_value_from!(Int as i64: i8, i16, i32, i64);
path_value_from!(UInt as u64: u8, u16, u32, u64);
path_value_from!(Float as f64: f32, f64);

impl From<usize> for PathValue {
    fn from(value: usize) -> Self {
        // usize is at most 64 bits on every supported target
        Self::UInt(value as u64)
    }
}

impl From<isize> for PathValue {
    fn from(value: isize) -> Self {
        Self::Int(value as i64)
    }
}

/// Conversion of a field into a [`PathValue`].
///
/// Used by `#[derive(PathParams)]`; every field of a derived struct must
/// implement it.
pub trait ToPathValue {
    /// Produce the path value for this field.
    fn to_path_value(&self) -> PathValue;
}

impl ToPathValue for PathValue {
    fn to_path_value(&self) -> PathValue {
        self.clone()
    }
}

impl ToPathValue for str {
    fn to_path_value(&self) -> PathValue {
        PathValue::Str(self.to_string())
    }
}

impl ToPathValue for String {
    fn to_path_value(&self) -> PathValue {
        PathValue::Str(self.clone())
    }
}

impl<T: ToPathValue + ?Sized> ToPathValue for &T {
    fn to_path_value(&self) -> PathValue {
        (**self).to_path_value()
    }
}

macro_rules! to_path_value_copy {
    ($($ty:ty),*) => {
        $(
            impl ToPathValue for $ty {
                fn to_path_value(&self) -> PathValue {
                    PathValue::from(*self)
                }
            }
        )*
    };
}

to_path_value_copy!(
    i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64
);

/// Ordered map of parameter name to value.
///
/// Iteration order is insertion order. Inserting an existing name replaces
/// the value in place.
///
/// ```
/// use reqcodec_core::ParamMap;
///
/// let params = ParamMap::new().with("owner", "rust-lang").with("id", 42);
/// let names: Vec<_> = params.iter().map(|(name, _)| name).collect();
/// assert_eq!(names, ["owner", "id"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamMap {
    entries: Vec<(String, PathValue)>,
}

impl ParamMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the previous value for that name.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<PathValue>,
    ) -> Option<PathValue> {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<PathValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Value for a name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PathValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PathValue)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// No entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for ParamMap
where
    K: Into<String>,
    V: Into<PathValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

/// A source of path parameters.
///
/// Implemented by `#[derive(PathParams)]`, which also declares the field
/// names so codec construction can check them against the template.
pub trait PathParams {
    /// Names this type always supplies, if known without a value.
    ///
    /// Returning `None` skips the construction-time check.
    #[must_use]
    fn declared_names() -> Option<&'static [&'static str]> {
        None
    }

    /// Name/value pairs, in the order they should be substituted.
    fn path_pairs(&self) -> Vec<(String, PathValue)>;
}

impl PathParams for () {
    fn declared_names() -> Option<&'static [&'static str]> {
        Some(&[])
    }

    fn path_pairs(&self) -> Vec<(String, PathValue)> {
        Vec::new()
    }
}

impl PathParams for ParamMap {
    fn path_pairs(&self) -> Vec<(String, PathValue)> {
        self.entries.clone()
    }
}

impl<K, V, S> PathParams for HashMap<K, V, S>
where
    K: AsRef<str>,
    V: ToPathValue,
{
    fn path_pairs(&self) -> Vec<(String, PathValue)> {
        self.iter()
            .map(|(name, value)| (name.as_ref().to_string(), value.to_path_value()))
            .collect()
    }
}

impl<K, V> PathParams for BTreeMap<K, V>
where
    K: AsRef<str>,
    V: ToPathValue,
{
    fn path_pairs(&self) -> Vec<(String, PathValue)> {
        self.iter()
            .map(|(name, value)| (name.as_ref().to_string(), value.to_path_value()))
            .collect()
    }
}

impl<T: PathParams> PathParams for &T {
    fn declared_names() -> Option<&'static [&'static str]> {
        T::declared_names()
    }

    fn path_pairs(&self) -> Vec<(String, PathValue)> {
        (**self).path_pairs()
    }
}
