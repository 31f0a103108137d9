//! Property maps carried by intrinsic nodes.

use indexmap::IndexMap;
use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// Style declarations keyed by property name. `None` values are skipped
/// when the style is flattened.
pub type StyleMap = IndexMap<String, Option<String>>;

/// Opaque host object (event handlers, native values). Compared by identity.
#[derive(Clone)]
pub struct Opaque(Rc<dyn Any>);

impl Opaque {
    pub fn new<T: Any>(value: T) -> Self {
        Self(Rc::new(value))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Opaque({:p})", Rc::as_ptr(&self.0))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PropValue {
    Str(String),
    Number(f64),
    Bool(bool),
    Style(StyleMap),
    Object(Opaque),
}

impl PropValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<StyleMap> for PropValue {
    fn from(value: StyleMap) -> Self {
        Self::Style(value)
    }
}

impl From<Opaque> for PropValue {
    fn from(value: Opaque) -> Self {
        Self::Object(value)
    }
}

/// Property name to value map. Iteration follows insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Props {
    entries: IndexMap<String, PropValue>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<PropValue>,
    ) -> Option<PropValue> {
        self.entries.insert(name.into(), value.into())
    }

    pub fn remove(&mut self, name: &str) -> Option<PropValue> {
        self.entries.shift_remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
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

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<K: Into<String>, V: Into<PropValue>> FromIterator<(K, V)> for Props {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = Self::new();
        for (name, value) in iter {
            props.insert(name, value);
        }
        props
    }
}
