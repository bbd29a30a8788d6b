//! The structured-data tree.
//!
//! ## Menu
//!
//! - [`Value`]: a node of the tree, or an instance still being converted.
//! - [`List`]: ordered sequences and sets, tagged with a container [`Kind`].
//! - [`Map`]: insertion-ordered string-keyed mappings.
//! - [`IntoValue`] / [`FromValue`]: conversions between Rust values and [`Value`].
//! - [`TYPE_TAG`]: the reserved key carrying the type tag.
//!
//! A [`Value`] plays two roles. As a finished tree it only contains
//! primitives, lists and maps and can be handed to any `serde` format. While
//! the engine is working, [`Value::Object`] holds instances of described
//! types: an encode strategy may leave field values as objects (the engine
//! converts them afterwards), and a decode strategy receives its fields
//! already converted to objects.

// -----------------------------------------------------------------------------
// Modules

mod convert;
mod list;
mod map;
mod serde;

// -----------------------------------------------------------------------------
// Exports

pub use convert::{FromValue, IntoValue, MapKey};
pub use list::{Kind, Layout, List};
pub use map::Map;

use core::fmt;

use crate::Object;

/// The reserved mapping key holding the type tag.
///
/// Domain types must not use it as a field name.
pub const TYPE_TAG: &str = "@";

// -----------------------------------------------------------------------------
// Value

/// A node of the structured-data tree.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(List),
    Map(Map),
    Object(Box<dyn Object>),
}

impl Value {
    /// Boxes an instance of a described type.
    #[inline]
    pub fn object<T: Object>(value: T) -> Self {
        Self::Object(Box::new(value))
    }

    /// Returns a short name of the variant, or the type name of an object.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "str",
            Self::List(list) => list.kind().name(),
            Self::Map(map) => map.kind().name(),
            Self::Object(object) => object.object_type().name(),
        }
    }

    /// Returns `true` for the primitive leaves: null, booleans, numbers and strings.
    #[inline]
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Self::Null | Self::Bool(_) | Self::Int(_) | Self::Float(_) | Self::Str(_)
        )
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the number as `f64`, integers included.
    #[inline]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list(&self) -> Option<&List> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    #[inline]
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    #[inline]
    pub fn as_map_mut(&mut self) -> Option<&mut Map> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    #[inline]
    pub fn as_object(&self) -> Option<&dyn Object> {
        match self {
            Self::Object(object) => Some(&**object),
            _ => None,
        }
    }

    /// Returns the instance if this is an object of type `T`.
    pub fn downcast_ref<T: Object>(&self) -> Option<&T> {
        self.as_object().and_then(<dyn Object>::downcast_ref)
    }

    /// Takes the instance out if this is an object of type `T`,
    /// giving the value back otherwise.
    pub fn take_object<T: Object>(self) -> Result<T, Self> {
        match self {
            Self::Object(object) => match object.downcast::<T>() {
                Ok(object) => Ok(*object),
                Err(object) => Err(Self::Object(object)),
            },
            other => Err(other),
        }
    }

    /// Returns the type tag if this is a map carrying one.
    pub fn type_tag(&self) -> Option<&str> {
        self.as_map()
            .and_then(|map| map.get(TYPE_TAG))
            .and_then(Value::as_str)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Int(a), Self::Float(b)) | (Self::Float(b), Self::Int(a)) => *a as f64 == *b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a.object_eq(&**b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => fmt::Debug::fmt(b, f),
            Self::Int(i) => fmt::Debug::fmt(i, f),
            Self::Float(x) => fmt::Debug::fmt(x, f),
            Self::Str(s) => fmt::Debug::fmt(s, f),
            Self::List(list) => fmt::Debug::fmt(list, f),
            Self::Map(map) => fmt::Debug::fmt(map, f),
            Self::Object(object) => fmt::Debug::fmt(object, f),
        }
    }
}

/// Compact, JSON-like rendering used in error messages.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::List(list) => {
                f.write_str("[")?;
                for (index, item) in list.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map(map) => {
                f.write_str("{")?;
                for (index, (key, value)) in map.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key:?}: {value}")?;
                }
                f.write_str("}")
            }
            Self::Object(object) => write!(f, "<{}>", object.object_type().name()),
        }
    }
}

impl From<List> for Value {
    #[inline]
    fn from(list: List) -> Self {
        Self::List(list)
    }
}

impl From<Map> for Value {
    #[inline]
    fn from(map: Map) -> Self {
        Self::Map(map)
    }
}

impl From<Box<dyn Object>> for Value {
    #[inline]
    fn from(object: Box<dyn Object>) -> Self {
        Self::Object(object)
    }
}

#[cfg(test)]
mod tests {
    use super::{Kind, List, Map, Value};

    #[test]
    fn numbers_compare_across_variants() {
        assert_eq!(Value::Int(1), Value::Float(1.0));
        assert_ne!(Value::Int(1), Value::Str("1".into()));
    }

    #[test]
    fn maps_compare_without_order() {
        let a: Map = [("x", Value::Int(1)), ("y", Value::Int(2))]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let b: Map = [("y", Value::Int(2)), ("x", Value::Int(1))]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        assert_eq!(Value::Map(a), Value::Map(b));
    }

    #[test]
    fn display_is_compact() {
        let mut map = Map::new();
        map.insert("a", Value::List(List::from_items(Kind::LIST, vec![Value::Int(1)])));
        map.insert("b", Value::Null);
        assert_eq!(Value::Map(map).to_string(), r#"{"a": [1], "b": null}"#);
    }
}
