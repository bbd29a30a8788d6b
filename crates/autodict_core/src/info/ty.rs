use core::fmt;

use crate::error::Name;
use crate::info::{Describe, TypeInfo, Typed};
use crate::value::{Kind, Value};

// -----------------------------------------------------------------------------
// TypeRef

/// A lazy pointer to the [`TypeInfo`] of a named type.
///
/// Holding a function instead of the descriptor lets self-referential types
/// describe their fields without initialization cycles.
#[derive(Clone, Copy)]
pub struct TypeRef(fn() -> &'static TypeInfo);

impl TypeRef {
    #[inline]
    pub const fn of<T: Typed>() -> Self {
        Self(T::type_info)
    }

    #[inline]
    pub fn get(self) -> &'static TypeInfo {
        (self.0)()
    }
}

impl PartialEq for TypeRef {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.get().id() == other.get().id()
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.get().name())
    }
}

// -----------------------------------------------------------------------------
// Literal

/// A permitted value of a literal type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    Null,
    Bool(bool),
    Int(i64),
    Str(Name),
}

impl Literal {
    /// Returns `true` if `value` is this literal. Booleans never match integers.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Null, Value::Null) => true,
            (Self::Bool(a), Value::Bool(b)) => a == b,
            (Self::Int(a), Value::Int(b)) => a == b,
            (Self::Str(a), Value::Str(b)) => a == b,
            _ => false,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(i) => Value::Int(*i),
            Self::Str(s) => Value::Str(s.to_string()),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("None"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&'static str> for Literal {
    fn from(value: &'static str) -> Self {
        Self::Str(Name::Borrowed(value))
    }
}

// -----------------------------------------------------------------------------
// Ty

/// A declared type expression.
///
/// `Ty` is what a field declares, what a container is parameterized with and
/// what a caller hands to `from_dict` as the expected type.
///
/// ```
/// use autodict_core::info::Ty;
///
/// let ty = Ty::union([Ty::Str, Ty::list(Ty::Int), Ty::Null]);
/// assert_eq!(ty.to_string(), "Union[str, list[int], None]");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Ty {
    /// No expectation, anything goes.
    #[default]
    Any,
    Null,
    Bool,
    Int,
    Float,
    Str,
    /// A described type.
    Named(TypeRef),
    /// A type known by its registered name, resolved through the registry.
    Ref(Name),
    /// A container, bare when `args` is `None`.
    ///
    /// Sequences take one argument, maps take a key and a value type, tuples
    /// take one per position, or a single repeated one when `variadic`.
    Container {
        kind: Kind,
        args: Option<Vec<Ty>>,
        variadic: bool,
    },
    Union(Vec<Ty>),
    Literal(Vec<Literal>),
}

impl Ty {
    /// Returns the declared type of `T`.
    #[inline]
    pub fn of<T: Describe>() -> Self {
        T::describe()
    }

    /// A described type.
    #[inline]
    pub fn named<T: Typed>() -> Self {
        Self::Named(TypeRef::of::<T>())
    }

    /// A type reference resolved by name.
    #[inline]
    pub fn by_name(name: impl Into<Name>) -> Self {
        Self::Ref(name.into())
    }

    /// A parameterized container.
    pub fn container(kind: Kind, args: impl IntoIterator<Item = Ty>) -> Self {
        Self::Container {
            kind,
            args: Some(args.into_iter().collect()),
            variadic: false,
        }
    }

    /// A container without type arguments.
    #[inline]
    pub const fn bare(kind: Kind) -> Self {
        Self::Container {
            kind,
            args: None,
            variadic: false,
        }
    }

    #[inline]
    pub fn list(item: Ty) -> Self {
        Self::container(Kind::LIST, [item])
    }

    #[inline]
    pub fn set(item: Ty) -> Self {
        Self::container(Kind::SET, [item])
    }

    /// A mapping, keys are strings in the tree.
    #[inline]
    pub fn map(key: Ty, value: Ty) -> Self {
        Self::container(Kind::MAP, [key, value])
    }

    /// A fixed-size tuple.
    #[inline]
    pub fn tuple(items: impl IntoIterator<Item = Ty>) -> Self {
        Self::container(Kind::TUPLE, items)
    }

    /// A tuple of any length with items of one type.
    pub fn tuple_of(item: Ty) -> Self {
        Self::Container {
            kind: Kind::TUPLE,
            args: Some(vec![item]),
            variadic: true,
        }
    }

    /// A union of alternatives. Nested unions are flattened.
    pub fn union(members: impl IntoIterator<Item = Ty>) -> Self {
        let mut flat = Vec::new();
        for member in members {
            match member {
                Self::Union(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        Self::Union(flat)
    }

    /// `Union[ty, None]`.
    #[inline]
    pub fn optional(ty: Ty) -> Self {
        Self::union([ty, Self::Null])
    }

    /// A literal type.
    pub fn literal(values: impl IntoIterator<Item = Literal>) -> Self {
        Self::Literal(values.into_iter().collect())
    }

    /// Returns the descriptor of a [`Ty::Named`] type.
    #[inline]
    pub fn info(&self) -> Option<&'static TypeInfo> {
        match self {
            Self::Named(ty) => Some(ty.get()),
            _ => None,
        }
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(f: &mut fmt::Formatter<'_>, items: &[impl fmt::Display]) -> fmt::Result {
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{item}")?;
            }
            Ok(())
        }

        match self {
            Self::Any => f.write_str("Any"),
            Self::Null => f.write_str("None"),
            Self::Bool => f.write_str("bool"),
            Self::Int => f.write_str("int"),
            Self::Float => f.write_str("float"),
            Self::Str => f.write_str("str"),
            Self::Named(ty) => f.write_str(ty.get().name()),
            Self::Ref(name) => f.write_str(name),
            Self::Container {
                kind,
                args,
                variadic,
            } => {
                f.write_str(kind.name())?;
                if let Some(args) = args {
                    f.write_str("[")?;
                    join(f, args)?;
                    if *variadic {
                        f.write_str(", ...")?;
                    }
                    f.write_str("]")?;
                }
                Ok(())
            }
            Self::Union(members) => {
                f.write_str("Union[")?;
                join(f, members)?;
                f.write_str("]")
            }
            Self::Literal(values) => {
                f.write_str("Literal[")?;
                join(f, values)?;
                f.write_str("]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Literal, Ty};
    use crate::Value;

    #[test]
    fn unions_flatten() {
        let ty = Ty::union([Ty::Int, Ty::optional(Ty::Str)]);
        assert_eq!(ty, Ty::Union(vec![Ty::Int, Ty::Str, Ty::Null]));
    }

    #[test]
    fn display() {
        assert_eq!(Ty::tuple_of(Ty::Int).to_string(), "tuple[int, ...]");
        assert_eq!(Ty::map(Ty::Str, Ty::Any).to_string(), "map[str, Any]");
        assert_eq!(
            Ty::literal(["a".into(), Literal::Int(1)]).to_string(),
            r#"Literal["a", 1]"#
        );
    }

    #[test]
    fn literal_matching_is_exact() {
        assert!(Literal::Int(1).matches(&Value::Int(1)));
        assert!(!Literal::Int(1).matches(&Value::Bool(true)));
        assert!(!Literal::Bool(true).matches(&Value::Int(1)));
    }
}
