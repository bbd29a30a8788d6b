use core::any::{Any, TypeId};
use core::fmt;

use crate::info::{EnumInfo, ObjectInfo, RecordInfo, TupleInfo};
use crate::registry::Strategy;

// -----------------------------------------------------------------------------
// ShapeKind

/// The structural category of a described type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Record,
    Enum,
    Tuple,
    Object,
    Opaque,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Record => f.pad("Record"),
            Self::Enum => f.pad("Enum"),
            Self::Tuple => f.pad("Tuple"),
            Self::Object => f.pad("Object"),
            Self::Opaque => f.pad("Opaque"),
        }
    }
}

// -----------------------------------------------------------------------------
// Shape

/// The structure of a described type, see [`ShapeKind`].
#[derive(Debug)]
pub enum Shape {
    Record(RecordInfo),
    Enum(EnumInfo),
    Tuple(TupleInfo),
    Object(ObjectInfo),
    Opaque,
}

impl Shape {
    pub const fn kind(&self) -> ShapeKind {
        match self {
            Self::Record(_) => ShapeKind::Record,
            Self::Enum(_) => ShapeKind::Enum,
            Self::Tuple(_) => ShapeKind::Tuple,
            Self::Object(_) => ShapeKind::Object,
            Self::Opaque => ShapeKind::Opaque,
        }
    }
}

// -----------------------------------------------------------------------------
// TypeInfo

/// The static descriptor of one type.
///
/// A `TypeInfo` contains:
///
/// - **id**: the [`TypeId`], key of the registry.
/// - **name**: the declared name, the default type tag.
/// - **path**: the full path from [`core::any::type_name`], for diagnostics.
/// - **shape**: the field table or member list, see [`Shape`].
/// - **own**: the type's own encode/decode hooks, set for [`Dictable`] types.
///
/// Obtained through [`Typed::type_info`](crate::info::Typed::type_info),
/// [`Object::object_type`](crate::Object::object_type) or the registry.
///
/// [`Dictable`]: crate::Dictable
pub struct TypeInfo {
    id: TypeId,
    name: &'static str,
    path: &'static str,
    shape: Shape,
    own: Option<Strategy>,
}

macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $info:ident) => {
        /// Returns the specific descriptor if the shape matches.
        #[inline]
        pub const fn $name(&self) -> Option<&$info> {
            match &self.shape {
                Shape::$kind(info) => Some(info),
                _ => None,
            }
        }
    };
}

impl TypeInfo {
    /// Creates the descriptor of `T` under the declared `name`.
    pub fn new<T: Any>(name: &'static str, shape: Shape) -> Self {
        Self {
            id: TypeId::of::<T>(),
            name,
            path: core::any::type_name::<T>(),
            shape,
            own: None,
        }
    }

    /// Attaches the type's own encode/decode hooks.
    #[inline]
    pub fn with_own(mut self, strategy: Strategy) -> Self {
        self.own = Some(strategy);
        self
    }

    impl_cast_method!(as_record: Record => RecordInfo);
    impl_cast_method!(as_enum: Enum => EnumInfo);
    impl_cast_method!(as_tuple: Tuple => TupleInfo);
    impl_cast_method!(as_object: Object => ObjectInfo);

    #[inline]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    #[inline]
    pub const fn shape(&self) -> &Shape {
        &self.shape
    }

    #[inline]
    pub const fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    /// Returns the self-describing hooks, if any.
    #[inline]
    pub const fn own(&self) -> Option<&Strategy> {
        self.own.as_ref()
    }

    /// Returns `true` if this is the descriptor of `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    /// Returns `true` for shapes the engine handles without registration:
    /// records, enumerations and named tuples.
    #[inline]
    pub const fn is_native(&self) -> bool {
        matches!(
            self.shape,
            Shape::Record(_) | Shape::Enum(_) | Shape::Tuple(_)
        )
    }

    /// Returns the declared base type of an attribute-bag type.
    pub fn base(&self) -> Option<&'static TypeInfo> {
        self.as_object()
            .and_then(ObjectInfo::base)
            .map(|base| base.get())
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInfo")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("shape", &self.shape)
            .field("own", &self.own.is_some())
            .finish()
    }
}

impl PartialEq for TypeInfo {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}
