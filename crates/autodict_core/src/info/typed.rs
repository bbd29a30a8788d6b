use std::sync::OnceLock;

use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// Typed

/// A static accessor to the [`TypeInfo`] of a type.
///
/// Implemented by the derives. A manual implementation stores the descriptor
/// in a [`TypeInfoCell`]:
///
/// ```
/// use autodict_core::info::{Shape, TypeInfo, TypeInfoCell, Typed};
///
/// struct Token;
///
/// impl Typed for Token {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: TypeInfoCell = TypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::new::<Self>("Token", Shape::Opaque))
///     }
/// }
///
/// assert_eq!(Token::type_info().name(), "Token");
/// ```
pub trait Typed: 'static {
    fn type_info() -> &'static TypeInfo;
}

// -----------------------------------------------------------------------------
// TypeInfoCell

/// Lazily initialized static storage for the [`TypeInfo`] of a non-generic type.
///
/// Generic types cannot use a `static` inside a generic function for each
/// instantiation, derive them on concrete types instead.
pub struct TypeInfoCell(OnceLock<TypeInfo>);

impl TypeInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored descriptor, building it with `f` on first use.
    #[inline]
    pub fn get_or_init(&'static self, f: impl FnOnce() -> TypeInfo) -> &'static TypeInfo {
        self.0.get_or_init(f)
    }
}

impl Default for TypeInfoCell {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
