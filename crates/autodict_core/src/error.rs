use std::borrow::Cow;

use thiserror::Error;

/// A type or field name, usually `'static`.
pub type Name = Cow<'static, str>;

/// Errors raised while converting between instances and trees.
///
/// Only the variant and the type it names are meant to be matched on; the
/// messages are for humans. Errors raised inside a record field are wrapped in
/// [`Error::InField`], use [`Error::root`] to reach the original failure.
#[derive(Debug, Error)]
pub enum Error {
    /// No strategy, native support or pass-through exists for the encoded type.
    #[error("`{0}` cannot be converted to a tree, please mark it as to_dictable")]
    UnableToDict(Name),
    /// No strategy, native support or pass-through exists for the decoded type,
    /// or an embedded type tag names an unregistered type.
    #[error("`{0}` cannot be built from a tree, please mark it as from_dictable")]
    UnableFromDict(Name),
    /// More than one union member accepted the value.
    #[error("ambiguous value for `{ty}`, it matches {}", .matches.join(", "))]
    AmbiguousUnion { ty: String, matches: Vec<String> },
    /// No union member survived the built-in pre-filter.
    #[error("no member of `{ty}` accepts a value of kind `{found}`")]
    NoUnionMatch { ty: String, found: &'static str },
    /// The decoded enum member's name differs from the name stored in the tree.
    #[error(
        "inconsistent enum `{ty}` value {value}: expect name `{expected}`, but get name `{found}`"
    )]
    InconsistentEnum {
        ty: Name,
        value: String,
        expected: &'static str,
        found: String,
    },
    /// No enum member has the given value.
    #[error("enum `{ty}` has no member with value {value}")]
    UnknownEnumValue { ty: Name, value: String },
    /// A field is absent from the tree and has no default to fall back on.
    #[error("default value not found for field `{field}` of `{ty}`")]
    MissingDefault { ty: Name, field: String },
    /// A value is not one of the permitted literals.
    #[error("value {value} is not one of {allowed}")]
    LiteralMismatch { value: String, allowed: String },
    /// A value has an unexpected kind.
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: Name,
        found: &'static str,
    },
    /// A key required by a strategy is absent.
    #[error("`{ty}` requires key `{key}`")]
    MissingKey { ty: Name, key: String },
    /// A `Ty::Ref` names no registered type.
    #[error("type reference `{0}` does not resolve to a registered type")]
    UnresolvedReference(Name),
    /// Failure raised by a user strategy.
    #[error("{0}")]
    Custom(String),
    /// A failure localized to a field of a type.
    #[error("in field `{field}` of `{ty}`: {source}")]
    InField {
        ty: Name,
        field: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Creates an [`Error::Custom`].
    pub fn custom(msg: impl core::fmt::Display) -> Self {
        Self::Custom(msg.to_string())
    }

    /// Creates an [`Error::TypeMismatch`].
    pub fn mismatch(expected: impl Into<Name>, found: &'static str) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found,
        }
    }

    /// Wraps the error with the field it was raised in.
    pub fn in_field(self, ty: impl Into<Name>, field: impl Into<String>) -> Self {
        Self::InField {
            ty: ty.into(),
            field: field.into(),
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, skipping [`Error::InField`] wrappers.
    pub fn root(&self) -> &Error {
        let mut err = self;
        while let Self::InField { source, .. } = err {
            err = source;
        }
        err
    }

    /// Returns the field path leading to the innermost error, outermost first.
    pub fn field_path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        let mut err = self;
        while let Self::InField { field, source, .. } = err {
            path.push(field.as_str());
            err = source;
        }
        path
    }
}
