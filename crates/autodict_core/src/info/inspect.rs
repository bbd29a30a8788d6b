//! Predicates and decompositions over declared types.
//!
//! All functions are pure and return a neutral answer (`false`, `None`, the
//! given defaults) when a question does not apply.

use crate::info::{Shape, Ty, TypeInfo};
use crate::value::{Kind, Layout, Value};

/// The outer constructor of a generic type expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Container(Kind),
    Union,
    Literal,
}

/// Depth limit when walking declared base types.
const MAX_BASE_DEPTH: usize = 32;

/// Returns `true` for primitives, `Any`, `None`, containers, unions and literals.
pub fn is_builtin(ty: &Ty) -> bool {
    !matches!(ty, Ty::Named(_) | Ty::Ref(_))
}

/// Returns `true` for parameterized containers, unions and literals.
pub fn is_generic(ty: &Ty) -> bool {
    match ty {
        Ty::Container { args, .. } => args.is_some(),
        Ty::Union(_) | Ty::Literal(_) => true,
        _ => false,
    }
}

/// Returns the outer constructor of containers, unions and literals.
///
/// Bare containers have an origin too: their arguments default to `Any`.
pub fn generic_origin(ty: &Ty) -> Option<Origin> {
    match ty {
        Ty::Container { kind, .. } => Some(Origin::Container(*kind)),
        Ty::Union(_) => Some(Origin::Union),
        Ty::Literal(_) => Some(Origin::Literal),
        _ => None,
    }
}

/// Returns the type arguments of a container or the members of a union,
/// `defaults` for bare containers and everything else.
pub fn generic_type_args<'a>(ty: &'a Ty, defaults: &'a [Ty]) -> &'a [Ty] {
    match ty {
        Ty::Container {
            args: Some(args), ..
        } => args,
        Ty::Union(members) => members,
        _ => defaults,
    }
}

#[inline]
pub fn is_generic_collection(ty: &Ty) -> bool {
    matches!(ty, Ty::Container { .. })
}

#[inline]
pub fn is_generic_union(ty: &Ty) -> bool {
    matches!(ty, Ty::Union(_))
}

/// Returns `true` for unions admitting `None`.
pub fn is_generic_optional(ty: &Ty) -> bool {
    match ty {
        Ty::Union(members) => members.iter().any(|m| matches!(m, Ty::Null)),
        _ => false,
    }
}

#[inline]
pub fn is_generic_literal(ty: &Ty) -> bool {
    matches!(ty, Ty::Literal(_))
}

/// Returns `true` if the named type exposes field types: records, named
/// tuples and annotated attribute-bag types.
pub fn is_record_like(ty: &Ty) -> bool {
    ty.info().is_some_and(is_record_like_info)
}

pub fn is_record_like_info(info: &TypeInfo) -> bool {
    match info.shape() {
        Shape::Record(_) | Shape::Tuple(_) => true,
        Shape::Object(object) => !object.annotations().is_empty(),
        Shape::Enum(_) | Shape::Opaque => false,
    }
}

pub fn is_tuple_like(ty: &Ty) -> bool {
    ty.info().is_some_and(|info| info.as_tuple().is_some())
}

pub fn is_enum(ty: &Ty) -> bool {
    ty.info().is_some_and(|info| info.as_enum().is_some())
}

/// Returns the declared type of a field or annotation.
///
/// Annotations of attribute-bag types are also looked up under the key with
/// its hidden-member prefix removed.
pub fn field_type<'a>(info: &'a TypeInfo, key: &str) -> Option<&'a Ty> {
    match info.shape() {
        Shape::Record(record) => record.field(key).map(|field| field.ty()),
        Shape::Tuple(tuple) => tuple.field(key).map(|field| field.ty()),
        Shape::Object(object) => object
            .annotation(key)
            .or_else(|| object.annotation(strip_hidden_member_prefix(info, key))),
        Shape::Enum(_) | Shape::Opaque => None,
    }
}

/// Normalizes a hidden member name to its public form.
///
/// `_Type__field` becomes `field` when `Type` is the type or one of its
/// declared bases, any other `_field` loses exactly one underscore. Names
/// without a leading underscore are returned as is.
///
/// ```
/// use autodict_core::info::inspect::strip_hidden_member_prefix;
/// use autodict_core::info::{Shape, TypeInfo};
///
/// let info = TypeInfo::new::<()>("Account", Shape::Opaque);
/// assert_eq!(strip_hidden_member_prefix(&info, "_Account__balance"), "balance");
/// assert_eq!(strip_hidden_member_prefix(&info, "_owner"), "owner");
/// assert_eq!(strip_hidden_member_prefix(&info, "_Other__id"), "Other__id");
/// assert_eq!(strip_hidden_member_prefix(&info, "id"), "id");
/// ```
pub fn strip_hidden_member_prefix<'a>(info: &TypeInfo, key: &'a str) -> &'a str {
    let Some(rest) = key.strip_prefix('_') else {
        return key;
    };
    let mut current = Some(info);
    let mut depth = 0;
    while let Some(ty) = current
        && depth < MAX_BASE_DEPTH
    {
        if let Some(field) = rest
            .strip_prefix(ty.name())
            .and_then(|s| s.strip_prefix("__"))
            && !field.is_empty()
        {
            return field;
        }
        current = ty.base();
        depth += 1;
    }
    rest
}

/// Returns `true` if a built-in type could describe `value`.
///
/// Named types and `Any` accept everything, they are settled by trying.
/// Primitives only accept their own kind: an integer is not a float.
pub fn accepts_kind(ty: &Ty, value: &Value) -> bool {
    match (ty, value) {
        (Ty::Any | Ty::Named(_) | Ty::Ref(_), _) => true,
        (Ty::Null, Value::Null) => true,
        (Ty::Bool, Value::Bool(_)) => true,
        (Ty::Int, Value::Int(_)) => true,
        (Ty::Float, Value::Float(_)) => true,
        (Ty::Str, Value::Str(_)) => true,
        (Ty::Container { kind, .. }, Value::List(_)) => kind.layout() != Layout::Map,
        (Ty::Container { kind, .. }, Value::Map(_)) => kind.layout() == Layout::Map,
        (Ty::Union(members), _) => members.iter().any(|m| accepts_kind(m, value)),
        (Ty::Literal(values), _) => values.iter().any(|v| v.matches(value)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::{Literal, ObjectInfo, TypeInfoCell, Typed};
    use crate::value::{List, Map};
    use crate::{Error, Object};

    #[derive(Clone, PartialEq, Debug)]
    struct Base;

    #[derive(Clone, PartialEq, Debug)]
    struct Derived;

    fn construct(_: crate::info::Arguments) -> Result<Box<dyn Object>, Error> {
        Ok(Box::new(Base))
    }

    fn attributes(_: &dyn Object) -> Result<Map, Error> {
        Ok(Map::new())
    }

    fn set_attribute(_: &mut dyn Object, _: &str, _: Value) -> Result<(), Error> {
        Ok(())
    }

    impl Typed for Base {
        fn type_info() -> &'static TypeInfo {
            static CELL: TypeInfoCell = TypeInfoCell::new();
            CELL.get_or_init(|| {
                TypeInfo::new::<Self>(
                    "Base",
                    Shape::Object(
                        ObjectInfo::new(construct, attributes, set_attribute)
                            .with_annotation("secret", Ty::Int),
                    ),
                )
            })
        }
    }

    impl Typed for Derived {
        fn type_info() -> &'static TypeInfo {
            static CELL: TypeInfoCell = TypeInfoCell::new();
            CELL.get_or_init(|| {
                TypeInfo::new::<Self>(
                    "Derived",
                    Shape::Object(
                        ObjectInfo::new(construct, attributes, set_attribute)
                            .with_base(crate::info::TypeRef::of::<Base>()),
                    ),
                )
            })
        }
    }

    #[test]
    fn hidden_prefix_walks_bases() {
        let info = Derived::type_info();
        assert_eq!(strip_hidden_member_prefix(info, "_Derived__a"), "a");
        assert_eq!(strip_hidden_member_prefix(info, "_Base__b"), "b");
        assert_eq!(strip_hidden_member_prefix(info, "_Unrelated__c"), "Unrelated__c");
        assert_eq!(strip_hidden_member_prefix(info, "__d"), "_d");
    }

    #[test]
    fn annotations_make_record_like() {
        assert!(is_record_like(&Ty::named::<Base>()));
        assert!(!is_record_like(&Ty::named::<Derived>()));
        assert_eq!(field_type(Base::type_info(), "_Base__secret"), Some(&Ty::Int));
    }

    #[test]
    fn generic_decomposition() {
        let ty = Ty::map(Ty::Str, Ty::Int);
        assert!(is_generic(&ty));
        assert_eq!(generic_origin(&ty), Some(Origin::Container(Kind::MAP)));
        assert_eq!(generic_type_args(&ty, &[]), [Ty::Str, Ty::Int]);

        let bare = Ty::bare(Kind::LIST);
        assert!(!is_generic(&bare));
        assert!(is_generic_collection(&bare));
        assert_eq!(generic_type_args(&bare, &[Ty::Any]), [Ty::Any]);

        assert!(is_generic_optional(&Ty::optional(Ty::Str)));
        assert!(!is_generic_optional(&Ty::union([Ty::Str, Ty::Int])));
        assert!(is_builtin(&Ty::literal([Literal::Int(1)])));
        assert!(!is_builtin(&Ty::by_name("Point")));
    }

    #[test]
    fn kind_prefilter() {
        let list = Value::List(List::new(Kind::LIST));
        assert!(accepts_kind(&Ty::list(Ty::Str), &list));
        assert!(!accepts_kind(&Ty::Str, &list));
        assert!(accepts_kind(&Ty::named::<Base>(), &list));
        assert!(!accepts_kind(&Ty::Float, &Value::Int(3)));
        assert!(accepts_kind(&Ty::Float, &Value::Float(3.0)));
        assert!(!accepts_kind(&Ty::Int, &Value::Bool(true)));
    }
}
