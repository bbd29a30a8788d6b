use proc_macro2::Span;
use syn::spanned::Spanned;
use syn::{Attribute, Expr, LitStr, Path, Token};

use crate::AUTODICT_ATTRIBUTE_NAME;

/// Iterates over the `#[autodict(...)]` attributes.
fn autodict_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident(AUTODICT_ATTRIBUTE_NAME))
}

// -----------------------------------------------------------------------------
// TypeAttributes

/// Type-level attributes.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    /// `name = "..."`: the declared name, the type's ident otherwise.
    pub name: Option<LitStr>,
    /// `tuple`: describe a struct with named fields as a named tuple.
    pub tuple: Option<Span>,
    /// `dictable`: attach the `Dictable` hooks.
    pub dictable: Option<Span>,
    /// `auto_register`: submit the type to `Registry::auto_register`.
    pub auto_register: Option<Span>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in autodict_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    this.name = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("tuple") {
                    this.tuple = Some(meta.path.span());
                } else if meta.path.is_ident("dictable") {
                    this.dictable = Some(meta.path.span());
                } else if meta.path.is_ident("auto_register") {
                    this.auto_register = Some(meta.path.span());
                } else {
                    return Err(meta.error(
                        "unknown type attribute, expected `name`, `tuple`, `dictable` or `auto_register`",
                    ));
                }
                Ok(())
            })?;
        }
        Ok(this)
    }

    /// Returns `true` if the type submits itself for `auto_register`.
    #[inline]
    pub fn submits(&self) -> bool {
        self.auto_register.is_some() || self.dictable.is_some()
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// The fallback of a field absent from the tree.
pub(crate) enum FieldDefault {
    None,
    /// `default`
    Trait,
    /// `default = expr`
    Expr(Expr),
    /// `default_with = path`
    With(Path),
}

/// Field-level attributes.
pub(crate) struct FieldAttributes {
    pub default: FieldDefault,
    /// `post_init`: assigned after construction instead of passed to it.
    pub post_init: Option<Span>,
    /// `ty = expr`: the declared type, overriding `Describe`.
    pub ty: Option<Expr>,
    /// `rename = "..."`: the key in the tree.
    pub rename: Option<LitStr>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self {
            default: FieldDefault::None,
            post_init: None,
            ty: None,
            rename: None,
        };
        for attr in autodict_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("default") {
                    this.default = if meta.input.peek(Token![=]) {
                        FieldDefault::Expr(meta.value()?.parse()?)
                    } else {
                        FieldDefault::Trait
                    };
                } else if meta.path.is_ident("default_with") {
                    this.default = FieldDefault::With(meta.value()?.parse()?);
                } else if meta.path.is_ident("post_init") {
                    this.post_init = Some(meta.path.span());
                } else if meta.path.is_ident("ty") {
                    this.ty = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("rename") {
                    this.rename = Some(meta.value()?.parse()?);
                } else {
                    return Err(meta.error(
                        "unknown field attribute, expected `default`, `default_with`, `post_init`, `ty` or `rename`",
                    ));
                }
                Ok(())
            })?;
        }
        Ok(this)
    }
}

// -----------------------------------------------------------------------------
// VariantAttributes

/// Variant-level attributes of an enumeration.
#[derive(Default)]
pub(crate) struct VariantAttributes {
    /// `value = literal`: the member's value, its discriminant otherwise.
    pub value: Option<Expr>,
    /// `rename = "..."`: the member's name in the tree.
    pub rename: Option<LitStr>,
}

impl VariantAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in autodict_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("value") {
                    this.value = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("rename") {
                    this.rename = Some(meta.value()?.parse()?);
                } else {
                    return Err(meta.error("unknown variant attribute, expected `value` or `rename`"));
                }
                Ok(())
            })?;
        }
        Ok(this)
    }
}
