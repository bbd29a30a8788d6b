//! Parsed derive input.

// -----------------------------------------------------------------------------
// Modules

mod attributes;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{FieldAttributes, FieldDefault, TypeAttributes, VariantAttributes};

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::spanned::Spanned;
use syn::{DeriveInput, Expr, ExprLit, ExprUnary, Fields, Ident, Lit, Member, Type, UnOp};

// -----------------------------------------------------------------------------
// DeriveMeta

/// What every derive needs: the type, its declared name and its attributes.
pub(crate) struct DeriveMeta<'a> {
    pub ident: &'a Ident,
    pub attrs: TypeAttributes,
}

impl<'a> DeriveMeta<'a> {
    pub fn new(ast: &'a DeriveInput) -> syn::Result<Self> {
        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new(
                ast.generics.span(),
                "generic types cannot be described, derive on a concrete type instead",
            ));
        }
        Ok(Self {
            ident: &ast.ident,
            attrs: TypeAttributes::parse_attrs(&ast.attrs)?,
        })
    }

    /// The declared name, a string literal token.
    pub fn name(&self) -> TokenStream {
        match &self.attrs.name {
            Some(name) => quote!(#name),
            None => {
                let name = self.ident.to_string();
                quote!(#name)
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Fields

/// A struct field, named or positional.
pub(crate) struct FieldData<'a> {
    pub member: Member,
    pub ty: &'a Type,
    /// The key in the tree.
    pub name: String,
    pub attrs: FieldAttributes,
    pub span: Span,
}

impl<'a> FieldData<'a> {
    pub fn parse_all(fields: &'a Fields) -> syn::Result<Vec<Self>> {
        fields
            .iter()
            .enumerate()
            .map(|(index, field)| {
                let attrs = FieldAttributes::parse_attrs(&field.attrs)?;
                let member = match &field.ident {
                    Some(ident) => Member::Named(ident.clone()),
                    None => Member::Unnamed(index.into()),
                };
                let name = match (&attrs.rename, &field.ident) {
                    (Some(rename), _) => rename.value(),
                    (None, Some(ident)) => ident.to_string(),
                    (None, None) => index.to_string(),
                };
                Ok(Self {
                    member,
                    ty: &field.ty,
                    name,
                    attrs,
                    span: field.span(),
                })
            })
            .collect()
    }
}

// -----------------------------------------------------------------------------
// Variants

/// The literal value of an enumeration member.
pub(crate) enum VariantValue {
    Int(i64),
    Str(String),
    Bool(bool),
}

/// A unit variant of an enumeration.
pub(crate) struct VariantData<'a> {
    pub ident: &'a Ident,
    /// The member's name in the tree.
    pub name: String,
    pub value: VariantValue,
}

impl<'a> VariantData<'a> {
    /// Parses unit variants, numbering those without value like the compiler
    /// numbers discriminants.
    pub fn parse_all(
        variants: impl IntoIterator<Item = &'a syn::Variant>,
    ) -> syn::Result<Vec<Self>> {
        let mut next = 0_i64;
        let mut parsed = Vec::new();
        for variant in variants {
            if !matches!(variant.fields, Fields::Unit) {
                return Err(syn::Error::new(
                    variant.span(),
                    "only unit variants can be enumeration members",
                ));
            }
            let attrs = VariantAttributes::parse_attrs(&variant.attrs)?;
            let value = match (&attrs.value, &variant.discriminant) {
                (Some(value), _) => parse_value(value)?,
                (None, Some((_, discriminant))) => match parse_value(discriminant)? {
                    VariantValue::Int(i) => VariantValue::Int(i),
                    _ => {
                        return Err(syn::Error::new(
                            discriminant.span(),
                            "expected an integer discriminant",
                        ));
                    }
                },
                (None, None) => VariantValue::Int(next),
            };
            if let VariantValue::Int(i) = value {
                next = i.wrapping_add(1);
            }
            parsed.push(Self {
                ident: &variant.ident,
                name: match &attrs.rename {
                    Some(rename) => rename.value(),
                    None => variant.ident.to_string(),
                },
                value,
            });
        }
        Ok(parsed)
    }
}

fn parse_value(expr: &Expr) -> syn::Result<VariantValue> {
    match expr {
        Expr::Lit(ExprLit { lit, .. }) => match lit {
            Lit::Int(int) => int.base10_parse().map(VariantValue::Int),
            Lit::Str(s) => Ok(VariantValue::Str(s.value())),
            Lit::Bool(b) => Ok(VariantValue::Bool(b.value)),
            other => Err(syn::Error::new(
                other.span(),
                "expected an integer, string or boolean literal",
            )),
        },
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr,
            ..
        }) => match parse_value(expr)? {
            VariantValue::Int(i) => Ok(VariantValue::Int(-i)),
            _ => Err(syn::Error::new(expr.span(), "expected an integer literal")),
        },
        other => Err(syn::Error::new(
            other.span(),
            "expected a literal, use `#[autodict(value = ...)]`",
        )),
    }
}
