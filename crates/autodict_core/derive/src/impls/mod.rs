// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod common;
mod enumeration;
mod record;
mod tuple;

// -----------------------------------------------------------------------------
// Internal API

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields};

use crate::derive_data::{DeriveMeta, FieldData};

use auto_register::get_auto_register_impl;
use common::{get_common_impls, impl_trait_typed};

/// `#[derive(Record)]`
pub(crate) fn impl_record(ast: &DeriveInput) -> syn::Result<TokenStream> {
    let meta = DeriveMeta::new(ast)?;
    let Data::Struct(data) = &ast.data else {
        return Err(syn::Error::new(
            ast.ident.span(),
            "`Record` can only be derived for structs, use `Enumeration` for enums",
        ));
    };
    let fields = FieldData::parse_all(&data.fields)?;

    let shape = if meta.attrs.tuple.is_some() || matches!(data.fields, Fields::Unnamed(_)) {
        tuple::get_shape(&meta, &fields)?
    } else {
        record::get_shape(&fields)
    };

    let typed = impl_trait_typed(&meta, shape);
    let common = get_common_impls(&meta);
    let auto_register = get_auto_register_impl(&meta);

    Ok(quote! {
        #typed
        #common
        #auto_register
    })
}

/// `#[derive(Enumeration)]`
pub(crate) fn impl_enumeration(ast: &DeriveInput) -> syn::Result<TokenStream> {
    let meta = DeriveMeta::new(ast)?;
    let Data::Enum(data) = &ast.data else {
        return Err(syn::Error::new(
            ast.ident.span(),
            "`Enumeration` can only be derived for enums, use `Record` for structs",
        ));
    };
    if let Some(span) = meta.attrs.tuple {
        return Err(syn::Error::new(span, "enumerations cannot be tuples"));
    }

    let shape = enumeration::get_shape(&meta, data)?;

    let typed = impl_trait_typed(&meta, shape);
    let common = get_common_impls(&meta);
    let auto_register = get_auto_register_impl(&meta);

    Ok(quote! {
        #typed
        #common
        #auto_register
    })
}
