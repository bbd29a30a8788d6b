use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::{DeriveMeta, FieldData, FieldDefault};
use crate::impls::common::default_fn;
use crate::path;

/// Generates `Shape::Tuple(TupleInfo::new(fields, items, construct))`.
pub(crate) fn get_shape(meta: &DeriveMeta, fields: &[FieldData]) -> syn::Result<TokenStream> {
    let autodict = path::autodict();
    let info_ = path::info_(&autodict);
    let value_ = path::value_(&autodict);
    let object_ = path::object_(&autodict);
    let error_ = path::error_(&autodict);
    let owner = meta.name();

    if let Some(field) = fields.iter().find(|field| field.attrs.post_init.is_some()) {
        return Err(syn::Error::new(
            field.span,
            "`post_init` is not supported by tuples, every item is constructed",
        ));
    }

    let infos = fields.iter().map(|field| {
        let ty = field.ty;
        let name = &field.name;

        let declared = match &field.attrs.ty {
            Some(expr) => quote!(#expr),
            None => quote!(<#ty as #info_::Describe>::describe()),
        };
        let default = match &field.attrs.default {
            FieldDefault::None => None,
            FieldDefault::Trait => Some(default_fn(ty, quote!(::core::default::Default::default()))),
            FieldDefault::Expr(expr) => Some(default_fn(ty, quote!(#expr))),
            FieldDefault::With(path) => Some(default_fn(ty, quote!(#path()))),
        }
        .map(|f| quote!(.with_default(#f)));

        quote!(#info_::TupleField::new(#name, #declared) #default)
    });

    let members = fields.iter().map(|field| &field.member);

    let inits = fields.iter().map(|field| {
        let member = &field.member;
        let ty = field.ty;
        let name = &field.name;
        quote! {
            #member: <#ty as #value_::FromValue>::from_value(
                ::core::iter::Iterator::next(&mut items).unwrap_or_default(),
            )
            .map_err(|e| e.in_field(#owner, #name))?
        }
    });

    let arg = if fields.is_empty() {
        quote!(_items)
    } else {
        quote!(items)
    };
    let iter = if fields.is_empty() {
        TokenStream::new()
    } else {
        quote!(let mut items = ::core::iter::IntoIterator::into_iter(items);)
    };
    let this = if fields.is_empty() {
        quote!(_)
    } else {
        quote!(this)
    };

    Ok(quote! {
        #info_::Shape::Tuple(#info_::TupleInfo::new(
            ::std::vec![#(#infos),*],
            |object: &dyn #autodict::Object| -> ::core::result::Result<::std::vec::Vec<#value_::Value>, #error_> {
                let #this = #object_::cast_ref::<Self>(object)?;
                ::core::result::Result::Ok(::std::vec![
                    #(#value_::IntoValue::into_value(::core::clone::Clone::clone(&this.#members))),*
                ])
            },
            |#arg: ::std::vec::Vec<#value_::Value>| -> ::core::result::Result<::std::boxed::Box<dyn #autodict::Object>, #error_> {
                #iter
                ::core::result::Result::Ok(
                    ::std::boxed::Box::new(Self { #(#inits),* }) as ::std::boxed::Box<dyn #autodict::Object>
                )
            },
        ))
    })
}
