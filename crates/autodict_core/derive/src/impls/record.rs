use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};

use crate::derive_data::{FieldData, FieldDefault};
use crate::impls::common::default_fn;
use crate::path;

/// Generates `Shape::Record(RecordInfo::new(fields, construct))`.
pub(crate) fn get_shape(fields: &[FieldData]) -> TokenStream {
    let autodict = path::autodict();
    let info_ = path::info_(&autodict);
    let value_ = path::value_(&autodict);
    let object_ = path::object_(&autodict);
    let error_ = path::error_(&autodict);

    let infos = fields.iter().map(|field| {
        let member = &field.member;
        let ty = field.ty;
        let name = &field.name;

        let declared = match &field.attrs.ty {
            Some(expr) => quote!(#expr),
            None => quote!(<#ty as #info_::Describe>::describe()),
        };

        let default = match &field.attrs.default {
            FieldDefault::None => TokenStream::new(),
            FieldDefault::Trait => {
                let f = default_fn(ty, quote!(::core::default::Default::default()));
                quote!(.with_default(#info_::FieldDefault::Static(#f)))
            }
            FieldDefault::Expr(expr) => {
                let f = default_fn(ty, quote!(#expr));
                quote!(.with_default(#info_::FieldDefault::Static(#f)))
            }
            FieldDefault::With(path) => {
                let f = default_fn(ty, quote!(#path()));
                quote!(.with_default(#info_::FieldDefault::Factory(#f)))
            }
        };

        let post_init = match field.attrs.post_init {
            Some(span) => quote_spanned! { span =>
                .post_init(|object: &mut dyn #autodict::Object, value: #value_::Value|
                    -> ::core::result::Result<(), #error_>
                {
                    let this = #object_::cast_mut::<Self>(object)?;
                    this.#member = <#ty as #value_::FromValue>::from_value(value)?;
                    ::core::result::Result::Ok(())
                })
            },
            None => TokenStream::new(),
        };

        quote! {
            #info_::FieldInfo::new(
                #name,
                #declared,
                |object: &dyn #autodict::Object| -> ::core::result::Result<#value_::Value, #error_> {
                    let this = #object_::cast_ref::<Self>(object)?;
                    ::core::result::Result::Ok(#value_::IntoValue::into_value(
                        ::core::clone::Clone::clone(&this.#member),
                    ))
                },
            )
            #default
            #post_init
        }
    });

    let inits = fields.iter().map(|field| {
        let member = &field.member;
        let ty = field.ty;
        let name = &field.name;
        match field.attrs.post_init {
            Some(_) => quote!(#member: ::core::default::Default::default()),
            None => quote!(#member: fields.take::<#ty>(#name)?),
        }
    });

    let takes = fields.iter().any(|field| field.attrs.post_init.is_none());
    let arg = if takes {
        quote!(mut fields)
    } else {
        quote!(_fields)
    };

    quote! {
        #info_::Shape::Record(#info_::RecordInfo::new(
            ::std::vec![#(#infos),*],
            |#arg: #info_::Fields| -> ::core::result::Result<::std::boxed::Box<dyn #autodict::Object>, #error_> {
                ::core::result::Result::Ok(
                    ::std::boxed::Box::new(Self { #(#inits),* }) as ::std::boxed::Box<dyn #autodict::Object>
                )
            },
        ))
    }
}
