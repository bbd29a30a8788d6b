use proc_macro2::TokenStream;
use quote::quote;
use syn::DataEnum;

use crate::derive_data::{DeriveMeta, VariantData, VariantValue};
use crate::path;

/// Generates `Shape::Enum(EnumInfo::new(variants, index_of, build))`.
pub(crate) fn get_shape(meta: &DeriveMeta, data: &DataEnum) -> syn::Result<TokenStream> {
    let autodict = path::autodict();
    let info_ = path::info_(&autodict);
    let object_ = path::object_(&autodict);
    let error_ = path::error_(&autodict);

    if data.variants.is_empty() {
        return Err(syn::Error::new(
            meta.ident.span(),
            "an enumeration needs at least one member",
        ));
    }
    let variants = VariantData::parse_all(&data.variants)?;

    let infos = variants.iter().map(|variant| {
        let name = &variant.name;
        let literal = match &variant.value {
            VariantValue::Int(i) => quote!(#info_::Literal::Int(#i)),
            VariantValue::Str(s) => quote!(#info_::Literal::Str(::std::borrow::Cow::Borrowed(#s))),
            VariantValue::Bool(b) => quote!(#info_::Literal::Bool(#b)),
        };
        quote!(#info_::VariantInfo::new(#name, #literal))
    });

    let idents: Vec<_> = variants.iter().map(|variant| variant.ident).collect();
    let indices: Vec<_> = (0..variants.len()).collect();

    Ok(quote! {
        #info_::Shape::Enum(#info_::EnumInfo::new(
            ::std::vec![#(#infos),*],
            |object: &dyn #autodict::Object| -> ::core::result::Result<usize, #error_> {
                ::core::result::Result::Ok(match #object_::cast_ref::<Self>(object)? {
                    #(Self::#idents => #indices,)*
                })
            },
            |index: usize| -> ::core::option::Option<::std::boxed::Box<dyn #autodict::Object>> {
                match index {
                    #(#indices => ::core::option::Option::Some(
                        ::std::boxed::Box::new(Self::#idents) as ::std::boxed::Box<dyn #autodict::Object>
                    ),)*
                    _ => ::core::option::Option::None,
                }
            },
        ))
    })
}
