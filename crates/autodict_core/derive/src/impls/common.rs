use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::DeriveMeta;
use crate::path;

/// Generates `Typed`, storing the descriptor built from `shape` in a static
/// cell.
pub(crate) fn impl_trait_typed(meta: &DeriveMeta, shape: TokenStream) -> TokenStream {
    let autodict = path::autodict();
    let info_ = path::info_(&autodict);
    let macro_exports_ = path::macro_exports_(&autodict);
    let ident = meta.ident;
    let name = meta.name();

    let own = match meta.attrs.dictable {
        Some(_) => quote! {
            .with_own(#macro_exports_::own_strategy::<Self>())
        },
        None => TokenStream::new(),
    };

    quote! {
        impl #info_::Typed for #ident {
            fn type_info() -> &'static #info_::TypeInfo {
                static CELL: #info_::TypeInfoCell = #info_::TypeInfoCell::new();
                CELL.get_or_init(|| {
                    #info_::TypeInfo::new::<Self>(#name, #shape) #own
                })
            }
        }
    }
}

/// Generates `Describe`, `IntoValue` and `FromValue` for a described type.
pub(crate) fn get_common_impls(meta: &DeriveMeta) -> TokenStream {
    let autodict = path::autodict();
    let info_ = path::info_(&autodict);
    let value_ = path::value_(&autodict);
    let error_ = path::error_(&autodict);
    let ident = meta.ident;

    quote! {
        impl #info_::Describe for #ident {
            #[inline]
            fn describe() -> #info_::Ty {
                #info_::Ty::named::<Self>()
            }
        }

        impl #value_::IntoValue for #ident {
            #[inline]
            fn into_value(self) -> #value_::Value {
                #value_::Value::object(self)
            }
        }

        impl #value_::FromValue for #ident {
            fn from_value(value: #value_::Value) -> ::core::result::Result<Self, #error_> {
                value.take_object::<Self>().map_err(|other| {
                    #error_::mismatch(
                        <Self as #info_::Typed>::type_info().name(),
                        other.kind_name(),
                    )
                })
            }
        }
    }
}

/// The `Value` of a missing field, as an expression of type `fn() -> Value`.
pub(crate) fn default_fn(ty: &syn::Type, expr: TokenStream) -> TokenStream {
    let autodict = path::autodict();
    let value_ = path::value_(&autodict);

    quote! {
        || -> #value_::Value {
            let value: #ty = #expr;
            #value_::IntoValue::into_value(value)
        }
    }
}
