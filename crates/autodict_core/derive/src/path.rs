//! Paths of the runtime items used by the generated code.
//!
//! Generated code always goes through the `autodict` facade. Inside
//! `autodict_core` itself the facade name is an alias of the crate.

use proc_macro2::TokenStream;
use quote::quote;

#[inline(always)]
pub(crate) fn autodict() -> TokenStream {
    quote!(::autodict)
}

#[inline(always)]
pub(crate) fn info_(autodict: &TokenStream) -> TokenStream {
    quote!(#autodict::info)
}

#[inline(always)]
pub(crate) fn value_(autodict: &TokenStream) -> TokenStream {
    quote!(#autodict::value)
}

#[inline(always)]
pub(crate) fn object_(autodict: &TokenStream) -> TokenStream {
    quote!(#autodict::object)
}

#[inline(always)]
pub(crate) fn error_(autodict: &TokenStream) -> TokenStream {
    quote!(#autodict::Error)
}

#[inline(always)]
pub(crate) fn macro_exports_(autodict: &TokenStream) -> TokenStream {
    quote!(#autodict::__macro_exports)
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(autodict: &TokenStream) -> TokenStream {
    quote!(#autodict::__macro_exports::auto_register)
}
