use proc_macro2::TokenStream;

use crate::derive_data::DeriveMeta;

/// Generates the submission read by `Registry::auto_register`.
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(meta: &DeriveMeta) -> TokenStream {
    use quote::quote;

    if !meta.attrs.submits() {
        return TokenStream::new();
    }

    let autodict = crate::path::autodict();
    let auto_register_ = crate::path::auto_register_(&autodict);
    let ident = meta.ident;

    quote! {
        #[allow(unsafe_code)]
        const _: () = {
            fn __autodict_register(registry: &mut #autodict::registry::Registry) {
                registry.register::<#ident>();
            }

            #auto_register_::inventory::submit! {
                #auto_register_::AutoRegistration(__autodict_register)
            }
        };
    }
}

/// Generates the submission read by `Registry::auto_register`.
#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_: &DeriveMeta) -> TokenStream {
    TokenStream::new()
}
