//! See following macros:
//!
//! - [`Record`]
//! - [`Enumeration`]
#![cfg_attr(docsrs, feature(doc_cfg))]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static AUTODICT_ATTRIBUTE_NAME: &str = "autodict";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Record Derivation
///
/// `#[derive(Record)]` describes a struct so that the engine can convert it
/// without any registration. It implements:
///
/// - `Typed`, with a `Record` shape (or a `Tuple` shape, see below)
/// - `Describe`, the struct is a named type
/// - `IntoValue` / `FromValue`, the struct travels as a `Value::Object`
///
/// The struct must also be `Clone`, `PartialEq` and `Debug` to be an `Object`,
/// and every field type must implement `Describe`, `IntoValue`, `FromValue`
/// and `Clone`.
///
/// ```rust, ignore
/// #[derive(Record, Clone, PartialEq, Debug)]
/// struct Point {
///     x: i64,
///     y: i64,
/// }
/// ```
///
/// Generic structs are not supported.
///
/// ## Shapes
///
/// - `struct T { ... }`: a record, encoded as a mapping of its fields.
/// - `struct T(...);`: a named tuple whose fields are named `"0"`, `"1"`, ...
/// - `struct T;`: a record without fields.
///
/// `#[autodict(tuple)]` describes a struct with named fields as a named tuple.
///
/// ## Type attributes
///
/// - `name = "..."`: the declared name, used as the type tag. Defaults to
///   the ident.
/// - `tuple`: see above.
/// - `dictable`: the type implements `Dictable` and converts itself.
/// - `auto_register`: submit the type to `Registry::auto_register`.
///   Implied by `dictable`.
///
/// ```rust, ignore
/// #[derive(Record, Clone, PartialEq, Debug)]
/// #[autodict(name = "geometry.Point", auto_register)]
/// struct Point { x: i64, y: i64 }
/// ```
///
/// ## Field attributes
///
/// - `default`: a missing field takes `Default::default()`.
/// - `default = expr`: a missing field takes `expr`.
/// - `default_with = path`: a missing field takes `path()`, called for each
///   instance.
/// - `post_init`: the field is not passed to the constructor. It starts as
///   `Default::default()` and is assigned after construction. Records only.
/// - `ty = expr`: the declared type, an expression of type `Ty`. Overrides
///   `Describe` of the field type.
/// - `rename = "..."`: the key in the tree.
///
/// A missing field of an `Option` type is `None` without any attribute.
///
/// ```rust, ignore
/// #[derive(Record, Clone, PartialEq, Debug)]
/// struct Config {
///     #[autodict(default = 8080)]
///     port: u16,
///     #[autodict(default_with = Vec::new)]
///     hosts: Vec<String>,
///     #[autodict(rename = "log-level", ty = Ty::literal(["debug".into(), "info".into()]))]
///     log_level: String,
///     proxy: Option<String>,
/// }
/// ```
#[proc_macro_derive(Record, attributes(autodict))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    impls::impl_record(&ast)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// # Enumeration Derivation
///
/// `#[derive(Enumeration)]` describes a fieldless enum whose members carry
/// literal values. It implements the same traits as [`Record`] with an `Enum`
/// shape. Members encode to `{"value": ..., "name": ...}`.
///
/// A member's value is, in order:
///
/// - `#[autodict(value = ...)]`: an integer, string or boolean literal;
/// - its explicit discriminant;
/// - the previous integer value plus one, starting at `0`.
///
/// ```rust, ignore
/// #[derive(Enumeration, Clone, Copy, PartialEq, Debug)]
/// enum Color {
///     Red = 1,
///     Black = 2,
///     #[autodict(value = "transparent", rename = "None")]
///     Transparent,
/// }
/// ```
///
/// Type attributes are the ones of [`Record`] except `tuple`. `rename`
/// changes the member's name.
#[proc_macro_derive(Enumeration, attributes(autodict))]
pub fn derive_enumeration(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    impls::impl_enumeration(&ast)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
