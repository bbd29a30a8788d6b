#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// The derive macros emit `::autodict::...` paths. The facade crate re-exports
// this crate under that name; inside this crate (tests, doc tests) the alias
// below makes the same paths resolve.
extern crate self as autodict;

// -----------------------------------------------------------------------------
// Modules

mod dictable;
mod error;
mod hash;
mod options;

pub mod container;
pub mod engine;
pub mod info;
pub mod object;
pub mod provider;
pub mod registry;
pub mod value;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use autodict_derive as derive;
pub use dictable::Dictable;
pub use engine::{AutoDict, from_dict, to_dict};
pub use error::Error;
pub use object::Object;
pub use options::Options;
pub use value::{TYPE_TAG, Value};

/// Commonly used items.
pub mod prelude {
    pub use crate::derive::{Enumeration, Record};
    pub use crate::info::{Describe, Ty, Typed};
    pub use crate::registry::{Registration, Registry};
    pub use crate::value::{FromValue, IntoValue, Map, Value};
    pub use crate::{AutoDict, Dictable, Error, Options};
}
