//! Built-in strategies.
//!
//! ## Menu
//!
//! - [`record`]: records, exactly the declared fields.
//! - [`enumeration`]: enumerations as `{value, name}`.
//! - [`tuple`]: named tuples, as a mapping or a positional tuple.
//! - [`object`]: attribute bags, through their constructor parameter table.
//! - [`path`]: `PathBuf` as a string.
//! - [`serde_strategy`]: leaves that already implement `serde`.
//! - [`unable_to_dict`] / [`unable_from_dict`]: stubs that always fail.
//!
//! Strategies never recurse: encoders may leave instances in their result and
//! decoders receive their items already decoded. Recursion is the engine's job.

use crate::info::TypeInfo;
use crate::value::Value;
use crate::{Error, Object, Options};

// -----------------------------------------------------------------------------
// Modules

pub mod enumeration;
pub mod object;
pub mod path;
pub mod record;
pub mod tuple;

mod serde;

// -----------------------------------------------------------------------------
// Exports

pub use self::serde::serde_strategy;

// -----------------------------------------------------------------------------
// Stubs

/// An encode strategy that always fails with [`Error::UnableToDict`].
pub fn unable_to_dict(object: &dyn Object, _: &Options) -> Result<Value, Error> {
    Err(Error::UnableToDict(object.object_type().name().into()))
}

/// A decode strategy that always fails with [`Error::UnableFromDict`].
pub fn unable_from_dict(info: &'static TypeInfo, _: Value, _: &Options) -> Result<Value, Error> {
    Err(Error::UnableFromDict(info.name().into()))
}

/// Returns the mapping a decoder expects, or a mismatch naming `info`.
pub(crate) fn expect_map(info: &TypeInfo, value: Value) -> Result<crate::value::Map, Error> {
    match value {
        Value::Map(map) => Ok(map),
        other => Err(Error::mismatch(info.name(), other.kind_name())),
    }
}
