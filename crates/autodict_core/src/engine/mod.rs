//! The conversion engine.
//!
//! [`AutoDict`] borrows a [`Registry`] and converts in both directions:
//!
//! - [`AutoDict::to_dict`]: instance to tree. Picks a strategy for the
//!   instance's type, converts the items of the result, then embeds the type
//!   tag.
//! - [`AutoDict::from_dict`]: tree to instance. Reads the type tag, converts
//!   the items against their declared types, then builds the instance with
//!   the strategy of the target type.
//!
//! Strategies are picked in this order: the type's own hooks
//! ([`Dictable`](crate::Dictable)), the registered strategy, the native
//! provider for records, enumerations and named tuples. Built-in values pass
//! through, and so does everything else when [`Options::strict`] is off.
//!
//! The engine holds no state besides the registry reference, calls are
//! reentrant and any number of them can share a registry.

use crate::info::Ty;
use crate::registry::Registry;
use crate::value::Value;
use crate::{Error, Options};

// -----------------------------------------------------------------------------
// Modules

mod from_dict;
mod to_dict;

#[cfg(test)]
mod tests;

// -----------------------------------------------------------------------------
// AutoDict

/// Converts between instances and trees using a [`Registry`].
///
/// ```
/// use autodict_core::info::Ty;
/// use autodict_core::registry::Registry;
/// use autodict_core::{AutoDict, Options, Value};
/// use std::path::PathBuf;
///
/// let registry = Registry::new();
/// let engine = AutoDict::new(&registry);
///
/// let tree = engine.encode(&vec![PathBuf::from("a.txt")], &Options::new()).unwrap();
/// assert_eq!(tree.to_string(), r#"["a.txt"]"#);
///
/// let paths: Vec<PathBuf> = engine.decode(tree, &Options::new()).unwrap();
/// assert_eq!(paths, [PathBuf::from("a.txt")]);
/// ```
#[derive(Clone, Copy)]
pub struct AutoDict<'a> {
    registry: &'a Registry,
}

impl<'a> AutoDict<'a> {
    #[inline]
    pub const fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    #[inline]
    pub const fn registry(&self) -> &'a Registry {
        self.registry
    }
}

impl core::fmt::Debug for AutoDict<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AutoDict")
            .field("registered", &self.registry.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Free functions

/// Shorthand for [`AutoDict::to_dict`].
#[inline]
pub fn to_dict(registry: &Registry, value: Value, options: &Options) -> Result<Value, Error> {
    AutoDict::new(registry).to_dict(value, options)
}

/// Shorthand for [`AutoDict::from_dict`].
#[inline]
pub fn from_dict(
    registry: &Registry,
    tree: Value,
    ty: &Ty,
    options: &Options,
) -> Result<Value, Error> {
    AutoDict::new(registry).from_dict(tree, ty, options)
}
