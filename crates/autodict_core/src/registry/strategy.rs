use core::fmt;

use crate::info::{Shape, TypeInfo};
use crate::value::Value;
use crate::{Error, Object, Options, provider};

/// Converts an instance to a tree, without recursion.
///
/// The result may still hold [`Value::Object`]s: the engine converts them
/// afterwards when encoding recursively.
pub type EncodeFn = fn(&dyn Object, &Options) -> Result<Value, Error>;

/// Builds an instance of `info` from a tree whose items are already decoded.
///
/// The type tag is removed before the tree is handed over. The result is
/// expected to be a [`Value::Object`] of the described type.
pub type DecodeFn = fn(&'static TypeInfo, Value, &Options) -> Result<Value, Error>;

/// A pair of encode/decode functions for one type.
#[derive(Clone, Copy)]
pub struct Strategy {
    pub encode: EncodeFn,
    pub decode: DecodeFn,
}

impl Strategy {
    #[inline]
    pub const fn new(encode: EncodeFn, decode: DecodeFn) -> Self {
        Self { encode, decode }
    }

    /// The strategy used when a registration leaves a half unspecified.
    ///
    /// Records, enumerations and named tuples use their native providers,
    /// attribute bags the generic object provider, opaque types fail.
    pub fn default_for(info: &TypeInfo) -> Self {
        match info.shape() {
            Shape::Record(_) => Self::new(provider::record::encode, provider::record::decode),
            Shape::Enum(_) => {
                Self::new(provider::enumeration::encode, provider::enumeration::decode)
            }
            Shape::Tuple(_) => Self::new(provider::tuple::encode, provider::tuple::decode),
            Shape::Object(_) => Self::new(provider::object::encode, provider::object::decode),
            Shape::Opaque => Self::UNABLE,
        }
    }

    /// Both halves fail.
    pub const UNABLE: Self = Self::new(provider::unable_to_dict, provider::unable_from_dict);
}

impl fmt::Debug for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Strategy").finish_non_exhaustive()
    }
}
