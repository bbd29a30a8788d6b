use crate::info::{Ty, TypeInfo, Typed};
use crate::object::cast_ref;
use crate::registry::{Registry, Strategy};
use crate::value::Value;
use crate::{AutoDict, Error, Object, Options};

// -----------------------------------------------------------------------------
// Dictable

/// A type that converts itself.
///
/// Deriving with `#[autodict(dictable)]` attaches [`encode_self`] and
/// [`decode_self`] to the type's descriptor: they take precedence over any
/// registered strategy, and the type is submitted to
/// [`Registry::auto_register`] under its declared name.
///
/// Both hooks default to the native provider of the type's shape, so an
/// empty `impl` only buys the registration and the convenience methods.
///
/// ```
/// # extern crate autodict_core as autodict;
/// use autodict_core::prelude::*;
///
/// #[derive(Record, Clone, PartialEq, Debug)]
/// #[autodict(dictable)]
/// struct Celsius {
///     degrees: f64,
/// }
///
/// impl Dictable for Celsius {
///     fn encode_self(&self, _: &Options) -> Result<Value, Error> {
///         Ok(Value::Str(format!("{}C", self.degrees)))
///     }
///
///     fn decode_self(tree: Value, _: &Options) -> Result<Self, Error> {
///         let degrees = tree
///             .as_str()
///             .and_then(|s| s.strip_suffix('C'))
///             .and_then(|s| s.parse().ok())
///             .ok_or_else(|| Error::custom("expected a temperature such as `21.5C`"))?;
///         Ok(Self { degrees })
///     }
/// }
///
/// let registry = Registry::empty();
/// let tree = Celsius { degrees: 21.5 }.to_dict(&registry, &Options::new()).unwrap();
/// assert_eq!(tree, Value::Str("21.5C".into()));
/// assert_eq!(
///     Celsius::from_dict(&registry, tree, &Options::new()).unwrap(),
///     Celsius { degrees: 21.5 },
/// );
/// ```
///
/// [`encode_self`]: Dictable::encode_self
/// [`decode_self`]: Dictable::decode_self
pub trait Dictable: Object + Typed + Sized {
    /// Converts `self` to a tree, without recursion.
    fn encode_self(&self, options: &Options) -> Result<Value, Error> {
        (Strategy::default_for(Self::type_info()).encode)(self, options)
    }

    /// Builds an instance from a tree whose items are already decoded and
    /// whose type tag is removed.
    fn decode_self(tree: Value, options: &Options) -> Result<Self, Error> {
        let info = Self::type_info();
        let value = (Strategy::default_for(info).decode)(info, tree, options)?;
        take::<Self>(info, value)
    }

    /// Converts `self` with the engine, see [`AutoDict::to_dict`].
    fn to_dict(&self, registry: &Registry, options: &Options) -> Result<Value, Error> {
        AutoDict::new(registry).to_dict(Value::Object(self.clone_object()), options)
    }

    /// Builds an instance with the engine, see [`AutoDict::from_dict`].
    fn from_dict(registry: &Registry, tree: Value, options: &Options) -> Result<Self, Error> {
        let value = AutoDict::new(registry).from_dict(tree, &Ty::named::<Self>(), options)?;
        take::<Self>(Self::type_info(), value)
    }
}

fn take<T: Object>(info: &TypeInfo, value: Value) -> Result<T, Error> {
    value
        .take_object::<T>()
        .map_err(|other| Error::mismatch(info.name(), other.kind_name()))
}

// -----------------------------------------------------------------------------
// Own strategy

fn encode_own<T: Dictable>(object: &dyn Object, options: &Options) -> Result<Value, Error> {
    cast_ref::<T>(object)?.encode_self(options)
}

fn decode_own<T: Dictable>(_: &'static TypeInfo, tree: Value, options: &Options) -> Result<Value, Error> {
    T::decode_self(tree, options).map(Value::object)
}

/// The [`Strategy`] calling the hooks of `T`.
pub fn own_strategy<T: Dictable>() -> Strategy {
    Strategy::new(encode_own::<T>, decode_own::<T>)
}
