use core::fmt;

use crate::error::Name;
use crate::info::TypeInfo;
use crate::registry::{DecodeFn, EncodeFn, Strategy};

// -----------------------------------------------------------------------------
// Registration

/// What to register for a type.
///
/// Unspecified parts take defaults: the declared name, and the strategy
/// halves of [`Strategy::default_for`].
///
/// ```
/// use autodict_core::registry::Registration;
/// # use autodict_core::{Error, Object, Options, Value};
/// # fn encode(_: &dyn Object, _: &Options) -> Result<Value, Error> { Ok(Value::Null) }
///
/// let registration = Registration::new().name("legacy.Point").encode(encode);
/// ```
#[derive(Clone, Copy, Default)]
pub struct Registration {
    name: Option<&'static str>,
    unnamed: bool,
    encode: Option<EncodeFn>,
    decode: Option<DecodeFn>,
}

impl Registration {
    #[inline]
    pub const fn new() -> Self {
        Self {
            name: None,
            unnamed: false,
            encode: None,
            decode: None,
        }
    }

    /// Registers under `name` instead of the declared name.
    #[inline]
    pub const fn name(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self.unnamed = false;
        self
    }

    /// Registers without a name: instances encode, but cannot be tagged.
    #[inline]
    pub const fn unnamed(mut self) -> Self {
        self.name = None;
        self.unnamed = true;
        self
    }

    #[inline]
    pub const fn encode(mut self, encode: EncodeFn) -> Self {
        self.encode = Some(encode);
        self
    }

    #[inline]
    pub const fn decode(mut self, decode: DecodeFn) -> Self {
        self.decode = Some(decode);
        self
    }

    /// Sets both halves.
    #[inline]
    pub const fn strategy(self, strategy: Strategy) -> Self {
        self.encode(strategy.encode).decode(strategy.decode)
    }

    pub(crate) fn resolved_name(&self, info: &TypeInfo) -> Option<Name> {
        match (self.unnamed, self.name) {
            (true, _) => None,
            (false, Some(name)) => Some(Name::Borrowed(name)),
            (false, None) => Some(Name::Borrowed(info.name())),
        }
    }

    pub(crate) fn encode_fn(&self) -> Option<EncodeFn> {
        self.encode
    }

    pub(crate) fn decode_fn(&self) -> Option<DecodeFn> {
        self.decode
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("unnamed", &self.unnamed)
            .field("encode", &self.encode.is_some())
            .field("decode", &self.decode.is_some())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// StrategyEntry

/// A registered type: its descriptor, the name tags refer to it by, and its
/// strategy.
#[derive(Clone)]
pub struct StrategyEntry {
    info: &'static TypeInfo,
    name: Option<Name>,
    strategy: Strategy,
}

impl StrategyEntry {
    pub(crate) fn new(info: &'static TypeInfo, name: Option<Name>, strategy: Strategy) -> Self {
        Self {
            info,
            name,
            strategy,
        }
    }

    #[inline]
    pub fn info(&self) -> &'static TypeInfo {
        self.info
    }

    /// The registered name, `None` for unnamed registrations.
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    #[inline]
    pub fn encode(&self) -> EncodeFn {
        self.strategy.encode
    }

    #[inline]
    pub fn decode(&self) -> DecodeFn {
        self.strategy.decode
    }

    pub(crate) fn set_encode(&mut self, encode: EncodeFn) {
        self.strategy.encode = encode;
    }

    pub(crate) fn set_decode(&mut self, decode: DecodeFn) {
        self.strategy.decode = decode;
    }
}

impl fmt::Debug for StrategyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrategyEntry")
            .field("type", &self.info.name())
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
