use core::fmt;

use crate::info::Literal;
use crate::value::Value;
use crate::{Error, Object};

/// A member of an enumeration: its name and its literal value.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantInfo {
    name: &'static str,
    value: Literal,
}

impl VariantInfo {
    #[inline]
    pub const fn new(name: &'static str, value: Literal) -> Self {
        Self { name, value }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn value(&self) -> &Literal {
        &self.value
    }
}

/// The members of an enumeration, in declaration order.
pub struct EnumInfo {
    variants: Vec<VariantInfo>,
    index_of: fn(&dyn Object) -> Result<usize, Error>,
    build: fn(usize) -> Option<Box<dyn Object>>,
}

impl EnumInfo {
    /// Creates the member table.
    ///
    /// `index_of` returns the position of an instance's member, `build`
    /// returns the member at a position.
    pub fn new(
        variants: Vec<VariantInfo>,
        index_of: fn(&dyn Object) -> Result<usize, Error>,
        build: fn(usize) -> Option<Box<dyn Object>>,
    ) -> Self {
        Self {
            variants,
            index_of,
            build,
        }
    }

    #[inline]
    pub fn variants(&self) -> &[VariantInfo] {
        &self.variants
    }

    #[inline]
    pub fn variant_at(&self, index: usize) -> Option<&VariantInfo> {
        self.variants.get(index)
    }

    pub fn variant_by_name(&self, name: &str) -> Option<&VariantInfo> {
        self.variants.iter().find(|v| v.name == name)
    }

    /// Returns the position of the first member whose value is `value`.
    pub fn index_by_value(&self, value: &Value) -> Option<usize> {
        self.variants.iter().position(|v| v.value.matches(value))
    }

    /// Returns the member of an instance.
    pub fn variant_of(&self, object: &dyn Object) -> Result<&VariantInfo, Error> {
        let index = (self.index_of)(object)?;
        self.variants
            .get(index)
            .ok_or_else(|| Error::custom(format_args!("no member at index {index}")))
    }

    /// Builds the member at `index`.
    #[inline]
    pub fn build(&self, index: usize) -> Option<Box<dyn Object>> {
        (self.build)(index)
    }
}

impl fmt::Debug for EnumInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumInfo")
            .field("variants", &self.variants)
            .finish_non_exhaustive()
    }
}
