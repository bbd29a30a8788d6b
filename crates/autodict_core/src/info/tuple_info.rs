use core::fmt;

use crate::info::Ty;
use crate::value::Value;
use crate::{Error, Object};

/// One position of a named tuple.
#[derive(Clone)]
pub struct TupleField {
    name: &'static str,
    ty: Ty,
    default: Option<fn() -> Value>,
}

impl TupleField {
    #[inline]
    pub fn new(name: &'static str, ty: Ty) -> Self {
        Self {
            name,
            ty,
            default: None,
        }
    }

    #[inline]
    pub fn with_default(mut self, default: fn() -> Value) -> Self {
        self.default = Some(default);
        self
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn ty(&self) -> &Ty {
        &self.ty
    }

    #[inline]
    pub fn default_value(&self) -> Option<Value> {
        self.default.map(|f| f())
    }
}

impl fmt::Debug for TupleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TupleField")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .field("default", &self.default.is_some())
            .finish()
    }
}

/// The field table of a named tuple: positional items that also have names.
///
/// Tuple structs are described with the names `"0"`, `"1"`, ...
pub struct TupleInfo {
    fields: Vec<TupleField>,
    items: fn(&dyn Object) -> Result<Vec<Value>, Error>,
    construct: fn(Vec<Value>) -> Result<Box<dyn Object>, Error>,
}

impl TupleInfo {
    pub fn new(
        fields: Vec<TupleField>,
        items: fn(&dyn Object) -> Result<Vec<Value>, Error>,
        construct: fn(Vec<Value>) -> Result<Box<dyn Object>, Error>,
    ) -> Self {
        Self {
            fields,
            items,
            construct,
        }
    }

    #[inline]
    pub fn fields(&self) -> &[TupleField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&TupleField> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    /// Returns the items of an instance in declaration order.
    #[inline]
    pub fn items(&self, object: &dyn Object) -> Result<Vec<Value>, Error> {
        (self.items)(object)
    }

    /// Builds an instance from items in declaration order.
    #[inline]
    pub fn construct(&self, items: Vec<Value>) -> Result<Box<dyn Object>, Error> {
        (self.construct)(items)
    }
}

impl fmt::Debug for TupleInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TupleInfo")
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}
