use core::fmt;

use crate::info::{Ty, TypeRef};
use crate::value::{FromValue, Map, Value};
use crate::{Error, Object};

// -----------------------------------------------------------------------------
// Parameters

/// How a constructor parameter binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// Bound by name, passed by position.
    Positional,
    /// Bound by name, passed by keyword.
    Keyword,
    /// Collects extra positional values.
    VarPositional,
    /// Collects keys no other parameter consumed.
    VarKeyword,
}

/// One constructor parameter of an attribute-bag type.
#[derive(Clone, Copy)]
pub struct ParamInfo {
    name: &'static str,
    kind: ParamKind,
    default: Option<fn() -> Value>,
}

impl ParamInfo {
    #[inline]
    pub const fn new(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            kind,
            default: None,
        }
    }

    #[inline]
    pub const fn positional(name: &'static str) -> Self {
        Self::new(name, ParamKind::Positional)
    }

    #[inline]
    pub const fn keyword(name: &'static str) -> Self {
        Self::new(name, ParamKind::Keyword)
    }

    #[inline]
    pub const fn var_positional(name: &'static str) -> Self {
        Self::new(name, ParamKind::VarPositional)
    }

    #[inline]
    pub const fn var_keyword(name: &'static str) -> Self {
        Self::new(name, ParamKind::VarKeyword)
    }

    #[inline]
    pub const fn with_default(mut self, default: fn() -> Value) -> Self {
        self.default = Some(default);
        self
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    #[inline]
    pub fn default_value(&self) -> Option<Value> {
        self.default.map(|f| f())
    }
}

impl fmt::Debug for ParamInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamInfo")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("default", &self.default.is_some())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Arguments

/// The arguments bound to a constructor's parameters.
#[derive(Debug)]
pub struct Arguments {
    owner: &'static str,
    bound: Map,
    var_positional: Vec<Value>,
    var_keyword: Map,
}

impl Arguments {
    pub fn new(owner: &'static str) -> Self {
        Self {
            owner,
            bound: Map::new(),
            var_positional: Vec::new(),
            var_keyword: Map::new(),
        }
    }

    /// Binds a positional or keyword parameter.
    #[inline]
    pub fn bind(&mut self, name: &str, value: Value) {
        self.bound.insert(name, value);
    }

    #[inline]
    pub fn extend_var_positional(&mut self, values: impl IntoIterator<Item = Value>) {
        self.var_positional.extend(values);
    }

    #[inline]
    pub fn insert_var_keyword(&mut self, name: &str, value: Value) {
        self.var_keyword.insert(name, value);
    }

    /// Removes a bound parameter and converts it.
    pub fn take<T: FromValue>(&mut self, name: &str) -> Result<T, Error> {
        let value = self.bound.remove(name).ok_or_else(|| Error::MissingKey {
            ty: self.owner.into(),
            key: name.to_owned(),
        })?;
        T::from_value(value).map_err(|e| e.in_field(self.owner, name))
    }

    #[inline]
    pub fn take_var_positional(&mut self) -> Vec<Value> {
        core::mem::take(&mut self.var_positional)
    }

    #[inline]
    pub fn take_var_keyword(&mut self) -> Map {
        core::mem::take(&mut self.var_keyword)
    }
}

// -----------------------------------------------------------------------------
// ObjectInfo

/// An attribute-bag type: instances expose an attribute map and are built
/// through a constructor parameter table.
///
/// Annotations are optional and may be partial: they give the declared type
/// of some attributes, which makes the type record-like for recursion.
pub struct ObjectInfo {
    annotations: Vec<(&'static str, Ty)>,
    params: Vec<ParamInfo>,
    construct: fn(Arguments) -> Result<Box<dyn Object>, Error>,
    attributes: fn(&dyn Object) -> Result<Map, Error>,
    set_attribute: fn(&mut dyn Object, &str, Value) -> Result<(), Error>,
    base: Option<TypeRef>,
}

impl ObjectInfo {
    /// Creates a descriptor without parameters or annotations.
    pub fn new(
        construct: fn(Arguments) -> Result<Box<dyn Object>, Error>,
        attributes: fn(&dyn Object) -> Result<Map, Error>,
        set_attribute: fn(&mut dyn Object, &str, Value) -> Result<(), Error>,
    ) -> Self {
        Self {
            annotations: Vec::new(),
            params: Vec::new(),
            construct,
            attributes,
            set_attribute,
            base: None,
        }
    }

    #[inline]
    pub fn with_param(mut self, param: ParamInfo) -> Self {
        self.params.push(param);
        self
    }

    #[inline]
    pub fn with_annotation(mut self, name: &'static str, ty: Ty) -> Self {
        self.annotations.push((name, ty));
        self
    }

    #[inline]
    pub fn with_base(mut self, base: TypeRef) -> Self {
        self.base = Some(base);
        self
    }

    #[inline]
    pub fn params(&self) -> &[ParamInfo] {
        &self.params
    }

    #[inline]
    pub fn annotations(&self) -> &[(&'static str, Ty)] {
        &self.annotations
    }

    pub fn annotation(&self, name: &str) -> Option<&Ty> {
        self.annotations
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, ty)| ty)
    }

    #[inline]
    pub fn base(&self) -> Option<TypeRef> {
        self.base
    }

    #[inline]
    pub fn construct(&self, arguments: Arguments) -> Result<Box<dyn Object>, Error> {
        (self.construct)(arguments)
    }

    #[inline]
    pub fn attributes(&self, object: &dyn Object) -> Result<Map, Error> {
        (self.attributes)(object)
    }

    #[inline]
    pub fn set_attribute(
        &self,
        object: &mut dyn Object,
        name: &str,
        value: Value,
    ) -> Result<(), Error> {
        (self.set_attribute)(object, name, value)
    }
}

impl fmt::Debug for ObjectInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectInfo")
            .field("annotations", &self.annotations)
            .field("params", &self.params)
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}
