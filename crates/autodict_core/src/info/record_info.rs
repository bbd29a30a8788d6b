use core::fmt;

use crate::info::Ty;
use crate::value::{FromValue, Map, Value};
use crate::{Error, Object};

/// Reads a field out of an instance.
pub type Getter = fn(&dyn Object) -> Result<Value, Error>;

/// Assigns a field of an instance after construction.
pub type Setter = fn(&mut dyn Object, Value) -> Result<(), Error>;

// -----------------------------------------------------------------------------
// FieldDefault

/// The fallback of a field absent from the tree.
#[derive(Debug, Clone, Copy, Default)]
pub enum FieldDefault {
    #[default]
    None,
    /// A constant default.
    Static(fn() -> Value),
    /// A default built anew for each instance.
    Factory(fn() -> Value),
}

impl FieldDefault {
    /// Produces the default value, if any.
    #[inline]
    pub fn produce(self) -> Option<Value> {
        match self {
            Self::None => None,
            Self::Static(f) | Self::Factory(f) => Some(f()),
        }
    }
}

// -----------------------------------------------------------------------------
// FieldInfo

/// One entry of a record's field table.
///
/// Fields are `init` by default: they are passed to the constructor. A field
/// marked with [`post_init`](FieldInfo::post_init) is left to the
/// constructor's own initialization and assigned afterwards with its setter.
#[derive(Clone)]
pub struct FieldInfo {
    name: &'static str,
    ty: Ty,
    default: FieldDefault,
    init: bool,
    get: Getter,
    set: Option<Setter>,
}

impl FieldInfo {
    pub fn new(name: &'static str, ty: Ty, get: Getter) -> Self {
        Self {
            name,
            ty,
            default: FieldDefault::None,
            init: true,
            get,
            set: None,
        }
    }

    #[inline]
    pub fn with_default(mut self, default: FieldDefault) -> Self {
        self.default = default;
        self
    }

    /// Excludes the field from the constructor, it is assigned with `set`.
    #[inline]
    pub fn post_init(mut self, set: Setter) -> Self {
        self.init = false;
        self.set = Some(set);
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
    pub fn default(&self) -> FieldDefault {
        self.default
    }

    #[inline]
    pub fn is_init(&self) -> bool {
        self.init
    }

    #[inline]
    pub fn get(&self, object: &dyn Object) -> Result<Value, Error> {
        (self.get)(object)
    }

    /// Assigns the field, failing if it has no setter.
    pub fn set(&self, object: &mut dyn Object, value: Value) -> Result<(), Error> {
        match self.set {
            Some(set) => set(object, value),
            None => Err(Error::custom(format_args!(
                "field `{}` cannot be assigned after construction",
                self.name
            ))),
        }
    }
}

impl fmt::Debug for FieldInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldInfo")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .field("default", &!matches!(self.default, FieldDefault::None))
            .field("init", &self.init)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Fields

/// The constructor arguments of a record, by field name.
///
/// Values are already decoded: nested described types are [`Value::Object`]s.
#[derive(Debug)]
pub struct Fields {
    owner: &'static str,
    values: Map,
}

impl Fields {
    #[inline]
    pub fn new(owner: &'static str, values: Map) -> Self {
        Self { owner, values }
    }

    /// Removes a field and converts it, localizing conversion errors.
    pub fn take<T: FromValue>(&mut self, name: &str) -> Result<T, Error> {
        let value = self.values.remove(name).ok_or_else(|| Error::MissingKey {
            ty: self.owner.into(),
            key: name.to_owned(),
        })?;
        T::from_value(value).map_err(|e| e.in_field(self.owner, name))
    }

    #[inline]
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    #[inline]
    pub fn into_map(self) -> Map {
        self.values
    }
}

// -----------------------------------------------------------------------------
// RecordInfo

/// The field table of a record-like type, in declaration order.
///
/// # Examples
///
/// ```
/// use autodict_core::Value;
/// use autodict_core::info::{RecordInfo, Typed};
/// # use autodict_core::info::{Shape, TypeInfo, TypeInfoCell, FieldInfo, Ty};
/// # #[derive(Clone, PartialEq, Debug)]
/// # struct Point { x: i64 }
/// # impl Typed for Point {
/// #     fn type_info() -> &'static TypeInfo {
/// #         static CELL: TypeInfoCell = TypeInfoCell::new();
/// #         CELL.get_or_init(|| TypeInfo::new::<Self>("Point", Shape::Record(RecordInfo::new(
/// #             vec![FieldInfo::new("x", Ty::Int, |o| {
/// #                 Ok(Value::Int(autodict_core::object::cast_ref::<Point>(o)?.x))
/// #             })],
/// #             |mut f| Ok(Box::new(Point { x: f.take("x")? })),
/// #         ))))
/// #     }
/// # }
///
/// let info = Point::type_info().as_record().unwrap();
/// assert_eq!(info.field_names().collect::<Vec<_>>(), ["x"]);
/// ```
pub struct RecordInfo {
    fields: Vec<FieldInfo>,
    construct: fn(Fields) -> Result<Box<dyn Object>, Error>,
}

impl RecordInfo {
    pub fn new(
        fields: Vec<FieldInfo>,
        construct: fn(Fields) -> Result<Box<dyn Object>, Error>,
    ) -> Self {
        Self { fields, construct }
    }

    #[inline]
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(FieldInfo::name)
    }

    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    /// Builds an instance from the init fields.
    #[inline]
    pub fn construct(&self, fields: Fields) -> Result<Box<dyn Object>, Error> {
        (self.construct)(fields)
    }
}

impl fmt::Debug for RecordInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordInfo")
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}
