//! Records: types with an ordered field table.

use crate::info::{FieldDefault, Fields, Ty, TypeInfo, inspect};
use crate::provider::expect_map;
use crate::value::{Map, Value};
use crate::{Error, Object, Options};

/// Encodes exactly the declared fields, in declaration order.
pub fn encode(object: &dyn Object, _: &Options) -> Result<Value, Error> {
    let info = object.object_type();
    let record = info
        .as_record()
        .ok_or_else(|| Error::UnableToDict(info.name().into()))?;

    let mut map = Map::new();
    for field in record.fields() {
        let value = field
            .get(object)
            .map_err(|e| e.in_field(info.name(), field.name()))?;
        map.insert(field.name(), value);
    }
    Ok(Value::Map(map))
}

/// Builds a record from its fields.
///
/// A field absent from the tree takes, in order: its static default, its
/// default factory, `None` if its type is optional. Otherwise decoding fails
/// with [`Error::MissingDefault`]. Init fields go to the constructor, the
/// others are assigned afterwards. Unknown keys are ignored.
pub fn decode(info: &'static TypeInfo, value: Value, _: &Options) -> Result<Value, Error> {
    let record = info
        .as_record()
        .ok_or_else(|| Error::UnableFromDict(info.name().into()))?;
    let mut map = expect_map(info, value)?;

    let mut init = Map::new();
    let mut assigned = Vec::new();
    for field in record.fields() {
        let value = match map.remove(field.name()) {
            Some(value) => value,
            None => fallback(info, field.name(), field.default(), field.ty())?,
        };
        if field.is_init() {
            init.insert(field.name(), value);
        } else {
            assigned.push((field, value));
        }
    }
    for key in map.keys() {
        log::debug!("`{}` has no field `{key}`, ignored", info.name());
    }

    let mut object = record.construct(Fields::new(info.name(), init))?;
    for (field, value) in assigned {
        field
            .set(&mut *object, value)
            .map_err(|e| e.in_field(info.name(), field.name()))?;
    }
    Ok(Value::Object(object))
}

/// The value of a field absent from the tree.
pub(crate) fn fallback(
    info: &TypeInfo,
    field: &str,
    default: FieldDefault,
    ty: &Ty,
) -> Result<Value, Error> {
    if let Some(value) = default.produce() {
        return Ok(value);
    }
    if inspect::is_generic_optional(ty) || matches!(ty, Ty::Null) {
        return Ok(Value::Null);
    }
    Err(Error::MissingDefault {
        ty: info.name().into(),
        field: field.to_owned(),
    })
}
