//! Enumerations, encoded as `{"value": ..., "name": ...}`.

use crate::info::TypeInfo;
use crate::provider::expect_map;
use crate::value::{Map, Value};
use crate::{Error, Object, Options};

pub const VALUE_KEY: &str = "value";
pub const NAME_KEY: &str = "name";

/// Encodes the member's value and name.
pub fn encode(object: &dyn Object, _: &Options) -> Result<Value, Error> {
    let info = object.object_type();
    let members = info
        .as_enum()
        .ok_or_else(|| Error::UnableToDict(info.name().into()))?;
    let variant = members.variant_of(object)?;

    let mut map = Map::new();
    map.insert(VALUE_KEY, variant.value().to_value());
    map.insert(NAME_KEY, Value::Str(variant.name().to_owned()));
    Ok(Value::Map(map))
}

/// Rebuilds the member from its value, then checks that its name is the
/// stored one.
///
/// A name mismatch means the tree and the enumeration disagree, it fails
/// with [`Error::InconsistentEnum`] instead of trusting either side.
pub fn decode(info: &'static TypeInfo, value: Value, _: &Options) -> Result<Value, Error> {
    let members = info
        .as_enum()
        .ok_or_else(|| Error::UnableFromDict(info.name().into()))?;
    let mut map = expect_map(info, value)?;

    let missing = |key: &str| Error::MissingKey {
        ty: info.name().into(),
        key: key.to_owned(),
    };
    let name = map.remove(NAME_KEY).ok_or_else(|| missing(NAME_KEY))?;
    let value = map.remove(VALUE_KEY).ok_or_else(|| missing(VALUE_KEY))?;

    let unknown = || Error::UnknownEnumValue {
        ty: info.name().into(),
        value: value.to_string(),
    };
    let index = members.index_by_value(&value).ok_or_else(unknown)?;
    let object = members.build(index).ok_or_else(unknown)?;

    let expected = members.variant_of(&*object)?.name();
    if name.as_str() != Some(expected) {
        return Err(Error::InconsistentEnum {
            ty: info.name().into(),
            value: value.to_string(),
            expected,
            found: match name {
                Value::Str(found) => found,
                other => other.to_string(),
            },
        });
    }
    Ok(Value::Object(object))
}
