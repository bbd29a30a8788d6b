//! Named tuples.
//!
//! With type tags they encode to a name-to-value mapping (the tag needs a
//! mapping to live in), without tags to a positional `tuple`. Decoding
//! accepts both.

use crate::info::{TupleInfo, TypeInfo};
use crate::value::{Kind, List, Map, Value};
use crate::{Error, Object, Options};

pub fn encode(object: &dyn Object, options: &Options) -> Result<Value, Error> {
    let info = object.object_type();
    let tuple = info
        .as_tuple()
        .ok_or_else(|| Error::UnableToDict(info.name().into()))?;
    let items = tuple.items(object)?;

    if !options.with_cls {
        return Ok(Value::List(List::from_items(Kind::TUPLE, items)));
    }
    let map: Map = tuple
        .fields()
        .iter()
        .map(|field| field.name().to_owned())
        .zip(items)
        .collect();
    Ok(Value::Map(map))
}

/// Builds a named tuple from a mapping or a positional list.
///
/// Missing items take their declared default, or `None`.
pub fn decode(info: &'static TypeInfo, value: Value, _: &Options) -> Result<Value, Error> {
    let tuple = info
        .as_tuple()
        .ok_or_else(|| Error::UnableFromDict(info.name().into()))?;

    let items = match value {
        Value::Map(mut map) => {
            let items = tuple
                .fields()
                .iter()
                .map(|field| {
                    map.remove(field.name())
                        .or_else(|| field.default_value())
                        .unwrap_or_default()
                })
                .collect();
            for key in map.keys() {
                log::debug!("`{}` has no field `{key}`, ignored", info.name());
            }
            items
        }
        Value::List(list) => positional(info, tuple, list)?,
        other => return Err(Error::mismatch(info.name(), other.kind_name())),
    };
    tuple.construct(items).map(Value::Object)
}

fn positional(info: &TypeInfo, tuple: &TupleInfo, list: List) -> Result<Vec<Value>, Error> {
    if list.len() > tuple.field_len() {
        return Err(Error::custom(format_args!(
            "`{}` takes {} items, found {}",
            info.name(),
            tuple.field_len(),
            list.len()
        )));
    }
    let mut items = list.into_items();
    for field in &tuple.fields()[items.len()..] {
        items.push(field.default_value().unwrap_or_default());
    }
    Ok(items)
}
