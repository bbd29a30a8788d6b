//! Attribute bags: types exposing an attribute map and a constructor
//! parameter table.

use crate::info::{Arguments, ObjectInfo, ParamKind, TypeInfo, inspect};
use crate::provider::expect_map;
use crate::value::Value;
use crate::{Error, Object, Options};

/// Encodes a shallow copy of the attribute map.
pub fn encode(object: &dyn Object, _: &Options) -> Result<Value, Error> {
    let info = object.object_type();
    let bag = info
        .as_object()
        .ok_or_else(|| Error::UnableToDict(info.name().into()))?;
    bag.attributes(object).map(Value::Map)
}

/// Builds an attribute bag by routing tree keys to constructor parameters.
///
/// Keys match parameters by name, after hidden-member normalization:
///
/// - positional and keyword parameters bind their key, or their default;
/// - a variadic-positional parameter spreads the list stored under its name;
/// - a variadic-keyword parameter collects every key nothing else consumed,
///   and merges a mapping stored under its own name.
///
/// Keys left over are assigned to the built instance as attributes. Without
/// parameters the instance is built from nothing and the whole tree is
/// assigned.
pub fn decode(info: &'static TypeInfo, value: Value, _: &Options) -> Result<Value, Error> {
    let bag = info
        .as_object()
        .ok_or_else(|| Error::UnableFromDict(info.name().into()))?;
    let map = expect_map(info, value)?;

    let mut entries: Vec<Option<(String, Value)>> = map.into_iter().map(Some).collect();
    let arguments = bind(info, bag, &mut entries)?;

    let mut object = bag.construct(arguments)?;
    for (key, value) in entries.into_iter().flatten() {
        bag.set_attribute(&mut *object, &key, value)
            .map_err(|e| e.in_field(info.name(), key))?;
    }
    Ok(Value::Object(object))
}

fn bind(
    info: &TypeInfo,
    bag: &ObjectInfo,
    entries: &mut [Option<(String, Value)>],
) -> Result<Arguments, Error> {
    let mut arguments = Arguments::new(info.name());
    let mut collect_keywords = false;

    for param in bag.params() {
        let found = entries.iter_mut().find(|entry| {
            matches!(entry, Some((key, _))
                if key == param.name() || inspect::strip_hidden_member_prefix(info, key) == param.name())
        });
        let value = found.and_then(Option::take).map(|(_, value)| value);

        match param.kind() {
            ParamKind::Positional | ParamKind::Keyword => {
                let value = match value.or_else(|| param.default_value()) {
                    Some(value) => value,
                    None => {
                        return Err(Error::MissingDefault {
                            ty: info.name().into(),
                            field: param.name().to_owned(),
                        });
                    }
                };
                arguments.bind(param.name(), value);
            }
            ParamKind::VarPositional => match value.or_else(|| param.default_value()) {
                Some(Value::List(list)) => arguments.extend_var_positional(list),
                Some(Value::Null) | None => {}
                Some(other) => {
                    return Err(Error::mismatch("list", other.kind_name())
                        .in_field(info.name(), param.name()));
                }
            },
            ParamKind::VarKeyword => {
                match value {
                    Some(Value::Map(map)) => {
                        for (key, value) in map {
                            arguments.insert_var_keyword(&key, value);
                        }
                    }
                    Some(value) => arguments.insert_var_keyword(param.name(), value),
                    None => {}
                }
                collect_keywords = true;
            }
        }
    }

    if collect_keywords {
        for (key, value) in entries.iter_mut().filter_map(Option::take) {
            let name = inspect::strip_hidden_member_prefix(info, &key);
            arguments.insert_var_keyword(name, value);
        }
    }
    Ok(arguments)
}
