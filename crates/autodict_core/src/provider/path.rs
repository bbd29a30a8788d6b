//! `PathBuf` as a string leaf.

use std::path::PathBuf;

use crate::info::{Describe, Shape, Ty, TypeInfo, TypeInfoCell, Typed};
use crate::object::cast_ref;
use crate::registry::{Registration, Registry, Strategy};
use crate::value::{FromValue, IntoValue, Value};
use crate::{Error, Object, Options};

impl Typed for PathBuf {
    fn type_info() -> &'static TypeInfo {
        static CELL: TypeInfoCell = TypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::new::<Self>("PathBuf", Shape::Opaque))
    }
}

impl Describe for PathBuf {
    #[inline]
    fn describe() -> Ty {
        Ty::named::<Self>()
    }
}

impl IntoValue for PathBuf {
    #[inline]
    fn into_value(self) -> Value {
        Value::object(self)
    }
}

impl FromValue for PathBuf {
    fn from_value(value: Value) -> Result<Self, Error> {
        value
            .take_object::<PathBuf>()
            .map_err(|other| Error::mismatch("PathBuf", other.kind_name()))
    }
}

pub fn encode(object: &dyn Object, _: &Options) -> Result<Value, Error> {
    let path = cast_ref::<PathBuf>(object)?;
    match path.to_str() {
        Some(s) => Ok(Value::Str(s.to_owned())),
        None => Err(Error::custom(format_args!(
            "path {} is not valid unicode",
            path.display()
        ))),
    }
}

pub fn decode(info: &'static TypeInfo, value: Value, _: &Options) -> Result<Value, Error> {
    match value {
        Value::Str(s) => Ok(Value::object(PathBuf::from(s))),
        other => Err(Error::mismatch(info.name(), other.kind_name())),
    }
}

/// The `PathBuf` strategy.
pub const STRATEGY: Strategy = Strategy::new(encode, decode);

pub(crate) fn register(registry: &mut Registry) {
    registry.register_type::<PathBuf>(Registration::new().strategy(STRATEGY));
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::info::Ty;
    use crate::registry::Registry;
    use crate::value::{Kind, List};
    use crate::{AutoDict, Options, Value};

    #[test]
    fn paths_are_strings() {
        let registry = Registry::new();
        let engine = AutoDict::new(&registry);
        let path = PathBuf::from("data/config.ron");

        let tree = engine.encode(&path, &Options::new()).unwrap();
        assert_eq!(tree, Value::Str("data/config.ron".into()));

        let back: PathBuf = engine.decode(tree.clone(), &Options::new()).unwrap();
        assert_eq!(back, path);

        let list: Vec<PathBuf> = engine
            .decode(
                Value::List(List::from_items(Kind::LIST, vec![tree])),
                &Options::new(),
            )
            .unwrap();
        assert_eq!(list, [path]);
        assert_eq!(Ty::of::<Vec<PathBuf>>().to_string(), "list[PathBuf]");
    }
}
