use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::info::{TypeInfo, Typed};
use crate::object::cast_ref;
use crate::registry::Strategy;
use crate::value::Value;
use crate::{Error, Object, Options};

/// A strategy for leaf types that already implement `serde`.
///
/// The instance goes through `serde_json::Value`, so whatever `T` serializes
/// to (a number, a string, a mapping) becomes the tree.
///
/// ```
/// use autodict_core::info::{Shape, Ty, TypeInfo, TypeInfoCell, Typed};
/// use autodict_core::provider::serde_strategy;
/// use autodict_core::registry::{Registration, Registry};
/// use autodict_core::{AutoDict, Options, Value};
///
/// #[derive(Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
/// struct Celsius(f64);
///
/// impl Typed for Celsius {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: TypeInfoCell = TypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::new::<Self>("Celsius", Shape::Opaque))
///     }
/// }
///
/// let mut registry = Registry::new();
/// registry.register_type::<Celsius>(Registration::new().strategy(serde_strategy::<Celsius>()));
///
/// let engine = AutoDict::new(&registry);
/// let tree = engine.to_dict(Value::object(Celsius(21.5)), &Options::new()).unwrap();
/// assert_eq!(tree, Value::Float(21.5));
///
/// let back = engine.from_dict(tree, &Ty::named::<Celsius>(), &Options::new()).unwrap();
/// assert_eq!(back.downcast_ref::<Celsius>(), Some(&Celsius(21.5)));
/// ```
pub fn serde_strategy<T>() -> Strategy
where
    T: Object + Typed + Serialize + DeserializeOwned,
{
    Strategy::new(encode::<T>, decode::<T>)
}

fn encode<T>(object: &dyn Object, _: &Options) -> Result<Value, Error>
where
    T: Object + Typed + Serialize,
{
    let value = cast_ref::<T>(object)?;
    serde_json::to_value(value)
        .map(Value::from)
        .map_err(|e| Error::custom(format_args!("`{}`: {e}", T::type_info().name())))
}

fn decode<T>(info: &'static TypeInfo, value: Value, _: &Options) -> Result<Value, Error>
where
    T: Object + Typed + DeserializeOwned,
{
    let json = serde_json::Value::try_from(value)?;
    serde_json::from_value::<T>(json)
        .map(Value::object)
        .map_err(|e| Error::custom(format_args!("`{}`: {e}", info.name())))
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    use super::serde_strategy;
    use crate::info::{Shape, Ty, TypeInfo, TypeInfoCell, Typed};
    use crate::registry::{Registration, Registry};
    use crate::{AutoDict, Error, Options, Value};

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    struct Version {
        major: u32,
        minor: u32,
    }

    impl Typed for Version {
        fn type_info() -> &'static TypeInfo {
            static CELL: TypeInfoCell = TypeInfoCell::new();
            CELL.get_or_init(|| TypeInfo::new::<Self>("Version", Shape::Opaque))
        }
    }

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry.register_type::<Version>(Registration::new().strategy(serde_strategy::<Version>()));
        registry
    }

    #[test]
    fn mappings_are_tagged() {
        let registry = registry();
        let engine = AutoDict::new(&registry);
        let version = Version { major: 1, minor: 4 };

        let tree = engine
            .to_dict(Value::object(version.clone()), &Options::new())
            .unwrap();
        let expected = Value::from(json!({ "major": 1, "minor": 4, "@": "Version" }));
        assert_eq!(tree, expected);

        let back = engine.from_dict(tree, &Ty::Any, &Options::new()).unwrap();
        assert_eq!(back.downcast_ref::<Version>(), Some(&version));
    }

    #[test]
    fn serde_errors_are_reported() {
        let registry = registry();
        let engine = AutoDict::new(&registry);
        let tree = Value::from(json!({ "major": "one", "minor": 4 }));
        let err = engine
            .from_dict(tree, &Ty::named::<Version>(), &Options::new())
            .unwrap_err();
        assert!(matches!(err, Error::Custom(msg) if msg.starts_with("`Version`")));
    }
}
