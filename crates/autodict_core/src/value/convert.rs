use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::{BuildHasher, Hash};

use super::{Kind, List, Map, Value};
use crate::Error;

// -----------------------------------------------------------------------------
// Traits

/// Converts a Rust value into a [`Value`].
///
/// Primitives become leaves, standard collections become [`List`] or [`Map`]
/// and described types become [`Value::Object`].
pub trait IntoValue {
    fn into_value(self) -> Value;
}

/// Rebuilds a Rust value from a [`Value`].
///
/// Described types only accept [`Value::Object`]s of their own type: nested
/// instances must have been decoded by the engine first.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self, Error>;
}

/// A type usable as a key of an encoded mapping.
///
/// Mapping keys are always strings in the tree.
pub trait MapKey: Sized {
    fn to_key(&self) -> String;

    fn from_key(key: &str) -> Result<Self, Error>;
}

// -----------------------------------------------------------------------------
// Value itself

impl IntoValue for Value {
    #[inline]
    fn into_value(self) -> Value {
        self
    }
}

impl FromValue for Value {
    #[inline]
    fn from_value(value: Value) -> Result<Self, Error> {
        Ok(value)
    }
}

impl IntoValue for List {
    #[inline]
    fn into_value(self) -> Value {
        Value::List(self)
    }
}

impl FromValue for List {
    fn from_value(value: Value) -> Result<Self, Error> {
        match value {
            Value::List(list) => Ok(list),
            other => Err(Error::mismatch("list", other.kind_name())),
        }
    }
}

impl IntoValue for Map {
    #[inline]
    fn into_value(self) -> Value {
        Value::Map(self)
    }
}

impl FromValue for Map {
    fn from_value(value: Value) -> Result<Self, Error> {
        match value {
            Value::Map(map) => Ok(map),
            other => Err(Error::mismatch("map", other.kind_name())),
        }
    }
}

// -----------------------------------------------------------------------------
// Primitives

impl IntoValue for () {
    #[inline]
    fn into_value(self) -> Value {
        Value::Null
    }
}

impl FromValue for () {
    fn from_value(value: Value) -> Result<Self, Error> {
        match value {
            Value::Null => Ok(()),
            other => Err(Error::mismatch("null", other.kind_name())),
        }
    }
}

impl IntoValue for bool {
    #[inline]
    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, Error> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(Error::mismatch("bool", other.kind_name())),
        }
    }
}

macro_rules! impl_int {
    ($($ty:ty),*) => {$(
        impl IntoValue for $ty {
            #[inline]
            #[allow(irrefutable_let_patterns, reason = "`i64::try_from(i64)` cannot fail")]
            fn into_value(self) -> Value {
                if let Ok(i) = i64::try_from(self) {
                    Value::Int(i)
                } else {
                    Value::Float(self as f64)
                }
            }
        }

        impl FromValue for $ty {
            fn from_value(value: Value) -> Result<Self, Error> {
                match value {
                    Value::Int(i) => <$ty>::try_from(i).map_err(|_| {
                        Error::custom(format_args!("{i} is out of range for {}", stringify!($ty)))
                    }),
                    // Integers beyond `i64` are carried as floats. The bounds of
                    // 64-bit types round up, `as` saturates onto them.
                    Value::Float(f)
                        if f.fract() == 0.0
                            && f >= <$ty>::MIN as f64
                            && f <= <$ty>::MAX as f64 =>
                    {
                        Ok(f as $ty)
                    }
                    Value::Float(f) if f.fract() == 0.0 => Err(Error::custom(format_args!(
                        "{f} is out of range for {}",
                        stringify!($ty)
                    ))),
                    other => Err(Error::mismatch("int", other.kind_name())),
                }
            }
        }

        impl MapKey for $ty {
            fn to_key(&self) -> String {
                self.to_string()
            }

            fn from_key(key: &str) -> Result<Self, Error> {
                key.parse().map_err(|_| {
                    Error::custom(format_args!("key {key:?} is not a valid {}", stringify!($ty)))
                })
            }
        }
    )*};
}

impl_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! impl_float {
    ($($ty:ty),*) => {$(
        impl IntoValue for $ty {
            #[inline]
            fn into_value(self) -> Value {
                Value::Float(f64::from(self))
            }
        }

        impl FromValue for $ty {
            fn from_value(value: Value) -> Result<Self, Error> {
                match value {
                    Value::Float(f) => Ok(f as $ty),
                    Value::Int(i) => Ok(i as $ty),
                    other => Err(Error::mismatch("float", other.kind_name())),
                }
            }
        }
    )*};
}

impl_float!(f32, f64);

impl IntoValue for String {
    #[inline]
    fn into_value(self) -> Value {
        Value::Str(self)
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, Error> {
        match value {
            Value::Str(s) => Ok(s),
            other => Err(Error::mismatch("str", other.kind_name())),
        }
    }
}

impl IntoValue for &str {
    #[inline]
    fn into_value(self) -> Value {
        Value::Str(self.to_owned())
    }
}

impl IntoValue for Cow<'_, str> {
    #[inline]
    fn into_value(self) -> Value {
        Value::Str(self.into_owned())
    }
}

impl FromValue for Cow<'_, str> {
    fn from_value(value: Value) -> Result<Self, Error> {
        String::from_value(value).map(Cow::Owned)
    }
}

impl IntoValue for char {
    #[inline]
    fn into_value(self) -> Value {
        Value::Str(self.to_string())
    }
}

impl FromValue for char {
    fn from_value(value: Value) -> Result<Self, Error> {
        let s = String::from_value(value)?;
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(Error::custom(format_args!(
                "expected a single character, found {s:?}"
            ))),
        }
    }
}

impl MapKey for String {
    #[inline]
    fn to_key(&self) -> String {
        self.clone()
    }

    #[inline]
    fn from_key(key: &str) -> Result<Self, Error> {
        Ok(key.to_owned())
    }
}

impl MapKey for char {
    fn to_key(&self) -> String {
        self.to_string()
    }

    fn from_key(key: &str) -> Result<Self, Error> {
        char::from_value(Value::Str(key.to_owned()))
    }
}

impl MapKey for bool {
    fn to_key(&self) -> String {
        self.to_string()
    }

    fn from_key(key: &str) -> Result<Self, Error> {
        key.parse()
            .map_err(|_| Error::custom(format_args!("key {key:?} is not a valid bool")))
    }
}

// -----------------------------------------------------------------------------
// Wrappers

impl<T: IntoValue> IntoValue for Option<T> {
    #[inline]
    fn into_value(self) -> Value {
        match self {
            Some(value) => value.into_value(),
            None => Value::Null,
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, Error> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: IntoValue> IntoValue for Box<T> {
    #[inline]
    fn into_value(self) -> Value {
        (*self).into_value()
    }
}

impl<T: FromValue> FromValue for Box<T> {
    fn from_value(value: Value) -> Result<Self, Error> {
        T::from_value(value).map(Box::new)
    }
}

// -----------------------------------------------------------------------------
// Collections

fn into_list<T: IntoValue>(kind: Kind, iter: impl IntoIterator<Item = T>) -> Value {
    Value::List(List::from_items(
        kind,
        iter.into_iter().map(IntoValue::into_value).collect(),
    ))
}

fn from_list<T: FromValue, C: FromIterator<T>>(value: Value) -> Result<C, Error> {
    match value {
        Value::List(list) => list
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                T::from_value(item).map_err(|e| e.in_field("list", index.to_string()))
            })
            .collect(),
        other => Err(Error::mismatch("list", other.kind_name())),
    }
}

fn into_map<K: MapKey, V: IntoValue>(iter: impl IntoIterator<Item = (K, V)>) -> Value {
    Value::Map(
        iter.into_iter()
            .map(|(key, value)| (key.to_key(), value.into_value()))
            .collect(),
    )
}

fn from_map<K: MapKey, V: FromValue, C: FromIterator<(K, V)>>(value: Value) -> Result<C, Error> {
    match value {
        Value::Map(map) => map
            .into_iter()
            .map(|(key, value)| -> Result<(K, V), Error> {
                let k = K::from_key(&key)?;
                let v = V::from_value(value).map_err(|e| e.in_field("map", key))?;
                Ok((k, v))
            })
            .collect(),
        other => Err(Error::mismatch("map", other.kind_name())),
    }
}

impl<T: IntoValue> IntoValue for Vec<T> {
    fn into_value(self) -> Value {
        into_list(Kind::LIST, self)
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value) -> Result<Self, Error> {
        from_list(value)
    }
}

impl<T: IntoValue> IntoValue for VecDeque<T> {
    fn into_value(self) -> Value {
        into_list(Kind::LIST, self)
    }
}

impl<T: FromValue> FromValue for VecDeque<T> {
    fn from_value(value: Value) -> Result<Self, Error> {
        from_list(value)
    }
}

impl<T: IntoValue, S> IntoValue for HashSet<T, S> {
    fn into_value(self) -> Value {
        into_list(Kind::SET, self)
    }
}

impl<T: FromValue + Eq + Hash, S: BuildHasher + Default> FromValue for HashSet<T, S> {
    fn from_value(value: Value) -> Result<Self, Error> {
        from_list(value)
    }
}

impl<T: IntoValue> IntoValue for BTreeSet<T> {
    fn into_value(self) -> Value {
        into_list(Kind::SET, self)
    }
}

impl<T: FromValue + Ord> FromValue for BTreeSet<T> {
    fn from_value(value: Value) -> Result<Self, Error> {
        from_list(value)
    }
}

impl<K: MapKey, V: IntoValue, S> IntoValue for HashMap<K, V, S> {
    fn into_value(self) -> Value {
        into_map(self)
    }
}

impl<K, V, S> FromValue for HashMap<K, V, S>
where
    K: MapKey + Eq + Hash,
    V: FromValue,
    S: BuildHasher + Default,
{
    fn from_value(value: Value) -> Result<Self, Error> {
        from_map(value)
    }
}

impl<K: MapKey, V: IntoValue> IntoValue for BTreeMap<K, V> {
    fn into_value(self) -> Value {
        into_map(self)
    }
}

impl<K: MapKey + Ord, V: FromValue> FromValue for BTreeMap<K, V> {
    fn from_value(value: Value) -> Result<Self, Error> {
        from_map(value)
    }
}

// -----------------------------------------------------------------------------
// Tuples

macro_rules! impl_tuple {
    ($len:literal: $($name:ident $index:tt),+) => {
        impl<$($name: IntoValue),+> IntoValue for ($($name,)+) {
            fn into_value(self) -> Value {
                Value::List(List::from_items(
                    Kind::TUPLE,
                    vec![$(self.$index.into_value()),+],
                ))
            }
        }

        impl<$($name: FromValue),+> FromValue for ($($name,)+) {
            fn from_value(value: Value) -> Result<Self, Error> {
                let list = List::from_value(value)?;
                if list.len() != $len {
                    return Err(Error::custom(format_args!(
                        "expected a tuple of {} items, found {}",
                        $len,
                        list.len()
                    )));
                }
                let mut items = list.into_iter();
                Ok(($(
                    $name::from_value(items.next().unwrap_or_default())
                        .map_err(|e| e.in_field("tuple", stringify!($index)))?,
                )+))
            }
        }
    };
}

impl_tuple!(1: A 0);
impl_tuple!(2: A 0, B 1);
impl_tuple!(3: A 0, B 1, C 2);
impl_tuple!(4: A 0, B 1, C 2, D 3);
impl_tuple!(5: A 0, B 1, C 2, D 3, E 4);
impl_tuple!(6: A 0, B 1, C 2, D 3, E 4, F 5);

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use super::{FromValue, IntoValue};
    use crate::{Error, Value};

    #[test]
    fn collections_round_trip() {
        let tags: BTreeSet<String> = ["a".to_string(), "b".to_string()].into();
        let value = tags.clone().into_value();
        assert_eq!(value.kind_name(), "set");
        assert_eq!(BTreeSet::<String>::from_value(value).unwrap(), tags);

        let scores: BTreeMap<u8, f32> = [(1, 0.5), (2, 1.0)].into();
        let value = scores.clone().into_value();
        assert_eq!(value.as_map().unwrap().get("2"), Some(&Value::Float(1.0)));
        assert_eq!(BTreeMap::<u8, f32>::from_value(value).unwrap(), scores);
    }

    #[test]
    fn tuples_check_length() {
        let value = (1_i32, "x").into_value();
        assert_eq!(value.kind_name(), "tuple");
        assert!(<(i32, String)>::from_value(value.clone()).is_ok());
        assert!(<(i32, String, bool)>::from_value(value).is_err());
    }

    #[test]
    fn nested_failure_names_the_index() {
        let value = vec![Value::Int(1), Value::Str("two".into())].into_value();
        let err = Vec::<i32>::from_value(value).unwrap_err();
        assert_eq!(err.field_path(), ["1"]);
        assert!(matches!(err.root(), Error::TypeMismatch { found: "str", .. }));
    }

    #[test]
    fn integers_are_range_checked() {
        assert!(u8::from_value(Value::Int(300)).is_err());
        assert_eq!(Option::<u8>::from_value(Value::Null).unwrap(), None);
    }

    #[test]
    fn large_unsigned_integers_round_trip() {
        let value = u64::MAX.into_value();
        assert_eq!(value.kind_name(), "float");
        assert_eq!(u64::from_value(value).unwrap(), u64::MAX);

        let parsed: Value = serde_json::from_str("18446744073709551615").unwrap();
        assert_eq!(u64::from_value(parsed).unwrap(), u64::MAX);

        assert_eq!(u64::from_value(Value::Float(4096.0)).unwrap(), 4096);
        assert!(u8::from_value(Value::Float(-1.0)).is_err());
        assert!(matches!(
            u64::from_value(Value::Float(0.5)),
            Err(Error::TypeMismatch { found: "float", .. })
        ));
    }
}
