//! Container builders.
//!
//! When the engine decodes a container against a declared type it rebuilds
//! the container through the builder of the declared [`Kind`]. The four
//! standard kinds, and any kind without a registered builder, use the default
//! builder of their [`Layout`]:
//!
//! - `Seq`: items in order, pairs become two-item tuples.
//! - `Set`: items in order, keeping the first of equal items.
//! - `Map`: pairs in order, later keys overwrite earlier values. Two-item
//!   sequences starting with a string are accepted as pairs.

use crate::Error;
use crate::hash::HashMap;
use crate::value::{Kind, Layout, List, Map, Value};

// -----------------------------------------------------------------------------
// Entry

/// One element handed to a container builder.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Item(Value),
    Pair(String, Value),
}

impl Entry {
    /// Splits a container value into entries, any other value is one item.
    pub fn from_value(value: Value) -> Vec<Entry> {
        match value {
            Value::List(list) => list.into_iter().map(Entry::Item).collect(),
            Value::Map(map) => map
                .into_iter()
                .map(|(key, value)| Entry::Pair(key, value))
                .collect(),
            other => vec![Entry::Item(other)],
        }
    }
}

/// A container constructor: builds a value of `kind` from entries.
pub type BuildFn = fn(Kind, Vec<Entry>) -> Result<Value, Error>;

// -----------------------------------------------------------------------------
// ContainerBuilders

/// The builder table, keyed by container kind.
#[derive(Debug, Clone, Default)]
pub struct ContainerBuilders {
    builders: HashMap<Kind, BuildFn>,
}

impl ContainerBuilders {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the builder of `kind`, replacing any previous one.
    pub fn register(&mut self, kind: Kind, builder: BuildFn) -> &mut Self {
        if self.builders.insert(kind, builder).is_some() {
            log::debug!("container builder of `{kind}` replaced");
        }
        self
    }

    /// Returns the builder of `kind`, falling back to its layout default.
    pub fn builder(&self, kind: Kind) -> BuildFn {
        match self.builders.get(&kind) {
            Some(builder) => *builder,
            None => default_builder(kind.layout()),
        }
    }

    /// Merges `entries` with `extra` and builds a container of `kind`.
    pub fn build(
        &self,
        kind: Kind,
        entries: impl IntoIterator<Item = Entry>,
        extra: impl IntoIterator<Item = Entry>,
    ) -> Result<Value, Error> {
        let entries = entries.into_iter().chain(extra).collect();
        (self.builder(kind))(kind, entries)
    }
}

/// Returns the default builder of a layout.
pub fn default_builder(layout: Layout) -> BuildFn {
    match layout {
        Layout::Seq => build_seq,
        Layout::Set => build_set,
        Layout::Map => build_map,
    }
}

fn item_of(entry: Entry) -> Value {
    match entry {
        Entry::Item(value) => value,
        Entry::Pair(key, value) => Value::List(List::from_items(
            Kind::TUPLE,
            vec![Value::Str(key), value],
        )),
    }
}

fn build_seq(kind: Kind, entries: Vec<Entry>) -> Result<Value, Error> {
    let items = entries.into_iter().map(item_of).collect();
    Ok(Value::List(List::from_items(kind, items)))
}

fn build_set(kind: Kind, entries: Vec<Entry>) -> Result<Value, Error> {
    let mut set = List::new(kind);
    for entry in entries {
        set.insert_unique(item_of(entry));
    }
    Ok(Value::List(set))
}

fn build_map(kind: Kind, entries: Vec<Entry>) -> Result<Value, Error> {
    let mut map = Map::with_kind(kind);
    for entry in entries {
        match entry {
            Entry::Pair(key, value) => {
                map.insert(key, value);
            }
            Entry::Item(Value::List(pair)) if pair.len() == 2 => {
                let mut items = pair.into_iter();
                match (items.next(), items.next()) {
                    (Some(Value::Str(key)), Some(value)) => {
                        map.insert(key, value);
                    }
                    (key, _) => {
                        let found = key.as_ref().map_or("null", Value::kind_name);
                        return Err(Error::mismatch("str key", found));
                    }
                }
            }
            Entry::Item(other) => {
                return Err(Error::mismatch("key-value pair", other.kind_name()));
            }
        }
    }
    Ok(Value::Map(map))
}

#[cfg(test)]
mod tests {
    use super::{ContainerBuilders, Entry};
    use crate::Error;
    use crate::value::{Kind, Layout, List, Value};

    const DEQUE: Kind = Kind::new("deque", Layout::Seq);

    fn reversed(kind: Kind, entries: Vec<Entry>) -> Result<Value, Error> {
        let mut items: Vec<Value> = entries
            .into_iter()
            .map(|entry| match entry {
                Entry::Item(value) => value,
                Entry::Pair(_, value) => value,
            })
            .collect();
        items.reverse();
        Ok(Value::List(List::from_items(kind, items)))
    }

    #[test]
    fn set_keeps_first_occurrence() {
        let builders = ContainerBuilders::new();
        let set = builders
            .build(
                Kind::SET,
                [Value::Int(2), Value::Int(1), Value::Int(2)].map(Entry::Item),
                [Entry::Item(Value::Int(3))],
            )
            .unwrap();
        let set = set.as_list().unwrap();
        assert_eq!(set.kind(), Kind::SET);
        assert_eq!(set.items(), [Value::Int(2), Value::Int(1), Value::Int(3)]);
    }

    #[test]
    fn map_merges_extra_entries() {
        let builders = ContainerBuilders::new();
        let pair = Value::List(List::from_items(
            Kind::TUPLE,
            vec![Value::Str("b".into()), Value::Int(2)],
        ));
        let map = builders
            .build(
                Kind::MAP,
                [Entry::Pair("a".into(), Value::Int(1)), Entry::Item(pair)],
                [Entry::Pair("a".into(), Value::Int(3))],
            )
            .unwrap();
        let map = map.as_map().unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(map.get("a"), Some(&Value::Int(3)));

        let err = builders
            .build(Kind::MAP, [Entry::Item(Value::Int(1))], [])
            .unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { found: "int", .. }));
    }

    #[test]
    fn registered_builder_overrides_layout_default() {
        let mut builders = ContainerBuilders::new();
        let entries = || Entry::from_value(Value::List(List::from_items(
            Kind::LIST,
            vec![Value::Int(1), Value::Int(2)],
        )));

        let plain = builders.build(DEQUE, entries(), []).unwrap();
        assert_eq!(plain.as_list().unwrap().items(), [Value::Int(1), Value::Int(2)]);

        builders.register(DEQUE, reversed);
        let custom = builders.build(DEQUE, entries(), []).unwrap();
        assert_eq!(custom.as_list().unwrap().kind(), DEQUE);
        assert_eq!(custom.as_list().unwrap().items(), [Value::Int(2), Value::Int(1)]);
    }
}
