use core::fmt;

use super::Value;

// -----------------------------------------------------------------------------
// Kind

/// How the items of a container are arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Ordered items.
    Seq,
    /// Unordered, deduplicated items.
    Set,
    /// String-keyed pairs.
    Map,
}

/// A container kind: a name and a [`Layout`].
///
/// The four built-in kinds are [`Kind::LIST`], [`Kind::TUPLE`], [`Kind::SET`]
/// and [`Kind::MAP`]. Other kinds are declared with [`Kind::new`] and get a
/// builder through [`ContainerBuilders::register`].
///
/// [`ContainerBuilders::register`]: crate::container::ContainerBuilders::register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Kind {
    name: &'static str,
    layout: Layout,
}

impl Kind {
    pub const LIST: Self = Self::new("list", Layout::Seq);
    pub const TUPLE: Self = Self::new("tuple", Layout::Seq);
    pub const SET: Self = Self::new("set", Layout::Set);
    pub const MAP: Self = Self::new("map", Layout::Map);

    #[inline]
    pub const fn new(name: &'static str, layout: Layout) -> Self {
        Self { name, layout }
    }

    #[inline]
    pub const fn name(self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn layout(self) -> Layout {
        self.layout
    }

    /// Returns `true` for the four kinds every registry knows.
    pub fn is_standard(self) -> bool {
        self == Self::LIST || self == Self::TUPLE || self == Self::SET || self == Self::MAP
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

// -----------------------------------------------------------------------------
// List

/// An ordered sequence or a set of values.
///
/// Sequences compare item by item regardless of their kind name, so a
/// `tuple` equals a `list` with the same items. Sets compare without order.
#[derive(Clone)]
pub struct List {
    kind: Kind,
    items: Vec<Value>,
}

impl List {
    #[inline]
    pub const fn new(kind: Kind) -> Self {
        Self {
            kind,
            items: Vec::new(),
        }
    }

    #[inline]
    pub fn from_items(kind: Kind, items: Vec<Value>) -> Self {
        Self { kind, items }
    }

    #[inline]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[inline]
    pub fn set_kind(&mut self, kind: Kind) {
        self.kind = kind;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, Value> {
        self.items.iter()
    }

    #[inline]
    pub fn push(&mut self, value: Value) {
        self.items.push(value);
    }

    /// Pushes `value` unless an equal item is already present.
    pub fn insert_unique(&mut self, value: Value) -> bool {
        if self.items.contains(&value) {
            return false;
        }
        self.items.push(value);
        true
    }

    #[inline]
    pub fn into_items(self) -> Vec<Value> {
        self.items
    }
}

impl PartialEq for List {
    fn eq(&self, other: &Self) -> bool {
        if self.items.len() != other.items.len() {
            return false;
        }
        match (self.kind.layout, other.kind.layout) {
            (Layout::Set, Layout::Set) => set_eq(&self.items, &other.items),
            (Layout::Set, _) | (_, Layout::Set) => false,
            _ => self.items == other.items,
        }
    }
}

fn set_eq(a: &[Value], b: &[Value]) -> bool {
    let mut used = vec![false; b.len()];
    a.iter().all(|item| {
        let found = b
            .iter()
            .enumerate()
            .position(|(index, candidate)| !used[index] && candidate == item);
        match found {
            Some(index) => {
                used[index] = true;
                true
            }
            None => false,
        }
    })
}

impl fmt::Debug for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind.layout == Layout::Set {
            f.debug_set().entries(&self.items).finish()
        } else {
            f.debug_list().entries(&self.items).finish()
        }
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = core::slice::Iter<'a, Value>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for List {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{Kind, List};
    use crate::Value;

    #[test]
    fn sequences_ignore_kind_name() {
        let list = List::from_items(Kind::LIST, vec![Value::Int(1), Value::Int(2)]);
        let tuple = List::from_items(Kind::TUPLE, vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(list, tuple);
    }

    #[test]
    fn sets_ignore_order() {
        let a = List::from_items(Kind::SET, vec![Value::Int(1), Value::Int(2)]);
        let b = List::from_items(Kind::SET, vec![Value::Int(2), Value::Int(1)]);
        let c = List::from_items(Kind::LIST, vec![Value::Int(2), Value::Int(1)]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn insert_unique_deduplicates() {
        let mut set = List::new(Kind::SET);
        assert!(set.insert_unique(Value::Int(1)));
        assert!(!set.insert_unique(Value::Int(1)));
        assert_eq!(set.len(), 1);
    }
}
