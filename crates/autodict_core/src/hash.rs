//! Hash containers used by the registries.

use core::any::TypeId;
use core::hash::{BuildHasher, Hasher};

use foldhash::fast::FixedState;

/// A [`hashbrown::HashMap`] with a fixed-seed [`foldhash`] state.
pub(crate) type HashMap<K, V> = hashbrown::HashMap<K, V, FixedState>;

/// A [`hashbrown::HashSet`] with a fixed-seed [`foldhash`] state.
pub(crate) type HashSet<K> = hashbrown::HashSet<K, FixedState>;

/// A map keyed by [`TypeId`].
///
/// `TypeId` is already a high quality hash, so the hasher only keeps the last
/// written integer.
pub(crate) type TypeIdMap<V> = hashbrown::HashMap<TypeId, V, TypeIdState>;

#[derive(Clone, Copy, Default, Debug)]
pub(crate) struct TypeIdState;

impl BuildHasher for TypeIdState {
    type Hasher = TypeIdHasher;

    #[inline]
    fn build_hasher(&self) -> Self::Hasher {
        TypeIdHasher(0)
    }
}

#[derive(Default)]
pub(crate) struct TypeIdHasher(u64);

impl Hasher for TypeIdHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        // Not used by `TypeId`, fold the bytes in case the layout changes.
        for byte in bytes {
            self.0 = self.0.rotate_left(8) ^ u64::from(*byte);
        }
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.0 = i;
    }

    #[inline]
    fn write_u128(&mut self, i: u128) {
        self.0 = i as u64 ^ (i >> 64) as u64;
    }
}
