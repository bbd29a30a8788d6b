use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::registry::Registry;

/// A [`Registry`] behind `Arc<RwLock>`.
///
/// For applications that register types at runtime while other threads
/// convert. Conversions hold a read guard for their whole duration.
///
/// ```
/// use autodict_core::registry::SharedRegistry;
/// use autodict_core::{AutoDict, Options, Value};
///
/// let shared = SharedRegistry::default();
/// let registry = shared.read();
/// let tree = AutoDict::new(&registry).to_dict(Value::Int(1), &Options::new()).unwrap();
/// assert_eq!(tree, Value::Int(1));
/// ```
#[derive(Clone, Default)]
pub struct SharedRegistry {
    internal: Arc<RwLock<Registry>>,
}

impl SharedRegistry {
    /// Wraps an existing registry.
    pub fn new(registry: Registry) -> Self {
        Self {
            internal: Arc::new(RwLock::new(registry)),
        }
    }

    /// Takes a read lock, ignoring poisoning.
    pub fn read(&self) -> RwLockReadGuard<'_, Registry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock, ignoring poisoning.
    pub fn write(&self) -> RwLockWriteGuard<'_, Registry> {
        self.internal.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<Registry> for SharedRegistry {
    #[inline]
    fn from(registry: Registry) -> Self {
        Self::new(registry)
    }
}
