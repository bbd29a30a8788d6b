use core::any::Any;
use core::fmt::Debug;

use crate::Error;
use crate::info::{TypeInfo, Typed};

// -----------------------------------------------------------------------------
// Object

/// A type-erased instance of a described type.
///
/// `Object` is what flows through the engine for non-primitive values: an
/// encode strategy receives a `&dyn Object`, a decode strategy returns one
/// boxed inside a [`Value::Object`](crate::Value::Object).
///
/// It is implemented for every [`Typed`] type that is also `Clone`,
/// `PartialEq` and `Debug`, usually through
/// [`#[derive(Record)]`](crate::derive::Record) or
/// [`#[derive(Enumeration)]`](crate::derive::Enumeration).
pub trait Object: Any + Send + Sync + Debug {
    /// Returns the [`TypeInfo`] of the underlying type.
    fn object_type(&self) -> &'static TypeInfo;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// Clones the instance into a new box.
    fn clone_object(&self) -> Box<dyn Object>;

    /// Compares two instances, `false` when the types differ.
    fn object_eq(&self, other: &dyn Object) -> bool;
}

impl<T> Object for T
where
    T: Typed + Clone + PartialEq + Debug + Send + Sync + 'static,
{
    #[inline]
    fn object_type(&self) -> &'static TypeInfo {
        T::type_info()
    }

    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    #[inline]
    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn clone_object(&self) -> Box<dyn Object> {
        Box::new(self.clone())
    }

    fn object_eq(&self, other: &dyn Object) -> bool {
        match other.as_any().downcast_ref::<T>() {
            Some(other) => self == other,
            None => false,
        }
    }
}

impl dyn Object {
    /// Returns `true` if the underlying type is `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.as_any().is::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    /// Downcasts the box, giving it back unchanged if the type differs.
    pub fn downcast<T: Any>(self: Box<Self>) -> Result<Box<T>, Box<dyn Object>> {
        if !self.is::<T>() {
            return Err(self);
        }
        Ok(self
            .into_any()
            .downcast::<T>()
            .unwrap_or_else(|_| unreachable!("type checked above")))
    }
}

impl Clone for Box<dyn Object> {
    #[inline]
    fn clone(&self) -> Self {
        (**self).clone_object()
    }
}

impl PartialEq for dyn Object {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.object_eq(other)
    }
}

// -----------------------------------------------------------------------------
// Checked casts

/// Downcasts `object` to `T`, failing with [`Error::TypeMismatch`].
///
/// Used by generated field accessors.
pub fn cast_ref<T: Typed>(object: &dyn Object) -> Result<&T, Error> {
    let found = object.object_type().name();
    object
        .downcast_ref::<T>()
        .ok_or_else(|| Error::mismatch(T::type_info().name(), found))
}

/// Mutable version of [`cast_ref`].
pub fn cast_mut<T: Typed>(object: &mut dyn Object) -> Result<&mut T, Error> {
    let found = object.object_type().name();
    object
        .downcast_mut::<T>()
        .ok_or_else(|| Error::mismatch(T::type_info().name(), found))
}
