use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use crate::info::Ty;
use crate::value::{Kind, List, Map, Value};

/// A static accessor to the declared [`Ty`] of a Rust type.
///
/// Field types of derived descriptors come from this trait, so every field
/// type of a `#[derive(Record)]` type must implement it. Override the result
/// with `#[autodict(ty = ...)]` where the Rust type is less precise than the
/// declaration should be.
pub trait Describe {
    fn describe() -> Ty;
}

macro_rules! impl_leaf {
    ($ty:expr => $($rust:ty),*) => {$(
        impl Describe for $rust {
            #[inline]
            fn describe() -> Ty {
                $ty
            }
        }
    )*};
}

impl_leaf!(Ty::Null => ());
impl_leaf!(Ty::Bool => bool);
impl_leaf!(Ty::Int => i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
impl_leaf!(Ty::Float => f32, f64);
impl_leaf!(Ty::Str => String, char, &'static str, Cow<'static, str>);
impl_leaf!(Ty::Any => Value);
impl_leaf!(Ty::bare(Kind::LIST) => List);
impl_leaf!(Ty::bare(Kind::MAP) => Map);

impl<T: Describe> Describe for Option<T> {
    fn describe() -> Ty {
        Ty::optional(T::describe())
    }
}

impl<T: Describe> Describe for Box<T> {
    #[inline]
    fn describe() -> Ty {
        T::describe()
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn describe() -> Ty {
        Ty::list(T::describe())
    }
}

impl<T: Describe> Describe for VecDeque<T> {
    fn describe() -> Ty {
        Ty::list(T::describe())
    }
}

impl<T: Describe, S> Describe for HashSet<T, S> {
    fn describe() -> Ty {
        Ty::set(T::describe())
    }
}

impl<T: Describe> Describe for BTreeSet<T> {
    fn describe() -> Ty {
        Ty::set(T::describe())
    }
}

impl<K: Describe, V: Describe, S> Describe for HashMap<K, V, S> {
    fn describe() -> Ty {
        Ty::map(K::describe(), V::describe())
    }
}

impl<K: Describe, V: Describe> Describe for BTreeMap<K, V> {
    fn describe() -> Ty {
        Ty::map(K::describe(), V::describe())
    }
}

macro_rules! impl_tuple {
    ($($name:ident),+) => {
        impl<$($name: Describe),+> Describe for ($($name,)+) {
            fn describe() -> Ty {
                Ty::tuple([$($name::describe()),+])
            }
        }
    };
}

impl_tuple!(A);
impl_tuple!(A, B);
impl_tuple!(A, B, C);
impl_tuple!(A, B, C, D);
impl_tuple!(A, B, C, D, E);
impl_tuple!(A, B, C, D, E, F);
