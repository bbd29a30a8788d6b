//! Static type descriptors.
//!
//! ## Menu
//!
//! - [`TypeInfo`]: the descriptor of one type: id, declared name, full path and [`Shape`].
//!     - [`RecordInfo`]: ordered field table of a record-like type.
//!     - [`EnumInfo`]: members of an enumeration and their literal values.
//!     - [`TupleInfo`]: named-tuple field table.
//!     - [`ObjectInfo`]: attribute-bag types with a constructor parameter table.
//!     - `Opaque`: leaves without structure.
//!
//! - [`Typed`]: static access to the [`TypeInfo`] of a type, see [`TypeInfoCell`].
//!
//! - [`Ty`]: a declared type expression (`int`, `list[Point]`, `Union[str, None]`, ...).
//!     - [`TypeRef`]: a lazy pointer to the [`TypeInfo`] of a named type.
//!     - [`Literal`]: a permitted literal value.
//!
//! - [`Describe`]: static access to the [`Ty`] of a Rust type.
//!
//! - [`inspect`]: predicates and decompositions over [`Ty`] and [`TypeInfo`].
//!
//! Descriptors are usually generated by [`#[derive(Record)]`](crate::derive::Record)
//! and [`#[derive(Enumeration)]`](crate::derive::Enumeration), and can be
//! written by hand for everything else.

// -----------------------------------------------------------------------------
// Modules

mod describe;
mod enum_info;
mod object_info;
mod record_info;
mod tuple_info;
mod ty;
mod type_info;
mod typed;

pub mod inspect;

// -----------------------------------------------------------------------------
// Exports

pub use describe::Describe;
pub use enum_info::{EnumInfo, VariantInfo};
pub use object_info::{Arguments, ObjectInfo, ParamInfo, ParamKind};
pub use record_info::{FieldDefault, FieldInfo, Fields, Getter, RecordInfo, Setter};
pub use tuple_info::{TupleField, TupleInfo};
pub use ty::{Literal, Ty, TypeRef};
pub use type_info::{Shape, ShapeKind, TypeInfo};
pub use typed::{TypeInfoCell, Typed};
