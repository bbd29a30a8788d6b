//! The strategy registry.
//!
//! ## Menu
//!
//! - [`Strategy`]: a pair of encode/decode functions, see [`EncodeFn`] and [`DecodeFn`].
//! - [`Registration`]: what to register for a type: name and strategy halves.
//! - [`StrategyEntry`]: a registered type with its name and strategy.
//! - [`Registry`]: the table of entries, addressable by `TypeId` and by name.
//! - [`SharedRegistry`]: `Arc<RwLock<Registry>>` for runtime registration.
//!
//! ## auto_register
//!
//! Types deriving with `#[autodict(dictable)]` or `#[autodict(auto_register)]`
//! submit themselves through the [`inventory`] crate, and
//! [`Registry::auto_register`] collects them at start-up. Not all platforms
//! support it (the major ones do); without the `auto_register` feature the
//! function does nothing and returns `false`.
//!
//! [`inventory`]: https://docs.rs/inventory

// -----------------------------------------------------------------------------
// Modules

mod entry;
mod shared;
mod strategy;
mod type_registry;

// -----------------------------------------------------------------------------
// Exports

pub use entry::{Registration, StrategyEntry};
pub use shared::SharedRegistry;
pub use strategy::{DecodeFn, EncodeFn, Strategy};
pub use type_registry::Registry;
