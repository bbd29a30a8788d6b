//! Items used by the code generated by `autodict_derive`, not public API.

pub use crate::dictable::own_strategy;

#[cfg(feature = "auto_register")]
pub mod auto_register {
    use crate::registry::Registry;

    pub use inventory;

    /// A registration submitted by a derived type.
    pub struct AutoRegistration(pub fn(&mut Registry));

    inventory::collect!(AutoRegistration);
}
