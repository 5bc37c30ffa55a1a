//! Ownership registry capability.
//!
//! ## Design
//!
//! The swap ledger never mutates ownership itself. It asks a registry who
//! holds an item, whether the ledger may move it, and to perform transfers.
//! Any concrete registry (the in-memory one below, a test double, or a
//! bridge to a real token contract) satisfies [`OwnershipRegistry`].
//!
//! ## Transfer Contract
//!
//! `transfer` must either apply fully or not at all, and must succeed
//! whenever `to` is non-zero, `owner_of(item) == from` and
//! `is_authorized(item, mover)` hold.
//! The ledger relies on this to keep a swap atomic: both legs are
//! revalidated inside the same serialized call before the first one runs.
//!
//! ## Example
//!
//! ```
//! use swap_market::registry::{InMemoryRegistry, OwnershipRegistry};
//! use swap_market::types::ItemRef;
//!
//! let mut registry = InMemoryRegistry::new();
//! let item = ItemRef::new(1, 1);
//! registry.mint(item, 100).unwrap();
//!
//! assert_eq!(registry.owner_of(item), Ok(100));
//! assert!(!registry.is_authorized(item, 9));
//! ```

pub mod memory;

pub use memory::InMemoryRegistry;

use crate::error::RegistryError;
use crate::types::{AccountId, ItemRef, Transfer};

/// Narrow view of an item registry consumed by the swap ledger.
pub trait OwnershipRegistry {
    /// Current holder of `item`
    ///
    /// Fails with [`RegistryError::UnknownItem`] if the item does not exist.
    fn owner_of(&self, item: ItemRef) -> Result<AccountId, RegistryError>;

    /// Whether `mover` may transfer `item` on the current holder's behalf
    fn is_authorized(&self, item: ItemRef, mover: AccountId) -> bool;

    /// Move `item` from `from` to `to`, acting as `mover`
    fn transfer(
        &mut self,
        item: ItemRef,
        from: AccountId,
        to: AccountId,
        mover: AccountId,
    ) -> Result<Transfer, RegistryError>;
}
