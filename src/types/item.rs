//! Item references and account identifiers.
//!
//! ## SSZ Serialization
//!
//! `ItemRef` derives `SimpleSerialize` from ssz_rs. It is a fixed-size
//! container of two u64 fields (16 bytes, little-endian), which makes it a
//! stable leaf encoding for the ledger state root.

use std::fmt;

use ssz_rs::prelude::*;

/// Account identifier for holders, submitters and the ledger itself.
pub type AccountId = u64;

/// Collection (item family) identifier.
pub type CollectionId = u64;

/// The zero account. A record whose owner is zero is treated as absent.
pub const ZERO_ACCOUNT: AccountId = 0;

// ============================================================================
// ItemRef
// ============================================================================

/// Composite key identifying one transferable item.
///
/// The same `item_id` in two different collections refers to two distinct
/// items.
///
/// ## Example
///
/// ```
/// use swap_market::types::ItemRef;
///
/// let a = ItemRef::new(7, 1);
/// let b = ItemRef::new(8, 1);
///
/// assert_ne!(a, b);
/// assert_eq!(a.to_string(), "7:1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, SimpleSerialize)]
pub struct ItemRef {
    /// Collection the item belongs to
    pub collection: u64,

    /// Collection-scoped item identifier
    pub item_id: u64,
}

impl ItemRef {
    /// Create a new item reference
    #[inline]
    pub fn new(collection: CollectionId, item_id: u64) -> Self {
        Self { collection, item_id }
    }

    /// Little-endian leaf bytes (same layout as the SSZ encoding)
    pub fn leaf_bytes(&self) -> [u8; 16] {
        let mut out = [0u8; 16];
        out[..8].copy_from_slice(&self.collection.to_le_bytes());
        out[8..].copy_from_slice(&self.item_id.to_le_bytes());
        out
    }
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.collection, self.item_id)
    }
}
