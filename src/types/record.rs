//! Ledger records: swap requests and swap offers.
//!
//! Both records are fixed-size SSZ containers. The key a record is stored
//! under (the requested or offered item) is kept outside the record, the
//! same way the ledger maps are keyed.

use ssz_rs::prelude::*;

use crate::types::item::{AccountId, ItemRef, ZERO_ACCOUNT};

// ============================================================================
// SwapRequest
// ============================================================================

/// A standing request to trade a specific item.
///
/// ## SSZ Layout
///
/// - Total size: 8 bytes (owner)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, SimpleSerialize)]
pub struct SwapRequest {
    /// Holder who posted the request
    pub owner: u64,
}

impl SwapRequest {
    /// Create a request posted by `owner`
    #[inline]
    pub fn new(owner: AccountId) -> Self {
        Self { owner }
    }

    /// A zero owner is equivalent to absence
    #[inline]
    pub fn is_active(&self) -> bool {
        self.owner != ZERO_ACCOUNT
    }

    /// Little-endian leaf bytes (same layout as the SSZ encoding)
    pub fn leaf_bytes(&self) -> [u8; 8] {
        self.owner.to_le_bytes()
    }
}

// ============================================================================
// SwapOffer
// ============================================================================

/// A counter-proposal pointing back at the request it was made against.
///
/// The submitter is stored explicitly so removal rights never depend on
/// registry state that may have changed since the offer was posted.
///
/// ## SSZ Layout
///
/// - Total size: 24 bytes (target collection + target item_id + submitter)
///
/// ## Example
///
/// ```
/// use swap_market::types::{ItemRef, SwapOffer};
///
/// let offer = SwapOffer::new(ItemRef::new(1, 1), 200);
/// assert_eq!(offer.target, ItemRef::new(1, 1));
/// assert_eq!(offer.submitter, 200);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, SimpleSerialize)]
pub struct SwapOffer {
    /// The requested item this offer targets
    pub target: ItemRef,

    /// Holder who submitted the offer
    pub submitter: u64,
}

impl SwapOffer {
    /// Create an offer against `target` submitted by `submitter`
    #[inline]
    pub fn new(target: ItemRef, submitter: AccountId) -> Self {
        Self { target, submitter }
    }

    /// Little-endian leaf bytes (same layout as the SSZ encoding)
    pub fn leaf_bytes(&self) -> [u8; 24] {
        let mut out = [0u8; 24];
        out[..16].copy_from_slice(&self.target.leaf_bytes());
        out[16..].copy_from_slice(&self.submitter.to_le_bytes());
        out
    }
}
