//! Request/offer storage for the swap ledger.
//!
//! ## Architecture
//!
//! - **BTreeMap**: Requests keyed by item, iterated in key order for the state root
//! - **Slab**: Pre-allocated offer storage for O(1) insert/remove
//! - **HashMap** (x2): Offered item -> slab key, and target request -> slab key
//!
//! The second offer index makes the cascade on request removal and the
//! one-offer-per-request check O(1).
//!
//! `SwapBook` is pure bookkeeping: it enforces key uniqueness but knows
//! nothing about ownership. Authorization lives in
//! [`SwapLedger`](crate::ledger::SwapLedger).
//!
//! ## Example
//!
//! ```
//! use swap_market::ledger::SwapBook;
//! use swap_market::types::{ItemRef, SwapOffer, SwapRequest};
//!
//! let mut book = SwapBook::with_capacity(16);
//! let wanted = ItemRef::new(1, 1);
//! let offered = ItemRef::new(1, 2);
//!
//! book.insert_request(wanted, SwapRequest::new(100));
//! book.insert_offer(offered, SwapOffer::new(wanted, 200)).unwrap();
//!
//! assert_eq!(book.offer_for_request(wanted).map(|(k, _)| k), Some(offered));
//! ```

use std::collections::{BTreeMap, HashMap};

use sha2::{Digest, Sha256};
use slab::Slab;

use crate::types::{ItemRef, SwapOffer, SwapRequest};

/// Offer stored in the slab together with its key.
#[derive(Debug, Clone, Copy)]
pub struct OfferNode {
    /// The offered item (map key)
    pub offered: ItemRef,

    /// The offer record
    pub offer: SwapOffer,
}

/// Index that blocked an offer insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferConflict {
    /// The target request already has an offer
    Request,

    /// The offered item already backs an offer
    OfferedItem,
}

/// Storage for active requests and offers.
#[derive(Debug, Default)]
pub struct SwapBook {
    /// Active requests, ordered by item
    requests: BTreeMap<ItemRef, SwapRequest>,

    /// Pre-allocated offer storage
    offers: Slab<OfferNode>,

    /// Offered item -> slab key
    offer_index: HashMap<ItemRef, usize>,

    /// Targeted request -> slab key
    request_offer: HashMap<ItemRef, usize>,
}

impl SwapBook {
    /// Create an empty book
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a book with pre-allocated offer capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            requests: BTreeMap::new(),
            offers: Slab::with_capacity(capacity),
            offer_index: HashMap::with_capacity(capacity),
            request_offer: HashMap::with_capacity(capacity),
        }
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    /// Pre-allocated offer slots
    #[inline]
    pub fn capacity(&self) -> usize {
        self.offers.capacity()
    }

    #[inline]
    pub fn request_count(&self) -> usize {
        self.requests.len()
    }

    #[inline]
    pub fn offer_count(&self) -> usize {
        self.offers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty() && self.offers.is_empty()
    }

    // ========================================================================
    // Requests
    // ========================================================================

    /// Active request for `item`
    ///
    /// A stored request with a zero owner is reported as absent.
    #[inline]
    pub fn request(&self, item: ItemRef) -> Option<&SwapRequest> {
        self.requests.get(&item).filter(|r| r.is_active())
    }

    #[inline]
    pub fn contains_request(&self, item: ItemRef) -> bool {
        self.request(item).is_some()
    }

    /// Insert a request, returning `false` if one is already active
    pub fn insert_request(&mut self, item: ItemRef, request: SwapRequest) -> bool {
        if self.contains_request(item) || !request.is_active() {
            return false;
        }
        self.requests.insert(item, request);
        true
    }

    /// Remove the request for `item`
    ///
    /// Does not touch the offer targeting it; callers cascade explicitly.
    pub fn remove_request(&mut self, item: ItemRef) -> Option<SwapRequest> {
        self.requests.remove(&item).filter(|r| r.is_active())
    }

    /// Iterate active requests in item order
    pub fn requests(&self) -> impl Iterator<Item = (&ItemRef, &SwapRequest)> {
        self.requests.iter().filter(|(_, r)| r.is_active())
    }

    // ========================================================================
    // Offers
    // ========================================================================

    /// Offer keyed by `offered`
    #[inline]
    pub fn offer(&self, offered: ItemRef) -> Option<&SwapOffer> {
        let key = *self.offer_index.get(&offered)?;
        self.offers.get(key).map(|node| &node.offer)
    }

    #[inline]
    pub fn contains_offer(&self, offered: ItemRef) -> bool {
        self.offer_index.contains_key(&offered)
    }

    /// Offer currently targeting the request for `item`
    pub fn offer_for_request(&self, item: ItemRef) -> Option<(ItemRef, &SwapOffer)> {
        let key = *self.request_offer.get(&item)?;
        self.offers.get(key).map(|node| (node.offered, &node.offer))
    }

    /// Insert an offer, returning its slab key
    ///
    /// The target request is checked before the offered item.
    pub fn insert_offer(&mut self, offered: ItemRef, offer: SwapOffer) -> Result<usize, OfferConflict> {
        if self.request_offer.contains_key(&offer.target) {
            return Err(OfferConflict::Request);
        }
        if self.offer_index.contains_key(&offered) {
            return Err(OfferConflict::OfferedItem);
        }

        let key = self.offers.insert(OfferNode { offered, offer });
        self.offer_index.insert(offered, key);
        self.request_offer.insert(offer.target, key);
        Ok(key)
    }

    /// Remove the offer keyed by `offered`
    pub fn remove_offer(&mut self, offered: ItemRef) -> Option<SwapOffer> {
        let key = self.offer_index.remove(&offered)?;
        let node = self.offers.try_remove(key)?;
        self.request_offer.remove(&node.offer.target);
        Some(node.offer)
    }

    /// Remove the offer targeting `item`, returning its key and record
    pub fn remove_offer_for_request(&mut self, item: ItemRef) -> Option<(ItemRef, SwapOffer)> {
        let key = *self.request_offer.get(&item)?;
        let offered = self.offers.get(key)?.offered;
        self.remove_offer(offered).map(|offer| (offered, offer))
    }

    /// Iterate offers in slab order
    pub fn offers(&self) -> impl Iterator<Item = (&ItemRef, &SwapOffer)> {
        self.offers.iter().map(|(_, node)| (&node.offered, &node.offer))
    }

    // ========================================================================
    // State Root
    // ========================================================================

    /// SHA-256 commitment over every active request and offer
    ///
    /// Requests are hashed in item order, then offers in offered-item order.
    /// Each leaf is the key bytes followed by the record's SSZ bytes, with a
    /// one-byte tag separating the two sections.
    pub fn compute_state_root(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();

        hasher.update([0x01]);
        for (item, request) in self.requests() {
            hasher.update(item.leaf_bytes());
            hasher.update(request.leaf_bytes());
        }

        let mut offers: Vec<(&ItemRef, &SwapOffer)> = self.offers().collect();
        offers.sort_by_key(|(offered, _)| **offered);

        hasher.update([0x02]);
        for (offered, offer) in offers {
            hasher.update(offered.leaf_bytes());
            hasher.update(offer.leaf_bytes());
        }

        let mut root = [0u8; 32];
        root.copy_from_slice(&hasher.finalize());
        root
    }

    /// Clear all requests and offers
    pub fn clear(&mut self) {
        self.requests.clear();
        self.offers.clear();
        self.offer_index.clear();
        self.request_offer.clear();
    }
}
