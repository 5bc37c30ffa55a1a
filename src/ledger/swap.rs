//! The swap ledger: request/offer bookkeeping and atomic two-way settlement.
//!
//! ## Operations
//!
//! | Operation | Registry access | Emits |
//! |-----------|-----------------|-------|
//! | `add_request` | read | `RequestAdded` |
//! | `remove_request` | read | `OfferRemoved` (cascade), `RequestRemoved` |
//! | `add_offer` | read | `OfferAdded` |
//! | `remove_offer` | read | `OfferRemoved` |
//! | `swap` | read + 2 transfers | `Transfer` x2, `OfferRemoved`, `SwapCompleted` |
//!
//! Every operation validates everything before it mutates anything, so a
//! rejected call leaves both the ledger and the registry untouched.
//!
//! Removal rights are checked against the owner/submitter recorded when the
//! entry was posted. When there is no entry, a caller who does not hold the
//! item is told `NotOwner` before being told the entry is missing.

use tracing::{debug, info, warn};

use crate::config::LedgerConfig;
use crate::error::{RegistryError, Result, SwapError};
use crate::ledger::{OfferConflict, SwapBook};
use crate::registry::OwnershipRegistry;
use crate::types::{AccountId, Event, ItemRef, SwapOffer, SwapRequest};

/// Swap ledger acting as account `account` towards the registry.
///
/// ## Example
///
/// ```
/// use swap_market::ledger::SwapLedger;
/// use swap_market::registry::{InMemoryRegistry, OwnershipRegistry};
/// use swap_market::types::ItemRef;
///
/// const MARKET: u64 = 9;
/// let (alice, bob) = (100, 200);
/// let (wanted, offered) = (ItemRef::new(1, 1), ItemRef::new(1, 2));
///
/// let mut registry = InMemoryRegistry::new();
/// registry.mint(wanted, alice).unwrap();
/// registry.mint(offered, bob).unwrap();
/// registry.approve(alice, wanted, MARKET).unwrap();
/// registry.approve(bob, offered, MARKET).unwrap();
///
/// let mut ledger = SwapLedger::new(MARKET);
/// ledger.add_request(&registry, wanted, alice).unwrap();
/// ledger.add_offer(&registry, wanted, offered, bob).unwrap();
/// let events = ledger.swap(&mut registry, wanted, offered).unwrap();
///
/// assert_eq!(events.len(), 4);
/// assert_eq!(registry.owner_of(wanted), Ok(bob));
/// assert_eq!(registry.owner_of(offered), Ok(alice));
/// ```
#[derive(Debug)]
pub struct SwapLedger {
    /// Identity the ledger presents to the registry as mover
    account: AccountId,

    /// Active requests and offers
    book: SwapBook,

    /// Number of successful swaps
    swaps_completed: u64,
}

impl SwapLedger {
    /// Create an empty ledger acting as `account`
    pub fn new(account: AccountId) -> Self {
        Self {
            account,
            book: SwapBook::new(),
            swaps_completed: 0,
        }
    }

    /// Create a ledger with pre-allocated offer capacity
    pub fn with_capacity(account: AccountId, capacity: usize) -> Self {
        Self {
            account,
            book: SwapBook::with_capacity(capacity),
            swaps_completed: 0,
        }
    }

    /// Create a ledger from the `[ledger]` config section
    pub fn from_config(config: &LedgerConfig) -> Self {
        Self::with_capacity(config.account, config.capacity)
    }

    // ========================================================================
    // Requests
    // ========================================================================

    /// Post a request to trade `item`
    ///
    /// `caller` must hold the item and the ledger must be authorized to move
    /// it. At most one request may exist per item.
    pub fn add_request<R>(&mut self, registry: &R, item: ItemRef, caller: AccountId) -> Result<Vec<Event>>
    where
        R: OwnershipRegistry + ?Sized,
    {
        self.check_standing(registry, item, caller)
            .inspect_err(|err| debug!(%item, caller, %err, "add_request rejected"))?;

        if !self.book.insert_request(item, SwapRequest::new(caller)) {
            debug!(%item, caller, "add_request rejected: request exists");
            return Err(SwapError::RequestAlreadyExists(item));
        }

        info!(%item, owner = caller, "request added");
        Ok(vec![Event::RequestAdded { item, owner: caller }])
    }

    /// Withdraw the request for `item`
    ///
    /// Only the recorded owner may remove it. A pending offer against the
    /// request is removed as well.
    pub fn remove_request<R>(&mut self, registry: &R, item: ItemRef, caller: AccountId) -> Result<Vec<Event>>
    where
        R: OwnershipRegistry + ?Sized,
    {
        let Some(&request) = self.book.request(item) else {
            Self::check_holder(registry, item, caller)
                .inspect_err(|err| debug!(%item, caller, %err, "remove_request rejected"))?;
            return Err(SwapError::RequestNotExists(item));
        };

        if request.owner != caller {
            debug!(%item, caller, owner = request.owner, "remove_request rejected: not owner");
            return Err(SwapError::NotOwner { item, caller });
        }

        let mut events = Vec::with_capacity(2);
        if let Some((offered, _)) = self.book.remove_offer_for_request(item) {
            info!(%item, %offered, "offer removed with its request");
            events.push(Event::OfferRemoved { item, offered });
        }
        self.book.remove_request(item);

        info!(%item, owner = caller, "request removed");
        events.push(Event::RequestRemoved { item, owner: caller });
        Ok(events)
    }

    // ========================================================================
    // Offers
    // ========================================================================

    /// Offer `offered` in exchange for the item under request `item`
    ///
    /// `caller` must hold `offered` and the ledger must be authorized to move
    /// it. A request holds at most one offer, and an item can back at most
    /// one offer; `OfferAlreadyExists` names `item` for the first conflict
    /// and `offered` for the second.
    pub fn add_offer<R>(
        &mut self,
        registry: &R,
        item: ItemRef,
        offered: ItemRef,
        caller: AccountId,
    ) -> Result<Vec<Event>>
    where
        R: OwnershipRegistry + ?Sized,
    {
        if item == offered {
            return Err(SwapError::SameItem(item));
        }

        self.check_standing(registry, offered, caller)
            .inspect_err(|err| debug!(%item, %offered, caller, %err, "add_offer rejected"))?;

        if !self.book.contains_request(item) {
            debug!(%item, %offered, caller, "add_offer rejected: no request");
            return Err(SwapError::RequestNotExists(item));
        }

        if let Err(conflict) = self.book.insert_offer(offered, SwapOffer::new(item, caller)) {
            debug!(%item, %offered, caller, ?conflict, "add_offer rejected: offer exists");
            return Err(match conflict {
                OfferConflict::Request => SwapError::OfferAlreadyExists(item),
                OfferConflict::OfferedItem => SwapError::OfferAlreadyExists(offered),
            });
        }

        info!(%item, %offered, submitter = caller, "offer added");
        Ok(vec![Event::OfferAdded {
            item,
            offered,
            submitter: caller,
        }])
    }

    /// Withdraw the offer backed by `offered`
    ///
    /// Only the recorded submitter may remove it.
    pub fn remove_offer<R>(&mut self, registry: &R, offered: ItemRef, caller: AccountId) -> Result<Vec<Event>>
    where
        R: OwnershipRegistry + ?Sized,
    {
        let Some(&offer) = self.book.offer(offered) else {
            Self::check_holder(registry, offered, caller)
                .inspect_err(|err| debug!(%offered, caller, %err, "remove_offer rejected"))?;
            return Err(SwapError::OfferNotExists(offered));
        };

        if offer.submitter != caller {
            debug!(%offered, caller, submitter = offer.submitter, "remove_offer rejected: not owner");
            return Err(SwapError::NotOwner { item: offered, caller });
        }

        self.book.remove_offer(offered);

        info!(item = %offer.target, %offered, "offer removed");
        Ok(vec![Event::OfferRemoved {
            item: offer.target,
            offered,
        }])
    }

    // ========================================================================
    // Settlement
    // ========================================================================

    /// Exchange the item under request `item` with `offered`
    ///
    /// Both holders and both authorizations are revalidated against the
    /// registry before the first transfer. On success `item` belongs to the
    /// offer's submitter, `offered` to the request's owner, and both ledger
    /// entries are gone.
    ///
    /// No-partial-transfer relies on the registry honouring the
    /// [`OwnershipRegistry`] transfer contract. A registry that rejects the
    /// second leg after revalidation leaves the first leg applied; the error
    /// is still returned and both ledger entries are kept.
    pub fn swap<R>(&mut self, registry: &mut R, item: ItemRef, offered: ItemRef) -> Result<Vec<Event>>
    where
        R: OwnershipRegistry + ?Sized,
    {
        let request = *self
            .book
            .request(item)
            .ok_or(SwapError::RequestNotExists(item))?;

        let offer = match self.book.offer(offered) {
            Some(offer) if offer.target == item => *offer,
            _ => return Err(SwapError::OfferNotExists(offered)),
        };

        let requester = request.owner;
        let submitter = offer.submitter;

        self.check_standing(&*registry, item, requester)
            .and_then(|_| self.check_standing(&*registry, offered, submitter))
            .inspect_err(|err| debug!(%item, %offered, %err, "swap rejected on revalidation"))?;

        // Both legs revalidated in this call; the registry contract guarantees
        // the transfers succeed.
        let first = registry
            .transfer(item, requester, submitter, self.account)
            .map_err(Self::transfer_error)?;
        let second = registry
            .transfer(offered, submitter, requester, self.account)
            .map_err(Self::transfer_error)
            .inspect_err(|err| warn!(%item, %offered, %err, "second swap leg rejected after revalidation"))?;

        self.book.remove_offer(offered);
        self.book.remove_request(item);
        self.swaps_completed += 1;

        info!(%item, %offered, requester, submitter, "swap completed");
        Ok(vec![
            Event::Transfer(first),
            Event::Transfer(second),
            Event::OfferRemoved { item, offered },
            Event::SwapCompleted {
                item,
                offered,
                requester,
                submitter,
            },
        ])
    }

    /// Require `account` to hold `item` and the ledger to be authorized for it
    fn check_standing<R>(&self, registry: &R, item: ItemRef, account: AccountId) -> Result<()>
    where
        R: OwnershipRegistry + ?Sized,
    {
        Self::check_holder(registry, item, account)?;
        if !registry.is_authorized(item, self.account) {
            return Err(SwapError::NotApproved(item));
        }
        Ok(())
    }

    fn check_holder<R>(registry: &R, item: ItemRef, account: AccountId) -> Result<()>
    where
        R: OwnershipRegistry + ?Sized,
    {
        if registry.owner_of(item)? != account {
            return Err(SwapError::NotOwner { item, caller: account });
        }
        Ok(())
    }

    /// Report a rejected transfer in ledger terms
    fn transfer_error(err: RegistryError) -> SwapError {
        match err {
            RegistryError::NotHolder { item, account } => SwapError::NotOwner { item, caller: account },
            RegistryError::NotAuthorized { item, .. } => SwapError::NotApproved(item),
            other => SwapError::Registry(other),
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Identity the ledger uses as mover
    #[inline]
    pub fn account(&self) -> AccountId {
        self.account
    }

    #[inline]
    pub fn get_request(&self, item: ItemRef) -> Option<&SwapRequest> {
        self.book.request(item)
    }

    #[inline]
    pub fn get_offer(&self, offered: ItemRef) -> Option<&SwapOffer> {
        self.book.offer(offered)
    }

    /// Offer currently targeting the request for `item`
    #[inline]
    pub fn offer_for_request(&self, item: ItemRef) -> Option<(ItemRef, &SwapOffer)> {
        self.book.offer_for_request(item)
    }

    #[inline]
    pub fn request_count(&self) -> usize {
        self.book.request_count()
    }

    #[inline]
    pub fn offer_count(&self) -> usize {
        self.book.offer_count()
    }

    #[inline]
    pub fn swaps_completed(&self) -> u64 {
        self.swaps_completed
    }

    /// Read-only view of the underlying storage
    #[inline]
    pub fn book(&self) -> &SwapBook {
        &self.book
    }

    /// SHA-256 commitment over the active requests and offers
    pub fn compute_state_root(&self) -> [u8; 32] {
        self.book.compute_state_root()
    }

    /// State root as a hex string
    pub fn state_root_hex(&self) -> String {
        hex::encode(self.compute_state_root())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
