//! Serialized access to a ledger and its registry for concurrent hosts.
//!
//! Ledger correctness assumes one mutating call at a time. `SharedMarket`
//! makes that explicit: ledger and registry sit behind a single
//! `parking_lot::Mutex`, and every operation holds the lock for its whole
//! duration, so concurrent callers are totally ordered.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::Result;
use crate::ledger::SwapLedger;
use crate::registry::OwnershipRegistry;
use crate::types::{AccountId, Event, ItemRef, SwapOffer, SwapRequest};

#[derive(Debug)]
struct MarketState<R> {
    ledger: SwapLedger,
    registry: R,
}

/// Cloneable handle to a ledger and the registry it settles against.
///
/// ## Example
///
/// ```
/// use swap_market::ledger::{SharedMarket, SwapLedger};
/// use swap_market::registry::InMemoryRegistry;
/// use swap_market::types::ItemRef;
///
/// let market = SharedMarket::new(SwapLedger::new(9), InMemoryRegistry::new());
/// let item = ItemRef::new(1, 1);
///
/// market.with_registry(|registry| {
///     registry.mint(item, 100).unwrap();
///     registry.approve(100, item, 9).unwrap();
/// });
///
/// let handle = market.clone();
/// std::thread::spawn(move || handle.add_request(item, 100).unwrap())
///     .join()
///     .unwrap();
///
/// assert!(market.get_request(item).is_some());
/// ```
#[derive(Debug)]
pub struct SharedMarket<R> {
    inner: Arc<Mutex<MarketState<R>>>,
}

impl<R> Clone for SharedMarket<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: OwnershipRegistry> SharedMarket<R> {
    pub fn new(ledger: SwapLedger, registry: R) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MarketState { ledger, registry })),
        }
    }

    pub fn add_request(&self, item: ItemRef, caller: AccountId) -> Result<Vec<Event>> {
        let mut state = self.inner.lock();
        let MarketState { ledger, registry } = &mut *state;
        ledger.add_request(&*registry, item, caller)
    }

    pub fn remove_request(&self, item: ItemRef, caller: AccountId) -> Result<Vec<Event>> {
        let mut state = self.inner.lock();
        let MarketState { ledger, registry } = &mut *state;
        ledger.remove_request(&*registry, item, caller)
    }

    pub fn add_offer(&self, item: ItemRef, offered: ItemRef, caller: AccountId) -> Result<Vec<Event>> {
        let mut state = self.inner.lock();
        let MarketState { ledger, registry } = &mut *state;
        ledger.add_offer(&*registry, item, offered, caller)
    }

    pub fn remove_offer(&self, offered: ItemRef, caller: AccountId) -> Result<Vec<Event>> {
        let mut state = self.inner.lock();
        let MarketState { ledger, registry } = &mut *state;
        ledger.remove_offer(&*registry, offered, caller)
    }

    pub fn swap(&self, item: ItemRef, offered: ItemRef) -> Result<Vec<Event>> {
        let mut state = self.inner.lock();
        let MarketState { ledger, registry } = &mut *state;
        ledger.swap(registry, item, offered)
    }

    pub fn get_request(&self, item: ItemRef) -> Option<SwapRequest> {
        self.inner.lock().ledger.get_request(item).copied()
    }

    pub fn get_offer(&self, offered: ItemRef) -> Option<SwapOffer> {
        self.inner.lock().ledger.get_offer(offered).copied()
    }

    /// Run `f` with exclusive access to the registry (mints, approvals)
    pub fn with_registry<T>(&self, f: impl FnOnce(&mut R) -> T) -> T {
        f(&mut self.inner.lock().registry)
    }

    /// Run `f` with read access to the ledger
    pub fn with_ledger<T>(&self, f: impl FnOnce(&SwapLedger) -> T) -> T {
        f(&self.inner.lock().ledger)
    }
}
