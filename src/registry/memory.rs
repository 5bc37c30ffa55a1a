//! In-memory ownership registry with token-contract approval rules.
//!
//! ## Authorization
//!
//! A mover may transfer an item when it is:
//! - the current holder,
//! - the per-item approved account, or
//! - an operator approved for all of the holder's items.
//!
//! A transfer clears the per-item approval, so a swapped item has to be
//! approved again by its new holder before it can be listed.

use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};

use crate::error::RegistryError;
use crate::registry::OwnershipRegistry;
use crate::types::{AccountId, Event, ItemRef, Transfer, ZERO_ACCOUNT};

/// Registry keeping holders, approvals and balances in hash maps.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRegistry {
    /// Item -> current holder
    owners: HashMap<ItemRef, AccountId>,

    /// Item -> account approved to move it
    approvals: HashMap<ItemRef, AccountId>,

    /// (holder, operator) pairs with blanket approval
    operators: HashSet<(AccountId, AccountId)>,

    /// Holder -> number of items held
    balances: HashMap<AccountId, u64>,
}

impl InMemoryRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Issuance
    // ========================================================================

    /// Mint `item` to `to`
    ///
    /// Emits a [`Transfer`] from the zero account.
    pub fn mint(&mut self, item: ItemRef, to: AccountId) -> Result<Transfer, RegistryError> {
        if to == ZERO_ACCOUNT {
            return Err(RegistryError::ZeroAccount);
        }
        if self.owners.contains_key(&item) {
            return Err(RegistryError::AlreadyMinted(item));
        }

        self.owners.insert(item, to);
        *self.balances.entry(to).or_insert(0) += 1;
        trace!(%item, to, "minted");

        Ok(Transfer {
            item,
            from: ZERO_ACCOUNT,
            to,
        })
    }

    // ========================================================================
    // Approvals
    // ========================================================================

    /// Approve `approved` to move `item`; the zero account clears approval
    ///
    /// Only the holder or one of its operators may approve.
    pub fn approve(
        &mut self,
        caller: AccountId,
        item: ItemRef,
        approved: AccountId,
    ) -> Result<Event, RegistryError> {
        let owner = self.owner_of(item)?;
        if caller != owner && !self.is_approved_for_all(owner, caller) {
            debug!(%item, caller, "approve rejected");
            return Err(RegistryError::NotAuthorized { item, mover: caller });
        }

        if approved == ZERO_ACCOUNT {
            self.approvals.remove(&item);
        } else {
            self.approvals.insert(item, approved);
        }

        Ok(Event::Approval {
            item,
            owner,
            approved,
        })
    }

    /// Grant or revoke `operator` authority over all of `owner`'s items
    pub fn set_approval_for_all(
        &mut self,
        owner: AccountId,
        operator: AccountId,
        approved: bool,
    ) -> Event {
        if approved {
            self.operators.insert((owner, operator));
        } else {
            self.operators.remove(&(owner, operator));
        }

        Event::ApprovalForAll {
            owner,
            operator,
            approved,
        }
    }

    /// Account approved to move `item`, if any
    pub fn get_approved(&self, item: ItemRef) -> Result<Option<AccountId>, RegistryError> {
        self.owner_of(item)?;
        Ok(self.approvals.get(&item).copied())
    }

    /// Whether `operator` may move every item held by `owner`
    #[inline]
    pub fn is_approved_for_all(&self, owner: AccountId, operator: AccountId) -> bool {
        self.operators.contains(&(owner, operator))
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Number of items held by `account`
    #[inline]
    pub fn balance_of(&self, account: AccountId) -> u64 {
        self.balances.get(&account).copied().unwrap_or(0)
    }

    /// Total number of minted items
    #[inline]
    pub fn item_count(&self) -> usize {
        self.owners.len()
    }

    /// Check if an item exists
    #[inline]
    pub fn contains(&self, item: ItemRef) -> bool {
        self.owners.contains_key(&item)
    }
}

impl OwnershipRegistry for InMemoryRegistry {
    fn owner_of(&self, item: ItemRef) -> Result<AccountId, RegistryError> {
        self.owners
            .get(&item)
            .copied()
            .ok_or(RegistryError::UnknownItem(item))
    }

    fn is_authorized(&self, item: ItemRef, mover: AccountId) -> bool {
        let Some(&owner) = self.owners.get(&item) else {
            return false;
        };

        mover == owner
            || self.approvals.get(&item) == Some(&mover)
            || self.is_approved_for_all(owner, mover)
    }

    fn transfer(
        &mut self,
        item: ItemRef,
        from: AccountId,
        to: AccountId,
        mover: AccountId,
    ) -> Result<Transfer, RegistryError> {
        let owner = self.owner_of(item)?;
        if owner != from {
            return Err(RegistryError::NotHolder { item, account: from });
        }
        if !self.is_authorized(item, mover) {
            return Err(RegistryError::NotAuthorized { item, mover });
        }
        if to == ZERO_ACCOUNT {
            return Err(RegistryError::ZeroAccount);
        }

        // All checks passed; nothing below can fail.
        self.approvals.remove(&item);
        self.owners.insert(item, to);
        if let Some(balance) = self.balances.get_mut(&from) {
            *balance = balance.saturating_sub(1);
        }
        *self.balances.entry(to).or_insert(0) += 1;
        trace!(%item, from, to, mover, "transferred");

        Ok(Transfer { item, from, to })
    }
}
