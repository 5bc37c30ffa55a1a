//! Sticker collection: fee-gated minting with per-token metadata URIs.
//!
//! ## Token Ids
//!
//! Token ids start at 1 and increase by one per mint. Each token is assigned
//! a sticker design (an index into the collection's URI set) derived from
//! `SHA-256(collection || token_id || minter)`, so the assignment is
//! reproducible for the same mint sequence.
//!
//! ## Fees
//!
//! The mint fee is a fixed-point amount (see [`amount`](crate::types::amount)).
//! Payments at or above the fee are accepted in full and accumulate as
//! proceeds the collection owner can withdraw.

use std::collections::HashMap;

use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::config::IssuanceConfig;
use crate::error::IssuanceError;
use crate::registry::InMemoryRegistry;
use crate::types::amount::{from_fixed_trimmed, to_fixed};
use crate::types::{AccountId, CollectionId, Event, ItemRef};

/// Result of a successful mint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Minted {
    /// The new item
    pub item: ItemRef,

    /// Index of the sticker design in the URI set
    pub sticker_id: u64,

    /// Events in emission order
    pub events: Vec<Event>,
}

/// Issuance component for one collection.
#[derive(Debug, Clone)]
pub struct StickerCollection {
    collection: CollectionId,

    /// Account allowed to change the fee and withdraw proceeds
    owner: AccountId,

    /// Mint fee (fixed-point)
    mint_fee: u64,

    /// Metadata URI per sticker design
    token_uris: Vec<String>,

    /// Next token id to mint
    token_counter: u64,

    /// Token id -> sticker design
    stickers: HashMap<u64, u64>,

    /// Collected fees not yet withdrawn (fixed-point)
    proceeds: u64,
}

impl StickerCollection {
    /// Create a collection
    ///
    /// Fails with [`IssuanceError::EmptyUriSet`] if no URI is given.
    pub fn new(
        collection: CollectionId,
        owner: AccountId,
        mint_fee: u64,
        token_uris: Vec<String>,
    ) -> Result<Self, IssuanceError> {
        if token_uris.is_empty() {
            return Err(IssuanceError::EmptyUriSet);
        }

        Ok(Self {
            collection,
            owner,
            mint_fee,
            token_uris,
            token_counter: 1,
            stickers: HashMap::new(),
            proceeds: 0,
        })
    }

    /// Create a collection from the `[issuance]` config section
    pub fn from_config(config: &IssuanceConfig) -> Result<Self, IssuanceError> {
        let fee = to_fixed(&config.mint_fee).ok_or_else(|| IssuanceError::InvalidFee(config.mint_fee.clone()))?;
        Self::new(config.collection, config.owner, fee, config.token_uris.clone())
    }

    // ========================================================================
    // Minting
    // ========================================================================

    /// Mint the next token to `to` without charging a fee
    pub fn mint(&mut self, registry: &mut InMemoryRegistry, to: AccountId) -> Result<Minted, IssuanceError> {
        let token_id = self.token_counter;
        let item = ItemRef::new(self.collection, token_id);

        let transfer = registry.mint(item, to)?;

        let sticker_id = self.pick_sticker(token_id, to);
        self.stickers.insert(token_id, sticker_id);
        self.token_counter += 1;

        Ok(Minted {
            item,
            sticker_id,
            events: vec![Event::Transfer(transfer)],
        })
    }

    /// Pay the mint fee and mint the next token to `buyer`
    pub fn buy_sticker(
        &mut self,
        registry: &mut InMemoryRegistry,
        buyer: AccountId,
        payment: u64,
    ) -> Result<Minted, IssuanceError> {
        if payment < self.mint_fee {
            debug!(buyer, payment, fee = self.mint_fee, "buy_sticker rejected: not enough funds");
            return Err(IssuanceError::NotEnoughFunds {
                paid: payment,
                required: self.mint_fee,
            });
        }

        let mut minted = self.mint(registry, buyer)?;
        self.proceeds = self.proceeds.saturating_add(payment);

        info!(item = %minted.item, sticker_id = minted.sticker_id, buyer, "sticker bought");
        minted.events.push(Event::StickerBought {
            item: minted.item,
            sticker_id: minted.sticker_id,
            minter: buyer,
        });
        Ok(minted)
    }

    fn pick_sticker(&self, token_id: u64, minter: AccountId) -> u64 {
        let mut hasher = Sha256::new();
        hasher.update(self.collection.to_le_bytes());
        hasher.update(token_id.to_le_bytes());
        hasher.update(minter.to_le_bytes());
        let digest = hasher.finalize();

        let mut word = [0u8; 8];
        word.copy_from_slice(&digest[..8]);
        u64::from_le_bytes(word) % self.token_uris.len() as u64
    }

    // ========================================================================
    // Metadata
    // ========================================================================

    /// Metadata URI of a minted token
    pub fn token_uri(&self, token_id: u64) -> Result<&str, IssuanceError> {
        let sticker_id = self
            .stickers
            .get(&token_id)
            .ok_or(IssuanceError::UnknownToken(token_id))?;
        self.sticker_uri(*sticker_id)
    }

    /// Metadata URI of a sticker design
    pub fn sticker_uri(&self, sticker_id: u64) -> Result<&str, IssuanceError> {
        usize::try_from(sticker_id)
            .ok()
            .and_then(|idx| self.token_uris.get(idx))
            .map(String::as_str)
            .ok_or(IssuanceError::UnknownToken(sticker_id))
    }

    /// Sticker design assigned to a minted token
    pub fn sticker_of(&self, token_id: u64) -> Option<u64> {
        self.stickers.get(&token_id).copied()
    }

    // ========================================================================
    // Administration
    // ========================================================================

    /// Change the mint fee (collection owner only)
    pub fn update_mint_fee(&mut self, caller: AccountId, fee: u64) -> Result<Event, IssuanceError> {
        self.require_owner(caller)?;
        self.mint_fee = fee;
        info!(fee = %from_fixed_trimmed(fee), "mint fee updated");
        Ok(Event::MintFeeUpdated { fee })
    }

    /// Withdraw collected proceeds (collection owner only)
    pub fn withdraw(&mut self, caller: AccountId) -> Result<u64, IssuanceError> {
        self.require_owner(caller)?;
        let amount = std::mem::take(&mut self.proceeds);
        info!(amount = %from_fixed_trimmed(amount), "proceeds withdrawn");
        Ok(amount)
    }

    fn require_owner(&self, caller: AccountId) -> Result<(), IssuanceError> {
        if caller != self.owner {
            return Err(IssuanceError::NotCollectionOwner(caller));
        }
        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn collection_id(&self) -> CollectionId {
        self.collection
    }

    #[inline]
    pub fn owner(&self) -> AccountId {
        self.owner
    }

    #[inline]
    pub fn mint_fee(&self) -> u64 {
        self.mint_fee
    }

    /// Next token id to be minted
    #[inline]
    pub fn token_counter(&self) -> u64 {
        self.token_counter
    }

    #[inline]
    pub fn proceeds(&self) -> u64 {
        self.proceeds
    }

    #[inline]
    pub fn token_uris(&self) -> &[String] {
        &self.token_uris
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::OwnershipRegistry;

    const DEPLOYER: AccountId = 1;
    const BUYER: AccountId = 2;
    const FEE: u64 = 1_000_000; // 0.01

    fn uris() -> Vec<String> {
        vec!["ipfs://messi".into(), "ipfs://dimaria".into(), "ipfs://dibu".into()]
    }

    fn collection() -> StickerCollection {
        StickerCollection::new(7, DEPLOYER, FEE, uris()).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let stickers = collection();

        assert_eq!(stickers.token_counter(), 1);
        assert_eq!(stickers.mint_fee(), FEE);
        assert_eq!(stickers.proceeds(), 0);
    }

    #[test]
    fn test_empty_uri_set_rejected() {
        let err = StickerCollection::new(7, DEPLOYER, FEE, Vec::new()).unwrap_err();
        assert_eq!(err, IssuanceError::EmptyUriSet);
    }

    #[test]
    fn test_buy_sticker() {
        let mut stickers = collection();
        let mut registry = InMemoryRegistry::new();

        let minted = stickers.buy_sticker(&mut registry, BUYER, FEE).unwrap();

        assert_eq!(minted.item, ItemRef::new(7, 1));
        assert_eq!(minted.events.len(), 2);
        assert_eq!(
            minted.events[1],
            Event::StickerBought { item: minted.item, sticker_id: minted.sticker_id, minter: BUYER }
        );
        assert_eq!(registry.owner_of(minted.item), Ok(BUYER));
        assert_eq!(stickers.token_counter(), 2);
        assert_eq!(stickers.proceeds(), FEE);
        assert!(stickers.token_uri(1).unwrap().starts_with("ipfs://"));
    }

    #[test]
    fn test_buy_sticker_not_enough_funds() {
        let mut stickers = collection();
        let mut registry = InMemoryRegistry::new();

        let err = stickers.buy_sticker(&mut registry, BUYER, 0).unwrap_err();

        assert_eq!(err, IssuanceError::NotEnoughFunds { paid: 0, required: FEE });
        assert_eq!(stickers.token_counter(), 1);
        assert_eq!(registry.item_count(), 0);
    }

    #[test]
    fn test_sticker_assignment_is_deterministic() {
        let mut a = collection();
        let mut b = collection();
        let (mut ra, mut rb) = (InMemoryRegistry::new(), InMemoryRegistry::new());

        for _ in 0..10 {
            let x = a.mint(&mut ra, BUYER).unwrap();
            let y = b.mint(&mut rb, BUYER).unwrap();
            assert_eq!(x.sticker_id, y.sticker_id);
            assert!(x.sticker_id < 3);
        }
    }

    #[test]
    fn test_token_uri_unknown() {
        let stickers = collection();
        assert_eq!(stickers.token_uri(1), Err(IssuanceError::UnknownToken(1)));
        assert_eq!(stickers.sticker_uri(0), Ok("ipfs://messi"));
    }

    #[test]
    fn test_update_mint_fee() {
        let mut stickers = collection();

        let event = stickers.update_mint_fee(DEPLOYER, 2_000_000).unwrap();
        assert_eq!(event, Event::MintFeeUpdated { fee: 2_000_000 });
        assert_eq!(stickers.mint_fee(), 2_000_000);
    }

    #[test]
    fn test_update_mint_fee_not_owner() {
        let mut stickers = collection();

        let err = stickers.update_mint_fee(BUYER, 2_000_000).unwrap_err();
        assert_eq!(err, IssuanceError::NotCollectionOwner(BUYER));
        assert_eq!(stickers.mint_fee(), FEE);
    }

    #[test]
    fn test_withdraw() {
        let mut stickers = collection();
        let mut registry = InMemoryRegistry::new();
        stickers.buy_sticker(&mut registry, BUYER, FEE).unwrap();
        stickers.buy_sticker(&mut registry, BUYER, 3 * FEE).unwrap();

        assert!(stickers.withdraw(BUYER).is_err());
        assert_eq!(stickers.withdraw(DEPLOYER), Ok(4 * FEE));
        assert_eq!(stickers.proceeds(), 0);
    }
}
