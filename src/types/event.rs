//! Notifications emitted by the registry, the issuance collection and the
//! swap ledger.
//!
//! Every mutating call returns the events it raised, in emission order, the
//! way a transaction receipt lists its logs.

use std::fmt;

use crate::types::item::{AccountId, ItemRef};

/// A single item transfer performed by the ownership registry.
///
/// Mints are transfers from [`ZERO_ACCOUNT`](crate::types::ZERO_ACCOUNT).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    pub item: ItemRef,
    pub from: AccountId,
    pub to: AccountId,
}

/// Notification raised by a successful call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // ------------------------------------------------------------------
    // Registry
    // ------------------------------------------------------------------
    /// Item changed hands (or was minted)
    Transfer(Transfer),

    /// Per-item mover authorization granted or cleared (`approved == 0`)
    Approval {
        item: ItemRef,
        owner: AccountId,
        approved: AccountId,
    },

    /// Operator authorization over all of an owner's items
    ApprovalForAll {
        owner: AccountId,
        operator: AccountId,
        approved: bool,
    },

    // ------------------------------------------------------------------
    // Issuance
    // ------------------------------------------------------------------
    /// A sticker was bought and minted
    StickerBought {
        item: ItemRef,
        sticker_id: u64,
        minter: AccountId,
    },

    /// Collection owner changed the mint fee (fixed-point)
    MintFeeUpdated { fee: u64 },

    // ------------------------------------------------------------------
    // Ledger
    // ------------------------------------------------------------------
    RequestAdded {
        item: ItemRef,
        owner: AccountId,
    },

    RequestRemoved {
        item: ItemRef,
        owner: AccountId,
    },

    OfferAdded {
        item: ItemRef,
        offered: ItemRef,
        submitter: AccountId,
    },

    /// Offer cleared, either directly, by cascade from its request, or as
    /// part of a completed swap
    OfferRemoved {
        item: ItemRef,
        offered: ItemRef,
    },

    SwapCompleted {
        item: ItemRef,
        offered: ItemRef,
        requester: AccountId,
        submitter: AccountId,
    },
}

impl Event {
    /// Short event name, used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Event::Transfer(_) => "Transfer",
            Event::Approval { .. } => "Approval",
            Event::ApprovalForAll { .. } => "ApprovalForAll",
            Event::StickerBought { .. } => "StickerBought",
            Event::MintFeeUpdated { .. } => "MintFeeUpdated",
            Event::RequestAdded { .. } => "RequestAdded",
            Event::RequestRemoved { .. } => "RequestRemoved",
            Event::OfferAdded { .. } => "OfferAdded",
            Event::OfferRemoved { .. } => "OfferRemoved",
            Event::SwapCompleted { .. } => "SwapCompleted",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Transfer(t) => write!(f, "Transfer({} {} -> {})", t.item, t.from, t.to),
            Event::RequestAdded { item, owner } | Event::RequestRemoved { item, owner } => {
                write!(f, "{}({}, owner={})", self.name(), item, owner)
            }
            Event::OfferAdded { item, offered, submitter } => {
                write!(f, "OfferAdded({} <- {}, submitter={})", item, offered, submitter)
            }
            Event::OfferRemoved { item, offered } => write!(f, "OfferRemoved({} <- {})", item, offered),
            Event::SwapCompleted { item, offered, .. } => write!(f, "SwapCompleted({} <-> {})", item, offered),
            other => write!(f, "{:?}", other),
        }
    }
}
