//! Item issuance.
//!
//! The swap ledger never calls into this module; it exists to put items into
//! a registry for setup, demos and tests.
//!
//! ## Example
//!
//! ```
//! use swap_market::issuance::StickerCollection;
//! use swap_market::registry::{InMemoryRegistry, OwnershipRegistry};
//!
//! let uris = vec!["ipfs://messi".to_string(), "ipfs://dibu".to_string()];
//! let mut stickers = StickerCollection::new(1, 10, 1_000_000, uris).unwrap();
//! let mut registry = InMemoryRegistry::new();
//!
//! let minted = stickers.buy_sticker(&mut registry, 100, 1_000_000).unwrap();
//! assert_eq!(registry.owner_of(minted.item), Ok(100));
//! assert!(stickers.token_uri(minted.item.item_id).unwrap().starts_with("ipfs://"));
//! ```

pub mod sticker;

pub use sticker::{Minted, StickerCollection};
