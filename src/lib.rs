//! # Swap Market
//!
//! Non-custodial peer-to-peer item swaps.
//!
//! Holders post a *request* to trade an item, other holders *offer* one of
//! their items against it, and either side triggers a *swap* that exchanges
//! the two items directly between their holders. The ledger never holds
//! items; it records intent and revalidates ownership and authorization
//! with the registry at settlement time.
//!
//! ## Architecture
//!
//! - **Types**: Item references, ledger records, events, fixed-point amounts
//! - **Registry**: Ownership capability trait plus an in-memory implementation
//! - **Ledger**: Request/offer book and the five swap operations
//! - **Issuance**: Fee-gated sticker minting used to populate a registry
//!
//! ## Design Principles
//!
//! 1. **All-or-nothing calls**: Every operation validates before it mutates
//! 2. **Determinism**: Identical call sequences give identical state roots
//! 3. **No Floating Point**: Fees use fixed-point arithmetic (10^8 scaling)
//! 4. **Synchronous Execution**: One call at a time, enforced by `SharedMarket`

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: ItemRef, SwapRequest, SwapOffer, Event
pub mod types;

/// Error enums for every component
pub mod error;

/// TOML configuration and logging setup
pub mod config;

/// Ownership registry trait and in-memory registry
pub mod registry;

/// Swap ledger: book, operations, serialized handle
pub mod ledger;

/// Sticker issuance collection
pub mod issuance;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use config::MarketConfig;
pub use error::{ConfigError, IssuanceError, RegistryError, Result, SwapError};
pub use issuance::StickerCollection;
pub use ledger::{SharedMarket, SwapBook, SwapLedger};
pub use registry::{InMemoryRegistry, OwnershipRegistry};
pub use types::{AccountId, Event, ItemRef, SwapOffer, SwapRequest, Transfer};
