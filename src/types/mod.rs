//! Core data types for the swap market
//!
//! Ledger records implement SSZ serialization for deterministic encoding.
//!
//! ## Types
//!
//! - [`ItemRef`]: `(collection, item_id)` key of a transferable item
//! - [`SwapRequest`]: A standing request to trade an item
//! - [`SwapOffer`]: An offered item pointing at the request it targets
//! - [`Event`]: Notifications raised by successful calls
//!
//! ## Fixed-Point Arithmetic
//!
//! Fees are stored as `u64` scaled by 10^8, see [`amount`].

mod event;
mod item;
mod record;
pub mod amount;

pub use event::{Event, Transfer};
pub use item::{AccountId, CollectionId, ItemRef, ZERO_ACCOUNT};
pub use record::{SwapOffer, SwapRequest};
