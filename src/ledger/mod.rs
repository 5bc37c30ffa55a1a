//! Swap ledger module.
//!
//! ## Components
//!
//! - [`SwapBook`]: Request/offer storage (BTreeMap + slab with two indexes)
//! - [`SwapLedger`]: The five operations with registry revalidation
//! - [`SharedMarket`]: Mutex-serialized handle for concurrent hosts
//!
//! ## Lifecycle
//!
//! ```text
//! ABSENT --add_request--> REQUESTED --add_offer--> OFFERED
//!    ^                      |   ^                    |  |
//!    +---remove_request-----+   +----remove_offer----+  |
//!    +------------------swap / remove_request-----------+
//! ```
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | add/remove request | O(log n) |
//! | add/remove offer | O(1) |
//! | cascade on request removal | O(1) |
//! | swap | O(log n) + two registry transfers |

pub mod book;
pub mod shared;
pub mod swap;

pub use book::{OfferConflict, OfferNode, SwapBook};
pub use shared::SharedMarket;
pub use swap::SwapLedger;
