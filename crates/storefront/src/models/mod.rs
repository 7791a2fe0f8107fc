//! Domain models.
//!
//! Types persisted by the session and cart services, separate from the
//! catalog's read-only records.

pub mod cart;
pub mod identity;

pub use cart::{CartItemSource, CartLine, CartTotals};
pub use identity::Identity;
