//! Client-side shopping cart.
//!
//! [`CartStore`] is the single source of truth for pending line items. It is
//! handed to whoever needs it rather than living in a global, and writes
//! itself through an injected [`CartStorage`] after every mutation.

pub mod error;
pub mod item;
pub mod storage;
pub mod store;

pub use error::CartError;
pub use item::CartItem;
pub use storage::{CartStorage, JsonFileStorage, MemoryStorage, STORAGE_KEY};
pub use store::{CartStore, QuantityUpdate};
