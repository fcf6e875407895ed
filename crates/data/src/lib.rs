//! Catalog loading and the persistence boundary for saved profiles, decks
//! and collections.

pub mod bootstrap;
pub mod load;
pub mod store;

pub use bootstrap::*;
pub use load::*;
pub use store::*;
