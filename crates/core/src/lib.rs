//! Core game logic. Keep this crate free of IO and platform concerns.

pub mod balance;
pub mod catalog;
pub mod deck;
pub mod instance;
pub mod migrate;
pub mod power;
pub mod profile;
pub mod rewards;
pub mod rng;

pub use balance::*;
pub use catalog::*;
pub use deck::*;
pub use instance::*;
pub use migrate::*;
pub use power::*;
pub use profile::*;
pub use rewards::*;
pub use rng::*;
