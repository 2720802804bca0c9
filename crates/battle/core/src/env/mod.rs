//! Inputs the battle consumes but does not own: the random source and the
//! item catalog.
pub mod items;
pub mod rng;

pub use items::{Inventory, ItemEffect, ItemKind, ItemTarget};
pub use rng::{PcgRng, RngOracle, SequenceRng, mix_seed};
