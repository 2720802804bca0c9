//! Combat resolution: damage and healing numbers.
pub mod damage;

pub use damage::{Hit, apply_raw, heal_amount, resolve, roll_outgoing, strike};
