//! Attack squares and per-square threat counts

mod aggregate;
mod attacks;

pub use aggregate::compute_threats;
pub use attacks::{attack_squares, attack_squares_with, Occupancy};
