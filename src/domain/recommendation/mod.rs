//! Recommendation module - profile-driven content personalization.
//!
//! Pure scoring over catalog candidates; no I/O. The delivery selector
//! and the recommendations handler both feed candidates in and consume
//! the ranked output.

mod engine;
mod recommendation;

pub use engine::{recommend, diversity_cap};
pub use recommendation::Recommendation;
