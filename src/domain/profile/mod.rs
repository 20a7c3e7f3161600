//! Profile module - the derived user profile and its pure builder.
//!
//! A profile is a cache over entry and interaction history, never a
//! source of truth. Building is idempotent: the same window over the
//! same history always yields an identical profile.

mod builder;
mod profile;
mod stats;

pub use builder::build_profile;
pub use profile::{EntryTypeCount, ProfileWindow, UserProfile};
pub use stats::MetricStats;
