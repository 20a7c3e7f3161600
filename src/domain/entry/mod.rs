//! Entry module - the wellbeing entry aggregate and its value objects.

mod aggregate;
mod events;
mod metrics;
mod status;

pub use aggregate::{Entry, EntryDraft, EntryType};
pub use events::EntrySynced;
pub use metrics::{EnergyScore, MoodScore, StressScore};
pub use status::SyncStatus;
