//! Sync module - multi-device mutation batches and their outcomes.
//!
//! Devices submit raw mutation batches; the coordinator turns each
//! mutation into a per-item outcome. Conflicts are data in the result,
//! never errors, so a batch always completes.

mod checkpoint;
mod mutation;
mod outcome;

pub use checkpoint::SyncCheckpoint;
pub use mutation::{EntryMutation, SyncBatch};
pub use outcome::{SyncOutcome, SyncResult};
