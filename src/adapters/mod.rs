//! Adapters - implementations of the ports.
//!
//! - `postgres` - sqlx-backed stores for entries, interactions, catalog
//! - `memory` - in-memory stores and cache for tests and local runs
//! - `events` - event bus adapters
//! - `redaction` - regex-based text redaction

pub mod events;
pub mod memory;
pub mod postgres;
pub mod redaction;
