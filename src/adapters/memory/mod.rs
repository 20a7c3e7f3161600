//! In-memory port implementations for tests and local development.
//!
//! All adapters here follow the same rules as the in-memory event bus:
//! deterministic, lock-based, and not for production use.

mod content_catalog;
mod entry_store;
mod interaction_store;
mod profile_cache;

pub use content_catalog::InMemoryContentCatalog;
pub use entry_store::InMemoryEntryStore;
pub use interaction_store::InMemoryInteractionStore;
pub use profile_cache::InMemoryProfileCache;
