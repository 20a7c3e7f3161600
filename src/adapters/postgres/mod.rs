//! PostgreSQL adapters - sqlx implementations of the store ports.
//!
//! - `PostgresEntryStore` - compare-and-set entry persistence
//! - `PostgresInteractionStore` - append-only interaction history
//! - `PostgresContentCatalog` - read-only catalog queries

mod content_catalog;
mod entry_store;
mod interaction_store;

pub use content_catalog::PostgresContentCatalog;
pub use entry_store::PostgresEntryStore;
pub use interaction_store::PostgresInteractionStore;
