//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `EntryStore` - versioned entry persistence with compare-and-set
//! - `ContentCatalog` - read-only access to the external content catalog
//! - `InteractionStore` - append-only interaction history
//! - `ProfileCache` - short-TTL cache of built user profiles
//! - `TextRedactor` - masks user text before it reaches logs or events
//! - `EventPublisher` - domain event publishing

mod content_catalog;
mod entry_store;
mod event_publisher;
mod interaction_store;
mod profile_cache;
mod redactor;

pub use content_catalog::{CatalogFilters, ContentCatalog};
pub use entry_store::{EntryStore, PutOutcome};
pub use event_publisher::EventPublisher;
pub use interaction_store::InteractionStore;
pub use profile_cache::ProfileCache;
pub use redactor::TextRedactor;
