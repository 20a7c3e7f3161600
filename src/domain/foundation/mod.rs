//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, error types, and the event
//! infrastructure used across every domain module.

mod errors;
mod events;
mod ids;
mod timestamp;
mod version;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent};
pub use ids::{ContentId, EntryId, InteractionId, MobileId, TenantId, UserId};
pub use timestamp::Timestamp;
pub use version::EntryVersion;
