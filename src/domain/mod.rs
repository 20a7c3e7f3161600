//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives: ids, timestamps, errors, events
//! - `entry` - Wellbeing entry aggregate and metric value objects
//! - `urgency` - Pure, table-driven urgency analysis
//! - `profile` - Derived user profile and its pure builder
//! - `content` - Evidence-tagged catalog content types
//! - `interaction` - Immutable interaction events
//! - `recommendation` - Content personalization engine
//! - `delivery` - Content tier mapping and delivery events
//! - `sync` - Multi-device sync mutations, outcomes, checkpoints
//!
//! The domain layer performs no I/O. All external collaborators are
//! reached through the `ports` layer.

pub mod content;
pub mod delivery;
pub mod entry;
pub mod foundation;
pub mod interaction;
pub mod profile;
pub mod recommendation;
pub mod sync;
pub mod urgency;
