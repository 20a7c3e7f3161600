//! Interaction module - immutable user/content interaction events.

mod event;

pub use event::{InteractionEvent, InteractionType};
