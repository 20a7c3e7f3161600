//! Delivery module - urgency-to-content tier mapping and delivery events.

mod events;
mod tier;

pub use events::{ContentDelivered, CrisisAlertRaised};
pub use tier::{categories_for, crisis_categories, DeliveryTier};
