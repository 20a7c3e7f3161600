//! InteractionStore port - append-only interaction history.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::interaction::InteractionEvent;

/// Port for recording and reading user/content interactions.
///
/// The history is append-only; events are never updated or removed.
#[async_trait]
pub trait InteractionStore: Send + Sync {
    async fn append(&self, event: InteractionEvent) -> Result<(), DomainError>;

    /// Interactions for one owner occurring at or after `since` (all of
    /// them when `since` is `None`).
    async fn query_by_owner(
        &self,
        owner: &UserId,
        since: Option<Timestamp>,
    ) -> Result<Vec<InteractionEvent>, DomainError>;
}
