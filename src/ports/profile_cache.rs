//! ProfileCache port - short-TTL cache for built user profiles.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::profile::UserProfile;

/// Port for caching built profiles between deliveries.
///
/// Injected explicitly wherever profiles are read; there is no global
/// cache singleton. Cache failures are non-fatal: callers fall back to
/// rebuilding the profile.
#[async_trait]
pub trait ProfileCache: Send + Sync {
    async fn get(&self, owner: &UserId) -> Result<Option<UserProfile>, DomainError>;

    async fn put(
        &self,
        owner: &UserId,
        profile: UserProfile,
        ttl: Duration,
    ) -> Result<(), DomainError>;

    /// Drops the cached profile after the owner's history changes.
    async fn invalidate(&self, owner: &UserId) -> Result<(), DomainError>;
}
