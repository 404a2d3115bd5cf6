use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::domain::{IdentifiedPayload, NewUser, PatchUser, ReplaceUser, User, UserId};
use super::memory::MemoryUserRepository;
use super::repository::UserRepository;
use crate::errors::ServiceError;

/// User store operations independent of the web framework.
///
/// Outcomes are `Ok(user)`, `ServiceError::NotFound` or `ServiceError::ImmutableField`.
/// A rejected operation never mutates the collection.
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self { Self { repo } }

    /// In-memory store, optionally preloaded with the fixture users.
    pub fn in_memory(seed: bool) -> Self {
        let repo = if seed { MemoryUserRepository::seeded() } else { MemoryUserRepository::new() };
        Self::new(Arc::new(repo))
    }

    pub async fn list(&self) -> Vec<User> {
        self.repo.list().await
    }

    pub async fn get(&self, id: UserId) -> Result<User, ServiceError> {
        self.repo.get(id).await.ok_or_else(|| ServiceError::not_found("user", id))
    }

    /// Create a user; the store assigns the id.
    ///
    /// # Examples
    /// ```
    /// use service::{UserService, users::NewUser};
    /// let svc = UserService::in_memory(true);
    /// let user = tokio_test::block_on(svc.create(NewUser { name: "Ann".into(), email: "ann@x.com".into() }));
    /// assert_eq!(user.id, 3);
    /// ```
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: NewUser) -> User {
        let user = self.repo.insert(input).await;
        info!(user_id = user.id, "user_created");
        user
    }

    /// Full update: overwrite `name` and `email`.
    #[instrument(skip(self, input))]
    pub async fn replace(&self, id: UserId, input: ReplaceUser) -> Result<User, ServiceError> {
        if let Err(e) = input.ensure_id_unchanged(id) {
            warn!(user_id = id, requested_id = ?input.id, "user_replace_rejected");
            return Err(e);
        }
        let updated = self.repo.update(id, input.into()).await.ok_or_else(|| {
            debug!(user_id = id, "user_replace_missing");
            ServiceError::not_found("user", id)
        })?;
        info!(user_id = id, "user_replaced");
        Ok(updated)
    }

    /// Partial update: overwrite only the fields present in `input`.
    #[instrument(skip(self, input))]
    pub async fn merge(&self, id: UserId, input: PatchUser) -> Result<User, ServiceError> {
        if let Err(e) = input.ensure_id_unchanged(id) {
            warn!(user_id = id, requested_id = ?input.id, "user_merge_rejected");
            return Err(e);
        }
        let updated = self.repo.update(id, input.into()).await.ok_or_else(|| {
            debug!(user_id = id, "user_merge_missing");
            ServiceError::not_found("user", id)
        })?;
        info!(user_id = id, "user_merged");
        Ok(updated)
    }

    /// Remove a user and return its last state.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: UserId) -> Result<User, ServiceError> {
        let removed = self.repo.remove(id).await.ok_or_else(|| ServiceError::not_found("user", id))?;
        info!(user_id = id, "user_deleted");
        Ok(removed)
    }
}
