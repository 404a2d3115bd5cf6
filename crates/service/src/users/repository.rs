use async_trait::async_trait;

use super::domain::{NewUser, User, UserChange, UserId};

/// Storage abstraction for the user collection.
///
/// Every method is a single indivisible step: implementations must not expose
/// a partially applied insert/update/remove to concurrent callers.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users in insertion order.
    async fn list(&self) -> Vec<User>;
    async fn get(&self, id: UserId) -> Option<User>;
    /// Assign the next id and append.
    async fn insert(&self, input: NewUser) -> User;
    /// Apply `change` to the user with `id`; `None` if absent.
    async fn update(&self, id: UserId, change: UserChange) -> Option<User>;
    /// Remove and return the record as it was before removal.
    async fn remove(&self, id: UserId) -> Option<User>;
}
