use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::warn;

use super::domain::{seed_users, NewUser, User, UserChange, UserId};
use super::repository::UserRepository;

struct UserTable {
    users: Vec<User>,
    next_id: UserId,
}

/// In-process user store.
///
/// Keeps users in insertion order and hands out ids from an explicit counter,
/// so ids stay strictly increasing and are never reused after a delete.
/// The whole table sits behind one lock.
pub struct MemoryUserRepository {
    inner: RwLock<UserTable>,
}

impl MemoryUserRepository {
    /// Empty store; the first created user gets id 1.
    pub fn new() -> Self {
        Self { inner: RwLock::new(UserTable { users: Vec::new(), next_id: 1 }) }
    }

    /// Store preloaded with `users`, keeping their order. Later duplicates of an id are dropped,
    /// as is a user holding `UserId::MAX`, which would leave no id to hand out next.
    pub fn with_users(users: Vec<User>) -> Self {
        let mut seen = HashSet::new();
        let users: Vec<User> = users
            .into_iter()
            .filter(|u| {
                if u.id == UserId::MAX {
                    warn!(user_id = u.id, "seed_user_dropped");
                    return false;
                }
                seen.insert(u.id)
            })
            .collect();
        let next_id = users.iter().map(|u| u.id).max().map_or(1, |max| max + 1);
        Self { inner: RwLock::new(UserTable { users, next_id }) }
    }

    /// Store preloaded with the two fixture users.
    pub fn seeded() -> Self {
        Self::with_users(seed_users())
    }
}

impl Default for MemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn list(&self) -> Vec<User> {
        let table = self.inner.read().await;
        table.users.clone()
    }

    async fn get(&self, id: UserId) -> Option<User> {
        let table = self.inner.read().await;
        table.users.iter().find(|u| u.id == id).cloned()
    }

    async fn insert(&self, input: NewUser) -> User {
        let mut table = self.inner.write().await;
        let user = User { id: table.next_id, name: input.name, email: input.email };
        table.next_id += 1;
        table.users.push(user.clone());
        user
    }

    async fn update(&self, id: UserId, change: UserChange) -> Option<User> {
        let mut table = self.inner.write().await;
        let existing = table.users.iter_mut().find(|u| u.id == id)?;
        change.apply(existing);
        Some(existing.clone())
    }

    async fn remove(&self, id: UserId) -> Option<User> {
        let mut table = self.inner.write().await;
        let pos = table.users.iter().position(|u| u.id == id)?;
        Some(table.users.remove(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn new_user(name: &str) -> NewUser {
        NewUser { name: name.into(), email: format!("{}@example.com", name.to_lowercase()) }
    }

    #[tokio::test]
    async fn seeded_store_lists_fixtures_in_order() {
        let store = MemoryUserRepository::seeded();
        let users = store.list().await;
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, 1);
        assert_eq!(users[1].id, 2);
        assert_eq!(users[0].name, "John Doe");
    }

    #[tokio::test]
    async fn ids_increase_and_continue_after_seed() {
        let store = MemoryUserRepository::seeded();
        let a = store.insert(new_user("A")).await;
        let b = store.insert(new_user("B")).await;
        let c = store.insert(new_user("C")).await;
        assert_eq!((a.id, b.id, c.id), (3, 4, 5));

        let empty = MemoryUserRepository::new();
        assert_eq!(empty.insert(new_user("First")).await.id, 1);
    }

    #[tokio::test]
    async fn deleted_ids_are_never_reused() {
        let store = MemoryUserRepository::new();
        let a = store.insert(new_user("A")).await;
        let b = store.insert(new_user("B")).await;
        assert_eq!(store.remove(b.id).await, Some(b.clone()));
        assert!(store.get(b.id).await.is_none());

        let c = store.insert(new_user("C")).await;
        assert!(c.id > b.id);
        assert_ne!(c.id, a.id);
    }

    #[tokio::test]
    async fn insertion_order_survives_removal_in_the_middle() {
        let store = MemoryUserRepository::seeded();
        let ann = store.insert(new_user("Ann")).await;
        store.remove(1).await;
        let ids: Vec<UserId> = store.list().await.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![2, ann.id]);
    }

    #[tokio::test]
    async fn update_and_remove_of_missing_id_return_none() {
        let store = MemoryUserRepository::seeded();
        let change = UserChange::Merge { name: Some("X".into()), email: None };
        assert!(store.update(404, change).await.is_none());
        assert!(store.remove(404).await.is_none());
        assert_eq!(store.list().await.len(), 2);
    }

    #[tokio::test]
    async fn with_users_drops_duplicate_ids() {
        let dup = User { id: 1, name: "Dup".into(), email: "dup@example.com".into() };
        let mut users = seed_users();
        users.push(dup);
        let store = MemoryUserRepository::with_users(users);
        assert_eq!(store.list().await.len(), 2);
        assert_eq!(store.get(1).await.map(|u| u.name), Some("John Doe".to_string()));
        assert_eq!(store.insert(new_user("Next")).await.id, 3);
    }

    #[tokio::test]
    async fn with_users_drops_max_id_and_keeps_counter_valid() {
        let mut users = seed_users();
        users.push(User { id: UserId::MAX, name: "Last".into(), email: "last@example.com".into() });
        let store = MemoryUserRepository::with_users(users);
        assert!(store.get(UserId::MAX).await.is_none());
        assert_eq!(store.list().await.len(), 2);
        assert_eq!(store.insert(new_user("Next")).await.id, 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_inserts_get_distinct_ids() {
        let store = Arc::new(MemoryUserRepository::seeded());
        let mut handles = Vec::new();
        for i in 0..64 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move { store.insert(new_user(&format!("U{i}"))).await.id }));
        }
        let mut ids = Vec::new();
        for h in handles {
            ids.push(h.await.unwrap());
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 64);
        assert_eq!(ids.first(), Some(&3));
        assert_eq!(ids.last(), Some(&66));
    }
}
