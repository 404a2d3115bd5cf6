//! Service layer owning the user collection.
//! - `users::domain` holds the records and request payloads.
//! - `users::repository` is the storage seam; `users::memory` the in-process store.
//! - `users::service` enforces identifier rules and produces `ServiceError` outcomes.

pub mod errors;
pub mod users;

pub use errors::ServiceError;
pub use users::{MemoryUserRepository, UserRepository, UserService};
