//! Users module: three layers (domain, repository, service).

pub mod domain;
pub mod memory;
pub mod repository;
pub mod service;

pub use domain::{NewUser, PatchUser, ReplaceUser, User, UserChange, UserId};
pub use memory::MemoryUserRepository;
pub use repository::UserRepository;
pub use service::UserService;
