use std::fmt::Display;

use thiserror::Error;

use crate::users::domain::UserId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("immutable field: {0}")]
    ImmutableField(String),
}

impl ServiceError {
    pub fn not_found(entity: &str, id: UserId) -> Self {
        Self::NotFound(format!("{entity} {id} not found"))
    }

    pub fn immutable(field: &str, current: UserId, requested: impl Display) -> Self {
        Self::ImmutableField(format!("{field} cannot change from {current} to {requested}"))
    }
}
