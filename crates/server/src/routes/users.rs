use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use service::users::{NewUser, PatchUser, ReplaceUser, User, UserId};

use crate::errors::JsonApiError;
use crate::routes::ServerState;

/// Unparseable ids are reported as a missing user, not as a distinct error.
fn parse_id(raw: &str) -> Result<UserId, JsonApiError> {
    raw.parse::<UserId>()
        .map_err(|_| JsonApiError::not_found(format!("user {raw} not found")))
}

/// List all users in insertion order
#[utoipa::path(
    get, path = "/users", tag = "users",
    responses((status = 200, description = "All users in insertion order", body = [crate::openapi::UserDoc]))
)]
pub async fn list_users(State(state): State<ServerState>) -> Json<Vec<User>> {
    Json(state.users.list().await)
}

/// Fetch one user by id
#[utoipa::path(
    get, path = "/users/{id}", tag = "users",
    params(("id" = u64, Path, description = "User ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::UserDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_user(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<User>, JsonApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.users.get(id).await?))
}

/// Create a user; the id is assigned by the store
#[utoipa::path(
    post, path = "/users", tag = "users",
    request_body = crate::openapi::NewUserDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::UserDoc),
        (status = 400, description = "Malformed Body")
    )
)]
pub async fn create_user(
    State(state): State<ServerState>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), JsonApiError> {
    let Json(input) = payload?;
    let created = state.users.create(input).await;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace name and email of a user
#[utoipa::path(
    put, path = "/users/{id}", tag = "users",
    params(("id" = u64, Path, description = "User ID")),
    request_body = crate::openapi::ReplaceUserDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::UserDoc),
        (status = 400, description = "Malformed Body"),
        (status = 404, description = "Not Found"),
        (status = 406, description = "Body id differs from path id")
    )
)]
pub async fn replace_user(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<ReplaceUser>, JsonRejection>,
) -> Result<Json<User>, JsonApiError> {
    let id = parse_id(&id)?;
    let Json(input) = payload?;
    Ok(Json(state.users.replace(id, input).await?))
}

/// Merge the fields present in the body into a user
#[utoipa::path(
    patch, path = "/users/{id}", tag = "users",
    params(("id" = u64, Path, description = "User ID")),
    request_body = crate::openapi::PatchUserDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::UserDoc),
        (status = 400, description = "Malformed Body"),
        (status = 404, description = "Not Found"),
        (status = 406, description = "Body id differs from path id")
    )
)]
pub async fn merge_user(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<PatchUser>, JsonRejection>,
) -> Result<Json<User>, JsonApiError> {
    let id = parse_id(&id)?;
    let Json(input) = payload?;
    Ok(Json(state.users.merge(id, input).await?))
}

/// Delete a user and return its last state
#[utoipa::path(
    delete, path = "/users/{id}", tag = "users",
    params(("id" = u64, Path, description = "User ID")),
    responses(
        (status = 200, description = "Deleted user as it was before removal", body = crate::openapi::UserDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_user(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<User>, JsonApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.users.delete(id).await?))
}
