use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct UserDoc { pub id: u64, pub name: String, pub email: String }

#[derive(ToSchema)]
pub struct NewUserDoc { pub name: String, pub email: String }

/// `id` may be sent but must equal the path id.
#[derive(ToSchema)]
pub struct ReplaceUserDoc { pub id: Option<u64>, pub name: String, pub email: String }

#[derive(ToSchema)]
pub struct PatchUserDoc { pub id: Option<u64>, pub name: Option<String>, pub email: Option<String> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::users::list_users,
        crate::routes::users::get_user,
        crate::routes::users::create_user,
        crate::routes::users::replace_user,
        crate::routes::users::merge_user,
        crate::routes::users::delete_user,
    ),
    components(
        schemas(
            HealthResponse,
            UserDoc,
            NewUserDoc,
            ReplaceUserDoc,
            PatchUserDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "users")
    )
)]
pub struct ApiDoc;
