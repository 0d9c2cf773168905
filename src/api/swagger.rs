use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Profile Service API",
        version = "1.0.0",
        description = "CRUD over user profiles stored in MongoDB (`usergo.profiles`), keyed by `msisdn`.\n\nEvery per-request error is returned with HTTP 200 and the raw error text under `response`."
    ),
    paths(
        crate::api::root::welcome,
        crate::api::health::health_check,
        crate::api::users::get_all_users,
        crate::api::users::get_user,
        crate::api::users::create_user,
        crate::api::users::update_user,
        crate::api::users::delete_user,
    ),
    components(
        schemas(
            crate::api::root::WelcomeResponse,
            crate::api::health::HealthResponse,
            crate::models::UserPayload,
            crate::models::UserProfileResponse,
        )
    ),
    tags(
        (name = "Users", description = "User profile CRUD keyed by msisdn."),
        (name = "Health", description = "Service and database health."),
    )
)]
pub struct ApiDoc;
