use actix_web::{HttpResponse, Responder};
use serde::{Deserialize, Serialize};

pub const WELCOME_MESSAGE: &str = "Welcome User Micro Service";

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct WelcomeResponse {
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Users",
    responses(
        (status = 200, description = "Static greeting", body = WelcomeResponse)
    )
)]
pub async fn welcome() -> impl Responder {
    HttpResponse::Ok().json(WelcomeResponse {
        message: WELCOME_MESSAGE.to_string(),
    })
}
