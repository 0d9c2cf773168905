use actix_web::{web, HttpResponse};
use mongodb::bson::DateTime;

use crate::database::ProfileStore;
use crate::models::{MsisdnFilter, UserPayload, UserProfile, UserProfileResponse};

pub const MISSING_MSISDN: &str = "please pass a valid msisdn";

fn error_response(e: impl std::fmt::Display) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "response": e.to_string() }))
}

/// GET /users - Lista todos os perfis
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All profiles under `response`", body = Vec<UserProfileResponse>),
        (status = 500, description = "Database error text under `response`")
    )
)]
pub async fn get_all_users(store: web::Data<dyn ProfileStore>) -> HttpResponse {
    match store.find_all().await {
        Ok(profiles) => {
            log::info!("📋 GET /users - {} profiles", profiles.len());
            let profiles: Vec<UserProfileResponse> =
                profiles.into_iter().map(UserProfileResponse::from).collect();
            HttpResponse::Ok().json(serde_json::json!({ "response": profiles }))
        }
        Err(e) => {
            log::error!("❌ Error listing profiles: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({ "response": e.to_string() }))
        }
    }
}

/// GET /users/{msisdn} - Busca perfil por msisdn
#[utoipa::path(
    get,
    path = "/users/{msisdn}",
    tag = "Users",
    params(("msisdn" = String, Path, description = "Mobile subscriber number")),
    responses(
        (status = 200, description = "Profile under `response`, or the error text", body = UserProfileResponse)
    )
)]
pub async fn get_user(store: web::Data<dyn ProfileStore>, msisdn: web::Path<String>) -> HttpResponse {
    let msisdn = msisdn.into_inner();
    log::debug!("GET /users/{}", msisdn);

    if msisdn.is_empty() {
        return error_response(MISSING_MSISDN);
    }

    match store.find_one(&MsisdnFilter::new(msisdn)).await {
        Ok(profile) => HttpResponse::Ok().json(serde_json::json!({
            "response": UserProfileResponse::from(profile)
        })),
        Err(e) => error_response(e),
    }
}

/// POST /users - Cria perfil e devolve a forma armazenada
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = UserPayload,
    responses(
        (status = 200, description = "Stored profile under `message`, or the error text under `response`", body = UserProfileResponse)
    )
)]
pub async fn create_user(store: web::Data<dyn ProfileStore>, body: web::Json<UserPayload>) -> HttpResponse {
    let mut profile = UserProfile::from(body.into_inner());
    profile.last_update = Some(DateTime::now());

    log::info!("📝 POST /users - msisdn: {}", profile.msisdn);

    if let Err(e) = store.insert(&profile).await {
        log::warn!("❌ Insert failed for {}: {}", profile.msisdn, e);
        return error_response(e);
    }
    log::info!("✅ Successfully inserted into database");

    match store.find_one(&MsisdnFilter::new(profile.msisdn.as_str())).await {
        Ok(stored) => HttpResponse::Ok().json(serde_json::json!({
            "response": "User succesfully created",
            "message": UserProfileResponse::from(stored)
        })),
        Err(e) => error_response(e),
    }
}

/// PUT /users/{msisdn} - Substitui o documento inteiro
#[utoipa::path(
    put,
    path = "/users/{msisdn}",
    tag = "Users",
    params(("msisdn" = String, Path, description = "Mobile subscriber number of the record to replace")),
    request_body = UserPayload,
    responses(
        (status = 200, description = "Replaced profile under `data`, or the error text under `response`", body = UserProfileResponse)
    )
)]
pub async fn update_user(
    store: web::Data<dyn ProfileStore>,
    msisdn: web::Path<String>,
    body: web::Json<UserPayload>,
) -> HttpResponse {
    let msisdn = msisdn.into_inner();
    log::debug!("PUT /users/{}", msisdn);

    if msisdn.is_empty() {
        return error_response(MISSING_MSISDN);
    }

    let mut profile = UserProfile::from(body.into_inner());
    profile.inserted_at = Some(DateTime::now());

    if let Err(e) = store.replace_one(&MsisdnFilter::new(msisdn.as_str()), &profile).await {
        log::warn!("❌ Update failed for {}: {}", msisdn, e);
        return error_response(e);
    }

    // Re-busca pelo msisdn do corpo: o PUT pode ter trocado a chave
    match store.find_one(&MsisdnFilter::new(profile.msisdn.as_str())).await {
        Ok(stored) => {
            log::info!("🔧 Profile {} updated", msisdn);
            HttpResponse::Ok().json(serde_json::json!({
                "response": "user record successfully updated",
                "data": UserProfileResponse::from(stored)
            }))
        }
        Err(e) => error_response(e),
    }
}

/// DELETE /users/{msisdn} - Remove perfil. O corpo é lido mas não entra no filtro.
#[utoipa::path(
    delete,
    path = "/users/{msisdn}",
    tag = "Users",
    params(("msisdn" = String, Path, description = "Mobile subscriber number of the record to remove")),
    request_body = UserPayload,
    responses(
        (status = 200, description = "Confirmation or the error text under `response`")
    )
)]
pub async fn delete_user(
    store: web::Data<dyn ProfileStore>,
    msisdn: web::Path<String>,
    _body: web::Json<UserPayload>,
) -> HttpResponse {
    let msisdn = msisdn.into_inner();
    log::debug!("DELETE /users/{}", msisdn);

    if msisdn.is_empty() {
        return error_response(MISSING_MSISDN);
    }

    match store.delete_one(&MsisdnFilter::new(msisdn.as_str())).await {
        Ok(()) => {
            log::info!("🗑️  Profile {} deleted", msisdn);
            HttpResponse::Ok().json(serde_json::json!({
                "response": "user record successfully deleted"
            }))
        }
        Err(e) => {
            log::warn!("❌ Delete failed for {}: {}", msisdn, e);
            error_response(e)
        }
    }
}
