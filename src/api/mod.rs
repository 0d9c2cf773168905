pub mod health;
pub mod root;
pub mod swagger;
pub mod users;

use actix_web::{error, web, HttpResponse};

/// Corpo JSON inválido responde 200 com o texto do erro em `"response"`,
/// igual aos demais erros por requisição. O corpo é decodificado mesmo sem
/// `Content-Type: application/json` (ex.: `curl -d`).
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(|err, _req| {
            log::warn!("⚠️  Invalid JSON body: {}", err);
            let res = HttpResponse::Ok().json(serde_json::json!({ "response": err.to_string() }));
            error::InternalError::from_response(err, res).into()
        })
}

/// Rotas do serviço. O store (`web::Data<dyn ProfileStore>`) é registrado por quem monta o `App`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/", web::get().to(root::welcome))
        .route("/health", web::get().to(health::health_check))
        .service(
            web::resource("/users")
                .route(web::get().to(users::get_all_users))
                .route(web::post().to(users::create_user)),
        )
        // [^/]* aceita segmento vazio: "/users/" chega ao handler e recebe o aviso de msisdn
        .service(
            web::resource("/users/{msisdn:[^/]*}")
                .route(web::get().to(users::get_user))
                .route(web::put().to(users::update_user))
                .route(web::delete().to(users::delete_user)),
        );
}
