use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    Error, HttpResponse,
};
use futures::future::{FutureExt, LocalBoxFuture};
use std::any::Any;
use std::future::{ready, Ready};
use std::panic::{self, AssertUnwindSafe};

/// Converte panics dentro dos handlers em HTTP 500 `{"response": "internal server error"}`.
/// O worker continua servindo as próximas requisições.
pub struct Recover;

impl<S, B> Transform<S, ServiceRequest> for Recover
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RecoverMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RecoverMiddleware { service }))
    }
}

pub struct RecoverMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RecoverMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Só method/path: um clone do HttpRequest aqui quebra o roteamento (Rc::get_mut)
        let route = format!("{} {}", req.method(), req.path());

        // O panic pode acontecer já na chamada síncrona do serviço
        let fut = match panic::catch_unwind(AssertUnwindSafe(|| self.service.call(req))) {
            Ok(fut) => fut,
            Err(payload) => {
                let err = recovered_error(&route, payload.as_ref());
                return Box::pin(async move { Err(err) });
            }
        };

        Box::pin(async move {
            match AssertUnwindSafe(fut).catch_unwind().await {
                Ok(res) => res,
                Err(payload) => Err(recovered_error(&route, payload.as_ref())),
            }
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn recovered_error(route: &str, payload: &(dyn Any + Send)) -> Error {
    let message = panic_message(payload);
    log::error!("💥 Recovered from panic in {}: {}", route, message);

    let res = HttpResponse::InternalServerError().json(serde_json::json!({
        "response": "internal server error"
    }));

    InternalError::from_response(message, res).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;
    use actix_web::test::{call_service, init_service, read_body, TestRequest};
    use actix_web::{web, App};

    async fn boom() -> HttpResponse {
        panic!("handler exploded");
    }

    async fn fine() -> HttpResponse {
        HttpResponse::Ok().body("ok")
    }

    #[actix_web::test]
    async fn test_wrapped_routes_are_served_normally() {
        let app = init_service(App::new().wrap(Recover).route("/fine", web::get().to(fine))).await;

        let res = call_service(&app, TestRequest::get().uri("/fine").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(read_body(res).await, "ok");
    }

    #[actix_web::test]
    async fn test_panic_becomes_500_and_server_keeps_serving() {
        let app = init_service(
            App::new()
                .wrap(Recover)
                .route("/boom", web::get().to(boom))
                .route("/fine", web::get().to(fine)),
        )
        .await;

        let err = match app.call(TestRequest::get().uri("/boom").to_request()).await {
            Err(e) => e,
            Ok(res) => panic!("expected recovered error, got status {}", res.status()),
        };
        let res = err.error_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let raw = to_bytes(res.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&raw).unwrap();
        assert_eq!(body["response"], "internal server error");

        let res = call_service(&app, TestRequest::get().uri("/fine").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(read_body(res).await, "ok");
    }

    #[test]
    fn test_panic_message_extraction() {
        let payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(payload.as_ref()), "owned");
        let payload: Box<dyn Any + Send> = Box::new("static");
        assert_eq!(panic_message(payload.as_ref()), "static");
        let payload: Box<dyn Any + Send> = Box::new(42u8);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }
}
