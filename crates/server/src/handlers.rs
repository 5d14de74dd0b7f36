use super::Gateway;
use super::Lobby;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::web;
use std::sync::Arc;

/// Liveness probe.
pub async fn health() -> impl Responder {
    HttpResponse::Ok().body("ok")
}

/// Upgrades the request to a WebSocket and hands the connection to a
/// dedicated [`Gateway`] task.
pub async fn socket(
    lobby: web::Data<Arc<Lobby>>,
    req: HttpRequest,
    body: web::Payload,
) -> HttpResponse {
    match actix_ws::handle(&req, body) {
        Ok((response, session, stream)) => {
            let gateway = Gateway::new(lobby.get_ref().clone());
            actix_web::rt::spawn(gateway.run(session, stream));
            response
        }
        Err(e) => {
            log::warn!("websocket upgrade failed: {}", e);
            HttpResponse::BadRequest().finish()
        }
    }
}
