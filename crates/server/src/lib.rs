//! WebSocket room hosting server.
//!
//! Binds the room engine to an actix-web HTTP surface: a single `/ws`
//! endpoint upgrades to WebSocket and hands the connection to a
//! per-connection [`Gateway`], which resolves rooms through the shared
//! [`Lobby`].
//!
//! ## Core Types
//!
//! - [`Lobby`] — Registry of active rooms with lazy creation and idle eviction
//! - [`Gateway`] — Per-connection adapter between the socket and room operations
//!
//! ## HTTP Handlers
//!
//! The [`handlers`] submodule exposes the `/health` probe and the `/ws`
//! upgrade route.
mod gateway;
mod lobby;
pub mod handlers;

pub use gateway::*;
pub use lobby::*;

use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpServer;
use actix_web::middleware::Logger;
use actix_web::web;
use std::sync::Arc;

/// Address used when `BIND_ADDR` is unset.
const DEFAULT_BIND: &str = "0.0.0.0:4000";

pub async fn run() -> Result<(), std::io::Error> {
    let lobby = web::Data::new(Arc::new(Lobby::new()));
    log::info!("starting room server");
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .app_data(lobby.clone())
            .route("/health", web::get().to(handlers::health))
            .route("/ws", web::get().to(handlers::socket))
    })
    .bind(std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND.to_string()))?
    .run()
    .await
}
