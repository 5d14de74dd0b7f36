//! Room Hosting Binary
//!
//! Serves the WebSocket room engine on BIND_ADDR (e.g. 0.0.0.0:4000).

#[tokio::main]
async fn main() {
    xo_core::log();
    xo_core::kys();
    xo_server::run().await.unwrap();
}
