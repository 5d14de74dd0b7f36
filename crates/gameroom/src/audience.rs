use std::collections::HashMap;
use tokio::sync::mpsc::UnboundedSender;
use xo_core::ID;

/// Marker type for per-connection identifiers. A connection id changes on
/// every reconnect; identities are tracked separately in [`crate::Seats`].
pub struct Connection;

/// Fan-out of room snapshots to every live connection.
/// Holds only senders (connection lifetime is owned by the gateway);
/// delivery is best-effort and a dead subscriber never stalls the publisher.
#[derive(Debug, Default)]
pub struct Audience {
    subscribers: HashMap<ID<Connection>, UnboundedSender<String>>,
}

impl Audience {
    /// Subscribes a connection to subsequent broadcasts.
    pub fn subscribe(&mut self, conn: ID<Connection>, tx: UnboundedSender<String>) {
        self.subscribers.insert(conn, tx);
    }
    /// Drops a connection's subscription. Safe to call redundantly.
    pub fn unsubscribe(&mut self, conn: ID<Connection>) {
        self.subscribers.remove(&conn);
    }
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
    /// Sends a frame to one connection.
    pub fn unicast(&self, conn: ID<Connection>, json: String) {
        match self.subscribers.get(&conn).map(|tx| tx.send(json)) {
            Some(Ok(())) => {}
            Some(Err(e)) => log::warn!("[audience] unicast to {} failed: {:?}", conn, e),
            None => log::warn!("[audience] unicast to {}: no such connection", conn),
        }
    }
    /// Sends a frame to every subscribed connection, in no particular order.
    pub fn broadcast(&self, json: String) {
        for (conn, tx) in &self.subscribers {
            if let Err(e) = tx.send(json.clone()) {
                log::warn!("[audience] broadcast to {} failed: {:?}", conn, e);
            }
        }
    }
}
