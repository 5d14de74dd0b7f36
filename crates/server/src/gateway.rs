use super::Lobby;
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;
use xo_core::ID;
use xo_core::RoomCode;
use xo_core::UserId;
use xo_gameroom::ClientMessage;
use xo_gameroom::Connection;
use xo_gameroom::Protocol;
use xo_gameroom::Room;
use xo_gameroom::RoomError;
use xo_gameroom::ServerMessage;
use xo_gameroom::Snapshot;

/// Join-time binding of a connection to a room and identity.
struct Binding {
    code: RoomCode,
    user: UserId,
    room: Arc<Mutex<Room>>,
}

/// Per-connection adapter between the WebSocket and room operations.
///
/// - decodes inbound frames and routes them to the bound room
/// - publishes a state broadcast on every successful operation
/// - answers failures privately, never to the rest of the room
/// - degrades transport loss to a departure with the seat kept
pub struct Gateway {
    conn: ID<Connection>,
    lobby: Arc<Lobby>,
    binding: Option<Binding>,
}

impl Gateway {
    pub fn new(lobby: Arc<Lobby>) -> Self {
        Self {
            conn: ID::default(),
            lobby,
            binding: None,
        }
    }
    /// Drives the connection until the peer closes or errors.
    pub async fn run(
        mut self,
        mut session: actix_ws::Session,
        mut stream: actix_ws::MessageStream,
    ) {
        let (tx, mut rx) = unbounded_channel::<String>();
        log::debug!("[gateway {}] connected", self.conn);
        'sesh: loop {
            tokio::select! {
                biased;
                out = rx.recv() => match out {
                    Some(json) => if session.text(json).await.is_err() { break 'sesh },
                    None => break 'sesh,
                },
                msg = stream.next() => match msg {
                    Some(Ok(actix_ws::Message::Text(text))) => self.handle(&tx, &text).await,
                    Some(Ok(actix_ws::Message::Close(_))) => break 'sesh,
                    Some(Err(_)) => break 'sesh,
                    None => break 'sesh,
                    _ => continue 'sesh,
                },
            }
        }
        self.hangup().await;
        log::debug!("[gateway {}] disconnected", self.conn);
    }
    /// Routes one decoded frame. Anything but `join_room` requires a
    /// completed join on this connection.
    async fn handle(&mut self, tx: &UnboundedSender<String>, text: &str) {
        match Protocol::decode(text) {
            Err(e) => {
                let _ = tx.send(ServerMessage::rejection("malformed", &e).to_json());
            }
            Ok(ClientMessage::JoinRoom { room, user, cheats }) => {
                self.join(tx, room, user, cheats).await;
            }
            Ok(ClientMessage::Move { index }) => {
                self.operate(tx, |room, user| room.play(user, index)).await;
            }
            Ok(ClientMessage::Reset) => {
                self.operate(tx, |room, user| room.reset(user)).await;
            }
            Ok(ClientMessage::Cheat { action }) => {
                self.operate(tx, |room, user| room.cheat(user, action)).await;
            }
            Ok(ClientMessage::LeaveRoom) => {
                self.hangup().await;
            }
        }
    }
    /// Resolves the room and admits the caller, retrying once past a room
    /// retired by a racing eviction. A join while already bound switches
    /// rooms: the previous binding departs first.
    async fn join(
        &mut self,
        tx: &UnboundedSender<String>,
        code: RoomCode,
        user: UserId,
        cheats: bool,
    ) {
        self.hangup().await;
        loop {
            let room = match self.lobby.get_or_create(&code).await {
                Ok(room) => room,
                Err(e) => {
                    let _ = tx.send(ServerMessage::rejection(e.code(), &e).to_json());
                    return;
                }
            };
            let mut guard = room.lock().await;
            match guard.admit(user.clone(), self.conn, tx.clone(), cheats) {
                Ok((admission, snapshot)) => {
                    guard.unicast(self.conn, &ServerMessage::joined(&admission));
                    guard.publish(&snapshot);
                    let code = guard.code().to_string();
                    drop(guard);
                    log::info!("[gateway {}] {} joined room {}", self.conn, user, code);
                    self.binding = Some(Binding { code, user, room });
                    return;
                }
                // lost the race against eviction; resolve a fresh room
                Err(RoomError::UnknownRoom(_)) => continue,
                Err(e) => {
                    let _ = tx.send(ServerMessage::rejection(e.code(), &e).to_json());
                    return;
                }
            }
        }
    }
    /// Runs one room operation under the room's lock: broadcast on
    /// success, private error on failure.
    async fn operate<F>(&self, tx: &UnboundedSender<String>, op: F)
    where
        F: FnOnce(&mut Room, &UserId) -> Result<Snapshot, RoomError>,
    {
        let Some(binding) = self.binding.as_ref() else {
            let e = RoomError::UnboundConnection;
            let _ = tx.send(ServerMessage::rejection(e.code(), &e).to_json());
            return;
        };
        let mut room = binding.room.lock().await;
        match op(&mut room, &binding.user) {
            Ok(snapshot) => room.publish(&snapshot),
            Err(e) => {
                let _ = tx.send(ServerMessage::rejection(e.code(), &e).to_json());
            }
        }
    }
    /// Departs the bound room, broadcasting the updated roster and arming
    /// the eviction timer if the room went vacant. No-op when unbound.
    async fn hangup(&mut self) {
        if let Some(binding) = self.binding.take() {
            let mut room = binding.room.lock().await;
            if let Some(snapshot) = room.depart(self.conn) {
                room.publish(&snapshot);
            }
            let vacant = room.is_vacant();
            drop(room);
            if vacant {
                self.lobby.retire_later(binding.code.clone());
            }
            log::info!("[gateway {}] left room {}", self.conn, binding.code);
        }
    }
}
