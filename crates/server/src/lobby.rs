use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::sync::RwLock;
use xo_core::GRACE_SECS;
use xo_core::RoomCode;
use xo_gameroom::Room;
use xo_gameroom::RoomError;

/// Registry of active rooms: lazy creation, per-room mutual exclusion,
/// idle eviction. Lock ordering is always map before room, never the
/// reverse, so cross-room traffic stays fully parallel.
pub struct Lobby {
    rooms: RwLock<HashMap<RoomCode, Arc<Mutex<Room>>>>,
    grace: Duration,
}

impl Default for Lobby {
    fn default() -> Self {
        Self::new()
    }
}

impl Lobby {
    pub fn new() -> Self {
        Self::with_grace(Duration::from_secs(GRACE_SECS))
    }
    /// Registry with a custom grace window (tests use zero).
    pub fn with_grace(grace: Duration) -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            grace,
        }
    }
    /// Resolves a room, creating it on first join. Idempotent: concurrent
    /// first-joins to the same unseen code observe a single room.
    pub async fn get_or_create(&self, code: &str) -> Result<Arc<Mutex<Room>>, RoomError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(RoomError::UnknownRoom(code.to_string()));
        }
        let mut rooms = self.rooms.write().await;
        let room = rooms
            .entry(code.to_string())
            .or_insert_with(|| {
                log::info!("[lobby] created room {}", code);
                Arc::new(Mutex::new(Room::new(code.to_string())))
            })
            .clone();
        Ok(room)
    }
    /// Looks up an existing room without creating one.
    pub async fn lookup(&self, code: &str) -> Option<Arc<Mutex<Room>>> {
        self.rooms.read().await.get(code.trim()).cloned()
    }
    /// Number of live rooms.
    pub async fn count(&self) -> usize {
        self.rooms.read().await.len()
    }
    /// Evicts a room once it has zero bound connections and the grace
    /// window has elapsed. Safe to call redundantly. The room is retired
    /// under its own lock so a joiner racing the eviction is bounced back
    /// to [`Lobby::get_or_create`] and lands in a fresh room.
    pub async fn evict_if_idle(&self, code: &str) -> bool {
        let mut rooms = self.rooms.write().await;
        if let Some(room) = rooms.get(code) {
            let mut guard = room.lock().await;
            if guard.is_vacant() && guard.expired(self.grace) {
                guard.retire();
                drop(guard);
                rooms.remove(code);
                log::info!("[lobby] evicted idle room {}", code);
                return true;
            }
        }
        false
    }
    /// Schedules an eviction attempt one grace window from now.
    /// Called after every departure; harmless if someone reconnects first.
    pub fn retire_later(self: &Arc<Self>, code: RoomCode) {
        let lobby = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(lobby.grace).await;
            let _ = lobby.evict_if_idle(&code).await;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::unbounded_channel;
    use xo_core::ID;

    #[tokio::test]
    async fn get_or_create_is_idempotent() {
        let lobby = Lobby::new();
        let a = lobby.get_or_create("ROOM1").await.unwrap();
        let b = lobby.get_or_create("ROOM1").await.unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(lobby.count().await, 1);
    }
    #[tokio::test]
    async fn concurrent_first_joins_observe_one_room() {
        let lobby = Arc::new(Lobby::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let lobby = lobby.clone();
            handles.push(tokio::spawn(
                async move { lobby.get_or_create("FRESH1").await },
            ));
        }
        let mut rooms = Vec::new();
        for handle in handles {
            rooms.push(handle.await.unwrap().unwrap());
        }
        assert!(rooms.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
        assert_eq!(lobby.count().await, 1);
    }
    #[tokio::test]
    async fn blank_codes_are_rejected() {
        let lobby = Lobby::new();
        assert!(matches!(
            lobby.get_or_create("   ").await,
            Err(RoomError::UnknownRoom(_))
        ));
    }
    #[tokio::test]
    async fn codes_are_trimmed() {
        let lobby = Lobby::new();
        let a = lobby.get_or_create(" ROOM1 ").await.unwrap();
        let b = lobby.lookup("ROOM1").await.unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
    #[tokio::test]
    async fn custom_codes_of_any_length_are_accepted() {
        // Generated codes are 6 chars, but typed-in codes are free-form;
        // only blank codes are rejected.
        let lobby = Lobby::new();
        assert!(lobby.get_or_create("A").await.is_ok());
        assert!(lobby.get_or_create("FRIDAY-NIGHT-REMATCH").await.is_ok());
        assert_eq!(lobby.count().await, 2);
    }
    #[tokio::test]
    async fn eviction_waits_for_vacancy_and_grace() {
        let lobby = Lobby::with_grace(Duration::ZERO);
        let room = lobby.get_or_create("ROOM1").await.unwrap();
        let (tx, _rx) = unbounded_channel();
        let conn = ID::default();
        room.lock()
            .await
            .admit("alice".to_string(), conn, tx, false)
            .unwrap();
        assert!(!lobby.evict_if_idle("ROOM1").await, "room still occupied");
        room.lock().await.depart(conn);
        assert!(lobby.evict_if_idle("ROOM1").await);
        assert!(!lobby.evict_if_idle("ROOM1").await, "redundant call is safe");
        assert_eq!(lobby.count().await, 0);
    }
    #[tokio::test]
    async fn eviction_retires_the_room() {
        let lobby = Lobby::with_grace(Duration::ZERO);
        let room = lobby.get_or_create("ROOM1").await.unwrap();
        let (tx, _rx) = unbounded_channel();
        let conn = ID::default();
        room.lock()
            .await
            .admit("alice".to_string(), conn, tx, false)
            .unwrap();
        room.lock().await.depart(conn);
        assert!(lobby.evict_if_idle("ROOM1").await);
        // a joiner holding the stale handle is told to re-resolve
        let (tx, _rx) = unbounded_channel();
        assert!(matches!(
            room.lock()
                .await
                .admit("bob".to_string(), ID::default(), tx, false),
            Err(RoomError::UnknownRoom(_))
        ));
    }
}
