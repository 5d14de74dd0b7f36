use serde::Deserialize;
use xo_core::CellIndex;
use xo_core::RoomCode;
use xo_core::UserId;

/// Errors that can occur while decoding inbound frames.
#[derive(Debug, Clone)]
pub enum ProtocolError {
    Malformed(String),
}

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(s) => write!(f, "malformed message: {}", s),
        }
    }
}

impl std::error::Error for ProtocolError {}

/// Admin-only fun-mode actions. Wire values are the camelCase tokens
/// the client emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CheatAction {
    ForceX,
    ForceO,
    ForceDraw,
    ClearScores,
    FillRandom,
    SkipTurn,
    ClearBoard,
}

/// Messages sent from client to server over WebSocket.
/// Everything except `join_room` requires a completed join on the same
/// connection; the gateway enforces that.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Join (or create) a room under a self-asserted stable identity.
    JoinRoom {
        room: RoomCode,
        user: UserId,
        #[serde(default)]
        cheats: bool,
    },
    /// Place the caller's mark at a cell.
    Move { index: CellIndex },
    /// Start a fresh game, keeping scores. Admin only.
    Reset,
    /// Fun-mode action. Admin only, gated on the join-time flag.
    Cheat { action: CheatAction },
    /// Drop the connection binding; the seat reservation is kept.
    LeaveRoom,
}

/// Decodes raw frames into [`ClientMessage`].
/// Centralizes the wire boundary so the room never sees raw JSON.
pub struct Protocol;

impl Protocol {
    pub fn decode(s: &str) -> Result<ClientMessage, ProtocolError> {
        serde_json::from_str(s).map_err(|e| ProtocolError::Malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_join_room() {
        let msg = Protocol::decode(r#"{"type":"join_room","room":"KDWQ42","user":"u-1"}"#);
        match msg.unwrap() {
            ClientMessage::JoinRoom { room, user, cheats } => {
                assert_eq!(room, "KDWQ42");
                assert_eq!(user, "u-1");
                assert!(!cheats);
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }
    #[test]
    fn decode_join_room_with_cheats() {
        let msg =
            Protocol::decode(r#"{"type":"join_room","room":"R","user":"u","cheats":true}"#);
        assert!(matches!(
            msg.unwrap(),
            ClientMessage::JoinRoom { cheats: true, .. }
        ));
    }
    #[test]
    fn decode_move() {
        let msg = Protocol::decode(r#"{"type":"move","index":4}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Move { index: 4 }));
    }
    #[test]
    fn decode_unit_frames() {
        assert!(matches!(
            Protocol::decode(r#"{"type":"reset"}"#).unwrap(),
            ClientMessage::Reset
        ));
        assert!(matches!(
            Protocol::decode(r#"{"type":"leave_room"}"#).unwrap(),
            ClientMessage::LeaveRoom
        ));
    }
    #[test]
    fn decode_every_cheat_action() {
        for (token, action) in [
            ("forceX", CheatAction::ForceX),
            ("forceO", CheatAction::ForceO),
            ("forceDraw", CheatAction::ForceDraw),
            ("clearScores", CheatAction::ClearScores),
            ("fillRandom", CheatAction::FillRandom),
            ("skipTurn", CheatAction::SkipTurn),
            ("clearBoard", CheatAction::ClearBoard),
        ] {
            let frame = format!(r#"{{"type":"cheat","action":"{}"}}"#, token);
            match Protocol::decode(&frame).unwrap() {
                ClientMessage::Cheat { action: got } => assert_eq!(got, action),
                other => panic!("unexpected message: {:?}", other),
            }
        }
    }
    #[test]
    fn decode_rejects_garbage() {
        assert!(Protocol::decode("not json").is_err());
        assert!(Protocol::decode(r#"{"type":"shout"}"#).is_err());
        assert!(Protocol::decode(r#"{"type":"move"}"#).is_err()); // missing index
        assert!(Protocol::decode(r#"{"type":"move","index":-1}"#).is_err());
        assert!(Protocol::decode(r#"{"type":"cheat","action":"winPlease"}"#).is_err());
    }
}
