use super::Admission;
use super::Outcome;
use super::Presence;
use super::Scoreboard;
use super::Snapshot;
use serde::Serialize;
use xo_board::Cell;
use xo_board::Symbol;
use xo_core::CELLS;
use xo_core::CellIndex;

/// Messages sent from server to client over WebSocket.
/// `state` frames are always full snapshots so clients can rebuild their
/// view from any single frame after a reconnect.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Join confirmation with the caller's role assignment.
    Joined {
        role: super::Role,
        is_admin: bool,
    },
    /// Authoritative room snapshot, broadcast after every successful
    /// operation.
    State {
        board: [Cell; CELLS],
        current_player: Symbol,
        winner: Option<Outcome>,
        line: Option<[CellIndex; 3]>,
        players: Vec<Presence>,
        scores: Scoreboard,
    },
    /// Private failure notice delivered only to the offending connection.
    Error {
        code: String,
        message: String,
    },
}

impl ServerMessage {
    pub fn joined(admission: &Admission) -> Self {
        Self::Joined {
            role: admission.role,
            is_admin: admission.is_admin,
        }
    }
    pub fn state(snapshot: &Snapshot) -> Self {
        Self::State {
            board: snapshot.board,
            current_player: snapshot.current_player,
            winner: snapshot.winner,
            line: snapshot.line,
            players: snapshot.players.clone(),
            scores: snapshot.scores.clone(),
        }
    }
    pub fn rejection(code: &str, message: impl ToString) -> Self {
        Self::Error {
            code: code.to_string(),
            message: message.to_string(),
        }
    }
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("serialize server message")
    }
}
