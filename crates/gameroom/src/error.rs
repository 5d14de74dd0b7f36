use xo_core::RoomCode;

/// Recoverable failures of room operations.
/// Reported only to the offending connection, never broadcast, and never
/// accompanied by a state mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomError {
    /// Cell occupied or index out of range.
    InvalidMove(String),
    /// Caller's reserved symbol is not the current turn (or caller spectates).
    NotYourTurn,
    /// Game already reached a winner or draw; reset first.
    GameConcluded,
    /// Reset and cheat actions are admin-only.
    NotAuthorized,
    /// Room was retired or never existed.
    UnknownRoom(RoomCode),
    /// Message arrived before a successful join.
    UnboundConnection,
}

impl RoomError {
    /// Stable wire code for the error payload.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidMove(_) => "invalid_move",
            Self::NotYourTurn => "not_your_turn",
            Self::GameConcluded => "game_concluded",
            Self::NotAuthorized => "not_authorized",
            Self::UnknownRoom(_) => "unknown_room",
            Self::UnboundConnection => "unbound_connection",
        }
    }
}

impl std::fmt::Display for RoomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMove(s) => write!(f, "invalid move: {}", s),
            Self::NotYourTurn => write!(f, "not your turn"),
            Self::GameConcluded => write!(f, "game already concluded"),
            Self::NotAuthorized => write!(f, "not authorized"),
            Self::UnknownRoom(code) => write!(f, "unknown room: {}", code),
            Self::UnboundConnection => write!(f, "join a room first"),
        }
    }
}

impl std::error::Error for RoomError {}

impl From<xo_board::BoardError> for RoomError {
    fn from(e: xo_board::BoardError) -> Self {
        Self::InvalidMove(e.to_string())
    }
}
