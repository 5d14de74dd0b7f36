use serde::Serialize;
use xo_board::Symbol;
use xo_core::UserId;

/// A participant's capability within a room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Role {
    X,
    O,
    #[serde(rename = "spectator")]
    Spectator,
}

impl Role {
    /// The playing symbol, if any.
    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            Self::X => Some(Symbol::X),
            Self::O => Some(Symbol::O),
            Self::Spectator => None,
        }
    }
}

impl From<Symbol> for Role {
    fn from(symbol: Symbol) -> Self {
        match symbol {
            Symbol::X => Self::X,
            Symbol::O => Self::O,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::X => write!(f, "X"),
            Self::O => write!(f, "O"),
            Self::Spectator => write!(f, "spectator"),
        }
    }
}

/// Seat reservations keyed by stable identity, decoupled from sockets.
/// A reservation survives disconnects: the same identity reconnecting
/// resumes the same symbol until the room itself is evicted.
#[derive(Debug, Clone, Default)]
pub struct Seats {
    x: Option<UserId>,
    o: Option<UserId>,
}

impl Seats {
    /// The role currently reserved for an identity.
    pub fn role(&self, user: &UserId) -> Role {
        if self.x.as_ref() == Some(user) {
            Role::X
        } else if self.o.as_ref() == Some(user) {
            Role::O
        } else {
            Role::Spectator
        }
    }
    /// Reattaches an existing reservation, or claims the first free seat
    /// (X before O). Everyone else spectates.
    pub fn claim(&mut self, user: &UserId) -> Role {
        match self.role(user) {
            Role::Spectator => {}
            held => return held,
        }
        if self.x.is_none() {
            self.x = Some(user.clone());
            Role::X
        } else if self.o.is_none() {
            self.o = Some(user.clone());
            Role::O
        } else {
            Role::Spectator
        }
    }
    /// The identity holding a symbol's seat, if reserved.
    pub fn holder(&self, symbol: Symbol) -> Option<&UserId> {
        match symbol {
            Symbol::X => self.x.as_ref(),
            Symbol::O => self.o.as_ref(),
        }
    }
}
