use super::Role;
use super::Scoreboard;
use serde::Serialize;
use xo_board::Cell;
use xo_board::Symbol;
use xo_board::Verdict;
use xo_core::CELLS;
use xo_core::CellIndex;
use xo_core::UserId;

/// Terminal result of a game as rendered on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Outcome {
    X,
    O,
    #[serde(rename = "draw")]
    Draw,
}

impl From<Symbol> for Outcome {
    fn from(symbol: Symbol) -> Self {
        match symbol {
            Symbol::X => Self::X,
            Symbol::O => Self::O,
        }
    }
}

impl Outcome {
    /// Wire rendering of a verdict: `None` while the game is open.
    pub fn of(verdict: &Verdict) -> Option<Self> {
        match verdict {
            Verdict::Pending => None,
            Verdict::Draw => Some(Self::Draw),
            Verdict::Won(s, _) => Some(Self::from(*s)),
        }
    }
}

/// One entry in a snapshot's participant list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Presence {
    pub user: UserId,
    pub role: Role,
}

/// A complete, self-consistent rendering of room state.
/// Built atomically under the room's lock; subscribers never observe a
/// partial or torn state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub board: [Cell; CELLS],
    pub current_player: Symbol,
    pub winner: Option<Outcome>,
    pub line: Option<[CellIndex; 3]>,
    pub players: Vec<Presence>,
    pub scores: Scoreboard,
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn outcome_of_each_verdict() {
        assert_eq!(Outcome::of(&Verdict::Pending), None);
        assert_eq!(Outcome::of(&Verdict::Draw), Some(Outcome::Draw));
        assert_eq!(
            Outcome::of(&Verdict::Won(Symbol::X, [0, 1, 2])),
            Some(Outcome::X)
        );
    }
    #[test]
    fn draw_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Outcome::Draw).unwrap(), "\"draw\"");
        assert_eq!(serde_json::to_string(&Outcome::X).unwrap(), "\"X\"");
    }
}
