use serde::Serialize;
use std::collections::BTreeMap;
use xo_core::UserId;
use xo_core::Wins;

/// Per-identity win ledger plus a shared draw counter.
/// Identity-keyed so wins stay attributed correctly across role swaps
/// and reconnects; survives resets, cleared only by the admin cheat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Scoreboard {
    pub by_user: BTreeMap<UserId, Wins>,
    pub draws: Wins,
}

impl Scoreboard {
    /// Credits one win to an identity.
    pub fn credit(&mut self, user: &UserId) {
        *self.by_user.entry(user.clone()).or_insert(0) += 1;
    }
    /// Records a drawn game.
    pub fn draw(&mut self) {
        self.draws += 1;
    }
    /// Zeroes all counters.
    pub fn clear(&mut self) {
        self.by_user.clear();
        self.draws = 0;
    }
    pub fn wins(&self, user: &UserId) -> Wins {
        self.by_user.get(user).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn credit_accumulates_per_identity() {
        let mut scores = Scoreboard::default();
        scores.credit(&"a".to_string());
        scores.credit(&"a".to_string());
        scores.credit(&"b".to_string());
        assert_eq!(scores.wins(&"a".to_string()), 2);
        assert_eq!(scores.wins(&"b".to_string()), 1);
        assert_eq!(scores.wins(&"c".to_string()), 0);
    }
    #[test]
    fn clear_zeroes_everything() {
        let mut scores = Scoreboard::default();
        scores.credit(&"a".to_string());
        scores.draw();
        scores.clear();
        assert_eq!(scores, Scoreboard::default());
    }
}
