use super::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::IteratorRandom;
use std::collections::BTreeSet;
use std::collections::HashMap;
use std::collections::HashSet;
use std::time::Duration;
use std::time::Instant;
use tokio::sync::mpsc::UnboundedSender;
use xo_board::Grid;
use xo_board::Symbol;
use xo_board::Verdict;
use xo_board::rig;
use xo_core::CellIndex;
use xo_core::ID;
use xo_core::RoomCode;
use xo_core::UserId;

/// Result of admitting an identity into a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Admission {
    pub role: Role,
    pub is_admin: bool,
}

/// Live room coordinator: the single source of truth for one game.
/// Owns grid, turn, verdict, seat reservations, scores, and connection
/// bindings. Callers serialize access externally (one mutex per room),
/// so every operation here is synchronous and all-or-nothing.
pub struct Room {
    code: RoomCode,
    grid: Grid,
    turn: Symbol,
    verdict: Verdict,
    seats: Seats,
    admin: Option<UserId>,
    scores: Scoreboard,
    funmode: HashSet<UserId>,
    links: HashMap<ID<Connection>, UserId>,
    audience: Audience,
    vacated: Option<Instant>,
    retired: bool,
    rng: SmallRng,
}

impl Room {
    pub fn new(code: RoomCode) -> Self {
        Self {
            code,
            grid: Grid::new(),
            turn: Symbol::X,
            verdict: Verdict::Pending,
            seats: Seats::default(),
            admin: None,
            scores: Scoreboard::default(),
            funmode: HashSet::new(),
            links: HashMap::new(),
            audience: Audience::default(),
            vacated: None,
            retired: false,
            rng: SmallRng::from_os_rng(),
        }
    }
    pub fn code(&self) -> &str {
        &self.code
    }
    /// The admin identity: first ever admitted, permanent for the room's
    /// lifetime even after leaving.
    pub fn admin(&self) -> Option<&UserId> {
        self.admin.as_ref()
    }
    /// True once every connection has dropped.
    pub fn is_vacant(&self) -> bool {
        self.links.is_empty()
    }
    /// True when the room has been vacant longer than the grace window.
    pub fn expired(&self, grace: Duration) -> bool {
        self.vacated.map(|t| t.elapsed() >= grace).unwrap_or(false)
    }
    /// Marks the room dead so racing joiners bounce back to the registry.
    pub fn retire(&mut self) {
        self.retired = true;
    }
}

impl Room {
    /// Admits an identity on a fresh connection. An identity holding a seat
    /// reservation is reattached to it (any prior connection for that
    /// identity is superseded silently); otherwise seats fill X then O, then
    /// spectator. The first identity ever admitted becomes admin forever.
    pub fn admit(
        &mut self,
        user: UserId,
        conn: ID<Connection>,
        tx: UnboundedSender<String>,
        funmode: bool,
    ) -> Result<(Admission, Snapshot), RoomError> {
        if self.retired {
            return Err(RoomError::UnknownRoom(self.code.clone()));
        }
        let stale = self
            .links
            .iter()
            .filter(|(_, u)| **u == user)
            .map(|(c, _)| *c)
            .collect::<Vec<_>>();
        for old in stale {
            self.links.remove(&old);
            self.audience.unsubscribe(old);
        }
        let role = self.seats.claim(&user);
        let admin = self.admin.get_or_insert_with(|| user.clone());
        let is_admin = *admin == user;
        match funmode && is_admin {
            true => self.funmode.insert(user.clone()),
            false => self.funmode.remove(&user),
        };
        self.links.insert(conn, user.clone());
        self.audience.subscribe(conn, tx);
        self.vacated = None;
        log::info!(
            "[room {}] {} admitted as {} (admin: {})",
            self.code,
            user,
            role,
            is_admin
        );
        Ok((Admission { role, is_admin }, self.snapshot()))
    }
    /// Places the caller's mark. Fails without mutating on wrong turn,
    /// concluded game, or illegal cell.
    pub fn play(&mut self, user: &UserId, index: CellIndex) -> Result<Snapshot, RoomError> {
        if self.verdict.terminal() {
            return Err(RoomError::GameConcluded);
        }
        if self.seats.role(user).symbol() != Some(self.turn) {
            return Err(RoomError::NotYourTurn);
        }
        self.grid = self.grid.place(index, self.turn)?;
        log::debug!("[room {}] {} played {} at {}", self.code, user, self.turn, index);
        self.settle(true);
        Ok(self.snapshot())
    }
    /// Starts a fresh game: empty grid, X to move, scores preserved.
    pub fn reset(&mut self, user: &UserId) -> Result<Snapshot, RoomError> {
        if self.admin.as_ref() != Some(user) {
            return Err(RoomError::NotAuthorized);
        }
        self.grid = Grid::new();
        self.verdict = Verdict::Pending;
        self.turn = Symbol::X;
        log::info!("[room {}] reset by {}", self.code, user);
        Ok(self.snapshot())
    }
    /// Drops a connection binding. The seat reservation stays so the same
    /// identity can resume its role; starts the vacancy clock when the last
    /// connection goes. Idempotent per connection.
    pub fn depart(&mut self, conn: ID<Connection>) -> Option<Snapshot> {
        let user = self.links.remove(&conn)?;
        self.audience.unsubscribe(conn);
        if self.links.is_empty() {
            self.vacated = Some(Instant::now());
        }
        log::info!("[room {}] {} departed", self.code, user);
        Some(self.snapshot())
    }
    /// Fun-mode action. Authoritatively re-checks admin + the join-time
    /// flag; client-side gating is never trusted.
    pub fn cheat(&mut self, user: &UserId, action: CheatAction) -> Result<Snapshot, RoomError> {
        if self.admin.as_ref() != Some(user) || !self.funmode.contains(user) {
            return Err(RoomError::NotAuthorized);
        }
        match action {
            CheatAction::ForceX => self.force(Symbol::X),
            CheatAction::ForceO => self.force(Symbol::O),
            CheatAction::ForceDraw => {
                self.grid = rig::rig_draw(self.grid);
                self.settle(false);
            }
            CheatAction::ClearScores => self.scores.clear(),
            CheatAction::FillRandom => {
                let index = self
                    .grid
                    .vacant()
                    .choose(&mut self.rng)
                    .ok_or_else(|| RoomError::InvalidMove("no vacant cell".to_string()))?;
                self.grid = self.grid.place(index, self.turn)?;
                self.settle(true);
            }
            CheatAction::SkipTurn => self.turn = self.turn.other(),
            CheatAction::ClearBoard => self.grid = Grid::new(),
        }
        log::info!("[room {}] cheat {:?} by {}", self.code, action, user);
        Ok(self.snapshot())
    }
    /// Completes a line for `symbol` and settles the result.
    fn force(&mut self, symbol: Symbol) {
        let (rigged, _) = rig::rig_win(self.grid, symbol);
        self.grid = rigged;
        self.settle(false);
    }
    /// Evaluates the grid and applies win/draw bookkeeping. Scores are
    /// credited only on a Pending-to-terminal transition, so rigging an
    /// already-concluded game never double-counts. `flip` advances the turn
    /// on a still-open grid (normal moves), while rigging leaves it alone.
    fn settle(&mut self, flip: bool) {
        match self.grid.evaluate() {
            Verdict::Pending => {
                if flip {
                    self.turn = self.turn.other();
                }
            }
            verdict @ Verdict::Draw => {
                if !self.verdict.terminal() {
                    self.scores.draw();
                }
                self.verdict = verdict;
            }
            verdict @ Verdict::Won(symbol, _) => {
                if !self.verdict.terminal() {
                    if let Some(winner) = self.seats.holder(symbol) {
                        self.scores.credit(winner);
                    }
                }
                self.verdict = verdict;
            }
        }
    }
}

impl Room {
    /// Builds the authoritative snapshot, atomically under the caller's
    /// lock. Participant order is deterministic (sorted by identity).
    pub fn snapshot(&self) -> Snapshot {
        let players = self
            .links
            .values()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(|user| Presence {
                user: user.clone(),
                role: self.seats.role(user),
            })
            .collect();
        Snapshot {
            board: *self.grid.cells(),
            current_player: self.turn,
            winner: Outcome::of(&self.verdict),
            line: self.verdict.line(),
            players,
            scores: self.scores.clone(),
        }
    }
    /// Fans a snapshot out to every live connection. Best-effort.
    pub fn publish(&self, snapshot: &Snapshot) {
        self.audience.broadcast(ServerMessage::state(snapshot).to_json());
    }
    /// Sends a frame to a single connection.
    pub fn unicast(&self, conn: ID<Connection>, message: &ServerMessage) {
        self.audience.unicast(conn, message.to_json());
    }
}
