use super::Symbol;
use xo_core::CELLS;
use xo_core::CellIndex;

/// One slot on the board.
pub type Cell = Option<Symbol>;

/// The 8 canonical win lines in fixed scan order:
/// rows, then columns, then diagonals. Evaluation returns the first
/// complete line in this order, so multi-line grids stay deterministic.
pub const LINES: [[CellIndex; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Why a mark could not be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    OutOfRange(CellIndex),
    Occupied(CellIndex),
}

impl std::fmt::Display for BoardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange(i) => write!(f, "cell {} is out of range", i),
            Self::Occupied(i) => write!(f, "cell {} is already occupied", i),
        }
    }
}

impl std::error::Error for BoardError {}

/// Outcome of evaluating a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Game still open: no line won, vacant cells remain.
    Pending,
    /// All nine cells occupied with no line won.
    Draw,
    /// A line is complete for this symbol.
    Won(Symbol, [CellIndex; 3]),
}

impl Verdict {
    /// Whether the game is over under this verdict.
    pub fn terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
    pub fn winner(&self) -> Option<Symbol> {
        match self {
            Self::Won(s, _) => Some(*s),
            _ => None,
        }
    }
    pub fn line(&self) -> Option<[CellIndex; 3]> {
        match self {
            Self::Won(_, line) => Some(*line),
            _ => None,
        }
    }
}

/// A 3x3 board as a copyable value. All mutations return new grids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Grid([Cell; CELLS]);

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }
    /// The mark at a cell, if any. Out-of-range reads as vacant.
    pub fn get(&self, index: CellIndex) -> Cell {
        self.0.get(index).copied().flatten()
    }
    pub fn cells(&self) -> &[Cell; CELLS] {
        &self.0
    }
    pub fn is_full(&self) -> bool {
        self.0.iter().all(Option::is_some)
    }
    /// Indices of vacant cells in scan order.
    pub fn vacant(&self) -> impl Iterator<Item = CellIndex> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_none())
            .map(|(i, _)| i)
    }
    /// Number of cells held by a symbol.
    pub fn count(&self, symbol: Symbol) -> usize {
        self.0.iter().filter(|c| **c == Some(symbol)).count()
    }
    /// Places a mark, failing on out-of-range or occupied cells.
    /// Does not check turn ownership.
    pub fn place(self, index: CellIndex, symbol: Symbol) -> Result<Self, BoardError> {
        if index >= CELLS {
            return Err(BoardError::OutOfRange(index));
        }
        if self.0[index].is_some() {
            return Err(BoardError::Occupied(index));
        }
        let mut next = self;
        next.0[index] = Some(symbol);
        Ok(next)
    }
    /// Overwrites a cell unconditionally. Rigging only; normal play goes
    /// through [`Grid::place`].
    pub(crate) fn overwrite(self, index: CellIndex, cell: Cell) -> Self {
        let mut next = self;
        next.0[index] = cell;
        next
    }
    /// Checks the 8 canonical lines in scan order. A draw is declared only
    /// when no line is won and all nine cells are occupied. Idempotent.
    pub fn evaluate(&self) -> Verdict {
        for line in LINES {
            let [a, b, c] = line;
            if let Some(s) = self.0[a] {
                if self.0[b] == Some(s) && self.0[c] == Some(s) {
                    return Verdict::Won(s, line);
                }
            }
        }
        if self.is_full() {
            Verdict::Draw
        } else {
            Verdict::Pending
        }
    }
}

impl From<[Cell; CELLS]> for Grid {
    fn from(cells: [Cell; CELLS]) -> Self {
        Self(cells)
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for row in self.0.chunks(3) {
            for cell in row {
                match cell {
                    Some(s) => write!(f, "{}", s)?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Symbol::*;

    /// Builds a grid from a 9-char picture like "XO. .X. ..O" (dots vacant).
    pub fn grid(s: &str) -> Grid {
        let mut cells = [None; CELLS];
        for (i, c) in s.chars().filter(|c| !c.is_whitespace()).enumerate() {
            cells[i] = match c {
                'X' => Some(X),
                'O' => Some(O),
                _ => None,
            };
        }
        Grid::from(cells)
    }

    #[test]
    fn place_on_vacant_cell() {
        let g = Grid::new().place(4, X).unwrap();
        assert_eq!(g.get(4), Some(X));
        assert_eq!(g.count(X), 1);
    }
    #[test]
    fn place_out_of_range() {
        assert_eq!(Grid::new().place(9, X), Err(BoardError::OutOfRange(9)));
    }
    #[test]
    fn place_on_occupied_cell() {
        let g = Grid::new().place(0, X).unwrap();
        assert_eq!(g.place(0, O), Err(BoardError::Occupied(0)));
    }
    #[test]
    fn place_leaves_original_untouched() {
        let g = Grid::new();
        let _ = g.place(0, X).unwrap();
        assert_eq!(g, Grid::new());
    }
    #[test]
    fn empty_grid_is_pending() {
        assert_eq!(Grid::new().evaluate(), Verdict::Pending);
    }
    #[test]
    fn detects_each_line() {
        for line in LINES {
            let mut g = Grid::new();
            for i in line {
                g = g.place(i, O).unwrap();
            }
            assert_eq!(g.evaluate(), Verdict::Won(O, line));
        }
    }
    #[test]
    fn detects_draw_only_when_full() {
        let g = grid("XXO OOX XO.");
        assert_eq!(g.evaluate(), Verdict::Pending);
        let g = g.place(8, X).unwrap();
        assert_eq!(g.evaluate(), Verdict::Draw);
    }
    #[test]
    fn evaluate_is_idempotent() {
        let g = grid("XXX OO. ...");
        assert_eq!(g.evaluate(), g.evaluate());
        assert_eq!(g.evaluate(), Verdict::Won(X, [0, 1, 2]));
    }
    #[test]
    fn multi_line_grid_resolves_in_scan_order() {
        // Illegal under real play, but must not crash: rows before columns.
        let g = grid("XXX XOO XOO");
        assert_eq!(g.evaluate(), Verdict::Won(X, [0, 1, 2]));
    }
    #[test]
    fn vacant_iterates_in_scan_order() {
        let g = grid("X.O ... ..X");
        assert_eq!(g.vacant().collect::<Vec<_>>(), vec![1, 3, 4, 5, 6, 7]);
    }
}
