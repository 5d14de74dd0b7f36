//! Grid fabrications backing the admin fun-mode actions.
//!
//! These bypass normal placement rules on purpose. They stay pure: callers
//! get a new grid and run the usual evaluation and bookkeeping on it.

use super::Grid;
use super::LINES;
use super::Symbol;
use xo_core::CellIndex;

/// Rewrites the grid so `symbol` holds a complete line.
/// Picks the line holding the fewest opposing marks, so existing opposing
/// moves are preserved where possible and overwritten minimally otherwise.
/// Ties resolve to the first such line in scan order.
pub fn rig_win(grid: Grid, symbol: Symbol) -> (Grid, [CellIndex; 3]) {
    let line = LINES
        .iter()
        .min_by_key(|line| {
            line.iter()
                .filter(|&&i| grid.get(i).is_some_and(|s| s != symbol))
                .count()
        })
        .copied()
        .expect("canonical lines are non-empty");
    let rigged = line
        .iter()
        .fold(grid, |g, &i| g.overwrite(i, Some(symbol)));
    (rigged, line)
}

/// Fills every vacant cell without completing any line, preserving all
/// existing marks. Some grids admit no draw completion (two opposing twin
/// threats through the same vacant cell); those fall back to a greedy fill
/// that completes as few lines as possible and lets evaluation rule.
pub fn rig_draw(grid: Grid) -> Grid {
    let vacant = grid.vacant().collect::<Vec<_>>();
    fill(grid, &vacant).unwrap_or_else(|| fallback(grid, &vacant))
}

/// Backtracking fill: first full grid where no line is won, if one exists.
fn fill(grid: Grid, vacant: &[CellIndex]) -> Option<Grid> {
    let (&index, rest) = match vacant.split_first() {
        Some(split) => split,
        None => return Some(grid),
    };
    [Symbol::X, Symbol::O].into_iter().find_map(|symbol| {
        let next = grid.overwrite(index, Some(symbol));
        match next.evaluate().winner() {
            Some(_) => None,
            None => fill(next, rest),
        }
    })
}

/// Greedy fill for grids with no draw completion: each cell takes the symbol
/// completing the fewest lines through it.
fn fallback(grid: Grid, vacant: &[CellIndex]) -> Grid {
    vacant.iter().fold(grid, |g, &index| {
        [Symbol::X, Symbol::O]
            .into_iter()
            .map(|symbol| g.overwrite(index, Some(symbol)))
            .min_by_key(|next| completions(next, index))
            .expect("both symbols are candidates")
    })
}

/// Number of complete lines through `index`.
fn completions(grid: &Grid, index: CellIndex) -> usize {
    LINES
        .iter()
        .filter(|line| line.contains(&index))
        .filter(|line| {
            line.iter()
                .all(|&i| grid.get(i).is_some() && grid.get(i) == grid.get(index))
        })
        .count()
}
