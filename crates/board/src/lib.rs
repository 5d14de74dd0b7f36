//! Pure tic-tac-toe board engine.
//!
//! Stateless value types: every operation consumes a [`Grid`] and returns a
//! new one, or reports why it cannot. Turn ownership is deliberately not
//! checked here; that is the room's concern.
//!
//! ## Core Types
//!
//! - [`Symbol`] — the two player marks
//! - [`Grid`] — the 3x3 board as a copyable value
//! - [`Verdict`] — outcome of evaluating a grid
//!
//! ## Submodules
//!
//! - [`rig`] — grid fabrications backing the admin fun-mode actions
mod grid;
mod symbol;

pub mod rig;

pub use grid::*;
pub use symbol::*;
