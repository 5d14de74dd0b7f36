//! Authoritative room/session synchronization engine.
//!
//! Each room owns one game's mutable state and is the single source of truth
//! for every connected participant. All client input is validated here; the
//! presentation layer is never trusted.
//!
//! ## Architecture
//!
//! - [`Room`] — State machine owning grid, turn, roles, scores, and bindings
//! - [`Seats`] — Identity-to-symbol reservations surviving reconnects
//! - [`Audience`] — Best-effort snapshot fan-out to live connections
//! - [`Snapshot`] — Fully-materialized state sent to every subscriber
//!
//! ## Protocol
//!
//! - [`ClientMessage`] / [`Protocol`] — Inbound wire frames and decoding
//! - [`ServerMessage`] — Outbound wire frames (joined, state, error)
//! - [`RoomError`] — Recoverable failures, private to the offending sender
mod audience;
mod error;
mod message;
mod protocol;
mod room;
mod scores;
mod seats;
mod snapshot;

pub use audience::*;
pub use error::*;
pub use message::*;
pub use protocol::*;
pub use room::*;
pub use scores::*;
pub use seats::*;
pub use snapshot::*;
