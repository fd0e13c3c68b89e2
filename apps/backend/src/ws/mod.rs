//! Game WebSocket: wire protocol, per-game connection hub, and the
//! per-connection actor.

pub mod game;
pub mod hub;
pub mod protocol;
pub mod session;
