//! Domain layer: pure chess session logic.

pub mod clock;
pub mod color;
pub mod position;
pub mod session;

pub use clock::{ClockBook, TimeControl, MAX_INITIAL_MINUTES};
pub use color::Color;
pub use position::{DrawReason, IllegalMove, Outcome, Position};
pub use session::{GameSession, GameSettings, JoinOutcome, MoveOutcome, Phase, SessionSnapshot};
