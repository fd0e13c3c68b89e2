//! Chess position adapter over the `chess` crate.
//!
//! `chess::Board` knows piece placement, castling rights and en passant but
//! not the halfmove clock or fullmove number, so [`Position`] tracks those
//! alongside it to produce full six-field FEN.

use std::fmt;
use std::str::FromStr;

use chess::{Board, BoardStatus, ChessMove, Piece, Square};
use serde::Serialize;
use thiserror::Error;

use crate::domain::color::Color;
use crate::errors::domain::DomainError;

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Halfmoves without a capture or pawn move after which the game is drawn.
const SEVENTY_FIVE_MOVE_LIMIT: u32 = 150;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid move \"{0}\"")]
pub struct IllegalMove(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawReason {
    InsufficientMaterial,
    SeventyFiveMoveRule,
}

/// Result of evaluating a position after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Outcome {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
    Draw { reason: DrawReason },
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Position {
    board: Board,
    halfmove_clock: u32,
    fullmove_number: u32,
}

impl Position {
    pub fn starting() -> Self {
        Self {
            board: Board::default(),
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Parse a FEN string. Missing move counters default to `0 1`.
    pub fn from_fen(fen: &str) -> Result<Self, DomainError> {
        let board = Board::from_str(fen)
            .map_err(|e| DomainError::validation(format!("invalid FEN '{fen}': {e}")))?;
        let mut counters = fen.split_whitespace().skip(4);
        let halfmove_clock = counters.next().and_then(|f| f.parse().ok()).unwrap_or(0);
        let fullmove_number = counters
            .next()
            .and_then(|f| f.parse::<u32>().ok())
            .unwrap_or(1)
            .max(1);

        Ok(Self {
            board,
            halfmove_clock,
            fullmove_number,
        })
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move().into()
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Apply a move in SAN (`Nf3`, `O-O`, `e8=Q`) or UCI coordinate
    /// notation (`g1f3`, `e7e8q`) and return the resulting position.
    pub fn apply(&self, move_text: &str) -> Result<Position, IllegalMove> {
        let text = move_text.trim();
        if text.is_empty() || !text.is_ascii() {
            return Err(IllegalMove(text.to_string()));
        }
        let san = text.trim_end_matches(['+', '#']);
        let mv = ChessMove::from_san(&self.board, san)
            .ok()
            .or_else(|| parse_coordinate(text))
            .filter(|mv| self.board.legal(*mv))
            .ok_or_else(|| IllegalMove(text.to_string()))?;

        let resets_clock = self.board.piece_on(mv.get_source()) == Some(Piece::Pawn)
            || self.board.piece_on(mv.get_dest()).is_some();
        let black_moved = self.board.side_to_move() == chess::Color::Black;

        Ok(Position {
            board: self.board.make_move_new(mv),
            halfmove_clock: if resets_clock {
                0
            } else {
                self.halfmove_clock + 1
            },
            fullmove_number: if black_moved {
                self.fullmove_number + 1
            } else {
                self.fullmove_number
            },
        })
    }

    pub fn to_fen(&self) -> String {
        let board_fen = self.board.to_string();
        let leading: Vec<&str> = board_fen.split_whitespace().take(4).collect();
        format!(
            "{} {} {}",
            leading.join(" "),
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    pub fn outcome(&self) -> Outcome {
        match self.board.status() {
            BoardStatus::Checkmate => Outcome::Checkmate {
                winner: self.side_to_move().opposite(),
            },
            BoardStatus::Stalemate => Outcome::Stalemate,
            BoardStatus::Ongoing if self.insufficient_material() => Outcome::Draw {
                reason: DrawReason::InsufficientMaterial,
            },
            BoardStatus::Ongoing if self.halfmove_clock >= SEVENTY_FIVE_MOVE_LIMIT => {
                Outcome::Draw {
                    reason: DrawReason::SeventyFiveMoveRule,
                }
            }
            BoardStatus::Ongoing => Outcome::Ongoing,
        }
    }

    // K v K, or K plus a single knight or bishop v K.
    fn insufficient_material(&self) -> bool {
        match self.board.combined().popcnt() {
            2 => true,
            3 => {
                let minors =
                    *self.board.pieces(Piece::Knight) | *self.board.pieces(Piece::Bishop);
                minors.popcnt() == 1
            }
            _ => false,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::starting()
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Position").field(&self.to_fen()).finish()
    }
}

fn parse_coordinate(text: &str) -> Option<ChessMove> {
    if !(4..=5).contains(&text.len()) {
        return None;
    }
    let from = Square::from_str(&text[0..2]).ok()?;
    let to = Square::from_str(&text[2..4]).ok()?;
    let promotion = match text[4..].to_ascii_lowercase().as_str() {
        "" => None,
        "q" => Some(Piece::Queen),
        "r" => Some(Piece::Rook),
        "b" => Some(Piece::Bishop),
        "n" => Some(Piece::Knight),
        _ => return None,
    };
    Some(ChessMove::new(from, to, promotion))
}
