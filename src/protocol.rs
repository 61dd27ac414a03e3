//! Request/response contract of the room authority.
//!
//! The server owns the true game state; everything here only names what
//! the client sends and which response fields it consumes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Board, BoardError};

/// Player role assigned once by the join response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Black,
    White,
    Spectator,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::White => "white",
            Self::Spectator => "spectator",
        }
    }

    /// Spectators watch; only the two seated players may submit moves.
    pub fn can_move(self) -> bool {
        !matches!(self, Self::Spectator)
    }
}

/// Whose turn it is. Unlike [`Role`] this never names a spectator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Black,
    White,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::White => "white",
        }
    }
}

/// Game verdict once a poll reports `finished`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    BlackWins,
    WhiteWins,
    Draw,
}

#[derive(Debug, Deserialize)]
pub struct CreateRoomResponse {
    pub room_id: String,
}

#[derive(Debug, Serialize)]
pub struct JoinRequest<'a> {
    pub room_id: &'a str,
    pub player_id: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct JoinResponse {
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct MoveRequest<'a> {
    pub room_id: &'a str,
    pub player_id: &'a str,
    pub x: usize,
    pub y: usize,
}

/// Raw poll payload, before validation.
#[derive(Debug, Deserialize)]
pub struct StateResponse {
    pub board: Vec<Vec<u8>>,
    pub turn: String,
    pub finished: bool,
    #[serde(default)]
    pub winner: Option<String>,
}

/// Why a poll payload was rejected as a whole.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("bad board: {0}")]
    Board(#[from] BoardError),
    #[error("unknown turn label {0:?}")]
    Turn(String),
}

/// A validated poll frame. Constructed whole or not at all, so a
/// malformed response can never partially apply.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub board: Board,
    pub turn: Side,
    pub finished: bool,
    /// Present exactly when `finished` is.
    pub outcome: Option<Outcome>,
}

impl Snapshot {
    pub fn from_response(raw: &StateResponse) -> Result<Self, ProtocolError> {
        let board = Board::from_rows(&raw.board)?;

        let turn = match raw.turn.as_str() {
            "black" => Side::Black,
            "white" => Side::White,
            other => return Err(ProtocolError::Turn(other.to_string())),
        };

        // A finished game whose winner is neither seated color is a draw.
        let outcome = raw.finished.then(|| match raw.winner.as_deref() {
            Some("black") => Outcome::BlackWins,
            Some("white") => Outcome::WhiteWins,
            _ => Outcome::Draw,
        });

        Ok(Self {
            board,
            turn,
            finished: raw.finished,
            outcome,
        })
    }
}

/// Shareable room link, `<origin>/?room=<room_id>`.
pub fn share_url(origin: &str, room_id: &str) -> String {
    format!("{origin}/?room={room_id}")
}
