//! Common types for the match core: coordinates, attack outcomes and errors.

use alloc::string::String;
use core::fmt;

use crate::bitboard::BitBoardError;

/// A `(row, col)` cell on the board.
pub type Coord = (usize, usize);

/// Index of a ship in its board's placement order.
pub type ShipId = usize;

/// Result of resolving an attack against a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    /// The attack struck the ship with this id.
    Hit(ShipId),
    /// The attack missed every ship.
    Water,
    /// The cell had been attacked before; nothing changed.
    AlreadyAttacked,
}

impl AttackOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, AttackOutcome::Hit(_))
    }

    /// The ship struck by this attack, if any.
    pub fn ship(&self) -> Option<ShipId> {
        match self {
            AttackOutcome::Hit(id) => Some(*id),
            _ => None,
        }
    }
}

/// Errors raised by a ship record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipError {
    /// The number of coordinates does not match the ship length.
    InvalidPlacement {
        ship: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for ShipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShipError::InvalidPlacement {
                ship,
                expected,
                actual,
            } => write!(
                f,
                "Ship {} needs {} positions, got {}",
                ship, expected, actual
            ),
        }
    }
}

/// Errors returned by Board operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// A cell lies outside the board.
    OutOfBounds { row: usize, col: usize },
    /// A cell is already occupied by another ship.
    Collision { row: usize, col: usize },
    /// The ship rejected its coordinates.
    InvalidShip(ShipError),
}

impl From<BitBoardError> for BoardError {
    fn from(err: BitBoardError) -> Self {
        match err {
            BitBoardError::IndexOutOfBounds { row, col } => BoardError::OutOfBounds { row, col },
            BitBoardError::SizeTooLarge { n, .. } => BoardError::OutOfBounds { row: n, col: n },
        }
    }
}

impl From<ShipError> for BoardError {
    fn from(err: ShipError) -> Self {
        BoardError::InvalidShip(err)
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::OutOfBounds { row, col } => {
                write!(f, "Position ({}, {}) is outside the board", row, col)
            }
            BoardError::Collision { row, col } => {
                write!(f, "Position ({}, {}) is already occupied by another ship", row, col)
            }
            BoardError::InvalidShip(e) => write!(f, "{}", e),
        }
    }
}

/// Errors returned by Match and controller operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// `start` has not been called yet.
    NotStarted,
    /// `start` was called on a running match.
    AlreadyStarted,
    /// The match has a winner; no more turns are accepted.
    Finished,
    /// The acting side is not the current player.
    OutOfTurn,
    /// A fleet could not be fully deployed.
    IncompleteFleet { player: String, unplaced: usize },
    /// The attack could not be resolved on the board.
    Board(BoardError),
}

impl From<BoardError> for MatchError {
    fn from(err: BoardError) -> Self {
        MatchError::Board(err)
    }
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::NotStarted => write!(f, "The match has not started"),
            MatchError::AlreadyStarted => write!(f, "The match is already in progress"),
            MatchError::Finished => write!(f, "The match is already over"),
            MatchError::OutOfTurn => write!(f, "It is not this player's turn"),
            MatchError::IncompleteFleet { player, unplaced } => {
                write!(f, "{} could not place {} ship(s)", player, unplaced)
            }
            MatchError::Board(e) => write!(f, "Board error: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ShipError {}
#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
#[cfg(feature = "std")]
impl std::error::Error for MatchError {}
