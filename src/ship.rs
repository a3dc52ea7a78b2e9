//! Ship definitions and the per-ship hit record.

use alloc::vec::Vec;
use core::fmt;

use crate::bitboard::BitBoard;
use crate::common::{Coord, ShipError};
use crate::config::BOARD_SIZE;

type BB = BitBoard<u128, BOARD_SIZE>;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Cell `i` steps from `(row, col)` along this axis.
    pub fn step(&self, (row, col): Coord, i: usize) -> Coord {
        match self {
            Orientation::Horizontal => (row, col + i),
            Orientation::Vertical => (row + i, col),
        }
    }
}

/// Type of ship: name and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipType {
    name: &'static str,
    length: usize,
}

impl ShipType {
    /// Create a new ship type.
    pub const fn new(name: &'static str, length: usize) -> Self {
        Self { name, length }
    }

    /// Ship's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Ship's length.
    pub fn length(&self) -> usize {
        self.length
    }
}

/// A ship and the cells it occupies once placed.
#[derive(Clone, PartialEq, Eq)]
pub struct Ship {
    ship_type: ShipType,
    positions: Vec<Coord>,
    hits: BB,
}

impl Ship {
    /// An unplaced ship.
    pub fn new(name: &'static str, length: usize) -> Self {
        Self::from_type(ShipType::new(name, length))
    }

    pub fn from_type(ship_type: ShipType) -> Self {
        Ship {
            ship_type,
            positions: Vec::new(),
            hits: BB::new(),
        }
    }

    /// Stores the occupied cells, replacing any earlier placement.
    pub fn place(&mut self, positions: Vec<Coord>) -> Result<(), ShipError> {
        if positions.len() != self.ship_type.length() {
            return Err(ShipError::InvalidPlacement {
                ship: self.ship_type.name(),
                expected: self.ship_type.length(),
                actual: positions.len(),
            });
        }
        self.positions = positions;
        Ok(())
    }

    /// Records an attack. Returns `true` if `position` is one of the
    /// ship's cells.
    pub fn receive_attack(&mut self, position: Coord) -> bool {
        if self.positions.contains(&position) {
            // placed cells are always on the board
            let _ = self.hits.insert(position);
            true
        } else {
            false
        }
    }

    /// Check if every segment has been hit.
    pub fn is_destroyed(&self) -> bool {
        self.hits.len() == self.ship_type.length()
    }

    pub fn is_placed(&self) -> bool {
        !self.positions.is_empty()
    }

    pub fn name(&self) -> &'static str {
        self.ship_type.name()
    }

    pub fn length(&self) -> usize {
        self.ship_type.length()
    }

    pub fn ship_type(&self) -> ShipType {
        self.ship_type
    }

    /// Occupied cells in placement order.
    pub fn positions(&self) -> &[Coord] {
        &self.positions
    }

    pub fn hit_count(&self) -> usize {
        self.hits.len()
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship({}, size={}, hits={}/{})",
            self.name(),
            self.length(),
            self.hits.len(),
            self.length()
        )
    }
}
