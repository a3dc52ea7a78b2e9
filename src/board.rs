//! Game board state: cell grid, owned ships and attack history.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Write};
use rand::Rng;

use crate::bitboard::BitBoard;
use crate::common::{AttackOutcome, BoardError, ShipId};
use crate::config::BOARD_SIZE;
use crate::ship::{Orientation, Ship, ShipType};

type BB = BitBoard<u128, BOARD_SIZE>;

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    #[default]
    Empty,
    Ship,
    Hit,
    Miss,
}

impl Cell {
    fn symbol(&self, hide_ships: bool) -> char {
        match self {
            Cell::Empty => '~',
            Cell::Ship if hide_ships => '~',
            Cell::Ship => 'N',
            Cell::Hit => 'X',
            Cell::Miss => 'O',
        }
    }
}

/// A player's board. Ships are kept in placement order, which is also the
/// order attacks are checked against them.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    grid: [[Cell; BOARD_SIZE]; BOARD_SIZE],
    ships: Vec<Ship>,
    attacks: BB,
    hits: BB,
}

impl Board {
    /// Create an empty board (no ships placed, nothing attacked).
    pub fn new() -> Self {
        Board {
            grid: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
            ships: Vec::new(),
            attacks: BB::new(),
            hits: BB::new(),
        }
    }

    pub fn size(&self) -> usize {
        BOARD_SIZE
    }

    /// State of the cell at (row, col), `None` off the board.
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.grid.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Ships in placement order.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(id)
    }

    pub fn has_ships(&self) -> bool {
        !self.ships.is_empty()
    }

    /// Every cell attacked so far.
    pub fn attacks(&self) -> BB {
        self.attacks
    }

    /// Attacked cells that struck a ship.
    pub fn hits(&self) -> BB {
        self.hits
    }

    pub fn is_attacked(&self, row: usize, col: usize) -> bool {
        self.attacks.contains((row, col))
    }

    /// Place `ship` with its first cell at (`row`, `col`), extending along
    /// `orientation`. Nothing changes unless every cell is free and on the
    /// board.
    pub fn add_ship(
        &mut self,
        mut ship: Ship,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<ShipId, BoardError> {
        let mut positions = Vec::with_capacity(ship.length());
        for i in 0..ship.length() {
            let (r, c) = orientation.step((row, col), i);
            if r >= BOARD_SIZE || c >= BOARD_SIZE {
                return Err(BoardError::OutOfBounds { row: r, col: c });
            }
            if self.grid[r][c] != Cell::Empty {
                return Err(BoardError::Collision { row: r, col: c });
            }
            positions.push((r, c));
        }

        ship.place(positions)?;
        for &(r, c) in ship.positions() {
            self.grid[r][c] = Cell::Ship;
        }
        self.ships.push(ship);
        Ok(self.ships.len() - 1)
    }

    /// Try up to `attempts` random origins and orientations for a ship of
    /// `ship_type`. Returns the last placement error when every try failed.
    pub fn place_randomly<R: Rng + ?Sized>(
        &mut self,
        ship_type: ShipType,
        rng: &mut R,
        attempts: usize,
    ) -> Result<ShipId, BoardError> {
        let mut last_err = BoardError::OutOfBounds {
            row: BOARD_SIZE,
            col: BOARD_SIZE,
        };
        for _ in 0..attempts {
            let row = rng.random_range(0..BOARD_SIZE);
            let col = rng.random_range(0..BOARD_SIZE);
            let orientation = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            match self.add_ship(Ship::from_type(ship_type), row, col, orientation) {
                Ok(id) => return Ok(id),
                Err(e) => last_err = e,
            }
        }
        Err(last_err)
    }

    /// Resolve an attack at (row, col).
    ///
    /// A repeated attack yields `AlreadyAttacked` and changes nothing.
    pub fn receive_attack(&mut self, row: usize, col: usize) -> Result<AttackOutcome, BoardError> {
        if !self.attacks.insert((row, col))? {
            return Ok(AttackOutcome::AlreadyAttacked);
        }

        for (id, ship) in self.ships.iter_mut().enumerate() {
            if ship.receive_attack((row, col)) {
                self.hits.insert((row, col))?;
                self.grid[row][col] = Cell::Hit;
                return Ok(AttackOutcome::Hit(id));
            }
        }

        self.grid[row][col] = Cell::Miss;
        Ok(AttackOutcome::Water)
    }

    /// Returns `true` when every owned ship is destroyed.
    pub fn all_ships_destroyed(&self) -> bool {
        self.ships.iter().all(Ship::is_destroyed)
    }

    /// Number of ships still afloat.
    pub fn ships_remaining(&self) -> usize {
        self.ships.iter().filter(|s| !s.is_destroyed()).count()
    }

    /// Fraction of attacks on this board that hit, `0.0` before any attack.
    pub fn accuracy(&self) -> f64 {
        let total = self.attacks.len();
        if total == 0 {
            0.0
        } else {
            self.hits.len() as f64 / total as f64
        }
    }

    /// Drop every ship and all attack history.
    pub fn clear(&mut self) {
        *self = Board::new();
    }

    /// Text grid with row and column headers. With `hide_ships` unhit ship
    /// cells are shown as water.
    pub fn render(&self, hide_ships: bool) -> String {
        let mut out = String::new();
        // writing into a String cannot fail
        let _ = self.write_grid(&mut out, hide_ships);
        out
    }

    fn write_grid<W: Write>(&self, out: &mut W, hide_ships: bool) -> fmt::Result {
        write!(out, "  ")?;
        for c in 0..BOARD_SIZE {
            write!(out, " {}", c)?;
        }
        writeln!(out)?;
        write!(out, "  ")?;
        for _ in 0..BOARD_SIZE * 2 + 1 {
            out.write_char('-')?;
        }
        for (r, row) in self.grid.iter().enumerate() {
            writeln!(out)?;
            write!(out, "{} |", r)?;
            for cell in row {
                write!(out, " {}", cell.symbol(hide_ships))?;
            }
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_grid(f, false)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  attacks: {:?},\n  hits: {:?},\n  ships: {:?}\n}}",
            self.attacks, self.hits, self.ships
        )
    }
}
