// Hunt-then-search targeting for the computer player.
// Uses no_std and avoids heap allocations.

use crate::{
    bitboard::BitBoard,
    common::{AttackOutcome, Coord},
    config::BOARD_SIZE,
};
use rand::Rng;

/// Bitboard type alias for convenience.
type BB = BitBoard<u128, BOARD_SIZE>;

/// Which policy picks the next target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetMode {
    /// Uniformly random untried cell.
    Hunt,
    /// Untried neighbour of the last unresolved hit.
    Search,
}

/// Targeting state of an autonomous attacker. Tracks its own shots only,
/// never the opponent's board.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Targeting {
    attacked: BB,
    search_mode: bool,
    last_hit: Option<Coord>,
}

impl Targeting {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> TargetMode {
        if self.search_mode && self.last_hit.is_some() {
            TargetMode::Search
        } else {
            TargetMode::Hunt
        }
    }

    /// Anchor of the current search, if any.
    pub fn last_hit(&self) -> Option<Coord> {
        self.last_hit
    }

    /// Cells this attacker has already fired at.
    pub fn attacked(&self) -> BB {
        self.attacked
    }

    /// Pick the next cell to attack. Returns `None` once every cell has
    /// been tried.
    ///
    /// In search mode a random untried neighbour of the anchor is chosen.
    /// When the anchor has none left, search mode is dropped and a hunt
    /// shot is taken instead.
    pub fn next_target<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Coord> {
        if let (true, Some(anchor)) = (self.search_mode, self.last_hit) {
            let (cells, n) = self.open_neighbours(anchor);
            if n > 0 {
                return Some(cells[rng.random_range(0..n)]);
            }
            self.search_mode = false;
            self.last_hit = None;
        }
        self.hunt(rng)
    }

    /// Feed back the resolution of a shot.
    pub fn record(&mut self, coord: Coord, outcome: AttackOutcome, ship_destroyed: bool) {
        // off-board shots are rejected before they get here
        let _ = self.attacked.insert(coord);
        if outcome.is_hit() {
            if ship_destroyed {
                self.search_mode = false;
                self.last_hit = None;
            } else {
                self.search_mode = true;
                self.last_hit = Some(coord);
            }
        }
    }

    fn hunt<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Coord> {
        let open = !self.attacked;
        let n = open.len();
        if n == 0 {
            return None;
        }
        open.cells().nth(rng.random_range(0..n))
    }

    /// Up, down, left, right of `anchor`, on the board and untried.
    fn open_neighbours(&self, (row, col): Coord) -> ([Coord; 4], usize) {
        let candidates = [
            row.checked_sub(1).map(|r| (r, col)),
            Some((row + 1, col)),
            col.checked_sub(1).map(|c| (row, c)),
            Some((row, col + 1)),
        ];
        let mut out = [(0, 0); 4];
        let mut n = 0;
        for (r, c) in candidates.into_iter().flatten() {
            if r < BOARD_SIZE && c < BOARD_SIZE && !self.attacked.contains((r, c)) {
                out[n] = (r, c);
                n += 1;
            }
        }
        (out, n)
    }
}
