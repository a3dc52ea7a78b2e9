use alloc::vec::Vec;
use rand::Rng;

use crate::{
    board::Board,
    common::{AttackOutcome, BoardError, Coord},
    ship::ShipType,
};

/// Interface implemented by different player types.
pub trait Player {
    /// Display name.
    fn name(&self) -> &str;

    fn board(&self) -> &Board;

    fn board_mut(&mut self) -> &mut Board;

    /// Deploy the player's fleet onto its board. Expected to be called on
    /// an empty board.
    fn place_ships(&mut self) -> Deployment;

    /// Number of ships a complete fleet has.
    fn fleet_len(&self) -> usize;

    /// Choose the next cell to attack, or `None` when the player does not
    /// pick targets itself or has nothing left to try.
    fn make_attack(&mut self) -> Option<Coord>;

    /// Inform the player of the resolution of its last attack.
    fn record_attack_result(&mut self, _coord: Coord, _outcome: AttackOutcome, _ship_destroyed: bool) {}

    /// A player has lost once every ship on its board is destroyed.
    fn has_lost(&self) -> bool {
        self.board().all_ships_destroyed()
    }
}

/// What a fleet deployment achieved.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Deployment {
    pub placed: usize,
    /// Ships left off the board, with the last error seen for each.
    pub unplaced: Vec<(ShipType, BoardError)>,
}

impl Deployment {
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }
}

/// Place each ship of `fleet` at a random valid position, giving up on a
/// ship after `attempts` failed tries.
pub fn deploy_randomly<R: Rng + ?Sized>(
    board: &mut Board,
    fleet: &[ShipType],
    rng: &mut R,
    attempts: usize,
) -> Deployment {
    let mut deployment = Deployment::default();
    for &def in fleet {
        match board.place_randomly(def, rng, attempts) {
            Ok(_) => deployment.placed += 1,
            Err(e) => deployment.unplaced.push((def, e)),
        }
    }
    deployment
}
