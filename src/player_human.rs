use alloc::string::{String, ToString};
use rand::rngs::SmallRng;
use rand::Rng;

use crate::{
    board::Board,
    common::{BoardError, Coord, ShipId},
    config::{GameConfig, PlacementStrategy, FIXED_SLOTS, PLACEMENT_ATTEMPTS},
    player::{deploy_randomly, Deployment, Player},
    ship::{Orientation, Ship, ShipType},
};

/// The human side. Its attacks come from the user interface, so it never
/// picks targets on its own.
#[derive(Debug, Clone)]
pub struct HumanPlayer<R = SmallRng> {
    name: String,
    board: Board,
    fleet: &'static [ShipType],
    placement: PlacementStrategy,
    attempts: usize,
    rng: R,
}

impl<R: Rng> HumanPlayer<R> {
    pub fn new(
        name: &str,
        fleet: &'static [ShipType],
        placement: PlacementStrategy,
        rng: R,
    ) -> Self {
        Self {
            name: name.to_string(),
            board: Board::new(),
            fleet,
            placement,
            attempts: PLACEMENT_ATTEMPTS,
            rng,
        }
    }

    pub fn from_config(config: &GameConfig, rng: R) -> Self {
        let mut player = Self::new(
            &config.player_name,
            config.fleet.ships(),
            config.human_placement,
            rng,
        );
        player.attempts = config.placement_attempts;
        player
    }

    /// Ships this player is expected to deploy.
    pub fn fleet(&self) -> &'static [ShipType] {
        self.fleet
    }

    /// Manually place one ship, as during a prepare step.
    pub fn place_ship(
        &mut self,
        ship_type: ShipType,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<ShipId, BoardError> {
        self.board
            .add_ship(Ship::from_type(ship_type), row, col, orientation)
    }

    /// Wipe the board and deploy the whole fleet at random.
    pub fn randomize(&mut self) -> Deployment {
        self.board.clear();
        deploy_randomly(&mut self.board, self.fleet, &mut self.rng, self.attempts)
    }

    fn deploy_fixed(&mut self) -> Deployment {
        let fleet = self.fleet;
        let mut deployment = Deployment::default();
        for (&def, &(row, col, orientation)) in fleet.iter().zip(FIXED_SLOTS.iter()) {
            match self.place_ship(def, row, col, orientation) {
                Ok(_) => deployment.placed += 1,
                Err(e) => deployment.unplaced.push((def, e)),
            }
        }
        deployment
    }
}

impl<R: Rng> Player for HumanPlayer<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn board(&self) -> &Board {
        &self.board
    }

    fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    fn place_ships(&mut self) -> Deployment {
        match self.placement {
            PlacementStrategy::Fixed => self.deploy_fixed(),
            PlacementStrategy::Random => {
                deploy_randomly(&mut self.board, self.fleet, &mut self.rng, self.attempts)
            }
        }
    }

    fn fleet_len(&self) -> usize {
        self.fleet.len()
    }

    fn make_attack(&mut self) -> Option<Coord> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;
    use crate::config::CLASSIC_FLEET;
    use rand::SeedableRng;

    fn human(placement: PlacementStrategy, seed: u64) -> HumanPlayer {
        HumanPlayer::new("You", &CLASSIC_FLEET, placement, SmallRng::seed_from_u64(seed))
    }

    #[test]
    fn fixed_placement_uses_even_rows() {
        let mut p = human(PlacementStrategy::Fixed, 0);
        let d = p.place_ships();
        assert!(d.is_complete());
        assert_eq!(d.placed, 5);
        for (ship, row) in p.board().ships().iter().zip([0, 2, 4, 6, 8]) {
            assert_eq!(ship.positions()[0], (row, 0));
            assert_eq!(ship.positions().last().unwrap().0, row);
        }
        assert_eq!(p.board().cell(1, 0), Some(Cell::Empty));
    }

    #[test]
    fn human_never_attacks_on_its_own() {
        let mut p = human(PlacementStrategy::Random, 1);
        p.place_ships();
        assert_eq!(p.make_attack(), None);
    }

    #[test]
    fn randomize_replaces_the_fleet() {
        let mut p = human(PlacementStrategy::Fixed, 2);
        p.place_ships();
        p.board_mut().receive_attack(0, 0).unwrap();
        let d = p.randomize();
        assert!(d.is_complete());
        assert_eq!(p.board().ships().len(), 5);
        assert!(p.board().attacks().is_empty());
    }

    #[test]
    fn manual_placement_reports_collisions() {
        let mut p = human(PlacementStrategy::Random, 3);
        p.place_ship(CLASSIC_FLEET[0], 3, 3, Orientation::Vertical)
            .unwrap();
        assert_eq!(
            p.place_ship(CLASSIC_FLEET[4], 4, 2, Orientation::Horizontal),
            Err(BoardError::Collision { row: 4, col: 3 })
        );
    }
}
