use alloc::string::{String, ToString};
use rand::rngs::SmallRng;
use rand::Rng;

use crate::{
    ai::Targeting,
    board::Board,
    common::{AttackOutcome, Coord},
    config::{GameConfig, PLACEMENT_ATTEMPTS},
    player::{deploy_randomly, Deployment, Player},
    ship::ShipType,
};

/// Computer opponent: random fleet, hunt-then-search targeting.
#[derive(Debug, Clone)]
pub struct ComputerPlayer<R = SmallRng> {
    name: String,
    board: Board,
    fleet: &'static [ShipType],
    attempts: usize,
    targeting: Targeting,
    rng: R,
}

impl<R: Rng> ComputerPlayer<R> {
    pub fn new(name: &str, fleet: &'static [ShipType], rng: R) -> Self {
        Self {
            name: name.to_string(),
            board: Board::new(),
            fleet,
            attempts: PLACEMENT_ATTEMPTS,
            targeting: Targeting::new(),
            rng,
        }
    }

    pub fn from_config(config: &GameConfig, rng: R) -> Self {
        let mut player = Self::new(&config.computer_name, config.fleet.ships(), rng);
        player.attempts = config.placement_attempts;
        player
    }

    pub fn targeting(&self) -> &Targeting {
        &self.targeting
    }
}

impl<R: Rng> Player for ComputerPlayer<R> {
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
        deploy_randomly(&mut self.board, self.fleet, &mut self.rng, self.attempts)
    }

    fn fleet_len(&self) -> usize {
        self.fleet.len()
    }

    fn make_attack(&mut self) -> Option<Coord> {
        self.targeting.next_target(&mut self.rng)
    }

    fn record_attack_result(&mut self, coord: Coord, outcome: AttackOutcome, ship_destroyed: bool) {
        self.targeting.record(coord, outcome, ship_destroyed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::TargetMode;
    use crate::config::HAWKINS_FLEET;
    use rand::SeedableRng;

    fn computer(seed: u64) -> ComputerPlayer {
        ComputerPlayer::new("Computer", &HAWKINS_FLEET, SmallRng::seed_from_u64(seed))
    }

    #[test]
    fn places_whole_fleet() {
        let mut cpu = computer(11);
        let d = cpu.place_ships();
        assert!(d.is_complete());
        let names: alloc::vec::Vec<_> = cpu.board().ships().iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            ["Demogorgon", "Hawkins Lab", "Scoops Ahoy", "Argyle's Van", "Christmas Lights"]
        );
    }

    #[test]
    fn search_mode_targets_neighbours() {
        let mut cpu = computer(12);
        cpu.record_attack_result((4, 4), AttackOutcome::Hit(0), false);
        assert_eq!(cpu.targeting().mode(), TargetMode::Search);
        let target = cpu.make_attack().unwrap();
        assert!([(3, 4), (5, 4), (4, 3), (4, 5)].contains(&target));
    }

    #[test]
    fn same_seed_same_choices() {
        let mut a = computer(42);
        let mut b = computer(42);
        a.place_ships();
        b.place_ships();
        assert_eq!(a.board(), b.board());
        for _ in 0..10 {
            let (ta, tb) = (a.make_attack(), b.make_attack());
            assert_eq!(ta, tb);
            let t = ta.unwrap();
            a.record_attack_result(t, AttackOutcome::Water, false);
            b.record_attack_result(t, AttackOutcome::Water, false);
        }
    }
}
