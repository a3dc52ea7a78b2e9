use alloc::string::{String, ToString};

use crate::ship::{Orientation, ShipType};

pub const BOARD_SIZE: usize = 10;
pub const FLEET_SIZE: usize = 5;

/// Random placements tried per ship before giving up on it.
pub const PLACEMENT_ATTEMPTS: usize = 100;

pub const CLASSIC_FLEET: [ShipType; FLEET_SIZE] = [
    ShipType::new("Carrier", 5),
    ShipType::new("Battleship", 4),
    ShipType::new("Cruiser", 3),
    ShipType::new("Submarine", 3),
    ShipType::new("Destroyer", 2),
];

pub const HAWKINS_FLEET: [ShipType; FLEET_SIZE] = [
    ShipType::new("Demogorgon", 4),
    ShipType::new("Hawkins Lab", 3),
    ShipType::new("Scoops Ahoy", 3),
    ShipType::new("Argyle's Van", 3),
    ShipType::new("Christmas Lights", 2),
];

/// Fixed deployment slots: one ship per even row, flush left, horizontal.
pub const FIXED_SLOTS: [(usize, usize, Orientation); FLEET_SIZE] = [
    (0, 0, Orientation::Horizontal),
    (2, 0, Orientation::Horizontal),
    (4, 0, Orientation::Horizontal),
    (6, 0, Orientation::Horizontal),
    (8, 0, Orientation::Horizontal),
];

/// Which fleet both sides deploy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum Fleet {
    #[default]
    Classic,
    Hawkins,
}

impl Fleet {
    pub fn ships(&self) -> &'static [ShipType; FLEET_SIZE] {
        match self {
            Fleet::Classic => &CLASSIC_FLEET,
            Fleet::Hawkins => &HAWKINS_FLEET,
        }
    }
}

/// How the human side's fleet is laid out when nobody placed it by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum PlacementStrategy {
    /// Use `FIXED_SLOTS`.
    Fixed,
    /// Random valid positions with bounded retries.
    #[default]
    Random,
}

/// Settings for a single-player session.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(default))]
pub struct GameConfig {
    pub player_name: String,
    pub computer_name: String,
    pub fleet: Fleet,
    pub human_placement: PlacementStrategy,
    pub placement_attempts: usize,
    /// Refuse to start a match when a fleet could not be fully deployed.
    pub require_full_fleet: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_name: "You".to_string(),
            computer_name: "Computer".to_string(),
            fleet: Fleet::Classic,
            human_placement: PlacementStrategy::Random,
            placement_attempts: PLACEMENT_ATTEMPTS,
            require_full_fleet: true,
        }
    }
}

/// Total number of ship cells in a fleet.
pub fn fleet_cells(fleet: &[ShipType]) -> usize {
    fleet.iter().map(|s| s.length()).sum()
}
