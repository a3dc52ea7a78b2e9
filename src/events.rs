//! Structured diagnostics emitted by the match core.
//!
//! The core never prints. Every noteworthy step becomes a [`GameEvent`]
//! handed to the [`EventSink`] the match was built with.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use crate::common::{AttackOutcome, BoardError, Coord};

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A ship could not be deployed and was left off the board.
    PlacementFailed {
        player: String,
        ship: &'static str,
        error: BoardError,
    },
    MatchStarted {
        first: String,
    },
    AttackResolved {
        turn: u32,
        player: String,
        coord: Coord,
        outcome: AttackOutcome,
        ship_destroyed: bool,
    },
    TurnSwitched {
        turn: u32,
        player: String,
    },
    MatchFinished {
        winner: String,
        turn: u32,
    },
    /// The computer had no untried cell left to attack.
    NoTargetAvailable {
        player: String,
    },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::PlacementFailed { player, ship, error } => {
                write!(f, "[{}] could not place {}: {}", player, ship, error)
            }
            GameEvent::MatchStarted { first } => write!(f, "match started, {} moves first", first),
            GameEvent::AttackResolved {
                turn,
                player,
                coord,
                outcome,
                ship_destroyed,
            } => write!(
                f,
                "turn {}: {} attacked ({},{}) -> {:?}, ship_destroyed={}",
                turn, player, coord.0, coord.1, outcome, ship_destroyed
            ),
            GameEvent::TurnSwitched { turn, player } => {
                write!(f, "turn {}: {} to move", turn, player)
            }
            GameEvent::MatchFinished { winner, turn } => {
                write!(f, "{} won on turn {}", winner, turn)
            }
            GameEvent::NoTargetAvailable { player } => {
                write!(f, "{} has no cell left to attack", player)
            }
        }
    }
}

/// Receiver for core diagnostics.
pub trait EventSink {
    fn emit(&self, event: &GameEvent);
}

/// Forwards events to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&self, event: &GameEvent) {
        match event {
            GameEvent::PlacementFailed { .. } | GameEvent::NoTargetAvailable { .. } => {
                log::warn!("{}", event)
            }
            GameEvent::MatchStarted { .. } | GameEvent::MatchFinished { .. } => {
                log::info!("{}", event)
            }
            GameEvent::AttackResolved { .. } | GameEvent::TurnSwitched { .. } => {
                log::debug!("{}", event)
            }
        }
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: &GameEvent) {}
}

/// Keeps every event in a buffer shared between clones.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    events: Rc<RefCell<Vec<GameEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events seen so far.
    pub fn events(&self) -> Vec<GameEvent> {
        self.events.borrow().clone()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: &GameEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
