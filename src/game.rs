//! Two-player match: turn order, attack resolution and win detection.

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::{
    common::{AttackOutcome, Coord, MatchError},
    events::{EventSink, GameEvent, LogSink},
    player::{Deployment, Player},
};

/// One of the two seats in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }
}

/// Lifecycle of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    NotStarted,
    InProgress,
    Finished { winner: Side },
}

/// One entry of the match history.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnRecord {
    pub turn: u32,
    pub player: String,
    pub coord: Coord,
    pub outcome: AttackOutcome,
}

/// Resolution of a single attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnReport {
    pub coord: Coord,
    pub outcome: AttackOutcome,
    pub ship_destroyed: bool,
    pub game_over: bool,
}

/// Snapshot of a match for display.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchStatus {
    pub turn: u32,
    pub current_player: String,
    pub ships_p1: usize,
    pub ships_p2: usize,
    pub winner: Option<String>,
}

/// A match between two players. Player one always moves first.
///
/// The match never alternates on its own: after a turn that did not end
/// the game the caller invokes [`Match::switch_player`].
pub struct Match<A, B> {
    player1: A,
    player2: B,
    current: Side,
    turn: u32,
    state: MatchState,
    history: Vec<TurnRecord>,
    require_full_fleet: bool,
    events: Box<dyn EventSink>,
}

impl<A: Player, B: Player> Match<A, B> {
    pub fn new(player1: A, player2: B) -> Self {
        Self {
            player1,
            player2,
            current: Side::One,
            turn: 0,
            state: MatchState::NotStarted,
            history: Vec::new(),
            require_full_fleet: true,
            events: Box::new(LogSink),
        }
    }

    /// Route diagnostics to `sink` instead of the `log` facade.
    pub fn with_events<S: EventSink + 'static>(mut self, sink: S) -> Self {
        self.events = Box::new(sink);
        self
    }

    /// Whether `start` fails when a fleet could not be fully deployed.
    pub fn require_full_fleet(mut self, required: bool) -> Self {
        self.require_full_fleet = required;
        self
    }

    pub fn player1(&self) -> &A {
        &self.player1
    }

    pub fn player2(&self) -> &B {
        &self.player2
    }

    pub fn player1_mut(&mut self) -> &mut A {
        &mut self.player1
    }

    pub fn player2_mut(&mut self) -> &mut B {
        &mut self.player2
    }

    pub fn player(&self, side: Side) -> &dyn Player {
        match side {
            Side::One => &self.player1,
            Side::Two => &self.player2,
        }
    }

    pub fn current_side(&self) -> Side {
        self.current
    }

    pub fn is_current(&self, side: Side) -> bool {
        self.current == side
    }

    pub fn current_player(&self) -> &dyn Player {
        self.player(self.current)
    }

    /// The player who is not moving.
    pub fn get_opponent(&self) -> &dyn Player {
        self.player(self.current.other())
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    pub fn winner(&self) -> Option<Side> {
        match self.state {
            MatchState::Finished { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn history(&self) -> &[TurnRecord] {
        &self.history
    }

    pub(crate) fn events(&self) -> &dyn EventSink {
        self.events.as_ref()
    }

    /// Deploy fleets for any player whose board is still empty and hand the
    /// first move to player one.
    pub fn start(&mut self) -> Result<(), MatchError> {
        match self.state {
            MatchState::NotStarted => {}
            MatchState::InProgress => return Err(MatchError::AlreadyStarted),
            MatchState::Finished { .. } => return Err(MatchError::Finished),
        }

        if !self.player1.board().has_ships() {
            let deployment = self.player1.place_ships();
            self.check_deployment(Side::One, &deployment)?;
        }
        if !self.player2.board().has_ships() {
            let deployment = self.player2.place_ships();
            self.check_deployment(Side::Two, &deployment)?;
        }
        self.check_fleet_size(Side::One)?;
        self.check_fleet_size(Side::Two)?;

        self.current = Side::One;
        self.state = MatchState::InProgress;
        self.events.emit(&GameEvent::MatchStarted {
            first: self.player1.name().to_string(),
        });
        Ok(())
    }

    fn check_deployment(
        &self,
        side: Side,
        deployment: &Deployment,
    ) -> Result<(), MatchError> {
        let name = self.player(side).name();
        for (ship, error) in &deployment.unplaced {
            self.events.emit(&GameEvent::PlacementFailed {
                player: name.to_string(),
                ship: ship.name(),
                error: *error,
            });
        }
        if self.require_full_fleet && !deployment.is_complete() {
            return Err(MatchError::IncompleteFleet {
                player: name.to_string(),
                unplaced: deployment.unplaced.len(),
            });
        }
        Ok(())
    }

    /// Covers boards the caller prepared before `start`.
    fn check_fleet_size(&self, side: Side) -> Result<(), MatchError> {
        let player = self.player(side);
        let missing = player.fleet_len().saturating_sub(player.board().ships().len());
        if self.require_full_fleet && missing > 0 {
            return Err(MatchError::IncompleteFleet {
                player: player.name().to_string(),
                unplaced: missing,
            });
        }
        Ok(())
    }

    /// The current player attacks (row, col) on the opponent's board.
    ///
    /// Ends the match when the opponent's last ship goes down. The current
    /// player is left unchanged either way.
    pub fn process_turn(&mut self, row: usize, col: usize) -> Result<TurnReport, MatchError> {
        match self.state {
            MatchState::NotStarted => return Err(MatchError::NotStarted),
            MatchState::Finished { .. } => return Err(MatchError::Finished),
            MatchState::InProgress => {}
        }

        let (attacker, defender) = self.split_mut();
        let outcome = defender.board_mut().receive_attack(row, col)?;
        let ship_destroyed = outcome
            .ship()
            .and_then(|id| defender.board().ship(id))
            .is_some_and(|ship| ship.is_destroyed());
        let game_over = defender.has_lost();
        let player = attacker.name().to_string();

        self.events.emit(&GameEvent::AttackResolved {
            turn: self.turn,
            player: player.clone(),
            coord: (row, col),
            outcome,
            ship_destroyed,
        });
        self.history.push(TurnRecord {
            turn: self.turn,
            player,
            coord: (row, col),
            outcome,
        });

        if game_over {
            self.state = MatchState::Finished {
                winner: self.current,
            };
            self.events.emit(&GameEvent::MatchFinished {
                winner: self.current_player().name().to_string(),
                turn: self.turn,
            });
        }

        Ok(TurnReport {
            coord: (row, col),
            outcome,
            ship_destroyed,
            game_over,
        })
    }

    /// Hand the move to the other player and advance the turn counter.
    pub fn switch_player(&mut self) -> Result<(), MatchError> {
        match self.state {
            MatchState::NotStarted => return Err(MatchError::NotStarted),
            MatchState::Finished { .. } => return Err(MatchError::Finished),
            MatchState::InProgress => {}
        }
        self.current = self.current.other();
        self.turn += 1;
        self.events.emit(&GameEvent::TurnSwitched {
            turn: self.turn,
            player: self.current_player().name().to_string(),
        });
        Ok(())
    }

    pub fn status(&self) -> MatchStatus {
        MatchStatus {
            turn: self.turn,
            current_player: self.current_player().name().to_string(),
            ships_p1: self.player1.board().ships_remaining(),
            ships_p2: self.player2.board().ships_remaining(),
            winner: self.winner().map(|side| self.player(side).name().to_string()),
        }
    }

    /// (current player, opponent)
    fn split_mut(&mut self) -> (&mut dyn Player, &mut dyn Player) {
        match self.current {
            Side::One => (&mut self.player1, &mut self.player2),
            Side::Two => (&mut self.player2, &mut self.player1),
        }
    }
}
