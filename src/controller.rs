//! Session façade for a human-versus-computer match.
//!
//! Turns raw board clicks into user-facing outcomes and exposes the
//! aggregate status the presentation layer renders. Turn switching stays
//! with the caller so it can pace the computer's reply.

use alloc::format;
use alloc::string::{String, ToString};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{
    common::{AttackOutcome, Coord, MatchError},
    config::{GameConfig, BOARD_SIZE},
    events::{EventSink, GameEvent, LogSink},
    game::{Match, Side, TurnReport},
    player::Player,
    player_ai::ComputerPlayer,
    player_human::HumanPlayer,
};

/// What an attack request amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ReportKind {
    Hit,
    Water,
    AlreadyAttacked,
    /// The match had already ended; nothing was attacked.
    MatchOver,
    /// The computer had no cell left to try; nothing was attacked.
    NoTarget,
}

/// User-facing outcome of an attack request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackReport {
    pub kind: ReportKind,
    pub coord: Option<Coord>,
    pub ship_destroyed: bool,
    pub game_over: bool,
    pub message: String,
}

impl AttackReport {
    fn idle(kind: ReportKind, game_over: bool, message: &str) -> Self {
        Self {
            kind,
            coord: None,
            ship_destroyed: false,
            game_over,
            message: message.to_string(),
        }
    }

    fn resolved(report: &TurnReport, message: String) -> Self {
        let kind = match report.outcome {
            AttackOutcome::Hit(_) => ReportKind::Hit,
            AttackOutcome::Water => ReportKind::Water,
            AttackOutcome::AlreadyAttacked => ReportKind::AlreadyAttacked,
        };
        Self {
            kind,
            coord: Some(report.coord),
            ship_destroyed: report.ship_destroyed,
            game_over: report.game_over,
            message,
        }
    }
}

/// Aggregate session status for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameStatus {
    pub turn: u32,
    pub current_player: String,
    pub player_ships_remaining: usize,
    pub player_ships_total: usize,
    pub computer_ships_remaining: usize,
    pub computer_ships_total: usize,
    pub finished: bool,
    pub winner: Option<String>,
}

/// End-of-match figures handed to the ranking layer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchSummary {
    pub player_name: String,
    pub won: bool,
    pub turns: u32,
    /// The human's ships still afloat.
    pub ships_remaining: usize,
    /// Computer ships the human destroyed.
    pub ships_destroyed: usize,
    /// The human's hits over attacks, in `0.0..=1.0`.
    pub accuracy: f64,
}

pub struct MatchController<R = SmallRng> {
    game: Match<HumanPlayer<R>, ComputerPlayer<R>>,
    finished: bool,
    winner: Option<Side>,
}

impl MatchController<SmallRng> {
    /// Session with a default human player, reproducible from `seed`.
    pub fn with_seed(config: &GameConfig, seed: u64) -> Result<Self, MatchError> {
        Self::new(config, None, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng + SeedableRng> MatchController<R> {
    /// Build and start a session. Without `human`, a player is created from
    /// `config` with a generator derived from `rng`. The computer always
    /// deploys a fresh random fleet.
    pub fn new(
        config: &GameConfig,
        human: Option<HumanPlayer<R>>,
        rng: R,
    ) -> Result<Self, MatchError> {
        Self::with_events(config, human, rng, LogSink)
    }

    /// Like [`MatchController::new`], routing diagnostics to `sink`.
    pub fn with_events<S: EventSink + 'static>(
        config: &GameConfig,
        human: Option<HumanPlayer<R>>,
        mut rng: R,
        sink: S,
    ) -> Result<Self, MatchError> {
        let human =
            human.unwrap_or_else(|| HumanPlayer::from_config(config, R::from_rng(&mut rng)));
        let computer = ComputerPlayer::from_config(config, rng);

        let mut game = Match::new(human, computer)
            .require_full_fleet(config.require_full_fleet)
            .with_events(sink);
        game.start()?;

        Ok(Self {
            game,
            finished: false,
            winner: None,
        })
    }

    /// Resolve the human's attack at (row, col) on the computer's board.
    pub fn process_player_attack(&mut self, row: usize, col: usize) -> Result<AttackReport, MatchError> {
        if self.finished {
            return Ok(AttackReport::idle(
                ReportKind::MatchOver,
                true,
                "The match is already over!",
            ));
        }
        if !self.game.is_current(Side::One) {
            return Err(MatchError::OutOfTurn);
        }

        let report = self.game.process_turn(row, col)?;
        let mut message = match report.outcome {
            AttackOutcome::AlreadyAttacked => "You already attacked this position!".to_string(),
            AttackOutcome::Hit(_) if report.ship_destroyed => {
                "HIT and SUNK an enemy ship!".to_string()
            }
            AttackOutcome::Hit(_) => "HIT! Keep attacking!".to_string(),
            AttackOutcome::Water => "WATER! You missed...".to_string(),
        };

        if report.game_over {
            self.finished = true;
            self.winner = Some(Side::One);
            message = "YOU WIN! You destroyed every enemy ship!".to_string();
        }

        Ok(AttackReport::resolved(&report, message))
    }

    /// Let the computer pick and resolve its attack on the human's board.
    pub fn process_computer_attack(&mut self) -> Result<AttackReport, MatchError> {
        if self.finished {
            return Ok(AttackReport::idle(
                ReportKind::MatchOver,
                true,
                "The match is already over!",
            ));
        }
        if !self.game.is_current(Side::Two) {
            return Err(MatchError::OutOfTurn);
        }

        let Some((row, col)) = self.game.player2_mut().make_attack() else {
            let player = self.game.player2().name().to_string();
            self.game
                .events()
                .emit(&GameEvent::NoTargetAvailable { player });
            return Ok(AttackReport::idle(
                ReportKind::NoTarget,
                false,
                "The computer could not attack!",
            ));
        };

        let report = self.game.process_turn(row, col)?;
        self.game
            .player2_mut()
            .record_attack_result((row, col), report.outcome, report.ship_destroyed);

        let mut message = match report.outcome {
            AttackOutcome::Hit(_) if report.ship_destroyed => {
                format!("Enemy HIT ({},{}) and SUNK your ship!", row, col)
            }
            AttackOutcome::Hit(_) => format!("Enemy HIT ({},{})!", row, col),
            _ => format!("Enemy missed at ({},{}). Your turn!", row, col),
        };

        if report.game_over {
            self.finished = true;
            self.winner = Some(Side::Two);
            message = "YOU LOSE! The enemy destroyed all your ships!".to_string();
        }

        Ok(AttackReport::resolved(&report, message))
    }

    /// Pass the move to the other side.
    pub fn switch_turn(&mut self) -> Result<(), MatchError> {
        self.game.switch_player()
    }

    pub fn is_player_turn(&self) -> bool {
        self.game.is_current(Side::One)
    }

    /// Whether (row, col) is on the board and not yet attacked by the human.
    pub fn is_valid_attack_position(&self, row: usize, col: usize) -> bool {
        row < BOARD_SIZE && col < BOARD_SIZE && !self.computer().board().is_attacked(row, col)
    }

    pub fn get_game_status(&self) -> GameStatus {
        let player = self.player().board();
        let computer = self.computer().board();
        GameStatus {
            turn: self.game.turn(),
            current_player: self.game.current_player().name().to_string(),
            player_ships_remaining: player.ships_remaining(),
            player_ships_total: player.ships().len(),
            computer_ships_remaining: computer.ships_remaining(),
            computer_ships_total: computer.ships().len(),
            finished: self.finished,
            winner: self.winner.map(|side| self.game.player(side).name().to_string()),
        }
    }

    /// Figures for the ranking layer, available once the match is over.
    pub fn end_of_match_summary(&self) -> Option<MatchSummary> {
        let winner = self.winner?;
        let player = self.player().board();
        let computer = self.computer().board();
        Some(MatchSummary {
            player_name: self.player().name().to_string(),
            won: winner == Side::One,
            turns: self.game.turn(),
            ships_remaining: player.ships_remaining(),
            ships_destroyed: computer.ships().len() - computer.ships_remaining(),
            accuracy: computer.accuracy(),
        })
    }

    pub fn player(&self) -> &HumanPlayer<R> {
        self.game.player1()
    }

    pub fn computer(&self) -> &ComputerPlayer<R> {
        self.game.player2()
    }

    /// The underlying match, for history and low-level queries.
    pub fn game(&self) -> &Match<HumanPlayer<R>, ComputerPlayer<R>> {
        &self.game
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }
}
