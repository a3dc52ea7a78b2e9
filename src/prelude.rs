//! Commonly used types and utilities for ease of import.

pub use crate::{
    AttackOutcome, ComputerPlayer, GameConfig, GameStatus, HumanPlayer, Match, MatchController,
    MatchError, Player, Side,
};
pub use crate::events::{EventSink, GameEvent, LogSink};
pub use crate::ranking::{Leaderboard, MemoryRanking, RankingRepository};

#[cfg(feature = "std")]
pub use crate::init_logging;
