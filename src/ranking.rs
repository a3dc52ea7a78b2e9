//! Match scoring and leaderboard queries.
//!
//! Storage is behind [`RankingRepository`]; only an in-memory store ships
//! with the crate. Repositories also own the player accounts scores are
//! filed under.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use crate::controller::MatchSummary;

const WIN_BONUS: i64 = 1000;
const SPEED_BONUS: i64 = 500;
const SPEED_PENALTY_PER_TURN: i64 = 5;
const SURVIVOR_BONUS: i64 = 100;
const ACCURACY_WEIGHT: f64 = 500.0;

/// Score a finished match.
///
/// A win is worth 1000 plus up to 500 for speed (5 less per turn). Every
/// surviving own ship adds 100 and accuracy adds up to 500. Never negative.
pub fn calculate_score(won: bool, turns: u32, ships_remaining: usize, accuracy: f64) -> u32 {
    let mut score: i64 = 0;
    if won {
        score += WIN_BONUS;
        score += (SPEED_BONUS - i64::from(turns) * SPEED_PENALTY_PER_TURN).max(0);
    }
    score += ships_remaining as i64 * SURVIVOR_BONUS;
    score += (accuracy * ACCURACY_WEIGHT) as i64;
    score.clamp(0, i64::from(u32::MAX)) as u32
}

/// Two-decimal rounding. Exact halves round away from zero.
fn round2(value: f64) -> f64 {
    libm::round(value * 100.0) / 100.0
}

/// One stored match result.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct RankingEntry {
    pub player_name: String,
    pub won: bool,
    pub turns: u32,
    pub ships_remaining: usize,
    /// Percentage, two decimals.
    pub accuracy: f64,
    pub score: u32,
}

impl RankingEntry {
    /// Score `summary` and turn it into a storable entry.
    pub fn from_summary(summary: &MatchSummary) -> Self {
        Self {
            player_name: summary.player_name.clone(),
            won: summary.won,
            turns: summary.turns,
            ships_remaining: summary.ships_remaining,
            accuracy: round2(summary.accuracy * 100.0),
            score: calculate_score(
                summary.won,
                summary.turns,
                summary.ships_remaining,
                summary.accuracy,
            ),
        }
    }
}

/// Aggregate results for one player.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerStats {
    pub player_name: String,
    pub total_matches: usize,
    pub wins: usize,
    pub losses: usize,
    /// Percentage, two decimals.
    pub win_rate: f64,
    pub total_score: u64,
    /// Mean of the stored accuracy percentages, two decimals.
    pub average_accuracy: f64,
    pub best_score: u32,
}

/// Account failures. Carried inside the repository's `anyhow::Error`, so
/// callers can `downcast_ref::<AccountError>()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    UserExists(String),
    UnknownUser(String),
    WrongPassword,
}

impl fmt::Display for AccountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountError::UserExists(name) => write!(f, "User {} already exists", name),
            AccountError::UnknownUser(name) => write!(f, "User {} not found", name),
            AccountError::WrongPassword => write!(f, "Wrong password"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AccountError {}

/// Storage for player accounts and match results.
pub trait RankingRepository {
    /// Register `username`. Fails with [`AccountError::UserExists`] when the
    /// name is taken.
    fn create_user(&mut self, username: &str, password: &str) -> anyhow::Result<()>;

    /// Check credentials. Fails with [`AccountError::UnknownUser`] or
    /// [`AccountError::WrongPassword`].
    fn authenticate_user(&self, username: &str, password: &str) -> anyhow::Result<()>;

    fn add_score(&mut self, entry: RankingEntry) -> anyhow::Result<()>;

    /// Every stored entry in insertion order.
    fn entries(&self) -> anyhow::Result<Vec<RankingEntry>>;

    fn clear_all(&mut self) -> anyhow::Result<()>;

    /// Best `limit` entries, highest score first. Ties keep insertion order.
    fn top_scores(&self, limit: usize) -> anyhow::Result<Vec<RankingEntry>> {
        let mut entries = self.entries()?;
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(limit);
        Ok(entries)
    }

    /// `None` when the player has no recorded match.
    fn player_stats(&self, player_name: &str) -> anyhow::Result<Option<PlayerStats>> {
        let matches: Vec<RankingEntry> = self
            .entries()?
            .into_iter()
            .filter(|e| e.player_name == player_name)
            .collect();
        if matches.is_empty() {
            return Ok(None);
        }

        let total = matches.len();
        let wins = matches.iter().filter(|m| m.won).count();
        let total_score = matches.iter().map(|m| u64::from(m.score)).sum();
        let accuracy_sum: f64 = matches.iter().map(|m| m.accuracy).sum();
        let best_score = matches.iter().map(|m| m.score).max().unwrap_or(0);

        Ok(Some(PlayerStats {
            player_name: String::from(player_name),
            total_matches: total,
            wins,
            losses: total - wins,
            win_rate: round2(wins as f64 / total as f64 * 100.0),
            total_score,
            average_accuracy: round2(accuracy_sum / total as f64),
            best_score,
        }))
    }
}

/// Repository kept in memory for the lifetime of the process. Credentials
/// are compared verbatim; hashing belongs to persistent stores.
#[derive(Debug, Clone, Default)]
pub struct MemoryRanking {
    users: BTreeMap<String, String>,
    entries: Vec<RankingEntry>,
}

impl MemoryRanking {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RankingRepository for MemoryRanking {
    fn create_user(&mut self, username: &str, password: &str) -> anyhow::Result<()> {
        if self.users.contains_key(username) {
            return Err(anyhow::Error::msg(AccountError::UserExists(
                username.to_string(),
            )));
        }
        self.users.insert(username.to_string(), password.to_string());
        Ok(())
    }

    fn authenticate_user(&self, username: &str, password: &str) -> anyhow::Result<()> {
        match self.users.get(username) {
            None => Err(anyhow::Error::msg(AccountError::UnknownUser(
                username.to_string(),
            ))),
            Some(stored) if stored != password => Err(anyhow::Error::msg(AccountError::WrongPassword)),
            Some(_) => Ok(()),
        }
    }

    fn add_score(&mut self, entry: RankingEntry) -> anyhow::Result<()> {
        self.entries.push(entry);
        Ok(())
    }

    fn entries(&self) -> anyhow::Result<Vec<RankingEntry>> {
        Ok(self.entries.clone())
    }

    fn clear_all(&mut self) -> anyhow::Result<()> {
        self.entries.clear();
        Ok(())
    }
}

/// Scores finished matches and stores them in a repository.
#[derive(Debug, Default)]
pub struct Leaderboard<R> {
    repo: R,
}

impl<R: RankingRepository> Leaderboard<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn register(&mut self, username: &str, password: &str) -> anyhow::Result<()> {
        self.repo.create_user(username, password)?;
        log::info!("account created: {}", username);
        Ok(())
    }

    pub fn login(&self, username: &str, password: &str) -> anyhow::Result<()> {
        self.repo.authenticate_user(username, password)
    }

    /// Score and store a match. Returns the stored entry.
    pub fn record_match(&mut self, summary: &MatchSummary) -> anyhow::Result<RankingEntry> {
        let entry = RankingEntry::from_summary(summary);
        self.repo.add_score(entry.clone())?;
        log::info!(
            "ranking saved: {} {} with {} points",
            entry.player_name,
            if entry.won { "won" } else { "lost" },
            entry.score
        );
        Ok(entry)
    }

    pub fn top(&self, limit: usize) -> anyhow::Result<Vec<RankingEntry>> {
        self.repo.top_scores(limit)
    }

    pub fn stats(&self, player_name: &str) -> anyhow::Result<Option<PlayerStats>> {
        self.repo.player_stats(player_name)
    }

    pub fn clear(&mut self) -> anyhow::Result<()> {
        self.repo.clear_all()
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }
}
