#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod ai;
mod bitboard;
mod board;
mod common;
mod config;
mod controller;
pub mod events;
mod game;
#[cfg(feature = "std")]
mod logging;
mod player;
mod player_ai;
mod player_human;
pub mod prelude;
pub mod ranking;
mod ship;

pub use ai::*;
pub use bitboard::{BitBoard, BitBoardError};
pub use board::*;
pub use common::*;
pub use config::*;
pub use controller::*;
pub use game::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, LOG_ENV};
pub use player::*;
pub use player_ai::*;
pub use player_human::*;
pub use ship::*;
