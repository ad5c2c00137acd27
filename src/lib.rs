//! Fleet battle simulator: two fleets of typed ships trade fire for up to six
//! rounds with shield absorption, critical hull failure and shield
//! regeneration between rounds.

pub mod cli;
pub mod combat;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod monte_carlo;
pub mod parallel;
pub mod render;

pub use combat::{BattleCalculator, BattleReport, Fleet, ShipType, Winner};
pub use error::{BattleError, Result};
