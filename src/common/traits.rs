//! Shared traits and interfaces
//!
//! Each game implements [`OutcomeGenerator`] once; the dispatcher matches on
//! the resolved [`crate::config::GameConfig`] so every game is wired at
//! compile time.

use crate::common::types::RoundValue;
use crate::errors::GameMathResult;
use crate::games::types::{GameOptions, GameResult, GameType};

/// Pure mapping from a round value, a config record and player options to a
/// round result
pub trait OutcomeGenerator {
    /// Config record this game reads
    type Config;

    /// Game handled by this generator
    const GAME: GameType;

    /// Compute one round. Must be deterministic and side-effect free.
    fn generate(
        value: RoundValue,
        config: &Self::Config,
        options: &GameOptions,
    ) -> GameMathResult<GameResult>;
}
