//! Gamemath - Casino Game Outcome Engine
//!
//! Pure per-round math for nine chance games. Each round consumes one
//! externally supplied uniform value in `[0, 1)`, the game's configuration
//! and the player's options, and returns an outcome, a payout multiplier and
//! the data an auditor needs to recompute both.
//!
//! ```no_run
//! use gamemath::{GameOptions, GameProcessor};
//!
//! let processor = GameProcessor::default();
//! let result = processor
//!     .run_game_math("dice", 0.999, None, &GameOptions::default())?
//!     .expect("dice is a supported game");
//! println!("{:?} pays {:?}", result.outcome, result.payout_multiplier);
//! # Ok::<(), gamemath::GameMathError>(())
//! ```

pub mod errors;
pub mod config;
pub mod common;
pub mod games;

pub use common::config::{generate_sample_config, ConfigBuilder, ConfigLoader};
pub use common::types::RoundValue;
pub use config::{
    ConfigOverrides, EngineConfig, GameConfig, MAX_REELS, MAX_ROLL_MAGNITUDE, MAX_RTP, MAX_TOTAL_TILES,
    MIN_RTP,
};
pub use errors::{ConfigurationError, GameMathError, GameMathResult};
pub use games::{
    run_game_math, simulate, ConfigRegistry, GameOptions, GameProcessor, GameResult, GameType,
    Outcome, SimulationReport, VerificationData,
};
