pub mod types;
pub mod sequence;
pub mod registry;
pub mod coin_flip;
pub mod dice;
pub mod crash;
pub mod limbo;
pub mod plinko;
pub mod mines;
pub mod roulette;
pub mod hi_lo;
pub mod slots;
pub mod processor;
pub mod simulation;

pub use types::*;
pub use registry::{ConfigRegistry, RtpDiscrepancy};
pub use processor::{generate, run_game_math, GameProcessor};
pub use simulation::{simulate, SimulationReport};
