//! Round dispatch: resolves a game's config, checks the round value and
//! hands both to the matching outcome generator.

use crate::common::traits::OutcomeGenerator;
use crate::common::types::RoundValue;
use crate::config::{ConfigOverrides, GameConfig};
use crate::errors::GameMathResult;
use crate::games::registry::ConfigRegistry;
use crate::games::types::{GameOptions, GameResult, GameType};
use crate::games::{
    coin_flip::CoinFlip, crash::Crash, dice::Dice, hi_lo::HiLo, limbo::Limbo, mines::Mines,
    plinko::Plinko, roulette::Roulette, slots::Slots,
};
use std::sync::Arc;
use tracing::debug;

/// Run the generator matching `config` for one round
pub fn generate(value: RoundValue, config: &GameConfig, options: &GameOptions) -> GameMathResult<GameResult> {
    match config {
        GameConfig::CoinFlip(c) => CoinFlip::generate(value, c, options),
        GameConfig::Dice(c) => Dice::generate(value, c, options),
        GameConfig::Crash(c) => Crash::generate(value, c, options),
        GameConfig::Limbo(c) => Limbo::generate(value, c, options),
        GameConfig::Plinko(c) => Plinko::generate(value, c, options),
        GameConfig::Mines(c) => Mines::generate(value, c, options),
        GameConfig::Roulette(c) => Roulette::generate(value, c, options),
        GameConfig::HiLo(c) => HiLo::generate(value, c, options),
        GameConfig::Slots(c) => Slots::generate(value, c, options),
    }
}

/// Resolve the config for `game_id` and play one round.
///
/// Returns `Ok(None)` when `game_id` is not a supported game; nothing else
/// is checked in that case.
pub fn run_game_math(
    registry: &ConfigRegistry,
    game_id: &str,
    value: f64,
    overrides: Option<&ConfigOverrides>,
    options: &GameOptions,
) -> GameMathResult<Option<GameResult>> {
    let Some(game) = GameType::from_id(game_id) else {
        debug!("Unknown game id '{}'", game_id);
        return Ok(None);
    };

    play_game(registry, game, value, overrides, options).map(Some)
}

fn play_game(
    registry: &ConfigRegistry,
    game: GameType,
    value: f64,
    overrides: Option<&ConfigOverrides>,
    options: &GameOptions,
) -> GameMathResult<GameResult> {
    let value = RoundValue::new(value)?;
    let config = registry.resolve(game, overrides)?;
    let result = generate(value, &config, options)?;

    debug!(
        "{} round value={} payout={:?} win={:?}",
        game,
        value,
        result.payout_multiplier,
        result.win()
    );

    Ok(result)
}

/// Routes rounds to their game and verifies recorded rounds
#[derive(Clone, Debug)]
pub struct GameProcessor {
    registry: Arc<ConfigRegistry>,
}

impl GameProcessor {
    /// Create a new game processor
    pub fn new(registry: Arc<ConfigRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ConfigRegistry {
        &self.registry
    }

    /// Play one round of a known game
    pub fn play(
        &self,
        game: GameType,
        value: f64,
        overrides: Option<&ConfigOverrides>,
        options: &GameOptions,
    ) -> GameMathResult<GameResult> {
        play_game(&self.registry, game, value, overrides, options)
    }

    /// String-keyed entry point; `Ok(None)` for unknown games
    pub fn run_game_math(
        &self,
        game_id: &str,
        value: f64,
        overrides: Option<&ConfigOverrides>,
        options: &GameOptions,
    ) -> GameMathResult<Option<GameResult>> {
        run_game_math(&self.registry, game_id, value, overrides, options)
    }

    /// Replay a recorded round and check it reproduces exactly.
    ///
    /// `overrides` and `options` must be the ones used for the original
    /// round. Any error while replaying counts as a mismatch.
    pub fn verify(
        &self,
        result: &GameResult,
        overrides: Option<&ConfigOverrides>,
        options: &GameOptions,
    ) -> bool {
        match self.play(result.game, result.value, overrides, options) {
            Ok(replayed) => replayed == *result && replayed.fingerprint() == result.fingerprint(),
            Err(e) => {
                debug!("Replay of {} round failed: {}", result.game, e);
                false
            }
        }
    }
}

impl Default for GameProcessor {
    fn default() -> Self {
        Self::new(Arc::new(ConfigRegistry::default()))
    }
}
