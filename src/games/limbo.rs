use crate::common::traits::OutcomeGenerator;
use crate::common::types::RoundValue;
use crate::config::LimboConfig;
use crate::errors::GameMathResult;
use crate::games::crash::{check_multiplier_option, curve_multiplier};
use crate::games::types::{GameOptions, GameResult, GameType, Outcome, VerificationData};

const DEFAULT_TARGET: f64 = 2.0;

/// Limbo: win when the drawn multiplier reaches the player's target
pub struct Limbo;

impl OutcomeGenerator for Limbo {
    type Config = LimboConfig;
    const GAME: GameType = GameType::Limbo;

    fn generate(value: RoundValue, config: &LimboConfig, options: &GameOptions) -> GameMathResult<GameResult> {
        let target = check_multiplier_option(
            Self::GAME,
            "target_multiplier",
            options.target_multiplier.unwrap_or(DEFAULT_TARGET),
        )?;

        let outcome_multiplier = curve_multiplier(
            value.get(),
            config.curve_exponent,
            config.min_multiplier,
            config.max_multiplier,
        );
        let win = outcome_multiplier >= target;
        let payout = if win { target * config.rtp } else { 0.0 };

        Ok(GameResult {
            game: Self::GAME,
            value: value.get(),
            outcome: Outcome::Limbo {
                outcome_multiplier,
                win,
            },
            payout_multiplier: Some(payout),
            verification: VerificationData::Limbo {
                value: value.get(),
                outcome_multiplier,
                target_multiplier: target,
                curve_exponent: config.curve_exponent,
                min_multiplier: config.min_multiplier,
                max_multiplier: config.max_multiplier,
                rtp: config.rtp,
            },
        })
    }
}
