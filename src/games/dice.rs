//! Dice: roll over/under a target on an inclusive integer range.
//!
//! The paid multiplier is the fair `1 / win_chance` scaled by RTP and capped;
//! a roll exactly on the target is a push.

use crate::common::traits::OutcomeGenerator;
use crate::common::types::RoundValue;
use crate::config::DiceConfig;
use crate::errors::{GameMathError, GameMathResult};
use crate::games::types::{DiceDirection, GameOptions, GameResult, GameType, Outcome, VerificationData};

pub struct Dice;

/// Roll for a value on `[min_roll, max_roll]`
pub fn roll(value: f64, min_roll: i64, max_roll: i64) -> i64 {
    let span = (max_roll - min_roll + 1) as f64;
    (min_roll + (value * span).floor() as i64).clamp(min_roll, max_roll)
}

/// Fraction of the integer rolls strictly beyond `target` in `direction`
pub fn win_chance(direction: DiceDirection, target: f64, min_roll: i64, max_roll: i64) -> f64 {
    let span = (max_roll - min_roll + 1) as f64;
    match direction {
        DiceDirection::Over => (max_roll as f64 - target.floor()) / span,
        DiceDirection::Under => (target.ceil() - min_roll as f64) / span,
    }
}

impl OutcomeGenerator for Dice {
    type Config = DiceConfig;
    const GAME: GameType = GameType::Dice;

    fn generate(value: RoundValue, config: &DiceConfig, options: &GameOptions) -> GameMathResult<GameResult> {
        let direction = match options.choice {
            None => DiceDirection::Over,
            Some(choice) => choice.dice_direction().ok_or_else(|| {
                GameMathError::invalid_option(Self::GAME, "choice", "expected over or under")
            })?,
        };

        let target = options
            .target
            .unwrap_or(((config.min_roll + config.max_roll) / 2) as f64);
        if !target.is_finite() || target < config.min_roll as f64 || target > config.max_roll as f64 {
            return Err(GameMathError::invalid_option(
                Self::GAME,
                "target",
                format!(
                    "{} is outside the roll range {}..={}",
                    target, config.min_roll, config.max_roll
                ),
            ));
        }

        let chance = win_chance(direction, target, config.min_roll, config.max_roll);
        if chance <= 0.0 {
            return Err(GameMathError::invalid_option(
                Self::GAME,
                "target",
                format!("no winning rolls beyond {}", target),
            ));
        }

        let rolled = roll(value.get(), config.min_roll, config.max_roll);
        let push = rolled as f64 == target;
        let win = !push
            && match direction {
                DiceDirection::Over => rolled as f64 > target,
                DiceDirection::Under => (rolled as f64) < target,
            };

        let payout = if push {
            1.0
        } else if win {
            ((1.0 / chance) * config.rtp).min(config.max_payout)
        } else {
            0.0
        };

        Ok(GameResult {
            game: Self::GAME,
            value: value.get(),
            outcome: Outcome::Dice {
                roll: rolled,
                win,
                push,
            },
            payout_multiplier: Some(payout),
            verification: VerificationData::Dice {
                value: value.get(),
                roll: rolled,
                target,
                choice: direction,
                win_chance: chance,
                rtp: config.rtp,
                min_roll: config.min_roll,
                max_roll: config.max_roll,
                max_payout: config.max_payout,
            },
        })
    }
}
